//! Tests for route table loading, generation, and caching across strategies.

use ce_config::{Config, DataSourceConfig};
use ce_core::cache::TableCache;
use ce_core::dashboard::Dashboard;
use ce_core::data::{load_or_generate, source_for, write_routes, DataError, SourceKey};
use std::fs::{self, File};
use std::sync::Arc;
use tempfile::tempdir;

fn synthetic(seed: u64) -> DataSourceConfig {
    DataSourceConfig::Synthetic { seed, samples: 50 }
}

#[test]
fn default_seed_reproduces_table_bytes() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    write_routes(&load_or_generate(&synthetic(42)).expect("gen"), &mut first).expect("write");
    write_routes(&load_or_generate(&synthetic(42)).expect("gen"), &mut second).expect("write");
    assert_eq!(first, second);
    assert_eq!(String::from_utf8(first).expect("utf8").lines().count(), 51);
}

#[test]
fn exported_synthetic_table_loads_identically() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("routes.csv");
    let generated = load_or_generate(&synthetic(42)).expect("gen");
    write_routes(&generated, File::create(&path).expect("create")).expect("write");

    let loaded = load_or_generate(&DataSourceConfig::File { path }).expect("load");
    assert_eq!(loaded, generated);
}

#[test]
fn missing_file_signals_recoverable_error() {
    let dir = tempdir().expect("tempdir");
    let config = DataSourceConfig::File {
        path: dir.path().join("absent.csv"),
    };
    let err = load_or_generate(&config).unwrap_err();
    assert!(matches!(err, DataError::MissingDataSource { .. }));
    let common: ce_common::Error = err.into();
    assert!(common.is_recoverable());
}

#[test]
fn directory_path_disables_dashboard_with_named_notice() {
    let dir = tempdir().expect("tempdir");
    let routes_dir = dir.path().join("routes");
    fs::create_dir(&routes_dir).expect("mkdir");
    let config = Config {
        data: DataSourceConfig::File {
            path: routes_dir.clone(),
        },
        ..Config::default()
    };

    let mut cache = TableCache::new();
    let dashboard = Dashboard::open(&config, &mut cache).expect("open");
    assert!(!dashboard.is_interactive());
    let notice = dashboard.notice().expect("notice");
    assert!(notice.contains(&routes_dir.display().to_string()), "{notice}");
}

#[test]
fn file_appearing_later_is_picked_up() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("routes.csv");
    let config = Config {
        data: DataSourceConfig::File { path: path.clone() },
        ..Config::default()
    };
    let mut cache = TableCache::new();

    let disabled = Dashboard::open(&config, &mut cache).expect("degraded");
    assert!(!disabled.is_interactive());

    fs::write(
        &path,
        "Zone,Distance_km,Time_min,Signals,Potholes\nHebbal,12,50,15,6\n",
    )
    .expect("write");
    let enabled = Dashboard::open(&config, &mut cache).expect("open");
    assert!(enabled.is_interactive());
    assert_eq!(enabled.table().len(), 1);
}

#[test]
fn cache_keys_distinguish_strategies() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("routes.csv");
    write_routes(
        &load_or_generate(&synthetic(1)).expect("gen"),
        File::create(&path).expect("create"),
    )
    .expect("write");

    let file_source = source_for(&DataSourceConfig::File { path: path.clone() });
    let synth_source = source_for(&synthetic(1));
    assert!(matches!(file_source.key().expect("key"), SourceKey::File { .. }));

    let mut cache = TableCache::new();
    let a = cache.get_or_load(file_source.as_ref()).expect("file");
    let b = cache.get_or_load(synth_source.as_ref()).expect("synthetic");
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(*a, *b, "exported table reads back unchanged");
    assert_eq!(cache.len(), 2);
}
