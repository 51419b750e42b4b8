//! `commute` — estimate commute time, fuel loss and cost from zone route data.

use ce_common::{OutputFormat, ZoneSelection, SCHEMA_VERSION};
use ce_config::{
    resolve_config, validate_config, Config, ConfigError, ConfigOrigin, ConfigPaths,
    DataOverrides,
};
use ce_core::dashboard::{Dashboard, QualityInput, SignalInput};
use ce_core::data::write_routes;
use ce_core::exit_codes::ExitCode;
use ce_core::zones::ZoneMetric;
use ce_core::{logging, render, TableCache};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "commute",
    version,
    about = "Estimate commute time, fuel loss and cost from zone route data"
)]
struct Cli {
    /// Config file (JSON). Overrides COMMUTE_CONFIG and the XDG config.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Load route samples from this CSV instead of generating them.
    #[arg(long, global = true, value_name = "CSV")]
    data: Option<PathBuf>,

    /// Seed for the synthetic route table.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of synthetic route samples.
    #[arg(long, global = true)]
    samples: Option<usize>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict time, fuel loss and cost for one trip.
    Estimate(EstimateArgs),
    /// Per-zone average signals and road quality.
    Zones,
    /// Raw route table.
    Table,
    /// Write the route table as CSV.
    Export {
        /// Destination file.
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct EstimateArgs {
    /// Commute distance in km.
    #[arg(long, short)]
    distance: Option<f64>,

    /// Zone name as listed by `commute zones`.
    #[arg(long, short, conflicts_with = "unknown_route")]
    zone: Option<String>,

    /// Route outside the listed zones; averages use the whole table.
    #[arg(long)]
    unknown_route: bool,

    /// Number of traffic signals.
    #[arg(long, conflicts_with = "zone_signals")]
    signals: Option<u32>,

    /// Use the zone's average signal count.
    #[arg(long)]
    zone_signals: bool,

    /// Road quality rating, 1 (many potholes) to 10 (smooth).
    #[arg(long, conflicts_with = "zone_quality")]
    quality: Option<u8>,

    /// Use the zone's average road quality.
    #[arg(long)]
    zone_quality: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective configuration.
    Show,
    /// Check the configuration and exit.
    Validate,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_json);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err, cli.format);
            ExitCode::for_error(&err)
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: &Cli) -> ce_common::Result<ExitCode> {
    let resolved = resolve_config(&ConfigPaths::discover(cli.config.clone()))?;
    let mut config = resolved.config;
    config.apply_data_overrides(&DataOverrides {
        file: cli.data.clone(),
        seed: cli.seed,
        samples: cli.samples,
    });
    validate_config(&config).map_err(ConfigError::Invalid)?;

    if let Command::Config { action } = &cli.command {
        return Ok(config_command(action, &config, &resolved.origin, cli.format));
    }

    let mut cache = TableCache::new();
    let dashboard = Dashboard::open(&config, &mut cache)?;
    if !dashboard.is_interactive() {
        report_unavailable(&dashboard, cli.format);
        return Ok(ExitCode::DataUnavailable);
    }

    match &cli.command {
        Command::Estimate(args) => estimate_command(&dashboard, args, cli.format),
        Command::Zones => {
            zones_command(&dashboard, cli.format);
            Ok(ExitCode::Clean)
        }
        Command::Table => {
            table_command(&dashboard, cli.format);
            Ok(ExitCode::Clean)
        }
        Command::Export { out } => export_command(&dashboard, out, cli.format),
        Command::Config { .. } => Ok(ExitCode::Clean),
    }
}

fn print_json(command: &str, body: Value) {
    let mut doc = json!({
        "schema_version": SCHEMA_VERSION,
        "command": command,
    });
    if let (Some(doc), Value::Object(fields)) = (doc.as_object_mut(), body) {
        doc.extend(fields);
    }
    match serde_json::to_string_pretty(&doc) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("error: failed to encode output: {e}"),
    }
}

fn report_error(err: &ce_common::Error, format: OutputFormat) {
    if format.is_json() {
        print_json(
            "error",
            json!({
                "status": "error",
                "code": err.code(),
                "message": err.to_string(),
            }),
        );
    } else {
        eprintln!("error: {err}");
    }
}

fn report_unavailable(dashboard: &Dashboard, format: OutputFormat) {
    let notice = dashboard.notice().unwrap_or("route table is empty");
    if format.is_json() {
        print_json(
            "unavailable",
            json!({
                "status": "unavailable",
                "notice": notice,
            }),
        );
    } else {
        eprintln!("error: {notice}");
        eprintln!("estimates are disabled until route data is available");
    }
}

fn estimate_command(
    dashboard: &Dashboard,
    args: &EstimateArgs,
    format: OutputFormat,
) -> ce_common::Result<ExitCode> {
    let mut inputs = dashboard.default_inputs();
    if let Some(distance) = args.distance {
        inputs.distance_km = distance;
    }
    if args.unknown_route {
        inputs.zone = ZoneSelection::UnknownRoute;
    } else if let Some(zone) = &args.zone {
        inputs.zone = ZoneSelection::parse(zone);
    }
    if args.zone_signals {
        inputs.signals = SignalInput::ZoneAverage;
    } else if let Some(n) = args.signals {
        inputs.signals = SignalInput::Manual(n);
    }
    if args.zone_quality {
        inputs.road = QualityInput::ZoneAverage;
    } else if let Some(q) = args.quality {
        inputs.road = QualityInput::Manual(q);
    }

    let view = dashboard
        .evaluate(&inputs)
        .map_err(|e| ce_common::Error::DataSource(e.to_string()))?;
    let currency = &dashboard.estimator().fuel().currency;

    if format.is_json() {
        print_json(
            "estimate",
            json!({
                "status": "ok",
                "view": view,
                "display": {
                    "predicted_time": render::format_time(view.estimate.predicted_time_min),
                    "fuel_loss": render::format_fuel(view.estimate.fuel_loss_liters),
                    "fuel_cost": render::format_cost(view.estimate.fuel_cost, currency),
                    "caption": render::pothole_caption(&view),
                },
            }),
        );
    } else {
        print!("{}", render::render_view(&view, currency));
    }
    Ok(ExitCode::Clean)
}

fn zones_command(dashboard: &Dashboard, format: OutputFormat) {
    let signals = dashboard.chart(ZoneMetric::Signals);
    let quality = dashboard.chart(ZoneMetric::RoadQuality);
    let summaries = dashboard.summaries();

    if format.is_json() {
        print_json(
            "zones",
            json!({
                "status": "ok",
                "zones": dashboard.zone_choices(),
                "signals_by_zone": signals,
                "road_quality_by_zone": quality,
                "summaries": summaries,
            }),
        );
    } else {
        print!("{}", render::render_bar_chart(ZoneMetric::Signals.title(), &signals));
        println!();
        print!(
            "{}",
            render::render_bar_chart(ZoneMetric::RoadQuality.title(), &quality)
        );
        println!();
        print!("{}", render::render_summaries(&summaries));
    }
}

fn table_command(dashboard: &Dashboard, format: OutputFormat) {
    if format.is_json() {
        print_json(
            "table",
            json!({
                "status": "ok",
                "rows": dashboard.table(),
            }),
        );
    } else {
        print!("{}", render::render_table(dashboard.table()));
    }
}

fn export_command(
    dashboard: &Dashboard,
    out: &Path,
    format: OutputFormat,
) -> ce_common::Result<ExitCode> {
    let file = File::create(out)?;
    write_routes(dashboard.table(), BufWriter::new(file))?;
    let rows = dashboard.table().len();
    info!(path = %out.display(), rows, "exported route table");

    if format.is_json() {
        print_json(
            "export",
            json!({
                "status": "ok",
                "path": out.display().to_string(),
                "rows": rows,
            }),
        );
    } else {
        println!("wrote {rows} rows to {}", out.display());
    }
    Ok(ExitCode::Clean)
}

fn config_command(
    action: &ConfigCommand,
    config: &Config,
    origin: &ConfigOrigin,
    format: OutputFormat,
) -> ExitCode {
    match action {
        ConfigCommand::Show => {
            if format.is_json() {
                print_json(
                    "config show",
                    json!({
                        "status": "ok",
                        "origin": origin,
                        "using_defaults": origin.using_defaults(),
                        "config": config,
                    }),
                );
            } else {
                match origin {
                    ConfigOrigin::Cli(p) | ConfigOrigin::Env(p) | ConfigOrigin::Xdg(p) => {
                        println!("# loaded from {}", p.display())
                    }
                    ConfigOrigin::Defaults => println!("# using built-in defaults"),
                }
                match serde_json::to_string_pretty(config) {
                    Ok(text) => println!("{text}"),
                    Err(e) => eprintln!("error: failed to encode config: {e}"),
                }
            }
        }
        ConfigCommand::Validate => {
            if format.is_json() {
                print_json(
                    "config validate",
                    json!({
                        "status": "ok",
                        "using_defaults": origin.using_defaults(),
                    }),
                );
            } else {
                println!("configuration is valid");
            }
        }
    }
    ExitCode::Clean
}
