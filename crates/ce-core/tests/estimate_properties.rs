//! Property-based tests for estimator and zone-average invariants.

use ce_common::ZoneSelection;
use ce_core::data::{generate_routes, GeneratorParams, RouteTable};
use ce_core::estimate::{potholes_from_quality, Estimator, RoadCondition, TripRequest};
use ce_core::zones::{zone_average, AverageBasis, AveragePolicy};
use ce_config::EstimatorParams;
use proptest::prelude::*;

fn time(distance: f64, signals: u32, potholes: u32) -> f64 {
    Estimator::default()
        .estimate(&TripRequest::new(
            distance,
            signals,
            RoadCondition::Potholes(potholes),
        ))
        .predicted_time_min
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn time_increases_with_distance(d in 0.0f64..500.0, extra in 0.01f64..50.0, s in 0u32..50, p in 0u32..40) {
        prop_assert!(time(d + extra, s, p) > time(d, s, p));
    }

    #[test]
    fn time_increases_with_signals(d in 0.0f64..500.0, s in 0u32..500, p in 0u32..40) {
        prop_assert!(time(d, s + 1, p) > time(d, s, p));
    }

    #[test]
    fn time_increases_with_potholes(d in 0.0f64..500.0, s in 0u32..50, p in 0u32..500) {
        prop_assert!(time(d, s, p + 1) > time(d, s, p));
    }

    #[test]
    fn worse_road_never_shortens_trip(d in 1.0f64..100.0, s in 0u32..50, q in 2u8..=10) {
        let est = Estimator::default();
        let better = est.estimate(&TripRequest::new(d, s, RoadCondition::Quality(q)));
        let worse = est.estimate(&TripRequest::new(d, s, RoadCondition::Quality(q - 1)));
        prop_assert!(worse.estimated_potholes >= better.estimated_potholes);
        prop_assert!(worse.predicted_time_min >= better.predicted_time_min);
    }

    #[test]
    fn fuel_and_cost_follow_time(d in 0.0f64..100.0, s in 0u32..50, q in 1u8..=10) {
        let out = Estimator::default().estimate(&TripRequest::new(d, s, RoadCondition::Quality(q)));
        prop_assert!((out.fuel_loss_liters - out.predicted_time_min / 60.0 * 0.3).abs() < 1e-12);
        prop_assert!((out.fuel_cost - out.fuel_loss_liters * 102.0).abs() < 1e-9);
    }

    #[test]
    fn estimate_is_deterministic(d in 0.0f64..100.0, s in 0u32..50, q in 1u8..=10) {
        let req = TripRequest::new(d, s, RoadCondition::Quality(q));
        let a = Estimator::default().estimate(&req);
        let b = Estimator::default().estimate(&req);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn zone_average_stays_in_range(seed in 0u64..200, n in 0usize..80, zone in "[A-Za-z ]{0,12}") {
        let table = generate_routes(seed, n, &GeneratorParams::default());
        let avg = zone_average(&table, &ZoneSelection::parse(&zone), &AveragePolicy::default());
        prop_assert!((1..=10).contains(&avg.quality));
        prop_assert!(avg.signals <= 30 || avg.basis == AverageBasis::Neutral);
    }
}

#[test]
fn quality_seven_maps_to_seven_potholes() {
    let params = EstimatorParams::default();
    assert_eq!(
        potholes_from_quality(7, params.potholes_per_quality_step),
        7
    );
}

#[test]
fn empty_table_zone_average_is_neutral() {
    let avg = zone_average(
        &RouteTable::empty(),
        &ZoneSelection::UnknownRoute,
        &AveragePolicy::default(),
    );
    assert_eq!(avg.basis, AverageBasis::Neutral);
    assert_eq!((avg.signals, avg.quality), (14, 5));
}
