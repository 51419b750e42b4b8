//! Text rendering for the CLI front-end.
//!
//! Rounding happens only here: time to whole minutes, fuel to two decimals,
//! cost to whole currency units.

use std::fmt::Write;

use crate::dashboard::DashboardView;
use crate::data::RouteTable;
use crate::zones::{ZoneMean, ZoneSummary};

/// Width of the longest bar in a chart.
pub const BAR_WIDTH: usize = 40;

pub fn format_time(minutes: f64) -> String {
    format!("{minutes:.0} min")
}

pub fn format_fuel(liters: f64) -> String {
    format!("{liters:.2} L")
}

pub fn format_cost(cost: f64, currency: &str) -> String {
    format!("{currency}{cost:.0}")
}

/// Caption under the road-condition control.
pub fn pothole_caption(view: &DashboardView) -> String {
    let mode = if view.quality_from_average {
        "Auto"
    } else {
        "Manual"
    };
    format!(
        "{mode} Estimate: ~{} potholes.",
        view.estimate.estimated_potholes
    )
}

/// The three headline metrics plus how each input was chosen.
pub fn render_view(view: &DashboardView, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Zone: {}", view.inputs.zone);
    let _ = writeln!(out, "Distance: {} km", view.request.distance_km);
    let zone = view.inputs.zone.short_label();
    if view.signals_from_average {
        let _ = writeln!(out, "Use average signals for {zone}");
        let _ = writeln!(out, "Using average: {} signals", view.request.signals);
    } else {
        let _ = writeln!(out, "Signals: {}", view.request.signals);
    }
    if view.quality_from_average {
        let _ = writeln!(out, "Use average road quality for {zone}");
        let _ = writeln!(out, "Using average quality: {}/10", view.quality_rating);
    } else {
        let _ = writeln!(out, "Road quality: {}/10", view.quality_rating);
    }
    let _ = writeln!(out, "{}", pothole_caption(view));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Predicted Time:  {}",
        format_time(view.estimate.predicted_time_min)
    );
    let _ = writeln!(
        out,
        "Est. Fuel Wasted: {}",
        format_fuel(view.estimate.fuel_loss_liters)
    );
    let _ = writeln!(
        out,
        "Trip Cost:       {}",
        format_cost(view.estimate.fuel_cost, currency)
    );
    out
}

/// Horizontal bar chart, bars scaled to the largest mean.
pub fn render_bar_chart(title: &str, bars: &[ZoneMean]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    if bars.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }
    let label_width = bars.iter().map(|b| b.zone.as_str().chars().count()).max().unwrap_or(0);
    let max = bars.iter().map(|b| b.mean).fold(0.0, f64::max);
    for bar in bars {
        let len = if max > 0.0 {
            ((bar.mean / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:<label_width$}  {:<BAR_WIDTH$}  {:.2}",
            bar.zone.as_str(),
            "█".repeat(len),
            bar.mean,
        );
    }
    out
}

/// Per-zone summary table.
pub fn render_summaries(summaries: &[ZoneSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:>7} {:>9} {:>9} {:>8} {:>8}",
        "Zone", "Samples", "Dist km", "Time min", "Signals", "Quality"
    );
    for s in summaries {
        let _ = writeln!(
            out,
            "{:<14} {:>7} {:>9.2} {:>9.2} {:>8.2} {:>8.2}",
            s.zone.as_str(),
            s.samples,
            s.mean_distance_km,
            s.mean_time_min,
            s.mean_signals,
            s.mean_road_quality
        );
    }
    out
}

/// Raw table view in the persisted column order.
pub fn render_table(table: &RouteTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<14} {:>11} {:>9} {:>7} {:>8} {:>12}",
        "#", "Zone", "Distance_km", "Time_min", "Signals", "Potholes", "Road_Quality"
    );
    for (i, row) in table.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<14} {:>11.2} {:>9.2} {:>7} {:>8} {:>12}",
            i,
            row.zone.as_str(),
            row.distance_km,
            row.time_min,
            row.signals,
            row.potholes,
            row.road_quality
        );
    }
    out
}
