use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use ev_battery_health::{
    model::{Anomaly, AnomalyKind, BatteryHealthReport, HealthBand},
    quantity::ratios::Percent,
};
use itertools::Itertools;

#[must_use]
pub fn build_report_table(report: &BatteryHealthReport) -> Table {
    let mut table = new_table();
    table.set_header(vec![Cell::new("Vehicle"), Cell::new(&report.vehicle_id)]);
    table.add_row(vec![
        Cell::new("Analyzed at"),
        Cell::new(report.analysis_timestamp.format("%Y-%m-%d %H:%M:%S")),
    ]);
    table.add_row(vec![
        Cell::new("State of health"),
        Cell::new(format!("{} ({})", report.state_of_health, report.health_band)).fg(
            match report.health_band {
                HealthBand::Excellent => Color::Green,
                HealthBand::Good => Color::Reset,
                HealthBand::Fair => Color::DarkYellow,
                HealthBand::Poor => Color::Red,
            },
        ),
    ]);
    table.add_row(vec![
        Cell::new("Remaining capacity"),
        Cell::new(report.estimated_remaining_capacity),
    ]);
    table.add_row(vec![
        Cell::new("Charge cycles"),
        Cell::new(format!(
            "{} ({:.1} equivalent)",
            report.charge_cycle_count, report.equivalent_cycles,
        )),
    ]);
    table.add_row(vec![
        Cell::new("Degradation rate"),
        Cell::new(report.degradation_rate).fg(
            if report.anomalies.iter().any(|anomaly| anomaly.kind == AnomalyKind::RapidDegradation)
            {
                Color::Red
            } else {
                Color::Reset
            },
        ),
    ]);
    table.add_row(vec![
        Cell::new("Confidence"),
        Cell::new(report.confidence_score).fg(confidence_color(report.confidence_score)),
    ]);
    let signals = report.confidence_signals;
    for (label, signal) in [
        ("  history", signals.history),
        ("  completeness", signals.completeness),
        ("  vehicle age", signals.age),
        ("  consistency", signals.consistency),
    ] {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Dim),
            Cell::new(signal).add_attribute(Attribute::Dim),
        ]);
    }
    table.add_row(vec![
        Cell::new("Data quality"),
        if report.data_quality_issues.is_empty() {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new(report.data_quality_issues.iter().join("\n")).fg(Color::DarkYellow)
        },
    ]);
    table
}

#[must_use]
pub fn build_anomalies_table(anomalies: &[Anomaly]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Anomaly", "Description"]);
    for (index, anomaly) in anomalies.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(anomaly.kind).fg(match anomaly.kind {
                AnomalyKind::Overheating | AnomalyKind::RapidDegradation => Color::Red,
                AnomalyKind::VoltageImbalance | AnomalyKind::HighResistance => Color::DarkYellow,
            }),
            Cell::new(&anomaly.description),
        ]);
    }
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn confidence_color(score: Percent) -> Color {
    if score >= Percent(80.0) {
        Color::Green
    } else if score >= Percent(50.0) {
        Color::DarkYellow
    } else {
        Color::Red
    }
}
