use chrono::{DateTime, Utc};

use crate::{
    config::AnalyzerConfig,
    core::{
        anomaly::AnomalyDetector,
        cells::CellStatistics,
        confidence::{ConfidenceScorer, ConfidenceSignals},
        cycles::CycleCount,
        degradation::DegradationEstimator,
        quality::DataQualityIssue,
    },
    model::{BatteryHealthReport, VehicleDiagnosticData},
    prelude::*,
};

/// Battery health analyzer.
///
/// Holds nothing but its configuration: every call is independent, and identical inputs
/// produce identical reports.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Reject configurations that bypassed [`AnalyzerConfig::from_toml`] or the weights builder.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Assess the battery health as of `analysis_timestamp`.
    ///
    /// Never fails: malformed readings lower the confidence score instead.
    #[instrument(skip_all, fields(vehicle_id = %diagnostic.vehicle_id))]
    pub fn analyze(
        &self,
        diagnostic: &VehicleDiagnosticData,
        analysis_timestamp: DateTime<Utc>,
    ) -> BatteryHealthReport {
        let cells = CellStatistics::aggregate(&diagnostic.cells);
        let cycles = diagnostic.charge_history.iter().collect::<CycleCount>();
        let degradation = DegradationEstimator::new(self.config.degradation)
            .estimate(diagnostic, analysis_timestamp);
        debug!(?cells, ?cycles, "aggregated");

        let mut issues = degradation.issues;
        if cells.is_none() {
            issues.insert(DataQualityIssue::NoCellReadings);
        }
        if cycles.n_events == 0 {
            issues.insert(DataQualityIssue::NoChargeEvents);
        }
        if cycles.n_out_of_scale != 0 {
            issues.insert(DataQualityIssue::StateOfChargeOutOfRange);
        }
        for issue in issues {
            warn!(%issue, "data quality issue");
        }

        let anomalies =
            AnomalyDetector::new(self.config.thresholds).detect(cells.as_ref(), degradation.rate);

        let scorer = ConfidenceScorer::new(self.config.confidence);
        let confidence_signals = ConfidenceSignals {
            history: scorer.history_sufficiency(cycles.n_events),
            completeness: scorer
                .cell_completeness(diagnostic.cells.len(), diagnostic.expected_cell_count),
            age: scorer.age_reliability(degradation.age),
            consistency: scorer.consistency(issues),
        };
        let confidence_score = scorer.score(&confidence_signals);

        info!(
            state_of_health = ?degradation.state_of_health,
            n_cycles = cycles.full_cycles(),
            rate = ?degradation.rate,
            confidence = ?confidence_score,
            n_anomalies = anomalies.len(),
            "analyzed",
        );
        BatteryHealthReport {
            vehicle_id: diagnostic.vehicle_id.clone(),
            analysis_timestamp,
            state_of_health: degradation.state_of_health,
            health_band: degradation.health_band(),
            charge_cycle_count: cycles.full_cycles(),
            equivalent_cycles: cycles.equivalent_cycles(),
            degradation_rate: degradation.rate,
            estimated_remaining_capacity: diagnostic.current_capacity,
            confidence_score,
            confidence_signals,
            data_quality_issues: issues.iter().collect(),
            anomalies,
        }
    }
}

/// Analyze with the default thresholds and confidence policy.
pub fn analyze(
    diagnostic: &VehicleDiagnosticData,
    analysis_timestamp: DateTime<Utc>,
) -> BatteryHealthReport {
    Analyzer::default().analyze(diagnostic, analysis_timestamp)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeDelta;

    use super::*;
    use crate::{
        model::{AnomalyKind, BatteryCell, ChargeEvent, EventKind, HealthBand},
        quantity::{
            electric::{Milliohms, Volts},
            energy::KilowattHours,
            ratios::{Percent, PercentPerYear},
            thermal::Celsius,
        },
    };

    fn analysis_timestamp() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z").unwrap().with_timezone(&Utc)
    }

    fn cells() -> Vec<BatteryCell> {
        [(3.92, 32.5), (3.91, 33.1), (3.93, 32.8), (3.89, 34.2), (3.92, 32.9), (3.90, 33.5)]
            .into_iter()
            .enumerate()
            .map(|(i, (voltage, temperature))| {
                BatteryCell::builder()
                    .id(format!("cell_{:03}", i + 1))
                    .voltage(Volts(voltage))
                    .temperature(Celsius(temperature))
                    .internal_resistance(Milliohms(2.2))
                    .build()
            })
            .collect()
    }

    /// Alternating full discharges and recharges, `n_pairs` full cycles in total.
    fn full_swings(n_pairs: usize) -> Vec<ChargeEvent> {
        let start = analysis_timestamp() - TimeDelta::days(1000);
        (0..n_pairs)
            .flat_map(|i| {
                let timestamp = start + TimeDelta::days(i64::try_from(i).unwrap());
                [
                    ChargeEvent::new(
                        timestamp,
                        EventKind::Discharge,
                        Percent::HUNDRED,
                        Percent::ZERO,
                    ),
                    ChargeEvent::new(
                        timestamp + TimeDelta::hours(18),
                        EventKind::Charge,
                        Percent::ZERO,
                        Percent::HUNDRED,
                    ),
                ]
            })
            .collect()
    }

    fn diagnostic(charge_history: Vec<ChargeEvent>) -> VehicleDiagnosticData {
        VehicleDiagnosticData::builder()
            .vehicle_id("TSLA_5YJ3E1EA8KF123456")
            .timestamp(analysis_timestamp())
            .pack_voltage(Volts(350.4))
            .total_capacity(KilowattHours(75.0))
            .current_capacity(KilowattHours(53.25))
            .cells(cells())
            .charge_history(charge_history)
            .odometer_miles(87_500)
            .manufacturing_date(analysis_timestamp() - TimeDelta::days(1095))
            .build()
    }

    #[test]
    fn test_scenario() {
        let report = analyze(&diagnostic(full_swings(250)), analysis_timestamp());
        assert_eq!(report.vehicle_id, "TSLA_5YJ3E1EA8KF123456");
        assert_eq!(report.analysis_timestamp, analysis_timestamp());
        assert_eq!(report.state_of_health, Percent(71.0));
        assert_eq!(report.health_band, HealthBand::Fair);
        assert_eq!(report.charge_cycle_count, 250);
        assert_abs_diff_eq!(report.degradation_rate.0, 9.673, epsilon = 1e-3);
        assert_eq!(report.estimated_remaining_capacity, KilowattHours(53.25));
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].kind, AnomalyKind::RapidDegradation);
        assert_eq!(
            report.anomalies[0].description,
            "Accelerated degradation detected: 9.7% per year",
        );
        assert!(report.data_quality_issues.is_empty());
        assert_eq!(report.confidence_score, Percent::HUNDRED);
    }

    #[test]
    fn test_new_validates_config() {
        assert!(Analyzer::new(AnalyzerConfig::default()).is_ok());

        let mut config = AnalyzerConfig::default();
        config.confidence.weights.history = 0.9;
        assert!(Analyzer::new(config).is_err());
    }

    #[test]
    fn test_idempotence() {
        let diagnostic = diagnostic(full_swings(10));
        let analyzer = Analyzer::default();
        let first = analyzer.analyze(&diagnostic, analysis_timestamp());
        let second = analyzer.analyze(&diagnostic, analysis_timestamp());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap(),
        );
    }

    #[test]
    fn test_confidence_grows_with_history() {
        let without_history = analyze(&diagnostic(Vec::new()), analysis_timestamp());
        let with_history = analyze(&diagnostic(full_swings(50)), analysis_timestamp());
        assert!(without_history.confidence_score < with_history.confidence_score);
        assert!(without_history.confidence_score.is_within_scale());
        assert!(with_history.confidence_score.is_within_scale());
        assert_eq!(without_history.charge_cycle_count, 0);
        assert_eq!(without_history.data_quality_issues, [DataQualityIssue::NoChargeEvents]);
    }

    /// A barren snapshot still produces a report, only with a poor confidence.
    #[test]
    fn test_empty_snapshot() {
        let diagnostic = VehicleDiagnosticData::builder()
            .vehicle_id("EMPTY")
            .timestamp(analysis_timestamp())
            .pack_voltage(Volts::ZERO)
            .total_capacity(KilowattHours::ZERO)
            .current_capacity(KilowattHours::ZERO)
            .manufacturing_date(analysis_timestamp())
            .build();
        let report = analyze(&diagnostic, analysis_timestamp());
        assert_eq!(report.state_of_health, Percent::ZERO);
        assert_eq!(report.health_band, HealthBand::Poor);
        assert_eq!(report.charge_cycle_count, 0);
        assert_eq!(report.degradation_rate, PercentPerYear::ZERO);
        assert!(report.anomalies.is_empty());
        assert_eq!(
            report.data_quality_issues,
            [
                DataQualityIssue::NonPositiveTotalCapacity,
                DataQualityIssue::NoCellReadings,
                DataQualityIssue::NoChargeEvents,
            ],
        );
        assert_eq!(report.confidence_score, Percent(10.0));
    }

    #[test]
    fn test_malformed_state_of_charge() {
        let mut events = full_swings(30);
        events.push(ChargeEvent::new(
            analysis_timestamp(),
            EventKind::Discharge,
            Percent(130.0),
            Percent(-20.0),
        ));
        let report = analyze(&diagnostic(events), analysis_timestamp());
        assert_eq!(report.charge_cycle_count, 30);
        assert_abs_diff_eq!(report.equivalent_cycles, 30.5);
        assert_eq!(report.data_quality_issues, [DataQualityIssue::StateOfChargeOutOfRange]);
        assert_eq!(report.confidence_signals.consistency, Percent(80.0));
        assert_eq!(report.confidence_score, Percent(95.0));
    }

    #[test]
    fn test_incomplete_pack() {
        let mut diagnostic = diagnostic(full_swings(50));
        diagnostic.expected_cell_count = Some(12);
        let report = analyze(&diagnostic, analysis_timestamp());
        assert_eq!(report.confidence_signals.completeness, Percent(50.0));
        assert_eq!(report.confidence_score, Percent(87.5));
    }
}
