use crate::{
    config::AnomalyThresholds,
    core::cells::CellStatistics,
    model::{Anomaly, AnomalyKind},
    quantity::ratios::PercentPerYear,
};

/// Independent threshold rules, evaluated in a fixed order.
#[must_use]
pub struct AnomalyDetector {
    thresholds: AnomalyThresholds,
}

impl AnomalyDetector {
    pub const fn new(thresholds: AnomalyThresholds) -> Self {
        Self { thresholds }
    }

    /// Check every rule once. The cell rules are skipped when no cell reported.
    pub fn detect(
        &self,
        cells: Option<&CellStatistics>,
        degradation_rate: PercentPerYear,
    ) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();

        if let Some(cells) = cells {
            if exceeds(cells.voltage_range.0, self.thresholds.max_voltage_range.0) {
                anomalies.push(Anomaly {
                    kind: AnomalyKind::VoltageImbalance,
                    description: format!(
                        "Cell voltage imbalance detected: {} range",
                        cells.voltage_range,
                    ),
                });
            }
            if exceeds(cells.max_temperature.0, self.thresholds.max_temperature.0) {
                anomalies.push(Anomaly {
                    kind: AnomalyKind::Overheating,
                    description: format!(
                        "Cell overheating detected: {} (threshold: {})",
                        cells.max_temperature, self.thresholds.max_temperature,
                    ),
                });
            }
            if exceeds(cells.max_internal_resistance.0, self.thresholds.max_internal_resistance.0) {
                anomalies.push(Anomaly {
                    kind: AnomalyKind::HighResistance,
                    description: format!(
                        "High internal resistance detected: {}",
                        cells.max_internal_resistance,
                    ),
                });
            }
        }

        if exceeds(degradation_rate.0, self.thresholds.max_degradation_rate.0) {
            anomalies.push(Anomaly {
                kind: AnomalyKind::RapidDegradation,
                description: format!("Accelerated degradation detected: {degradation_rate}"),
            });
        }

        anomalies
    }
}

/// Absolute slack below which a signal is considered equal to its threshold.
const TOLERANCE: f64 = 1e-9;

/// Strict comparison that does not fire on the rounding error of an exactly-at-threshold signal.
fn exceeds(value: f64, threshold: f64) -> bool {
    value - threshold > TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::BatteryCell,
        quantity::{
            electric::{Milliohms, Volts},
            thermal::Celsius,
        },
    };

    const HEALTHY: CellStatistics = CellStatistics {
        n_cells: 6,
        voltage_range: Volts(0.040),
        max_temperature: Celsius(34.2),
        max_internal_resistance: Milliohms(2.4),
    };

    fn detect(cells: Option<&CellStatistics>, rate: f64) -> Vec<Anomaly> {
        AnomalyDetector::new(AnomalyThresholds::default()).detect(cells, PercentPerYear(rate))
    }

    fn kinds(anomalies: &[Anomaly]) -> Vec<AnomalyKind> {
        anomalies.iter().map(|anomaly| anomaly.kind).collect()
    }

    #[test]
    fn test_healthy() {
        assert!(detect(Some(&HEALTHY), 2.0).is_empty());
    }

    #[test]
    fn test_voltage_imbalance() {
        let cells = CellStatistics { voltage_range: Volts(0.062), ..HEALTHY };
        let anomalies = detect(Some(&cells), 2.0);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::VoltageImbalance);
        assert_eq!(anomalies[0].description, "Cell voltage imbalance detected: 0.062V range");
    }

    #[test]
    fn test_overheating() {
        let cells = CellStatistics { max_temperature: Celsius(46.0), ..HEALTHY };
        let anomalies = detect(Some(&cells), 2.0);
        assert_eq!(kinds(&anomalies), [AnomalyKind::Overheating]);
        assert_eq!(
            anomalies[0].description,
            "Cell overheating detected: 46.0°C (threshold: 45.0°C)",
        );
    }

    #[test]
    fn test_high_resistance() {
        let cells = CellStatistics { max_internal_resistance: Milliohms(5.2), ..HEALTHY };
        let anomalies = detect(Some(&cells), 2.0);
        assert_eq!(kinds(&anomalies), [AnomalyKind::HighResistance]);
        assert_eq!(anomalies[0].description, "High internal resistance detected: 5.20mΩ");
    }

    #[test]
    fn test_rapid_degradation() {
        let anomalies = detect(Some(&HEALTHY), 9.67);
        assert_eq!(kinds(&anomalies), [AnomalyKind::RapidDegradation]);
        assert_eq!(anomalies[0].description, "Accelerated degradation detected: 9.7% per year");
    }

    /// Thresholds are exclusive.
    #[test]
    fn test_at_thresholds() {
        let cells = CellStatistics {
            n_cells: 2,
            voltage_range: Volts(0.050),
            max_temperature: Celsius(45.0),
            max_internal_resistance: Milliohms(5.0),
        };
        assert!(detect(Some(&cells), 8.0).is_empty());
    }

    /// A 50 mV spread computed from real readings is not an imbalance.
    #[test]
    fn test_aggregated_spread_at_threshold() {
        let cells = [3.95, 3.90].map(|voltage| {
            BatteryCell::builder()
                .id(format!("cell_{voltage}"))
                .voltage(Volts(voltage))
                .temperature(Celsius(30.0))
                .internal_resistance(Milliohms(2.0))
                .build()
        });
        let statistics = CellStatistics::aggregate(&cells).unwrap();
        assert!(statistics.voltage_range > Volts(0.050));
        assert!(detect(Some(&statistics), 2.0).is_empty());
    }

    #[test]
    fn test_all_at_once_in_order() {
        let cells = CellStatistics {
            n_cells: 2,
            voltage_range: Volts(0.1),
            max_temperature: Celsius(60.0),
            max_internal_resistance: Milliohms(9.0),
        };
        assert_eq!(
            kinds(&detect(Some(&cells), 12.0)),
            [
                AnomalyKind::VoltageImbalance,
                AnomalyKind::Overheating,
                AnomalyKind::HighResistance,
                AnomalyKind::RapidDegradation,
            ],
        );
    }

    #[test]
    fn test_no_cells() {
        assert!(detect(None, 2.0).is_empty());
        assert_eq!(kinds(&detect(None, 20.0)), [AnomalyKind::RapidDegradation]);
    }

    /// From a healthy pack, pushing any one signal over its threshold adds exactly its anomaly.
    #[test]
    fn test_monotonicity_from_healthy() {
        let variants = [
            (
                CellStatistics { voltage_range: Volts(0.07), ..HEALTHY },
                2.0,
                AnomalyKind::VoltageImbalance,
            ),
            (
                CellStatistics { max_temperature: Celsius(50.0), ..HEALTHY },
                2.0,
                AnomalyKind::Overheating,
            ),
            (
                CellStatistics { max_internal_resistance: Milliohms(6.0), ..HEALTHY },
                2.0,
                AnomalyKind::HighResistance,
            ),
            (HEALTHY, 10.0, AnomalyKind::RapidDegradation),
        ];
        for (cells, rate, added) in variants {
            assert_eq!(kinds(&detect(Some(&cells), rate)), [added]);
        }
    }

    /// Pushing one signal over its threshold adds exactly its anomaly and keeps the others.
    #[test]
    fn test_monotonicity() {
        let base = CellStatistics { max_temperature: Celsius(50.0), ..HEALTHY };
        let before = kinds(&detect(Some(&base), 2.0));
        assert_eq!(before, [AnomalyKind::Overheating]);

        let variants = [
            (
                CellStatistics { voltage_range: Volts(0.07), ..base },
                2.0,
                AnomalyKind::VoltageImbalance,
            ),
            (
                CellStatistics { max_internal_resistance: Milliohms(6.0), ..base },
                2.0,
                AnomalyKind::HighResistance,
            ),
            (base, 10.0, AnomalyKind::RapidDegradation),
        ];
        for (cells, rate, added) in variants {
            let after = kinds(&detect(Some(&cells), rate));
            assert_eq!(after.len(), before.len() + 1);
            assert!(after.contains(&added));
            assert!(before.iter().all(|kind| after.contains(kind)));
        }
    }
}
