//! Analysis policy: anomaly thresholds, the degradation age cut-off, and the confidence weighting.
//!
//! Every section falls back to its defaults, so a configuration file only needs to mention the
//! settings it overrides.

use bon::bon;
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{
        electric::{Milliohms, Volts},
        ratios::{Percent, PercentPerYear},
        thermal::Celsius,
        time::Years,
    },
};

#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub thresholds: AnomalyThresholds,
    pub degradation: DegradationPolicy,
    pub confidence: ConfidencePolicy,
}

impl AnalyzerConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let this: Self =
            toml::from_str(text).context("failed to parse the analyzer configuration")?;
        this.validate()?;
        Ok(this)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize the analyzer configuration")
    }

    pub fn validate(&self) -> Result {
        self.thresholds.validate().context("invalid anomaly thresholds")?;
        self.degradation.validate().context("invalid degradation policy")?;
        self.confidence.validate().context("invalid confidence policy")?;
        Ok(())
    }
}

/// Anomaly detection thresholds. A signal must strictly exceed its threshold to trigger.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyThresholds {
    /// Maximum spread between the highest and lowest cell voltages.
    #[serde(rename = "max_voltage_range_volts")]
    pub max_voltage_range: Volts,

    /// Maximum cell temperature.
    #[serde(rename = "max_temperature_celsius")]
    pub max_temperature: Celsius,

    /// Maximum cell internal resistance.
    #[serde(rename = "max_internal_resistance_milliohms")]
    pub max_internal_resistance: Milliohms,

    /// Maximum annualized capacity loss.
    #[serde(rename = "max_degradation_rate_percent_per_year")]
    pub max_degradation_rate: PercentPerYear,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            max_voltage_range: Volts(0.050),
            max_temperature: Celsius(45.0),
            max_internal_resistance: Milliohms(5.0),
            max_degradation_rate: PercentPerYear(8.0),
        }
    }
}

impl AnomalyThresholds {
    fn validate(&self) -> Result {
        ensure!(self.max_voltage_range.is_finite(), "voltage range: {}", self.max_voltage_range);
        ensure!(self.max_temperature.is_finite(), "temperature: {}", self.max_temperature);
        ensure!(
            self.max_internal_resistance.is_finite(),
            "internal resistance: {}",
            self.max_internal_resistance,
        );
        ensure!(
            self.max_degradation_rate.is_finite(),
            "degradation rate: {}",
            self.max_degradation_rate,
        );
        Ok(())
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegradationPolicy {
    /// Vehicles younger than this get a zero degradation rate instead of an extrapolated one.
    #[serde(rename = "min_age_years")]
    pub min_age: Years,
}

impl Default for DegradationPolicy {
    fn default() -> Self {
        Self { min_age: Years(0.1) }
    }
}

impl DegradationPolicy {
    fn validate(&self) -> Result {
        ensure!(
            self.min_age.is_finite() && self.min_age >= Years::ZERO,
            "minimum age must be a non-negative number: {}",
            self.min_age,
        );
        Ok(())
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    /// Number of charge events at which the history signal saturates.
    pub sufficient_events: usize,

    /// Vehicle age at which the age signal saturates.
    #[serde(rename = "mature_age_years")]
    pub mature_age: Years,

    /// Consistency deduction per distinct data-quality issue.
    #[serde(rename = "inconsistency_penalty_percent")]
    pub inconsistency_penalty: Percent,

    pub weights: ConfidenceWeights,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            sufficient_events: 50,
            mature_age: Years(2.0),
            inconsistency_penalty: Percent(20.0),
            weights: ConfidenceWeights::EQUAL,
        }
    }
}

impl ConfidencePolicy {
    fn validate(&self) -> Result {
        ensure!(self.sufficient_events != 0, "sufficient event count must be positive");
        ensure!(
            self.mature_age.is_finite() && self.mature_age > Years::ZERO,
            "mature age must be positive: {}",
            self.mature_age,
        );
        ensure!(
            self.inconsistency_penalty.is_within_scale(),
            "inconsistency penalty must be within 0..=100: {}",
            self.inconsistency_penalty,
        );
        self.weights.validate()
    }
}

/// Weights of the confidence signals in the final score.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub history: f64,
    pub completeness: f64,
    pub age: f64,
    pub consistency: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self::EQUAL
    }
}

#[bon]
impl ConfidenceWeights {
    #[builder]
    pub fn new(history: f64, completeness: f64, age: f64, consistency: f64) -> Result<Self> {
        let this = Self { history, completeness, age, consistency };
        this.validate()?;
        Ok(this)
    }
}

impl ConfidenceWeights {
    pub const EQUAL: Self =
        Self { history: 0.25, completeness: 0.25, age: 0.25, consistency: 0.25 };

    pub const fn as_array(&self) -> [f64; 4] {
        [self.history, self.completeness, self.age, self.consistency]
    }

    fn validate(&self) -> Result {
        for weight in self.as_array() {
            if !weight.is_finite() || weight < 0.0 {
                bail!("invalid weight: {weight}");
            }
        }
        let sum: f64 = self.as_array().into_iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            bail!("weights must sum up to 1, got {sum}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        AnalyzerConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_override() {
        let config = AnalyzerConfig::from_toml(
            r"
            [thresholds]
            max_temperature_celsius = 50.0

            [confidence]
            sufficient_events = 100
            ",
        )
        .unwrap();
        assert_eq!(config.thresholds.max_temperature, Celsius(50.0));
        assert_eq!(config.thresholds.max_voltage_range, Volts(0.050));
        assert_eq!(config.confidence.sufficient_events, 100);
        assert_eq!(config.confidence.weights, ConfidenceWeights::EQUAL);
        assert_eq!(config.degradation.min_age, Years(0.1));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyzerConfig::default();
        assert_eq!(AnalyzerConfig::from_toml(&config.to_toml().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_weights_must_sum_up_to_one() {
        assert!(
            ConfidenceWeights::builder()
                .history(0.5)
                .completeness(0.5)
                .age(0.5)
                .consistency(0.0)
                .build()
                .is_err()
        );
        let weights = ConfidenceWeights::builder()
            .history(0.4)
            .completeness(0.1)
            .age(0.3)
            .consistency(0.2)
            .build()
            .unwrap();
        assert_eq!(weights.as_array(), [0.4, 0.1, 0.3, 0.2]);
    }

    #[test]
    fn test_negative_weight() {
        assert!(
            ConfidenceWeights::builder()
                .history(1.25)
                .completeness(-0.25)
                .age(0.0)
                .consistency(0.0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_invalid_policy() {
        let error = AnalyzerConfig::from_toml(
            r"
            [confidence]
            mature_age_years = 0.0
            ",
        )
        .unwrap_err();
        assert!(format!("{error:#}").contains("mature age must be positive"));
    }
}
