use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    core::{confidence::ConfidenceSignals, quality::DataQualityIssue},
    model::Anomaly,
    quantity::{
        energy::KilowattHours,
        ratios::{Percent, PercentPerYear},
    },
};

/// Presentation label of the state of health.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    /// Above 90%.
    Excellent,

    /// From 80% to 90%.
    Good,

    /// From 70% to 80%.
    Fair,

    /// Below 70%.
    Poor,
}

impl HealthBand {
    pub fn of(state_of_health: Percent) -> Self {
        if state_of_health > Percent(90.0) {
            Self::Excellent
        } else if state_of_health >= Percent(80.0) {
            Self::Good
        } else if state_of_health >= Percent(70.0) {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl Display for HealthBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

/// Outcome of one analysis. Never mutated after assembly.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatteryHealthReport {
    pub vehicle_id: String,

    pub analysis_timestamp: DateTime<Utc>,

    #[serde(rename = "state_of_health_percent")]
    pub state_of_health: Percent,

    pub health_band: HealthBand,

    /// Equivalent full cycles, truncated.
    pub charge_cycle_count: u32,

    /// Untruncated equivalent full cycles.
    pub equivalent_cycles: f64,

    #[serde(rename = "degradation_rate_percent_per_year")]
    pub degradation_rate: PercentPerYear,

    #[serde(rename = "estimated_remaining_capacity_kwh")]
    pub estimated_remaining_capacity: KilowattHours,

    pub confidence_score: Percent,

    pub confidence_signals: ConfidenceSignals,

    pub data_quality_issues: Vec<DataQualityIssue>,

    /// Findings in detection order.
    pub anomalies: Vec<Anomaly>,
}
