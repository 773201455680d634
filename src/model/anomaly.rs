use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    VoltageImbalance,
    Overheating,
    HighResistance,
    RapidDegradation,
}

impl Display for AnomalyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VoltageImbalance => write!(f, "Voltage imbalance"),
            Self::Overheating => write!(f, "Overheating"),
            Self::HighResistance => write!(f, "High resistance"),
            Self::RapidDegradation => write!(f, "Rapid degradation"),
        }
    }
}

/// Detected finding. All emitted anomalies are equally severe.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub description: String,
}
