use std::fmt::{Display, Formatter};

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

/// Malformed-input condition tolerated by the analyzer at the cost of confidence.
#[derive(Debug, Hash, EnumSetType, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQualityIssue {
    NonPositiveTotalCapacity,
    CapacityAboveTotal,
    NegativeCurrentCapacity,
    StateOfChargeOutOfRange,
    NoCellReadings,
    NoChargeEvents,
    ManufacturedAfterAnalysis,
}

impl Display for DataQualityIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveTotalCapacity => write!(f, "non-positive total capacity"),
            Self::CapacityAboveTotal => write!(f, "current capacity exceeds total capacity"),
            Self::NegativeCurrentCapacity => write!(f, "negative current capacity"),
            Self::StateOfChargeOutOfRange => write!(f, "state of charge outside 0..=100%"),
            Self::NoCellReadings => write!(f, "no cell readings"),
            Self::NoChargeEvents => write!(f, "no charge events"),
            Self::ManufacturedAfterAnalysis => write!(f, "manufacturing date after analysis"),
        }
    }
}

pub type DataQuality = EnumSet<DataQualityIssue>;
