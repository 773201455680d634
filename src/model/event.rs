use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quantity::ratios::Percent;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Charge,
    Discharge,
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Charge => write!(f, "Charge"),
            Self::Discharge => write!(f, "Discharge"),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeEvent {
    pub timestamp: DateTime<Utc>,

    pub kind: EventKind,

    /// State of charge when the event started, nominally `0..=100`.
    pub start_soc: Percent,

    /// State of charge when the event ended, nominally `0..=100`.
    pub end_soc: Percent,
}

impl ChargeEvent {
    pub const fn new(
        timestamp: DateTime<Utc>,
        kind: EventKind,
        start_soc: Percent,
        end_soc: Percent,
    ) -> Self {
        Self { timestamp, kind, start_soc, end_soc }
    }

    /// Whether both state-of-charge readings are physically plausible.
    pub const fn is_within_scale(&self) -> bool {
        self.start_soc.is_within_scale() && self.end_soc.is_within_scale()
    }

    /// Absolute state-of-charge swing after clamping both ends into `0..=100`.
    pub fn depth(&self) -> Percent {
        let depth = self.end_soc.clamp_to_scale() - self.start_soc.clamp_to_scale();
        if depth < Percent::ZERO { -depth } else { depth }
    }
}
