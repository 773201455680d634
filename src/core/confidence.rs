//! Reliability of an assessment given the data it was made from.
//!
//! Four signals are scored independently on `0..=100`:
//!
//! - **history**: the number of observed charge events, saturating at a sufficient sample;
//! - **completeness**: the share of the expected cells that reported a reading;
//! - **age**: vehicle age, since degradation rates of young vehicles are mostly noise;
//! - **consistency**: starts at 100 and loses a fixed penalty per data-quality issue.
//!
//! The score is their weighted average, rounded to one decimal.

use serde::{Deserialize, Serialize};

use crate::{
    config::ConfidencePolicy,
    core::quality::DataQuality,
    quantity::{ratios::Percent, time::Years},
};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceSignals {
    pub history: Percent,
    pub completeness: Percent,
    pub age: Percent,
    pub consistency: Percent,
}

impl ConfidenceSignals {
    pub const fn as_array(&self) -> [Percent; 4] {
        [self.history, self.completeness, self.age, self.consistency]
    }
}

#[must_use]
pub struct ConfidenceScorer {
    policy: ConfidencePolicy,
}

impl ConfidenceScorer {
    pub const fn new(policy: ConfidencePolicy) -> Self {
        Self { policy }
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn history_sufficiency(&self, n_events: usize) -> Percent {
        Percent::from_ratio(n_events as f64 / self.policy.sufficient_events as f64)
            .clamp_to_scale()
    }

    /// Share of the expected cells that reported.
    ///
    /// With an unknown pack size, every present cell is taken as the complete pack.
    #[expect(clippy::cast_precision_loss)]
    pub fn cell_completeness(&self, n_cells: usize, expected_cell_count: Option<usize>) -> Percent {
        match expected_cell_count {
            _ if n_cells == 0 => Percent::ZERO,
            None | Some(0) => Percent::HUNDRED,
            Some(expected) => {
                Percent::from_ratio(n_cells as f64 / expected as f64).clamp_to_scale()
            }
        }
    }

    pub fn age_reliability(&self, age: Years) -> Percent {
        Percent::from_ratio(age / self.policy.mature_age).clamp_to_scale()
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn consistency(&self, issues: DataQuality) -> Percent {
        (Percent::HUNDRED - self.policy.inconsistency_penalty * issues.len() as f64)
            .clamp_to_scale()
    }

    pub fn score(&self, signals: &ConfidenceSignals) -> Percent {
        signals
            .as_array()
            .into_iter()
            .zip(self.policy.weights.as_array())
            .map(|(signal, weight)| signal.clamp_to_scale() * weight)
            .sum::<Percent>()
            .clamp_to_scale()
            .round_to_tenth()
    }
}
