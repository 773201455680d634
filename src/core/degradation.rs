use chrono::{DateTime, Utc};

use crate::{
    config::DegradationPolicy,
    core::quality::{DataQuality, DataQualityIssue},
    model::{HealthBand, VehicleDiagnosticData},
    prelude::*,
    quantity::{
        energy::KilowattHours,
        ratios::{Percent, PercentPerYear},
        time::Years,
    },
};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Degradation {
    /// Usable capacity relative to the original one, `0..=100`.
    pub state_of_health: Percent,

    /// Vehicle age at the analysis time. Negative when the manufacturing date is in the future.
    pub age: Years,

    /// Annualized capacity loss, zero for vehicles too young to extrapolate from.
    pub rate: PercentPerYear,

    pub issues: DataQuality,
}

impl Degradation {
    pub fn health_band(&self) -> HealthBand {
        HealthBand::of(self.state_of_health)
    }
}

#[must_use]
pub struct DegradationEstimator {
    policy: DegradationPolicy,
}

impl DegradationEstimator {
    pub const fn new(policy: DegradationPolicy) -> Self {
        Self { policy }
    }

    #[instrument(skip_all)]
    pub fn estimate(
        &self,
        diagnostic: &VehicleDiagnosticData,
        analysis_timestamp: DateTime<Utc>,
    ) -> Degradation {
        let (state_of_health, mut issues) =
            state_of_health(diagnostic.total_capacity, diagnostic.current_capacity);

        let age = Years::from(analysis_timestamp - diagnostic.manufacturing_date);
        if age < Years::ZERO {
            issues.insert(DataQualityIssue::ManufacturedAfterAnalysis);
        }
        let rate = if age < self.policy.min_age || age <= Years::ZERO {
            PercentPerYear::ZERO
        } else {
            (Percent::HUNDRED - state_of_health) / age
        };

        debug!(?state_of_health, ?age, ?rate, "estimated");
        Degradation { state_of_health, age, rate, issues }
    }
}

/// Calculate the state of health from the capacity ratio.
///
/// The result is clamped into `0..=100` and rounded to one decimal, measurement noise may
/// otherwise push it slightly above 100%.
pub fn state_of_health(total: KilowattHours, current: KilowattHours) -> (Percent, DataQuality) {
    let mut issues = DataQuality::empty();
    if !total.is_finite() || total <= KilowattHours::ZERO {
        issues.insert(DataQualityIssue::NonPositiveTotalCapacity);
        return (Percent::ZERO, issues);
    }
    if current > total {
        issues.insert(DataQualityIssue::CapacityAboveTotal);
    }
    if current < KilowattHours::ZERO {
        issues.insert(DataQualityIssue::NegativeCurrentCapacity);
    }
    (Percent::from_ratio(current / total).clamp_to_scale().round_to_tenth(), issues)
}
