use std::ops::Div;

use crate::quantity::time::Years;

quantity!(Percent, suffix: "%", precision: 1);
quantity!(PercentPerYear, suffix: "% per year", precision: 1);

impl Percent {
    pub const HUNDRED: Self = Self(100.0);

    pub fn from_ratio(ratio: f64) -> Self {
        Self(ratio * 100.0)
    }

    /// Convert the percentage into `0.0..=1.0` (for in-range values).
    pub const fn to_ratio(self) -> f64 {
        0.01 * self.0
    }

    /// Clamp into `0..=100`. `NaN` collapses into zero.
    pub fn clamp_to_scale(self) -> Self {
        if self.0.is_nan() { Self::ZERO } else { self.clamp(Self::ZERO, Self::HUNDRED) }
    }

    pub const fn is_within_scale(self) -> bool {
        self.0 >= 0.0 && self.0 <= 100.0
    }

    pub fn round_to_tenth(self) -> Self {
        Self((self.0 * 10.0).round() / 10.0)
    }
}

impl Div<Years> for Percent {
    type Output = PercentPerYear;

    fn div(self, rhs: Years) -> Self::Output {
        PercentPerYear(self.0 / rhs.0)
    }
}
