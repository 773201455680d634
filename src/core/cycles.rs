//! Equivalent full-cycle counting by partial-cycle accumulation.
//!
//! Every event contributes its absolute state-of-charge swing, whatever its kind. A full cycle is
//! one full discharge plus one full charge, that is 200 percentage points of throughput, so two
//! 50% discharges and their recharges make up one cycle.

use crate::{model::ChargeEvent, quantity::ratios::Percent};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CycleCount {
    pub n_events: usize,

    /// Number of events with at least one state-of-charge reading outside `0..=100`.
    pub n_out_of_scale: usize,

    /// Accumulated absolute state-of-charge swings in hundredths of a percentage point.
    throughput_centipercent: u64,
}

impl CycleCount {
    /// One full discharge and one full charge, in hundredths of a percentage point.
    const FULL_CYCLE_CENTIPERCENT: u64 = 20_000;

    pub const EMPTY: Self = Self { n_events: 0, n_out_of_scale: 0, throughput_centipercent: 0 };

    #[expect(clippy::cast_precision_loss)]
    pub fn throughput(&self) -> Percent {
        Percent(self.throughput_centipercent as f64 / 100.0)
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn equivalent_cycles(&self) -> f64 {
        self.throughput_centipercent as f64 / Self::FULL_CYCLE_CENTIPERCENT as f64
    }

    /// Completed equivalent cycles, the cycle in progress is not counted.
    pub fn full_cycles(&self) -> u32 {
        u32::try_from(self.throughput_centipercent / Self::FULL_CYCLE_CENTIPERCENT)
            .unwrap_or(u32::MAX)
    }
}

impl<'a> FromIterator<&'a ChargeEvent> for CycleCount {
    fn from_iter<T: IntoIterator<Item = &'a ChargeEvent>>(events: T) -> Self {
        let mut this = Self::EMPTY;
        for event in events {
            this.n_events += 1;
            if !event.is_within_scale() {
                this.n_out_of_scale += 1;
            }
            this.throughput_centipercent += to_centipercent(event.depth());
        }
        this
    }
}

/// Round a swing within `0..=100` to hundredths of a percentage point.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_centipercent(depth: Percent) -> u64 {
    (depth.0 * 100.0).round() as u64
}
