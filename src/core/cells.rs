use itertools::Itertools;

use crate::{
    model::BatteryCell,
    quantity::{
        electric::{Milliohms, Volts},
        thermal::Celsius,
    },
};

/// Pack-level signals reduced from the individual cell readings.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellStatistics {
    pub n_cells: usize,

    /// Spread between the highest and lowest cell voltage.
    pub voltage_range: Volts,

    pub max_temperature: Celsius,

    pub max_internal_resistance: Milliohms,
}

impl CellStatistics {
    /// Aggregate the readings of any pack size, or `None` for an empty pack.
    pub fn aggregate(cells: &[BatteryCell]) -> Option<Self> {
        let (min_voltage, max_voltage) =
            cells.iter().map(|cell| cell.voltage).minmax().into_option()?;
        Some(Self {
            n_cells: cells.len(),
            voltage_range: max_voltage - min_voltage,
            max_temperature: cells.iter().map(|cell| cell.temperature).max()?,
            max_internal_resistance: cells.iter().map(|cell| cell.internal_resistance).max()?,
        })
    }
}
