use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::{BatteryCell, ChargeEvent},
    quantity::{electric::Volts, energy::KilowattHours},
};

/// Validated diagnostic snapshot of one vehicle.
///
/// Structural validity (all fields present, finite numbers, unique cell identifiers) is
/// guaranteed by [`crate::ingest`]. Physical plausibility is not: capacities and
/// state-of-charge readings may still be out of range, which the analyzer tolerates.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct VehicleDiagnosticData {
    #[builder(into)]
    pub vehicle_id: String,

    /// Snapshot timestamp.
    pub timestamp: DateTime<Utc>,

    pub pack_voltage: Volts,

    /// Original capacity of the pack.
    pub total_capacity: KilowattHours,

    /// Currently usable capacity.
    pub current_capacity: KilowattHours,

    #[builder(default)]
    pub cells: Vec<BatteryCell>,

    /// Full observed charge and discharge history in chronological order.
    #[builder(default)]
    pub charge_history: Vec<ChargeEvent>,

    #[builder(default)]
    pub odometer_miles: u32,

    pub manufacturing_date: DateTime<Utc>,

    /// Reference number of cells in a full pack of this make, if known.
    pub expected_cell_count: Option<usize>,
}
