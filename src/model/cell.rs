use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::quantity::{
    electric::{Milliohms, Volts},
    thermal::Celsius,
};

/// Single cell reading from one diagnostic snapshot.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct BatteryCell {
    #[builder(into)]
    pub id: String,

    pub voltage: Volts,

    pub temperature: Celsius,

    pub internal_resistance: Milliohms,
}
