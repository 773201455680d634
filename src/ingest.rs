//! Ingestion boundary: loosely-typed diagnostic payloads into [`VehicleDiagnosticData`].
//!
//! Only structural problems are rejected here. Physically implausible values pass through and
//! are dealt with by the analyzer.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    model::{BatteryCell, ChargeEvent, EventKind, VehicleDiagnosticData},
    quantity::{
        electric::{Milliohms, Volts},
        energy::KilowattHours,
        ratios::Percent,
        thermal::Celsius,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("malformed diagnostic payload")]
    Syntax(#[from] serde_json::Error),

    #[error("invalid diagnostic payload")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` is out of range: {value}")]
    OutOfRange { field: String, value: f64 },

    #[error("inconsistent diagnostic: {reason}")]
    Inconsistent { reason: String },
}

/// Parse and validate a JSON diagnostic payload.
pub fn from_json(text: &str) -> Result<VehicleDiagnosticData, IngestError> {
    let raw: RawDiagnostic = serde_json::from_str(text)?;
    Ok(raw.try_into()?)
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawDiagnostic {
    pub vehicle_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub battery_pack_voltage: Option<f64>,
    pub total_capacity_kwh: Option<f64>,
    pub current_capacity_kwh: Option<f64>,
    pub cells: Option<Vec<RawCell>>,
    pub charge_history: Option<Vec<RawChargeEvent>>,
    pub odometer_miles: Option<u32>,
    pub manufacturing_date: Option<DateTime<Utc>>,
    pub expected_cell_count: Option<usize>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawCell {
    pub id: Option<String>,
    pub voltage: Option<f64>,
    pub temperature: Option<f64>,
    pub internal_resistance: Option<f64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawChargeEvent {
    pub timestamp: Option<DateTime<Utc>>,
    pub event_type: Option<EventKind>,
    pub start_soc: Option<f64>,
    pub end_soc: Option<f64>,
}

impl TryFrom<RawDiagnostic> for VehicleDiagnosticData {
    type Error = ValidationError;

    fn try_from(raw: RawDiagnostic) -> Result<Self, Self::Error> {
        let cells = required(raw.cells, "cells")?
            .into_iter()
            .enumerate()
            .map(|(index, cell)| cell.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(id) = cells.iter().map(|cell| &cell.id).duplicates().next() {
            return Err(ValidationError::Inconsistent {
                reason: format!("duplicate cell identifier `{id}`"),
            });
        }

        let charge_history = required(raw.charge_history, "charge_history")?
            .into_iter()
            .enumerate()
            .map(|(index, event)| event.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        if raw.expected_cell_count == Some(0) {
            return Err(ValidationError::OutOfRange {
                field: "expected_cell_count".to_string(),
                value: 0.0,
            });
        }

        Ok(Self {
            vehicle_id: required(raw.vehicle_id, "vehicle_id")?,
            timestamp: required(raw.timestamp, "timestamp")?,
            pack_voltage: Volts(finite(raw.battery_pack_voltage, "battery_pack_voltage")?),
            total_capacity: KilowattHours(finite(raw.total_capacity_kwh, "total_capacity_kwh")?),
            current_capacity: KilowattHours(finite(
                raw.current_capacity_kwh,
                "current_capacity_kwh",
            )?),
            cells,
            charge_history,
            odometer_miles: required(raw.odometer_miles, "odometer_miles")?,
            manufacturing_date: required(raw.manufacturing_date, "manufacturing_date")?,
            expected_cell_count: raw.expected_cell_count,
        })
    }
}

impl RawCell {
    fn validate(self, index: usize) -> Result<BatteryCell, ValidationError> {
        let field = |name: &str| format!("cells[{index}].{name}");
        Ok(BatteryCell {
            id: required(self.id, field("id"))?,
            voltage: Volts(finite(self.voltage, field("voltage"))?),
            temperature: Celsius(finite(self.temperature, field("temperature"))?),
            internal_resistance: Milliohms(finite(
                self.internal_resistance,
                field("internal_resistance"),
            )?),
        })
    }
}

impl RawChargeEvent {
    fn validate(self, index: usize) -> Result<ChargeEvent, ValidationError> {
        let field = |name: &str| format!("charge_history[{index}].{name}");
        Ok(ChargeEvent {
            timestamp: required(self.timestamp, field("timestamp"))?,
            kind: required(self.event_type, field("event_type"))?,
            start_soc: Percent(finite(self.start_soc, field("start_soc"))?),
            end_soc: Percent(finite(self.end_soc, field("end_soc"))?),
        })
    }
}

impl From<&VehicleDiagnosticData> for RawDiagnostic {
    fn from(diagnostic: &VehicleDiagnosticData) -> Self {
        Self {
            vehicle_id: Some(diagnostic.vehicle_id.clone()),
            timestamp: Some(diagnostic.timestamp),
            battery_pack_voltage: Some(diagnostic.pack_voltage.0),
            total_capacity_kwh: Some(diagnostic.total_capacity.0),
            current_capacity_kwh: Some(diagnostic.current_capacity.0),
            cells: Some(
                diagnostic
                    .cells
                    .iter()
                    .map(|cell| RawCell {
                        id: Some(cell.id.clone()),
                        voltage: Some(cell.voltage.0),
                        temperature: Some(cell.temperature.0),
                        internal_resistance: Some(cell.internal_resistance.0),
                    })
                    .collect(),
            ),
            charge_history: Some(
                diagnostic
                    .charge_history
                    .iter()
                    .map(|event| RawChargeEvent {
                        timestamp: Some(event.timestamp),
                        event_type: Some(event.kind),
                        start_soc: Some(event.start_soc.0),
                        end_soc: Some(event.end_soc.0),
                    })
                    .collect(),
            ),
            odometer_miles: Some(diagnostic.odometer_miles),
            manufacturing_date: Some(diagnostic.manufacturing_date),
            expected_cell_count: diagnostic.expected_cell_count,
        }
    }
}

fn required<T>(value: Option<T>, field: impl Into<String>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::MissingField { field: field.into() })
}

fn finite(value: Option<f64>, field: impl Into<String>) -> Result<f64, ValidationError> {
    let field = field.into();
    let value = value.ok_or_else(|| ValidationError::MissingField { field: field.clone() })?;
    if value.is_finite() { Ok(value) } else { Err(ValidationError::OutOfRange { field, value }) }
}
