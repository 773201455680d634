mod anomaly;
mod cell;
mod diagnostic;
mod event;
mod report;

pub use self::{
    anomaly::{Anomaly, AnomalyKind},
    cell::BatteryCell,
    diagnostic::VehicleDiagnosticData,
    event::{ChargeEvent, EventKind},
    report::{BatteryHealthReport, HealthBand},
};
