//! Synthetic Model 3 snapshot: six cells and three years of daily-driver charging.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    model::{BatteryCell, ChargeEvent, EventKind, VehicleDiagnosticData},
    quantity::{
        electric::{Milliohms, Volts},
        energy::KilowattHours,
        ratios::Percent,
        thermal::Celsius,
    },
};

const N_PAIRS: i64 = 250;

const AGE: TimeDelta = TimeDelta::days(1095);

/// Build the demo snapshot relative to `now`.
///
/// The vehicle was manufactured exactly `AGE` before `now`, and has lost 29% of its capacity.
pub fn mock_diagnostic(now: DateTime<Utc>) -> VehicleDiagnosticData {
    let manufacturing_date = now - AGE;
    VehicleDiagnosticData::builder()
        .vehicle_id("TSLA_5YJ3E1EA8KF123456")
        .timestamp(now)
        .pack_voltage(Volts(350.4))
        .total_capacity(KilowattHours(75.0))
        .current_capacity(KilowattHours(53.25))
        .cells(cells())
        .charge_history(charge_history(manufacturing_date).collect())
        .odometer_miles(87_500)
        .manufacturing_date(manufacturing_date)
        .build()
}

fn cells() -> Vec<BatteryCell> {
    [
        ("cell_001", 3.92, 32.5, 2.1),
        ("cell_002", 3.91, 33.1, 2.3),
        ("cell_003", 3.93, 32.8, 2.0),
        ("cell_004", 3.89, 34.2, 2.4),
        ("cell_005", 3.92, 32.9, 2.2),
        ("cell_006", 3.90, 33.5, 2.1),
    ]
    .into_iter()
    .map(|(id, voltage, temperature, internal_resistance)| {
        BatteryCell::builder()
            .id(id)
            .voltage(Volts(voltage))
            .temperature(Celsius(temperature))
            .internal_resistance(Milliohms(internal_resistance))
            .build()
    })
    .collect()
}

/// A discharge roughly every four days, each followed by a recharge 18 hours later.
#[expect(clippy::cast_precision_loss)]
fn charge_history(since: DateTime<Utc>) -> impl Iterator<Item = ChargeEvent> {
    (0..N_PAIRS).flat_map(move |i| {
        let discharged_at = since + TimeDelta::days(i * 4 + i % 7);
        let high = Percent(85.0 + (i % 15) as f64);
        let low = Percent(15.0 + (i % 10) as f64);
        [
            ChargeEvent::new(discharged_at, EventKind::Discharge, high, low),
            ChargeEvent::new(discharged_at + TimeDelta::hours(18), EventKind::Charge, low, high),
        ]
    })
}
