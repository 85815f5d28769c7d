//! Records relayed in batches by the iNode GSM gateway.
//!
//! The gateway forwards the payloads it hears as length-prefixed records.
//! Each record carries the sender's address and name ahead of the same
//! telemetry as an advertised payload, at different offsets. Only energy
//! meters and care sensors are relayed.
//!
//! Use [`decode_batch`] to turn a batch into advertising reports. The
//! [`scanner`] module exposes the underlying state machine.

pub mod report;
pub mod scanner;

use time::OffsetDateTime;

use crate::{
    field::{BufferTooShort, EnergyLayout},
    model::DeviceModel::*,
    recipe::{AlarmLayout, Frame, Recipe},
    record::DecodedRecord,
};

pub use report::AdvertisingReport;
pub use scanner::{decode_batch, decode_batch_at};

/// Offset of the device model byte within a record.
pub const MODEL_OFFSET: usize = 1;

/// Field offsets within a gateway record.
///
/// Records carry no clock; the decode time is used instead.
pub static FRAME: Frame = Frame {
    status: 0,
    alarms: AlarmLayout {
        battery: Some(0),
        extended: Some(24),
        mask: 0x8000,
    },
    groups: 32,
    battery: 34,
    battery_shift: 4,
    position: 26,
    value1: 28,
    value2: 30,
    time: None,
    signature: 36,
    energy: EnergyLayout {
        average: 24,
        sum: 26,
        options: 30,
        battery: 32,
        week: 34,
    },
};

/// Recipes for the models relayed by the gateway.
pub static DECODERS: [Recipe; 9] = [
    Recipe::new(EnergyMeter, &FRAME),
    Recipe::new(CareSensor1, &FRAME),
    Recipe::new(CareSensor2, &FRAME),
    Recipe::new(CareSensor3, &FRAME),
    Recipe::new(CareSensor4, &FRAME),
    Recipe::new(CareSensor5, &FRAME),
    Recipe::new(CareSensor6, &FRAME),
    Recipe::new(CareSensorT, &FRAME),
    Recipe::new(CareSensorHT, &FRAME),
];

/// Look up the recipe for a model byte.
pub fn recipe(model: u8) -> Option<&'static Recipe> {
    DECODERS.iter().find(|d| d.model.code() == model)
}

/// Decode a single record as the given model.
///
/// Returns `None` for models the gateway does not relay.
pub fn decode_model(
    r: &[u8],
    model: u8,
    now: OffsetDateTime,
) -> Result<Option<DecodedRecord<'_>>, BufferTooShort> {
    recipe(model).map(|recipe| recipe.decode(r, now)).transpose()
}
