//! Payloads taken directly from an advertisement.
//!
//! The payload starts with a status byte, followed by the device model byte.
//! Every model has a recipe in [`DECODERS`].

use thiserror::Error;
use time::OffsetDateTime;

use crate::{
    field::{self, BufferTooShort, EnergyLayout},
    host::ManufacturerData,
    model::DeviceModel::*,
    recipe::{AlarmLayout, Frame, Recipe},
    record::DecodedRecord,
};

/// Errors occurring while decoding a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The model byte is not in the decoder table.
    #[error("Unsupported device model (0x{0:02X}).")]
    UnsupportedModel(u8),
    /// The payload ended before a field.
    #[error(transparent)]
    BufferTooShort(#[from] BufferTooShort),
}

/// Offset of the device model byte.
pub const MODEL_OFFSET: usize = 1;

/// Field offsets within an advertised payload.
pub static FRAME: Frame = Frame {
    status: 0,
    alarms: AlarmLayout {
        battery: Some(0),
        extended: None,
        mask: 0xC000,
    },
    groups: 2,
    battery: 2,
    battery_shift: 12,
    position: 6,
    value1: 8,
    value2: 10,
    time: Some((12, 14)),
    signature: 16,
    energy: EnergyLayout {
        average: 2,
        sum: 4,
        options: 8,
        battery: 10,
        week: 12,
    },
};

/// Recipes for every model.
pub static DECODERS: [Recipe; 17] = [
    Recipe::new(Beacon, &FRAME),
    Recipe::new(EnergyMeter, &FRAME),
    Recipe::new(ControlId, &FRAME),
    Recipe::new(Nav, &FRAME),
    Recipe::new(CareSensor1, &FRAME),
    Recipe::new(CareSensor2, &FRAME),
    Recipe::new(CareSensor3, &FRAME),
    Recipe::new(CareSensor4, &FRAME),
    Recipe::new(CareSensor5, &FRAME),
    Recipe::new(CareSensor6, &FRAME),
    Recipe::new(CareSensorT, &FRAME),
    Recipe::new(CareSensorHT, &FRAME),
    Recipe::new(ControlPoint, &FRAME),
    Recipe::new(CareRelay, &FRAME),
    Recipe::new(TransceiverUart, &FRAME),
    Recipe::new(TransceiverUsb, &FRAME),
    Recipe::new(Gsm, &FRAME),
];

/// Look up the recipe for a model byte.
pub fn recipe(model: u8) -> Option<&'static Recipe> {
    DECODERS.iter().find(|d| d.model.code() == model)
}

/// Decode a payload as the given model.
pub fn decode_model(
    r: &[u8],
    model: u8,
    now: OffsetDateTime,
) -> Result<DecodedRecord<'_>, Error> {
    let recipe = recipe(model).ok_or(Error::UnsupportedModel(model))?;
    Ok(recipe.decode(r, now)?)
}

/// Decode a payload into a host supplied container.
///
/// The container is left untouched on failure.
pub fn decode_into<'a>(
    r: &'a [u8],
    o: &mut ManufacturerData<'a>,
    now: OffsetDateTime,
) -> Result<(), Error> {
    let model = field::byte(r, MODEL_OFFSET)?;
    o.record = Some(decode_model(r, model, now)?);
    Ok(())
}

/// Decode a payload, reading its model from the payload itself.
///
/// `now` stands in for the clock of payloads that carry none.
pub fn decode_at(r: &[u8], now: OffsetDateTime) -> Result<ManufacturerData<'_>, Error> {
    let mut o = ManufacturerData::new();
    decode_into(r, &mut o, now)?;
    Ok(o)
}

/// Decode a payload against the system clock.
pub fn decode(r: &[u8]) -> Result<ManufacturerData<'_>, Error> {
    decode_at(r, OffsetDateTime::now_utc())
}
