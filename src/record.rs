//! Decoded payloads.

use time::OffsetDateTime;

use crate::{
    field::{Alarms, Battery, EnergyReading, Position},
    model::DeviceModel,
};

/// A decoded payload.
///
/// The signature of sensor readings borrows from the decoded buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord<'a> {
    pub model: DeviceModel,
    pub model_label: &'static str,
    /// Real time transmission on.
    pub rtto: bool,
    pub alarms: Alarms,
    pub reading: Reading<'a>,
}

/// The model-specific part of a decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<'a> {
    Device(DeviceReading),
    Sensor(SensorReading<'a>),
    EnergyMeter(EnergyReading),
}

/// Reading of a beacon or infrastructure device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReading {
    pub groups: u16,
    pub battery: Battery,
    pub input: Option<bool>,
    pub output: Option<bool>,
}

/// Reading of a care sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading<'a> {
    pub groups: u16,
    pub battery: Battery,
    pub time: OffsetDateTime,
    pub signature: &'a [u8; 8],
    pub input: Option<bool>,
    pub output: Option<bool>,
    pub position: Option<Position>,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Percent relative humidity.
    pub humidity: Option<f64>,
    pub magnetic_field: Option<u16>,
    pub magnetic_field_direction: Option<bool>,
}

impl<'a> DecodedRecord<'a> {
    /// Battery state, for every model.
    pub fn battery(&self) -> &Battery {
        match &self.reading {
            Reading::Device(r) => &r.battery,
            Reading::Sensor(r) => &r.battery,
            Reading::EnergyMeter(r) => &r.battery,
        }
    }

    /// The care sensor reading, if this is one.
    pub fn sensor(&self) -> Option<&SensorReading<'a>> {
        match &self.reading {
            Reading::Sensor(r) => Some(r),
            _ => None,
        }
    }

    /// The energy meter reading, if this is one.
    pub fn energy_meter(&self) -> Option<&EnergyReading> {
        match &self.reading {
            Reading::EnergyMeter(r) => Some(r),
            _ => None,
        }
    }

    /// The device reading, if this is one.
    pub fn device(&self) -> Option<&DeviceReading> {
        match &self.reading {
            Reading::Device(r) => Some(r),
            _ => None,
        }
    }
}
