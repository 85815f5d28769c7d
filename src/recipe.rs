//! Decode recipes.
//!
//! A [`Recipe`] pairs a device model with the [`Frame`] of the transport it
//! arrived over. The frame says where each field sits; the model's [`Steps`]
//! say which fields are present and which sensor decodes them. Every care
//! sensor shares one skeleton:
//!
//! Rtto → Alarms → Groups → Battery → Position? → Value1? → Value2? →
//! Input/Output/Direction? → Time → Signature
//!
//! with the optional value steps filled by a [`Probe`].

use time::OffsetDateTime;

use crate::{
    field::{self, BufferTooShort, EnergyLayout},
    model::DeviceModel,
    record::{DecodedRecord, DeviceReading, Reading, SensorReading},
};

/// Where the alarm bitmap is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmLayout {
    /// Byte carrying the low battery bit.
    pub battery: Option<usize>,
    /// Word carrying the extended alarms.
    pub extended: Option<usize>,
    /// Mask applied to the shifted low battery byte.
    pub mask: u16,
}

/// Offsets of every field a transport may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Status byte holding the RTTO and digital I/O bits.
    pub status: usize,
    pub alarms: AlarmLayout,
    pub groups: usize,
    pub battery: usize,
    pub battery_shift: u32,
    pub position: usize,
    pub value1: usize,
    pub value2: usize,
    /// High and low clock words. Without them the decode time is used.
    pub time: Option<(usize, usize)>,
    pub signature: usize,
    pub energy: EnergyLayout,
}

/// A sensor plugged into a value step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    CsrTemperature,
    Mcp9844Temperature,
    Si7021Temperature,
    Si7021Humidity,
    MagneticField,
}

impl Probe {
    /// Decode the value at `at` into its field of the reading.
    fn apply(self, r: &[u8], at: usize, o: &mut SensorReading) -> Result<(), BufferTooShort> {
        match self {
            Self::CsrTemperature => o.temperature = Some(field::temperature_csr(r, at)?),
            Self::Mcp9844Temperature => o.temperature = Some(field::temperature_mcp9844(r, at)?),
            Self::Si7021Temperature => o.temperature = Some(field::temperature_si7021(r, at)?),
            Self::Si7021Humidity => o.humidity = Some(field::humidity_si7021(r, at)?),
            Self::MagneticField => o.magnetic_field = Some(field::magnetic_field(r, at)?),
        }
        Ok(())
    }
}

/// The optional steps a care sensor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSteps {
    pub position: bool,
    pub value1: Option<Probe>,
    pub value2: Option<Probe>,
    pub io: bool,
    pub direction: bool,
}

impl SensorSteps {
    const fn new(position: bool, value1: Option<Probe>, value2: Option<Probe>) -> Self {
        Self {
            position,
            value1,
            value2,
            io: false,
            direction: false,
        }
    }
}

/// The shape of a model's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steps {
    /// Beacons and infrastructure, optionally with digital I/O.
    Device { io: bool },
    Sensor(SensorSteps),
    EnergyMeter,
}

impl Steps {
    /// Steps run for a model, whichever transport it arrived over.
    pub const fn of(model: DeviceModel) -> Self {
        use DeviceModel::*;
        use Probe::*;

        match model {
            Beacon | ControlId | Nav | ControlPoint | TransceiverUart | TransceiverUsb | Gsm => {
                Self::Device { io: false }
            }
            CareRelay => Self::Device { io: true },
            EnergyMeter => Self::EnergyMeter,
            CareSensor1 => Self::Sensor(SensorSteps::new(true, Some(CsrTemperature), None)),
            CareSensor2 => Self::Sensor(SensorSteps::new(true, Some(Mcp9844Temperature), None)),
            CareSensor3 => Self::Sensor(SensorSteps::new(
                true,
                Some(Si7021Temperature),
                Some(Si7021Humidity),
            )),
            CareSensor4 => Self::Sensor(SensorSteps {
                direction: true,
                ..SensorSteps::new(true, Some(MagneticField), None)
            }),
            CareSensor5 => Self::Sensor(SensorSteps {
                direction: true,
                ..SensorSteps::new(false, Some(MagneticField), Some(CsrTemperature))
            }),
            CareSensor6 => Self::Sensor(SensorSteps {
                io: true,
                ..SensorSteps::new(true, Some(CsrTemperature), None)
            }),
            CareSensorT => Self::Sensor(SensorSteps::new(false, Some(Si7021Temperature), None)),
            CareSensorHT => Self::Sensor(SensorSteps::new(
                false,
                Some(Si7021Temperature),
                Some(Si7021Humidity),
            )),
        }
    }
}

/// How to decode one device model arriving over one transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub model: DeviceModel,
    pub label: &'static str,
    pub frame: &'static Frame,
    pub steps: Steps,
}

impl Recipe {
    pub const fn new(model: DeviceModel, frame: &'static Frame) -> Self {
        Self {
            model,
            label: model.label(),
            frame,
            steps: Steps::of(model),
        }
    }

    /// Decode a payload, using `now` for fields the payload does not carry.
    ///
    /// Either every step succeeds or no record is produced.
    pub fn decode<'a>(
        &self,
        r: &'a [u8],
        now: OffsetDateTime,
    ) -> Result<DecodedRecord<'a>, BufferTooShort> {
        let f = self.frame;

        let rtto = field::rtto(r, f.status)?;

        // Only care sensors carry the extended alarm word.
        let extended = match self.steps {
            Steps::Sensor(_) => f.alarms.extended,
            _ => None,
        };
        let alarms = field::alarms(r, f.alarms.battery, extended, f.alarms.mask)?;

        let reading = match self.steps {
            Steps::Device { io } => Reading::Device(DeviceReading {
                groups: field::groups(r, f.groups)?,
                battery: field::battery(r, f.battery, f.battery_shift)?,
                input: io.then(|| field::input(r, f.status)).transpose()?,
                output: io.then(|| field::output(r, f.status)).transpose()?,
            }),
            Steps::Sensor(steps) => Reading::Sensor(self.decode_sensor(r, steps, now)?),
            Steps::EnergyMeter => Reading::EnergyMeter(field::energy(r, &f.energy, now)?),
        };

        Ok(DecodedRecord {
            model: self.model,
            model_label: self.label,
            rtto,
            alarms,
            reading,
        })
    }

    fn decode_sensor<'a>(
        &self,
        r: &'a [u8],
        steps: SensorSteps,
        now: OffsetDateTime,
    ) -> Result<SensorReading<'a>, BufferTooShort> {
        let f = self.frame;

        let mut o = SensorReading {
            groups: field::groups(r, f.groups)?,
            battery: field::battery(r, f.battery, f.battery_shift)?,
            time: now,
            signature: field::signature(r, f.signature)?,
            input: None,
            output: None,
            position: None,
            temperature: None,
            humidity: None,
            magnetic_field: None,
            magnetic_field_direction: None,
        };

        if steps.position {
            o.position = Some(field::position(r, f.position)?);
        }
        if let Some(probe) = steps.value1 {
            probe.apply(r, f.value1, &mut o)?;
        }
        if let Some(probe) = steps.value2 {
            probe.apply(r, f.value2, &mut o)?;
        }
        if steps.io {
            o.input = Some(field::input(r, f.status)?);
            o.output = Some(field::output(r, f.status)?);
        }
        if steps.direction {
            o.magnetic_field_direction = Some(field::magnetic_field_direction(r, f.status)?);
        }
        if let Some((high, low)) = f.time {
            o.time = field::time(r, high, low)?;
        }

        Ok(o)
    }
}
