//! Device models.

use thiserror::Error;
use zerocopy::TryFromBytes;

/// A model code not assigned to any iNode device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown device model (0x{0:02X}).")]
pub struct UnknownModel(pub u8);

/// An iNode device model, as found in the second byte of every payload.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromBytes)]
pub enum DeviceModel {
    Beacon = 0x80,
    EnergyMeter = 0x82,
    ControlId = 0x88,
    Nav = 0x89,
    CareSensor1 = 0x91,
    CareSensor2 = 0x92,
    CareSensor3 = 0x93,
    CareSensor4 = 0x94,
    CareSensor5 = 0x95,
    CareSensor6 = 0x96,
    CareSensorT = 0x9A,
    CareSensorHT = 0x9B,
    ControlPoint = 0xB2,
    CareRelay = 0xB3,
    TransceiverUart = 0xB5,
    TransceiverUsb = 0xB6,
    Gsm = 0xB7,
}

impl DeviceModel {
    /// Every model, in code order.
    pub const ALL: [Self; 17] = [
        Self::Beacon,
        Self::EnergyMeter,
        Self::ControlId,
        Self::Nav,
        Self::CareSensor1,
        Self::CareSensor2,
        Self::CareSensor3,
        Self::CareSensor4,
        Self::CareSensor5,
        Self::CareSensor6,
        Self::CareSensorT,
        Self::CareSensorHT,
        Self::ControlPoint,
        Self::CareRelay,
        Self::TransceiverUart,
        Self::TransceiverUsb,
        Self::Gsm,
    ];

    /// The model code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Human readable model name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beacon => "iNode Beacon",
            Self::EnergyMeter => "iNode Energy Meter",
            Self::ControlId => "iNode Control ID",
            Self::Nav => "iNode Nav",
            Self::CareSensor1 => "iNode Care Sensor #1",
            Self::CareSensor2 => "iNode Care Sensor #2",
            Self::CareSensor3 => "iNode Care Sensor #3",
            Self::CareSensor4 => "iNode Care Sensor #4",
            Self::CareSensor5 => "iNode Care Sensor #5",
            Self::CareSensor6 => "iNode Care Sensor #6",
            Self::CareSensorT => "iNode Care Sensor T",
            Self::CareSensorHT => "iNode Care Sensor HT",
            Self::ControlPoint => "iNode Control Point",
            Self::CareRelay => "iNode Care Relay",
            Self::TransceiverUart => "iNode Transceiver UART",
            Self::TransceiverUsb => "iNode Transceiver USB",
            Self::Gsm => "iNode GSM",
        }
    }
}

impl TryFrom<u8> for DeviceModel {
    type Error = UnknownModel;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        zerocopy::try_transmute!(code).map_err(|_| UnknownModel(code))
    }
}

impl core::fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
