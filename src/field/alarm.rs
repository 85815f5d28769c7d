//! Alarm bitmap.

use super::{BufferTooShort, Flags, byte, word};

/// Bit of the alarm word signalling a low battery.
pub const LOW_BATTERY: u16 = 0x8000;

/// Alarm state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alarms {
    /// The combined alarm word, as assembled from the payload.
    pub bits: u16,
    pub low_battery: bool,
    /// Present only for payloads carrying an extended alarm word.
    pub extended: Option<ExtendedAlarms>,
}

/// Alarms raised by the sensors of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, inode_msd_derive::Flags)]
pub struct ExtendedAlarms {
    #[flag(0x0001, rename = "moveAccelerometer")]
    pub move_accelerometer: bool,
    #[flag(0x0002, rename = "levelAccelerometer")]
    pub level_accelerometer: bool,
    #[flag(0x0004, rename = "levelTemperature")]
    pub level_temperature: bool,
    #[flag(0x0008, rename = "levelHumidity")]
    pub level_humidity: bool,
    #[flag(0x0010, rename = "contactChange")]
    pub contact_change: bool,
    #[flag(0x0020, rename = "moveStopped")]
    pub move_stopped: bool,
    #[flag(0x0040, rename = "moveGTimer")]
    pub move_g_timer: bool,
    #[flag(0x0080, rename = "levelAccelerometerChange")]
    pub level_accelerometer_change: bool,
    #[flag(0x0100, rename = "levelMagnetChange")]
    pub level_magnet_change: bool,
    #[flag(0x0200, rename = "levelMagnetTimer")]
    pub level_magnet_timer: bool,
}

/// Decode the alarm bitmap.
///
/// The low battery bit is taken from bit 2 of the byte at `battery`, moved up
/// by 13 places and masked with `mask`. The two transports disagree on the
/// mask (`0xC000` for direct payloads, `0x8000` for gateway records), which
/// only shows in [`Alarms::bits`]. When `extended` is present, the word there
/// is merged in and its low ten bits decoded as [`ExtendedAlarms`].
pub fn alarms(
    r: &[u8],
    battery: Option<usize>,
    extended: Option<usize>,
    mask: u16,
) -> Result<Alarms, BufferTooShort> {
    let battery_bits = match battery {
        Some(at) => ((byte(r, at)? as u16) << 13) & mask,
        None => 0,
    };

    let extended_bits = match extended {
        Some(at) => Some(word(r, at)?),
        None => None,
    };

    let bits = battery_bits | extended_bits.unwrap_or(0);

    Ok(Alarms {
        bits,
        low_battery: bits & LOW_BATTERY != 0,
        extended: extended_bits.map(ExtendedAlarms::from_bits),
    })
}
