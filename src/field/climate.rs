//! Temperature and humidity sensors.

use super::{BufferTooShort, byte, round, word};

/// Lowest reportable temperature, in degrees Celsius.
pub const TEMPERATURE_MIN: f64 = -30.0;
/// Highest reportable temperature, in degrees Celsius.
pub const TEMPERATURE_MAX: f64 = 70.0;

/// Temperature from the radio's internal sensor, in whole degrees Celsius.
pub fn temperature_csr(r: &[u8], at: usize) -> Result<f64, BufferTooShort> {
    let raw = word(r, at)? as i32;
    let value = if raw > 127 { raw - 8192 } else { raw };
    Ok((value as f64).clamp(TEMPERATURE_MIN, TEMPERATURE_MAX))
}

/// Temperature from an MCP9844 sensor.
///
/// The low byte counts sixteenths of a degree, the low nibble of the high
/// byte counts 16 degree steps, and bit 4 of the high byte is the sign.
pub fn temperature_mcp9844(r: &[u8], at: usize) -> Result<f64, BufferTooShort> {
    let low = byte(r, at)? as f64;
    let high = byte(r, at + 1)?;

    let mut value = low * 0.0625 + 16.0 * (high & 0x0F) as f64;
    if high & 0x10 != 0 {
        value -= 256.0;
    }

    Ok(round(value.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX), 2))
}

/// Temperature from an Si7021 sensor.
pub fn temperature_si7021(r: &[u8], at: usize) -> Result<f64, BufferTooShort> {
    let raw = word(r, at)? as f64;
    let value = raw * 175.72 * 4.0 / 65536.0 - 46.85;
    Ok(round(value.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX), 2))
}

/// Relative humidity from an Si7021 sensor, in percent.
pub fn humidity_si7021(r: &[u8], at: usize) -> Result<f64, BufferTooShort> {
    let raw = word(r, at)? as f64;
    let value = raw * 125.0 * 4.0 / 65536.0 - 6.0;
    Ok(round(value.clamp(1.0, 100.0), 2))
}
