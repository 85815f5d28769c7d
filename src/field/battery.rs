//! Battery level and voltage.

use super::{BufferTooShort, word};

/// Battery state, derived from a 4-bit code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Battery {
    /// Percent, in steps of 10. Code 0 yields -10.
    pub level: i16,
    /// Volts.
    pub voltage: f64,
}

impl Battery {
    /// Battery state assumed when a payload does not report one.
    pub const FULL: Self = Self {
        level: 100,
        voltage: 2.88,
    };

    /// Convert a 4-bit battery code.
    pub const fn from_code(code: u8) -> Self {
        let level = if code == 1 {
            100
        } else {
            let code = if code > 11 { 11 } else { code };
            10 * (code as i16 - 1)
        };

        Self {
            level,
            voltage: (level - 10) as f64 * 1.2 / 100.0 + 1.8,
        }
    }
}

/// Decode the battery code found `shift` bits up the word at `at`.
pub fn battery(r: &[u8], at: usize, shift: u32) -> Result<Battery, BufferTooShort> {
    let code = (word(r, at)? >> shift) & 0x0F;
    Ok(Battery::from_code(code as u8))
}
