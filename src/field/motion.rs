//! Motion vector.

use tartan_bitfield::bitfield;

use super::{BufferTooShort, word};

/// Motion state and a coarse acceleration vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub motion: bool,
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

/// Decode the motion word at `at`.
pub fn position(r: &[u8], at: usize) -> Result<Position, BufferTooShort> {
    bitfield! {
        struct MotionWord(u16) {
            [0..5] z: u16,
            [5..10] y: u16,
            [10..15] x: u16,
            [15] motion,
        }
    }

    let motion = MotionWord(word(r, at)?);

    Ok(Position {
        motion: motion.motion(),
        x: correct(motion.x()),
        y: correct(motion.y()),
        z: correct(motion.z()),
    })
}

/// Correct the sign of a 5-bit axis value.
///
/// Negative values are offset by `0x1F`, not `0x20`, so `0x10` reads as -15
/// and `0x1F` as 0. Kept as the devices encode it; unverified against
/// hardware.
pub fn correct(value: u16) -> i8 {
    let value = (value & 0x1F) as i8;
    if value & 0x10 != 0 { value - 0x1F } else { value }
}
