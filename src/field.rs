//! Field decoders, each converting a window of payload bytes into a value.
//!
//! Every decoder takes the payload and an offset relative to the start of the
//! payload (or record) being decoded. All multi-byte values are little-endian.
//! Reads past the end of the payload fail with [`BufferTooShort`] rather than
//! producing a value.
//!
//! The decoders in this module are combined by the recipes in
//! [`crate::recipe`]. Most applications should use [`crate::msd`] or
//! [`crate::gsm`] instead.

pub mod alarm;
pub mod battery;
pub mod climate;
pub mod energy;
pub mod motion;

use tartan_bitfield::bitfield;
use thiserror::Error;
use ::time::OffsetDateTime;

pub use alarm::{Alarms, ExtendedAlarms, alarms};
pub use battery::{Battery, battery};
pub use climate::{humidity_si7021, temperature_csr, temperature_mcp9844, temperature_si7021};
pub use energy::{EnergyLayout, EnergyReading, energy};
pub use motion::{Position, position};

/// A read extended past the end of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Buffer too short: reading {width} bytes at offset {offset} from a {len} byte payload.")]
pub struct BufferTooShort {
    pub offset: usize,
    pub width: usize,
    pub len: usize,
}

/// Borrow an exact number of bytes at an offset in a slice.
pub(crate) fn window<const N: usize>(r: &[u8], at: usize) -> Result<&[u8; N], BufferTooShort> {
    r.get(at..at.saturating_add(N))
        .and_then(|s| s.try_into().ok())
        .ok_or(BufferTooShort {
            offset: at,
            width: N,
            len: r.len(),
        })
}

/// Read a single byte.
pub fn byte(r: &[u8], at: usize) -> Result<u8, BufferTooShort> {
    window::<1>(r, at).map(|b| b[0])
}

/// Read a little-endian 16-bit word.
pub fn word(r: &[u8], at: usize) -> Result<u16, BufferTooShort> {
    window::<2>(r, at).map(|b| u16::from_le_bytes(*b))
}

/// Read a little-endian 32-bit word.
pub fn double_word(r: &[u8], at: usize) -> Result<u32, BufferTooShort> {
    window::<4>(r, at).map(|b| u32::from_le_bytes(*b))
}

// The status byte leading every payload.
bitfield! {
    struct Status(u8) {
        [0] output,
        [1] rtto,
        [3] input,
    }
}

/// Whether real time transmission is on (`0x02`).
pub fn rtto(r: &[u8], at: usize) -> Result<bool, BufferTooShort> {
    byte(r, at).map(|b| Status(b).rtto())
}

/// State of the digital input (`0x08`).
pub fn input(r: &[u8], at: usize) -> Result<bool, BufferTooShort> {
    byte(r, at).map(|b| Status(b).input())
}

/// State of the digital output (`0x01`).
pub fn output(r: &[u8], at: usize) -> Result<bool, BufferTooShort> {
    byte(r, at).map(|b| Status(b).output())
}

/// Direction of the magnetic field (`0x08`).
///
/// Shares its bit with the digital input; no model carries both.
pub fn magnetic_field_direction(r: &[u8], at: usize) -> Result<bool, BufferTooShort> {
    byte(r, at).map(|b| Status(b).input())
}

/// Group membership bitmask, the low 12 bits of a word.
pub fn groups(r: &[u8], at: usize) -> Result<u16, BufferTooShort> {
    word(r, at).map(|w| w & 0x0FFF)
}

/// Raw magnetic field reading.
pub fn magnetic_field(r: &[u8], at: usize) -> Result<u16, BufferTooShort> {
    word(r, at)
}

/// Device clock, split across two words with the high word first.
pub fn time(r: &[u8], high: usize, low: usize) -> Result<OffsetDateTime, BufferTooShort> {
    let seconds = (word(r, high)? as u32) << 16 | word(r, low)? as u32;

    // Any `u32` count of seconds is in range.
    Ok(OffsetDateTime::from_unix_timestamp(seconds.into()).unwrap_or(OffsetDateTime::UNIX_EPOCH))
}

/// Opaque 8-byte signature, borrowed from the payload.
pub fn signature(r: &[u8], at: usize) -> Result<&[u8; 8], BufferTooShort> {
    window(r, at)
}

/// Round to a number of decimal places, half away from zero.
pub(crate) fn round(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// A set of named boolean flags packed into a 16-bit word.
///
/// See the [`Flags`](macro@Flags) derive macro for an automatic implementation
/// of this trait.
pub trait Flags: Sized {
    /// Label and bit of each flag, in declaration order.
    const FLAGS: &'static [(&'static str, u16)];

    /// Unpack flags from a word, ignoring unknown bits.
    fn from_bits(bits: u16) -> Self;

    /// Pack flags into a word.
    fn bits(&self) -> u16;

    /// Labels of the flags which are set.
    fn active(&self) -> impl Iterator<Item = &'static str> {
        let bits = self.bits();
        Self::FLAGS
            .iter()
            .filter(move |(_, bit)| bits & bit != 0)
            .map(|(label, _)| *label)
    }
}

/// Derive [`Flags`] for a struct of named booleans.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// Add the `flag(N)` attribute to a `bool` field, where `N` is the single bit
/// it occupies. The label defaults to the field name, and may be overridden
/// with `rename`. Fields without an attribute are filled from [`Default`].
///
/// ```
/// #[derive(Debug, Default, Flags)]
/// struct Relay {
///     #[flag(0x01)]
///     closed: bool,
///     #[flag(0x02, rename = "overCurrent")]
///     over_current: bool,
/// }
/// ```
#[cfg(feature = "derive")]
pub use inode_msd_derive::Flags;
