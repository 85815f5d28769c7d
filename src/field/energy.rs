//! Energy meter readings.

use tartan_bitfield::bitfield;
use time::OffsetDateTime;

use super::{Battery, BufferTooShort, battery, byte, double_word, round, word};

/// Offsets of the energy meter fields within a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyLayout {
    /// 16-bit pulse count averaged over the last minute.
    pub average: usize,
    /// 32-bit total pulse count.
    pub sum: usize,
    /// 16-bit options word holding the unit and meter constant.
    pub options: usize,
    /// Word holding the battery code (bits 4..8) and light level (bits 0..4).
    pub battery: usize,
    /// Word holding the week day and its running total.
    pub week: usize,
}

impl EnergyLayout {
    /// Length a payload must reach for the battery, light level and week
    /// fields to be decoded rather than defaulted.
    pub const fn extended_len(&self) -> usize {
        let battery = self.battery + 2;
        let week = self.week + 2;
        if battery > week { battery } else { week }
    }
}

/// Decoded energy meter reading.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyReading {
    /// Unit code, the top two bits of the options word.
    pub unit: u8,
    /// Pulses per unit.
    pub constant: u16,
    pub average: f64,
    pub sum: f64,
    pub average_unit: &'static str,
    pub sum_unit: &'static str,
    pub battery: Battery,
    /// Percent.
    pub light_level: f64,
    /// Day of the week, Sunday is 0.
    pub week_day: u8,
    pub week_day_total: u16,
}

bitfield! {
    struct Options(u16) {
        [0..14] constant: u16,
        [14..16] unit: u16,
    }
}

bitfield! {
    struct WeekData(u16) {
        [0..13] total: u16,
        [13..16] day: u16,
    }
}

/// Labels and default constant for a unit code.
fn unit(code: u8) -> (&'static str, &'static str, u16) {
    match code {
        0 => ("kWh", "kW", 1000),
        1 => ("m³", "m³", 1000),
        _ => ("cnt", "cnt", 1),
    }
}

/// Decode an energy meter reading.
///
/// Payloads too short to hold the battery and week fields report a full
/// battery, no light and yesterday's week day, relative to `now`.
pub fn energy(
    r: &[u8],
    layout: &EnergyLayout,
    now: OffsetDateTime,
) -> Result<EnergyReading, BufferTooShort> {
    let options = Options(word(r, layout.options)?);
    let raw_average = word(r, layout.average)?;
    let raw_sum = double_word(r, layout.sum)?;

    let code = options.unit() as u8;
    let (average_unit, sum_unit, default_constant) = unit(code);

    let constant = match options.constant() {
        0 => default_constant,
        c => c,
    };

    let average = round(60.0 * raw_average as f64 / constant as f64, 3);
    let sum = round(raw_sum as f64 / constant as f64, 3);

    let (battery, light_level, week_day, week_day_total) = if r.len() >= layout.extended_len() {
        let light = (byte(r, layout.battery)? & 0x0F) as f64;
        let week = WeekData(word(r, layout.week)?);

        (
            battery(r, layout.battery, 4)?,
            round(light * 100.0 / 15.0, 1),
            week.day() as u8,
            week.total(),
        )
    } else {
        let yesterday = now
            .date()
            .previous_day()
            .map_or(0, |d| d.weekday().number_days_from_sunday());

        (Battery::FULL, 0.0, yesterday, 0)
    };

    Ok(EnergyReading {
        unit: code,
        constant,
        average,
        sum,
        average_unit,
        sum_unit,
        battery,
        light_level,
        week_day,
        week_day_total,
    })
}
