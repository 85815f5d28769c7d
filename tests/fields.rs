use inode_msd::field::{
    self, Battery, BufferTooShort, EnergyLayout, Flags, alarms, battery, energy,
    humidity_si7021, motion::correct, position, temperature_csr, temperature_mcp9844,
    temperature_si7021,
};
use time::{OffsetDateTime, macros::datetime};

const NOW: OffsetDateTime = datetime!(2023-11-14 22:13:20 UTC);

const LAYOUT: EnergyLayout = EnergyLayout {
    average: 2,
    sum: 4,
    options: 8,
    battery: 10,
    week: 12,
};

#[test]
fn battery_codes() {
    for code in 0..16u8 {
        let Battery { level, voltage } = Battery::from_code(code);

        let expected = if code == 1 {
            100
        } else {
            10 * (code.min(11) as i16 - 1)
        };

        assert_eq!(level, expected, "{code}");
        assert_eq!(voltage, (level - 10) as f64 * 1.2 / 100.0 + 1.8, "{code}");
    }
}

#[test]
fn battery_levels_rise_with_code() {
    let levels: Vec<_> = (0..16u8)
        .filter(|&c| c != 1)
        .map(|c| Battery::from_code(c).level)
        .collect();

    assert!(levels.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn battery_shift() {
    assert_eq!(battery(&[0x00, 0x50], 0, 12).unwrap().level, 40);
    assert_eq!(battery(&[0x50, 0x00], 0, 4).unwrap().level, 40);
    assert_eq!(battery(&[0x1F, 0x00], 0, 4).unwrap().level, 100);
}

#[test]
fn csr_temperature() {
    let t = |raw: u16| temperature_csr(&raw.to_le_bytes(), 0).unwrap();

    assert_eq!(t(21), 21.0);
    assert_eq!(t(127), 70.0);
    assert_eq!(t(128), -30.0);
    assert_eq!(t(8192 - 5), -5.0);
    assert_eq!(t(8192 - 31), -30.0);
}

#[test]
fn mcp9844_temperature() {
    let t = |b1: u8, b2: u8| temperature_mcp9844(&[b1, b2], 0).unwrap();

    assert_eq!(t(0x90, 0x01), 25.0);
    assert_eq!(t(0x40, 0x1F), -12.0);
    assert_eq!(t(0x04, 0x00), 0.25);
    assert_eq!(t(0x00, 0x0F), 70.0);
    assert_eq!(t(0x00, 0x10), -30.0);
}

#[test]
fn si7021_temperature() {
    let t = |raw: u16| temperature_si7021(&raw.to_le_bytes(), 0).unwrap();

    assert_eq!(t(0x1A00), 24.54);
    assert_eq!(t(0x2400), 51.99);
    assert_eq!(t(0x0000), -30.0);
    assert_eq!(t(0xFFFF), 70.0);
}

#[test]
fn temperatures_stay_in_range() {
    for raw in (0..=u16::MAX).step_by(7) {
        let r = raw.to_le_bytes();
        for value in [
            temperature_csr(&r, 0).unwrap(),
            temperature_mcp9844(&r, 0).unwrap(),
            temperature_si7021(&r, 0).unwrap(),
        ] {
            assert!((-30.0..=70.0).contains(&value), "{raw:#06X}: {value}");
        }
    }
}

#[test]
fn si7021_humidity() {
    let h = |raw: u16| humidity_si7021(&raw.to_le_bytes(), 0).unwrap();

    assert_eq!(h(0x2000), 56.5);
    assert_eq!(h(0x0000), 1.0);
    assert_eq!(h(0xFFFF), 100.0);

    for raw in (0..=u16::MAX).step_by(7) {
        assert!((1.0..=100.0).contains(&h(raw)), "{raw:#06X}");
    }
}

#[test]
fn motion_sign_correction() {
    assert_eq!(correct(0x10), -15);
    assert_eq!(correct(0x0F), 15);
    assert_eq!(correct(0x1F), 0);
    assert_eq!(correct(0x00), 0);

    let word: u16 = 0x8000 | 0x10 << 10 | 0x0F << 5 | 0x11;
    let p = position(&word.to_le_bytes(), 0).unwrap();
    assert!(p.motion);
    assert_eq!((p.x, p.y, p.z), (-15, 15, -14));

    let p = position(&[0x00, 0x00], 0).unwrap();
    assert!(!p.motion);
}

#[test]
fn alarm_masks_differ_by_transport() {
    let direct = alarms(&[0x06], Some(0), None, 0xC000).unwrap();
    let relayed = alarms(&[0x06], Some(0), None, 0x8000).unwrap();

    assert_eq!(direct.bits, 0xC000);
    assert_eq!(relayed.bits, 0x8000);
    assert!(direct.low_battery && relayed.low_battery);

    let rtto_only = alarms(&[0x02], Some(0), None, 0xC000).unwrap();
    assert_eq!(rtto_only.bits, 0x4000);
    assert!(!rtto_only.low_battery);
}

#[test]
fn extended_alarms() {
    let a = alarms(&[0x00, 0x00, 0x01, 0x02], Some(0), Some(2), 0x8000).unwrap();
    let extended = a.extended.unwrap();

    assert!(!a.low_battery);
    assert_eq!(a.bits, 0x0201);
    assert!(extended.move_accelerometer && extended.level_magnet_timer);
    assert!(!extended.level_temperature);

    let names: Vec<_> = extended.active().collect();
    assert_eq!(names, ["moveAccelerometer", "levelMagnetTimer"]);

    let unused = alarms(&[], None, None, 0x8000).unwrap();
    assert_eq!(unused.bits, 0);
    assert!(!unused.low_battery);
    assert!(unused.extended.is_none());

    let from_word = alarms(&[0x00, 0x80], None, Some(0), 0x8000).unwrap();
    assert!(from_word.low_battery);
}

#[test]
fn energy_defaults() {
    let mut r = [0u8; 10];
    r[2..4].copy_from_slice(&500u16.to_le_bytes());
    r[4..8].copy_from_slice(&123456u32.to_le_bytes());

    let e = energy(&r, &LAYOUT, NOW).unwrap();
    assert_eq!((e.unit, e.constant), (0, 1000));
    assert_eq!((e.average_unit, e.sum_unit), ("kWh", "kW"));
    assert_eq!(e.average, 30.0);
    assert_eq!(e.sum, 123.456);
    assert_eq!(e.battery, Battery::FULL);
    assert_eq!(e.light_level, 0.0);
    assert_eq!((e.week_day, e.week_day_total), (1, 0));

    let sunday = datetime!(2023-11-12 08:00 UTC);
    assert_eq!(energy(&r, &LAYOUT, sunday).unwrap().week_day, 6);
}

#[test]
fn energy_units() {
    let decode = |options: u16| {
        let mut r = [0u8; 10];
        r[8..10].copy_from_slice(&options.to_le_bytes());
        energy(&r, &LAYOUT, NOW).unwrap()
    };

    let e = decode(0xC001);
    assert_eq!((e.unit, e.constant), (3, 1));
    assert_eq!((e.average_unit, e.sum_unit), ("cnt", "cnt"));

    let e = decode(0x8000);
    assert_eq!((e.unit, e.constant), (2, 1));

    let e = decode(0x4000);
    assert_eq!((e.unit, e.constant), (1, 1000));
    assert_eq!((e.average_unit, e.sum_unit), ("m³", "m³"));

    let e = decode(0x0064);
    assert_eq!((e.unit, e.constant), (0, 100));
}

#[test]
fn energy_extended_region() {
    let mut r = [0u8; 14];
    r[8..10].copy_from_slice(&0xC001u16.to_le_bytes());
    r[2..4].copy_from_slice(&2u16.to_le_bytes());
    r[4..8].copy_from_slice(&7u32.to_le_bytes());
    r[10] = 0x37;
    r[12..14].copy_from_slice(&(5u16 << 13 | 100).to_le_bytes());

    let e = energy(&r, &LAYOUT, NOW).unwrap();
    assert_eq!(e.average, 120.0);
    assert_eq!(e.sum, 7.0);
    assert_eq!(e.battery.level, 20);
    assert_eq!(e.light_level, 46.7);
    assert_eq!((e.week_day, e.week_day_total), (5, 100));
}

#[test]
fn simple_fields() {
    let r = [0x0B, 0xFF, 0x34, 0x12, 0x53, 0x65, 0x00, 0xF1];

    assert!(field::rtto(&r, 0).unwrap());
    assert!(field::input(&r, 0).unwrap());
    assert!(field::output(&r, 0).unwrap());
    assert!(field::magnetic_field_direction(&r, 0).unwrap());

    assert_eq!(field::groups(&r, 0).unwrap(), 0x0F0B);
    assert_eq!(field::magnetic_field(&r, 2).unwrap(), 0x1234);
    assert_eq!(field::time(&r, 4, 6).unwrap().unix_timestamp(), 1_700_000_000);
    assert_eq!(field::signature(&r, 0).unwrap(), &r);
}

#[test]
fn reads_past_the_end_fail() {
    let r = [0u8; 4];

    assert_eq!(
        field::word(&r, 3),
        Err(BufferTooShort {
            offset: 3,
            width: 2,
            len: 4
        })
    );
    assert!(field::signature(&r, 0).is_err());
    assert!(field::byte(&r, usize::MAX).is_err());
    assert!(temperature_mcp9844(&r, 3).is_err());
}
