#![cfg(feature = "derive")]

use inode_msd::field::{ExtendedAlarms, Flags};
use tinyvec::ArrayVec;

#[derive(Debug, Default, PartialEq, Flags)]
struct Relay {
    #[flag(0x01)]
    closed: bool,
    #[flag(0x04, rename = "overCurrent")]
    over_current: bool,
    switch_count: u32,
}

#[test]
fn unpack_and_pack() {
    let relay = Relay::from_bits(0xFF05);

    assert_eq!(
        relay,
        Relay {
            closed: true,
            over_current: true,
            switch_count: 0,
        }
    );
    assert_eq!(relay.bits(), 0x05);
    assert_eq!(Relay::from_bits(0x02), Relay::default());
}

#[test]
fn labels() {
    assert_eq!(Relay::FLAGS, &[("closed", 0x01), ("overCurrent", 0x04)]);

    let active: ArrayVec<[&str; 2]> = Relay::from_bits(0x04).active().collect();
    assert_eq!(active.as_slice(), ["overCurrent"]);
}

#[test]
fn alarm_flags() {
    assert_eq!(ExtendedAlarms::FLAGS.len(), 10);
    assert_eq!(ExtendedAlarms::FLAGS[0], ("moveAccelerometer", 0x0001));
    assert_eq!(ExtendedAlarms::FLAGS[9], ("levelMagnetTimer", 0x0200));

    let all = ExtendedAlarms::from_bits(0x03FF);
    assert_eq!(all.bits(), 0x03FF);

    let active: ArrayVec<[&str; 10]> = all.active().collect();
    assert_eq!(active.len(), 10);
    assert!(ExtendedAlarms::from_bits(0xFC00).active().next().is_none());
}
