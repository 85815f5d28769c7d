use inode_msd::{
    DeviceModel,
    host::{self, MANUFACTURER_SPECIFIC_DATA, Payload, Registry},
    msd::Error,
};

fn fallback(r: &[u8]) -> Result<Payload<'_>, Error> {
    Ok(Payload::Other {
        kind: MANUFACTURER_SPECIFIC_DATA,
        data: r,
    })
}

const BEACON: [u8; 4] = [0x02, 0x80, 0x03, 0x20];
const FOREIGN: [u8; 4] = [0x4C, 0x00, 0x02, 0x15];

#[test]
fn install_into_empty_registry() {
    let mut registry = Registry::new();
    host::install(&mut registry);

    let decode = &registry[&MANUFACTURER_SPECIFIC_DATA];

    let Ok(Payload::ManufacturerSpecificData(data)) = decode(&BEACON) else {
        panic!("expected manufacturer specific data");
    };
    assert_eq!(data.record.unwrap().model, DeviceModel::Beacon);

    assert_eq!(decode(&FOREIGN), Err(Error::UnsupportedModel(0x00)));
    assert!(matches!(decode(&[0x02]), Err(Error::BufferTooShort(_))));
}

#[test]
fn install_chains_to_previous_decoder() {
    let mut registry = Registry::new();
    registry.insert(MANUFACTURER_SPECIFIC_DATA, Box::new(fallback));
    host::install(&mut registry);

    let decode = &registry[&MANUFACTURER_SPECIFIC_DATA];

    let payload = decode(&BEACON).unwrap();
    assert_eq!(payload.kind(), MANUFACTURER_SPECIFIC_DATA);
    assert_eq!(payload.label(), "Manufacturer Specific Data");
    assert!(matches!(payload, Payload::ManufacturerSpecificData(_)));

    assert_eq!(
        decode(&FOREIGN),
        Ok(Payload::Other {
            kind: MANUFACTURER_SPECIFIC_DATA,
            data: &FOREIGN,
        })
    );
    assert!(matches!(decode(&[0x02]), Ok(Payload::Other { .. })));
}

#[test]
fn install_leaves_other_types() {
    let mut registry = Registry::new();
    registry.insert(0x16, Box::new(fallback));
    host::install(&mut registry);

    assert_eq!(registry.len(), 2);
    assert!(matches!(registry[&0x16](&BEACON), Ok(Payload::Other { .. })));
}
