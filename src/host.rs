//! Integration with a host's table of advertising payload decoders.
//!
//! Hosts parsing advertising reports typically keep a table from payload type
//! to decoder. [`install`] places the iNode decoder in such a table under
//! [`MANUFACTURER_SPECIFIC_DATA`], handing payloads from other manufacturers
//! on to whichever decoder was installed before it.

use std::collections::HashMap;

use log::debug;

use crate::{field, model::DeviceModel, msd, record::DecodedRecord};

/// Payload type of a complete local name.
pub const LOCAL_NAME: u8 = 0x09;
/// Payload type of manufacturer specific data.
pub const MANUFACTURER_SPECIFIC_DATA: u8 = 0xFF;

/// A manufacturer specific data payload, tagged with its payload type.
///
/// Hosts may construct an empty container and have it filled by
/// [`msd::decode_into`].
#[derive(Debug, Clone, PartialEq)]
pub struct ManufacturerData<'a> {
    pub kind: u8,
    pub label: &'static str,
    pub record: Option<DecodedRecord<'a>>,
}

impl<'a> ManufacturerData<'a> {
    /// An empty container.
    pub const fn new() -> Self {
        Self {
            kind: MANUFACTURER_SPECIFIC_DATA,
            label: label(MANUFACTURER_SPECIFIC_DATA),
            record: None,
        }
    }

    /// A container holding a decoded record.
    pub fn with_record(record: DecodedRecord<'a>) -> Self {
        Self {
            record: Some(record),
            ..Self::new()
        }
    }
}

impl Default for ManufacturerData<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded advertising payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    LocalName(String),
    ManufacturerSpecificData(ManufacturerData<'a>),
    /// A payload of a type this crate does not decode.
    Other { kind: u8, data: &'a [u8] },
}

impl Payload<'_> {
    /// The payload type.
    pub fn kind(&self) -> u8 {
        match self {
            Self::LocalName(_) => LOCAL_NAME,
            Self::ManufacturerSpecificData(d) => d.kind,
            Self::Other { kind, .. } => *kind,
        }
    }

    /// Human readable payload type.
    pub fn label(&self) -> &'static str {
        label(self.kind())
    }
}

/// Human readable name of a payload type.
pub const fn label(kind: u8) -> &'static str {
    match kind {
        LOCAL_NAME => "Complete Local Name",
        MANUFACTURER_SPECIFIC_DATA => "Manufacturer Specific Data",
        _ => "Unknown",
    }
}

/// A payload decoder, as stored in a host's table.
pub type Decoder =
    Box<dyn for<'a> Fn(&'a [u8]) -> Result<Payload<'a>, msd::Error> + Send + Sync>;

/// A host's table of payload decoders, keyed by payload type.
pub type Registry = HashMap<u8, Decoder>;

fn decoder<F>(f: F) -> Decoder
where
    F: for<'a> Fn(&'a [u8]) -> Result<Payload<'a>, msd::Error> + Send + Sync + 'static,
{
    Box::new(f)
}

/// Install the iNode decoder for manufacturer specific data.
///
/// Payloads whose model byte is not an iNode model are passed to the decoder
/// previously installed for the payload type, if any.
pub fn install(registry: &mut Registry) {
    let previous = registry.remove(&MANUFACTURER_SPECIFIC_DATA);

    if previous.is_some() {
        debug!("Chaining the iNode decoder to a previously installed decoder.");
    } else {
        debug!("Installing the iNode decoder.");
    }

    let handler = decoder(move |r| {
        let is_inode = field::byte(r, msd::MODEL_OFFSET)
            .is_ok_and(|code| DeviceModel::try_from(code).is_ok());

        match &previous {
            Some(previous) if !is_inode => previous(r),
            _ => msd::decode(r).map(Payload::ManufacturerSpecificData),
        }
    });

    registry.insert(MANUFACTURER_SPECIFIC_DATA, handler);
}
