//! Advertising reports synthesized from gateway records.

use zerocopy::FromBytes;

use crate::{
    field::{BufferTooShort, window},
    host::{ManufacturerData, Payload},
    record::DecodedRecord,
};

/// Event type of a connectable undirected advertisement (`ADV_IND`).
pub const EVENT_TYPE: u8 = 0x00;
/// Address type of a public device address.
pub const ADDRESS_TYPE: u8 = 0x00;

/// An advertising report, as a host would have received it over the air.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvertisingReport<'a> {
    pub event_type: u8,
    pub address_type: u8,
    /// Colon separated, most significant byte first.
    pub address: String,
    /// The local name, then the manufacturer specific data.
    pub payloads: Vec<Payload<'a>>,
    pub rssi: i8,
}

#[repr(C)]
#[derive(FromBytes)]
struct Preamble {
    _status: u8,
    _model: u8,
    address: [u8; 6],
    name: [u8; 16],
}

impl<'a> AdvertisingReport<'a> {
    /// Wrap a record decoded from `r` in a report.
    pub fn new(r: &[u8], record: DecodedRecord<'a>) -> Result<Self, BufferTooShort> {
        let Preamble { address, name, .. } = zerocopy::transmute!(*window::<24>(r, 0)?);

        let rssi = r.len().checked_sub(4).ok_or(BufferTooShort {
            offset: 0,
            width: 4,
            len: r.len(),
        })?;
        let rssi = window::<1>(r, rssi)?[0] as i8;

        Ok(Self {
            event_type: EVENT_TYPE,
            address_type: ADDRESS_TYPE,
            address: address_string(&address),
            payloads: vec![
                Payload::LocalName(local_name(&name)),
                Payload::ManufacturerSpecificData(ManufacturerData::with_record(record)),
            ],
            rssi,
        })
    }

    /// The local name of the device.
    pub fn local_name(&self) -> Option<&str> {
        self.payloads.iter().find_map(|p| match p {
            Payload::LocalName(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// The decoded iNode record.
    pub fn record(&self) -> Option<&DecodedRecord<'a>> {
        self.payloads.iter().find_map(|p| match p {
            Payload::ManufacturerSpecificData(d) => d.record.as_ref(),
            _ => None,
        })
    }
}

/// Format an address stored least significant byte first.
pub fn address_string(address: &[u8; 6]) -> String {
    address
        .iter()
        .rev()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Decode a fixed-width name, dropping NUL padding.
pub fn local_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).replace('\0', "")
}
