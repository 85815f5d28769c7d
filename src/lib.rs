//! A decoder for the Manufacturer Specific Data (MSD) broadcast by iNode
//! Bluetooth Low Energy devices.
//!
//! iNode devices pack their telemetry (battery, temperature, humidity, motion,
//! magnetic field, energy counters, alarms, digital I/O, a clock and a
//! signature) into a short, bit-packed MSD payload. The same telemetry is also
//! delivered in batches by the iNode GSM gateway, laid out at different
//! offsets.
//!
//! Most users should begin with [`msd::decode`] for payloads taken directly
//! from an advertisement, or [`gsm::decode_batch`] for gateway batches. Hosts
//! with their own table of payload decoders can call [`host::install`]. The
//! individual field decoders are exposed in the [`field`] module for
//! applications that need finer control.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: re-export the [`Flags`](macro@field::Flags) derive macro
//!   (default).

pub mod field;
pub mod gsm;
pub mod host;
pub mod model;
pub mod msd;
pub mod recipe;
pub mod record;

pub use model::DeviceModel;
pub use record::DecodedRecord;
