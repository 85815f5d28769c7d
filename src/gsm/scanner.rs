//! State machine walking a batch of gateway records.
//!
//! A batch is a sequence of records, each a type byte and a length byte
//! followed by that many data bytes. Scanning starts from a [`Scanning`]
//! token. Each call to [`Scanning::advance`] consumes one record and returns
//! either a [`Step`] and the successor token, or [`Done`].
//!
//! A record that cannot be decoded is skipped on its own. A record running
//! past the end of the batch ends the scan, keeping the reports already
//! produced.

use either::Either::{self, Left, Right};
use log::{debug, trace};
use thiserror::Error;
use time::OffsetDateTime;
use zerocopy::FromBytes;

use crate::field::{BufferTooShort, window};

use super::{MODEL_OFFSET, recipe, report::AdvertisingReport};

/// Records shorter than this cannot hold a payload.
pub const MIN_RECORD_LEN: usize = 24;

/// A record declared more bytes than the batch holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Record at offset {offset} needs {declared} bytes, only {remaining} remain.")]
pub struct FramingTruncated {
    pub offset: usize,
    pub declared: usize,
    pub remaining: usize,
}

/// Why a record produced no report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    /// Too short to hold a payload.
    #[error("Record of {0} bytes is too short.")]
    TooShort(usize),
    /// The model is not relayed by the gateway.
    #[error("Unsupported device model (0x{0:02X}).")]
    UnsupportedModel(u8),
    /// A field could not be decoded.
    #[error("Malformed record: {0}")]
    Malformed(#[from] BufferTooShort),
}

/// Outcome of a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<'a> {
    Report(AdvertisingReport<'a>),
    Skipped(Skip),
}

/// State token to scan the next record.
#[derive(Debug)]
pub struct Scanning {
    offset: usize,
}

/// State token for a finished scan.
#[derive(Debug)]
pub struct Done {
    /// Set when the scan ended on a truncated record.
    pub truncated: Option<FramingTruncated>,
}

#[repr(C)]
#[derive(FromBytes)]
struct RecordHeader {
    _kind: u8,
    length: u8,
}

impl Scanning {
    /// Start scanning at the beginning of a batch.
    pub fn new() -> Self {
        Self { offset: 0 }
    }

    /// Transition to another state by consuming a record.
    ///
    /// `now` stands in for the clock records do not carry.
    pub fn advance<'a>(
        self,
        r: &'a [u8],
        now: OffsetDateTime,
    ) -> Either<(Step<'a>, Scanning), Done> {
        let offset = self.offset;
        let remaining = r.len().saturating_sub(offset);

        if remaining == 0 {
            return Right(Done { truncated: None });
        }

        let truncated = |declared| Done {
            truncated: Some(FramingTruncated {
                offset,
                declared,
                remaining,
            }),
        };

        let Ok(header) = window::<2>(r, offset) else {
            return Right(truncated(2));
        };
        let RecordHeader { length, .. } = zerocopy::transmute!(*header);

        let start = offset + 2;
        let length = length as usize;

        let Some(data) = r.get(start..start + length) else {
            return Right(truncated(2 + length));
        };

        let successor = Scanning {
            offset: start + length,
        };

        Left((decode_record(data, now), successor))
    }
}

impl Default for Scanning {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_record(data: &[u8], now: OffsetDateTime) -> Step<'_> {
    if data.len() < MIN_RECORD_LEN {
        return Step::Skipped(Skip::TooShort(data.len()));
    }

    let model = data[MODEL_OFFSET];
    let Some(recipe) = recipe(model) else {
        return Step::Skipped(Skip::UnsupportedModel(model));
    };

    match recipe
        .decode(data, now)
        .and_then(|record| AdvertisingReport::new(data, record))
    {
        Ok(report) => Step::Report(report),
        Err(err) => Step::Skipped(err.into()),
    }
}

/// Decode every record of a batch into advertising reports, in batch order.
///
/// Records carry no clock and are stamped with the current time. The batch's
/// `reference_time` is not applied to records.
pub fn decode_batch(r: &[u8], reference_time: OffsetDateTime) -> Vec<AdvertisingReport<'_>> {
    decode_batch_at(r, reference_time, OffsetDateTime::now_utc())
}

/// Decode every record of a batch against a given clock.
///
/// `now` stamps records and anchors defaults relative to the current day.
pub fn decode_batch_at(
    r: &[u8],
    reference_time: OffsetDateTime,
    now: OffsetDateTime,
) -> Vec<AdvertisingReport<'_>> {
    debug!("Scanning {} byte batch (reference time {reference_time}).", r.len());

    let mut reports = Vec::new();
    let mut state = Scanning::new();

    loop {
        state = match state.advance(r, now) {
            Left((Step::Report(report), state)) => {
                trace!("Decoded a record from {}.", report.address);
                reports.push(report);
                state
            }
            Left((Step::Skipped(skip), state)) => {
                debug!("Skipping record: {skip}");
                state
            }
            Right(Done { truncated }) => {
                if let Some(truncated) = truncated {
                    debug!("Ending scan: {truncated}");
                }
                break reports;
            }
        };
    }
}
