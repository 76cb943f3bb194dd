//! Decoding of the trip log.
//!
//! The trip log is a cyclic record file: the newest record overwrites the
//! oldest, so record order says nothing about chronology. Decoded trips are
//! sorted by timestamp instead, keeping record order among equal timestamps.

use tracing::warn;

use crate::{
    account::required,
    error::Error,
    fields::{FromFields, decode_into},
    layout::{FieldId, FieldTable, FormatVersion},
    model::{PaymentMode, RejectedRecord, Trip, TripLog},
    time::card_date_to_timestamp,
};

#[derive(Debug, Default, FromFields)]
struct RawTrip {
    #[field(TripPaymentFlag, |m, x: u32| *m = Some(PaymentMode::from_flag(x)))]
    payment: Option<PaymentMode>,
    #[field(TripDay)]
    day: Option<u32>,
    #[field(TripMinute)]
    minute: Option<u32>,
    #[field(TripAgency)]
    agency: Option<u32>,
    #[field(TripTransactionType)]
    transaction: Option<u32>,
    #[field(TripFare)]
    fare: Option<u32>,
    #[field(TripBalance)]
    balance: Option<u32>,
    #[field(TripCoach)]
    coach: Option<u32>,
}

/// Decode a single trip record.
///
/// Fields a revision does not store fall back to: minute zero, stored-value
/// payment, and no resulting balance or transaction type.
pub fn decode_trip(record: &[u8], table: FieldTable) -> Result<Trip, Error> {
    let raw: RawTrip = decode_into(record, table)?;

    Ok(Trip {
        timestamp: card_date_to_timestamp(required(raw.day)?, raw.minute.unwrap_or(0)),
        coach: required(raw.coach)?,
        fare: required(raw.fare)?,
        balance: raw.balance,
        agency_code: required(raw.agency)?,
        transaction_code: raw.transaction,
        payment: raw.payment.unwrap_or(PaymentMode::StoredValue),
    })
}

/// Decode every record of a trip log file under a format revision.
///
/// Records that fail to decode, including a trailing partial record, are
/// reported in [`TripLog::rejected`] and do not affect the others.
pub fn decode_trip_log(data: &[u8], format: FormatVersion) -> TripLog {
    let layout = format.layout();
    let size = layout.trip_record_size;

    let mut log = TripLog::default();

    for (index, record) in data.chunks(size).enumerate() {
        let result = if record.len() < size {
            Err(Error::TruncatedBuffer {
                required: size * 8,
                available: record.len() * 8,
            })
        } else {
            decode_trip(record, layout.trip)
        };

        match result {
            Ok(trip) => log.trips.push(trip),
            Err(error) => {
                warn!(index, %error, "rejected trip record");
                log.rejected.push(RejectedRecord { index, error });
            }
        }
    }

    // Stable, so equal timestamps keep record order.
    log.trips.sort_by_key(|trip| trip.timestamp);

    log
}
