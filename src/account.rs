//! Decoding of account-level state, and the entry point for whole cards.
//!
//! Each section of the card (serial number, balance, season pass, refill, trip
//! log) is decoded independently. A section that fails is recorded as
//! [`Section::Failed`] and does not prevent the others from decoding.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, instrument, warn};

use crate::{
    card::{CardFiles, FILE_BALANCE, FILE_SEASON_PASS, FILE_SERIAL, FILE_TRIPS, serial_number},
    error::Error,
    fields::{FromFields, decode_into},
    layout::{FieldId, FieldTable, FormatVersion, Layout, find},
    model::{PassDetails, Refill, SeasonPass, Section, Timestamp, TransitAccount},
    time::{card_date_to_timestamp, days_since_epoch},
    trips::decode_trip_log,
};

/// Options controlling a decode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Decode under this revision instead of detecting one.
    pub format: Option<FormatVersion>,
    /// The instant against which season-pass validity is evaluated.
    pub as_of: Timestamp,
}

impl DecodeOptions {
    /// Evaluate validity at a fixed instant.
    pub fn at(as_of: Timestamp) -> Self {
        Self { format: None, as_of }
    }

    /// Evaluate validity at the current system time.
    ///
    /// The clock is read once, here; the whole decode pass then uses the
    /// captured instant.
    pub fn now() -> Self {
        let as_of = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(e) => -(e.duration().as_secs() as i64),
        };

        Self::at(as_of)
    }

    /// Decode under a fixed revision.
    pub fn with_format(self, format: FormatVersion) -> Self {
        Self {
            format: Some(format),
            ..self
        }
    }
}

/// Decode a card as of the current system time.
pub fn decode_now(files: &(impl CardFiles + ?Sized)) -> TransitAccount {
    decode(files, &DecodeOptions::now())
}

/// Decode every section of a card.
#[instrument(name = "decode-account", skip_all, fields(as_of = options.as_of))]
pub fn decode(files: &(impl CardFiles + ?Sized), options: &DecodeOptions) -> TransitAccount {
    let as_of = options.as_of;

    let serial_number = section(
        "serial_number",
        files.require(FILE_SERIAL).and_then(serial_number),
    );

    let format = match options.format {
        Some(format) => Ok(format),
        None => FormatVersion::detect(files),
    };

    let format = match format {
        Ok(format) => format,
        Err(err) => {
            warn!(%err, "no layout matches card");

            return TransitAccount {
                as_of,
                format: None,
                serial_number,
                balance: Section::Failed(err.clone()),
                season_pass: Section::Failed(err.clone()),
                trips: Section::Failed(err.clone()),
                refills: Section::Failed(err),
            };
        }
    };

    debug!(?format, "selected layout");

    let layout = format.layout();

    let balance = section("balance", decode_balance(files, layout));

    let season_pass = match layout.season_pass {
        Some(table) => section(
            "season_pass",
            files
                .require(FILE_SEASON_PASS)
                .and_then(|data| decode_season_pass(data, table, as_of)),
        ),
        None => Section::NotEncoded,
    };

    let refills = match layout.refill {
        Some(table) => section(
            "refills",
            files
                .require(FILE_BALANCE)
                .and_then(|data| decode_refill(data, table)),
        ),
        None => Section::NotEncoded,
    };

    let trips = section(
        "trips",
        files
            .require(FILE_TRIPS)
            .map(|data| decode_trip_log(data, format)),
    );

    TransitAccount {
        as_of,
        format: Some(format),
        serial_number,
        balance,
        season_pass,
        trips,
        refills,
    }
}

fn section<T>(name: &'static str, result: Result<T, Error>) -> Section<T> {
    if let Err(err) = &result {
        warn!(section = name, %err, "failed to decode section");
    }

    result.into()
}

/// Unwrap a field every layout carrying its table must define.
pub(crate) fn required(value: Option<u32>) -> Result<u32, Error> {
    value.ok_or(Error::UnknownFormatVersion)
}

#[derive(Debug, Default, FromFields)]
struct RawBalance {
    #[field(Balance)]
    balance: Option<u32>,
}

/// Decode the stored-value balance, in cents.
pub fn decode_balance(files: &(impl CardFiles + ?Sized), layout: &Layout) -> Result<u32, Error> {
    let data = files.require(FILE_BALANCE)?;
    let raw: RawBalance = decode_into(data, layout.balance)?;
    required(raw.balance)
}

#[derive(Debug, Default, FromFields)]
struct RawSeasonPass {
    #[field(PassStartDay)]
    start_day: Option<u32>,
    #[field(PassEndDay)]
    end_day: Option<u32>,
    #[field(PassPreviousStartDay)]
    previous_start_day: Option<u32>,
    #[field(PassPreviousEndDay)]
    previous_end_day: Option<u32>,
    #[field(PassPurchaseDay)]
    purchase_day: Option<u32>,
    #[field(PassPurchaseMinute)]
    purchase_minute: Option<u32>,
    #[field(PassPrice)]
    price: Option<u32>,
    #[field(PassLastUseDay)]
    last_use_day: Option<u32>,
    #[field(PassLastUseMinute)]
    last_use_minute: Option<u32>,
}

/// Decode the season-pass slot.
///
/// A zero end day marks a slot that has never held a pass; nothing else is
/// read from it.
pub fn decode_season_pass(
    data: &[u8],
    table: FieldTable,
    as_of: Timestamp,
) -> Result<SeasonPass, Error> {
    let end = find(table, FieldId::PassEndDay).ok_or(Error::UnknownFormatVersion)?;

    let end_day = end.read(data)?;
    if end_day == 0 {
        return Ok(SeasonPass::Absent);
    }

    let raw: RawSeasonPass = decode_into(data, table)?;

    let day = |v: Option<u32>| required(v).map(|d| card_date_to_timestamp(d, 0));
    let time = |d: Option<u32>, m: Option<u32>| {
        Ok::<_, Error>(card_date_to_timestamp(required(d)?, required(m)?))
    };

    Ok(SeasonPass::Present(PassDetails {
        start: day(raw.start_day)?,
        end: day(raw.end_day)?,
        previous_start: day(raw.previous_start_day)?,
        previous_end: day(raw.previous_end_day)?,
        purchased_at: time(raw.purchase_day, raw.purchase_minute)?,
        price: required(raw.price)?,
        last_used_at: time(raw.last_use_day, raw.last_use_minute)?,
        valid: end_day as i64 > days_since_epoch(as_of),
    }))
}

#[derive(Debug, Default, FromFields)]
struct RawRefill {
    #[field(RefillDay)]
    day: Option<u32>,
    #[field(RefillMinute)]
    minute: Option<u32>,
    #[field(RefillAmount)]
    amount: Option<u32>,
}

/// Decode the refill slot of the balance file.
///
/// Only the latest refill is stored. An all-zero slot yields no refill.
pub fn decode_refill(data: &[u8], table: FieldTable) -> Result<Vec<Refill>, Error> {
    let raw: RawRefill = decode_into(data, table)?;

    let day = required(raw.day)?;
    let amount = required(raw.amount)?;

    if day == 0 && amount == 0 {
        return Ok(Vec::new());
    }

    Ok(vec![Refill {
        timestamp: card_date_to_timestamp(day, raw.minute.unwrap_or(0)),
        amount,
    }])
}
