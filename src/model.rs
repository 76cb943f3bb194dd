//! The decoded state of a card.
//!
//! Every value here is built once by a decode pass and never updated; decoding
//! the card again yields a new [`TransitAccount`].

use crate::{
    agency::{self, Agency, Station, TransactionType},
    error::Error,
    layout::FormatVersion,
};

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// The outcome of decoding one section of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section<T> {
    /// The section was decoded.
    Decoded(T),
    /// The card's format revision does not store this section.
    NotEncoded,
    /// The section could not be decoded.
    Failed(Error),
}

impl<T> Section<T> {
    /// The decoded value, if any.
    pub fn decoded(&self) -> Option<&T> {
        match self {
            Self::Decoded(value) => Some(value),
            _ => None,
        }
    }

    /// The error that prevented decoding, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }
}

impl<T> From<Result<T, Error>> for Section<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::Decoded(value),
            Err(err) => Self::Failed(err),
        }
    }
}

/// The decoded state of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitAccount {
    pub(crate) as_of: Timestamp,
    pub(crate) format: Option<FormatVersion>,
    pub(crate) serial_number: Section<String>,
    pub(crate) balance: Section<u32>,
    pub(crate) season_pass: Section<SeasonPass>,
    pub(crate) trips: Section<TripLog>,
    pub(crate) refills: Section<Vec<Refill>>,
}

impl TransitAccount {
    /// The instant against which pass validity was evaluated.
    pub fn as_of(&self) -> Timestamp {
        self.as_of
    }

    /// The format revision used to decode the card, if one was found.
    pub fn format(&self) -> Option<FormatVersion> {
        self.format
    }

    /// The card serial number, as 18 hex digits.
    pub fn serial_number(&self) -> &Section<String> {
        &self.serial_number
    }

    /// The stored-value balance in cents.
    pub fn balance(&self) -> &Section<u32> {
        &self.balance
    }

    pub fn season_pass(&self) -> &Section<SeasonPass> {
        &self.season_pass
    }

    /// Trips in chronological order, with any records that failed to decode.
    pub fn trips(&self) -> &Section<TripLog> {
        &self.trips
    }

    /// The most recent refill. Cards keep no history beyond it.
    pub fn refills(&self) -> &Section<Vec<Refill>> {
        &self.refills
    }

    /// Whether the card held a valid season pass at [`Self::as_of`].
    pub fn has_valid_pass(&self) -> bool {
        self.season_pass.decoded().is_some_and(SeasonPass::is_valid)
    }
}

/// The season-pass slot of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeasonPass {
    /// No pass has ever been loaded onto the card.
    Absent,
    Present(PassDetails),
}

impl SeasonPass {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn details(&self) -> Option<&PassDetails> {
        match self {
            Self::Present(details) => Some(details),
            Self::Absent => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.details().is_some_and(|d| d.valid)
    }
}

/// A loaded season pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassDetails {
    /// Start of the current validity window (midnight).
    pub start: Timestamp,
    /// End of the current validity window (midnight).
    pub end: Timestamp,
    pub previous_start: Timestamp,
    pub previous_end: Timestamp,
    pub purchased_at: Timestamp,
    /// Purchase price in cents.
    pub price: u32,
    pub last_used_at: Timestamp,
    /// Whether the pass was valid when decoded.
    pub valid: bool,
}

/// How a trip was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaymentMode {
    /// Deducted from the stored-value balance ("arvo").
    StoredValue,
    /// Covered by the season pass ("kausi").
    SeasonPass,
}

impl PaymentMode {
    pub fn from_flag(flag: u32) -> Self {
        if flag == 1 {
            Self::StoredValue
        } else {
            Self::SeasonPass
        }
    }
}

/// Mode of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    Bus,
    Metro,
}

/// One entry of the trip log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub timestamp: Timestamp,
    /// Vehicle number, or a station index for rail trips.
    pub coach: u32,
    /// Fare in cents. Zero for most season-pass trips.
    pub fare: u32,
    /// Balance after the trip in cents, if the format records it.
    pub balance: Option<u32>,
    pub agency_code: u32,
    /// Transaction type, if the format records it.
    pub transaction_code: Option<u32>,
    pub payment: PaymentMode,
}

impl Trip {
    pub fn agency(&self) -> &'static Agency {
        agency::agency(self.agency_code)
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_code.map(TransactionType::from_code)
    }

    /// The station of a rail trip.
    ///
    /// Returns `Ok(None)` for trips that are not rail trips.
    pub fn station(&self) -> Result<Option<&'static Station>, Error> {
        agency::resolve_station(self.agency_code, self.coach)
    }

    pub fn mode(&self) -> Mode {
        if agency::is_rail(self.agency_code, self.coach) {
            Mode::Metro
        } else {
            Mode::Bus
        }
    }
}

/// A trip record that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectedRecord {
    /// Position of the record in the trip log file.
    pub index: usize,
    pub error: Error,
}

/// The decoded trip log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripLog {
    /// Trips ordered by timestamp, ties kept in record order.
    pub trips: Vec<Trip>,
    pub rejected: Vec<RejectedRecord>,
}

/// A top-up of the stored-value balance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Refill {
    pub timestamp: Timestamp,
    /// Amount in cents.
    pub amount: u32,
}

impl Refill {
    pub fn label(&self) -> &'static str {
        agency::REFILL_LABEL
    }
}
