//! Declarative field layouts for each known card format revision.
//!
//! The same logical fields have moved between revisions of the card format.
//! Rather than decoding each revision by hand, every revision is described by
//! a set of field tables mapping a [`FieldId`] to a [`FieldSpec`], and a single
//! decoder walks whichever tables belong to the selected [`FormatVersion`].
//!
//! A version is chosen once per card (see [`FormatVersion::detect`]) and every
//! field of that card is decoded under it.

mod tables;

use crate::{
    bits::read_bits,
    card::{CardFiles, FILE_SEASON_PASS, FILE_TRIPS},
    error::Error,
};

/// A logical field of a card file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Balance,
    RefillDay,
    RefillMinute,
    RefillAmount,

    PassStartDay,
    PassEndDay,
    PassPreviousStartDay,
    PassPreviousEndDay,
    PassPurchaseDay,
    PassPurchaseMinute,
    PassPrice,
    PassLastUseDay,
    PassLastUseMinute,

    TripPaymentFlag,
    TripDay,
    TripMinute,
    TripAgency,
    TripTransactionType,
    TripFare,
    TripBalance,
    TripCoach,
}

impl FieldId {
    /// A stable, human-readable name for the field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::RefillDay => "refill_day",
            Self::RefillMinute => "refill_minute",
            Self::RefillAmount => "refill_amount",
            Self::PassStartDay => "season_pass_start_day",
            Self::PassEndDay => "season_pass_end_day",
            Self::PassPreviousStartDay => "season_pass_previous_start_day",
            Self::PassPreviousEndDay => "season_pass_previous_end_day",
            Self::PassPurchaseDay => "season_pass_purchase_day",
            Self::PassPurchaseMinute => "season_pass_purchase_minute",
            Self::PassPrice => "season_pass_price",
            Self::PassLastUseDay => "season_pass_last_use_day",
            Self::PassLastUseMinute => "season_pass_last_use_minute",
            Self::TripPaymentFlag => "trip_payment_flag",
            Self::TripDay => "trip_day",
            Self::TripMinute => "trip_minute",
            Self::TripAgency => "trip_agency",
            Self::TripTransactionType => "trip_transaction_type",
            Self::TripFare => "trip_fare",
            Self::TripBalance => "trip_balance",
            Self::TripCoach => "trip_coach",
        }
    }
}

/// A post-processing step applied to the raw bits of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Use the bits as read.
    Plain,
    /// Discard the given number of low bits.
    ShiftRight(u8),
}

/// The position of a field within its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Offset of the first bit, counted from the most significant bit of the
    /// first byte.
    pub offset: u16,
    /// Width in bits.
    pub len: u8,
    pub transform: Transform,
}

impl FieldSpec {
    pub(crate) const fn new(offset: u16, len: u8) -> Self {
        Self {
            offset,
            len,
            transform: Transform::Plain,
        }
    }

    pub(crate) const fn shifted(self, by: u8) -> Self {
        Self {
            transform: Transform::ShiftRight(by),
            ..self
        }
    }

    /// The bit offset just past the end of the field.
    pub fn end(&self) -> usize {
        self.offset as usize + self.len as usize
    }

    /// Read the field from a buffer and apply its transform.
    pub fn read(&self, data: &[u8]) -> Result<u32, Error> {
        let raw = read_bits(data, self.offset as usize, self.len)?;

        let value = match self.transform {
            Transform::Plain => raw,
            Transform::ShiftRight(by) => raw >> by,
        };

        u32::try_from(value).map_err(|_| Error::InvalidFieldLength(self.len))
    }
}

/// A table of the fields stored in one file (or one record) of a card.
pub type FieldTable = &'static [(FieldId, FieldSpec)];

/// All field tables of one format revision.
#[derive(Debug)]
pub struct Layout {
    /// Size in bytes of one record of the trip log.
    pub trip_record_size: usize,
    /// Fields of the balance file.
    pub balance: FieldTable,
    /// Fields of the refill slot within the balance file, if the revision has
    /// one.
    pub refill: Option<FieldTable>,
    /// Fields of the season-pass file, if the revision has one.
    pub season_pass: Option<FieldTable>,
    /// Fields of one trip record.
    pub trip: FieldTable,
}

impl Layout {
    /// Look up a field in any of this layout's tables.
    pub fn field(&self, id: FieldId) -> Option<FieldSpec> {
        [Some(self.balance), self.refill, self.season_pass, Some(self.trip)]
            .into_iter()
            .flatten()
            .find_map(|table| find(table, id))
    }
}

/// Look up a field in a single table.
pub fn find(table: FieldTable, id: FieldId) -> Option<FieldSpec> {
    table.iter().find(|(f, _)| *f == id).map(|(_, spec)| *spec)
}

/// A revision of the on-card format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatVersion {
    /// Byte-aligned records with date-only trip timestamps.
    Legacy,
    /// Bit-packed records without season-pass or refill data.
    PackedV1,
    /// Bit-packed records with a payment-mode flag, a season-pass file and a
    /// refill slot.
    PackedV2,
}

impl FormatVersion {
    pub const ALL: [Self; 3] = [Self::Legacy, Self::PackedV1, Self::PackedV2];

    /// The field tables of this revision.
    pub fn layout(self) -> &'static Layout {
        match self {
            Self::Legacy => &tables::LEGACY,
            Self::PackedV1 => &tables::PACKED_V1,
            Self::PackedV2 => &tables::PACKED_V2,
        }
    }

    /// The position of a logical field under this revision, if it exists.
    pub fn field(self, id: FieldId) -> Option<FieldSpec> {
        self.layout().field(id)
    }

    /// Select the revision matching the shape of a card's files.
    ///
    /// A season-pass file only exists in [`FormatVersion::PackedV2`], but a
    /// card of that revision may lack one. Without it, the trip log must divide
    /// evenly into the records of exactly one revision; a log that fits several
    /// record sizes is ambiguous.
    pub fn detect(files: &(impl CardFiles + ?Sized)) -> Result<Self, Error> {
        if files.file(FILE_SEASON_PASS).is_some() {
            return Ok(Self::PackedV2);
        }

        let trips = files.file(FILE_TRIPS).ok_or(Error::UnknownFormatVersion)?;

        if trips.is_empty() {
            Err(Error::UnknownFormatVersion)?;
        }

        let mut candidates = Self::ALL
            .into_iter()
            .filter(|v| trips.len() % v.layout().trip_record_size == 0);

        match (candidates.next(), candidates.next()) {
            (Some(version), None) => Ok(version),
            _ => Err(Error::UnknownFormatVersion),
        }
    }
}
