//! Errors reported while decoding a card.

use thiserror::Error;

use crate::bits;

/// An error decoding one section of a card, or one trip record.
///
/// Errors are values: a failed section is stored alongside the sections that
/// succeeded, so two decodes of the same card compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// The card has no such file in the fare application.
    #[error("File {file:#04x} of application {application:#08x} is not present.")]
    MissingFile { application: u32, file: u8 },
    /// A field extends past the end of its buffer.
    #[error("Required {required} bits, but only {available} are present.")]
    TruncatedBuffer { required: usize, available: usize },
    /// No layout matches the files found on the card.
    #[error("No known layout matches this card.")]
    UnknownFormatVersion,
    /// A decoded index falls outside a static catalog.
    #[error("Index {index} is outside a catalog of {len} entries.")]
    OutOfRangeIndex { index: u32, len: usize },
    /// A field was requested with a width the reader cannot produce.
    #[error("Unsupported field length ({0} bits).")]
    InvalidFieldLength(u8),
}

impl From<bits::Error> for Error {
    fn from(err: bits::Error) -> Self {
        match err {
            bits::Error::OutOfBounds {
                required,
                available,
            } => Self::TruncatedBuffer {
                required,
                available,
            },
            bits::Error::InvalidLength(length) => Self::InvalidFieldLength(length),
        }
    }
}
