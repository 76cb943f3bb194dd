//! Access to the files of the fare application.
//!
//! Reading a card (selecting the application, authenticating, transferring
//! file contents) happens elsewhere. This module defines the seam through which
//! the decoder receives the resulting bytes, and the identity information that
//! can be derived from them without a full decode.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Write,
};

use zerocopy::FromBytes;

use crate::error::Error;

/// Identifier of the HSL fare application.
pub const APPLICATION_ID: u32 = 0x1120EF;

/// File holding the season-pass slot.
pub const FILE_SEASON_PASS: u8 = 0x01;
/// File holding the stored-value balance and last refill.
pub const FILE_BALANCE: u8 = 0x02;
/// Record file holding the trip log.
pub const FILE_TRIPS: u8 = 0x04;
/// File holding the card serial number.
pub const FILE_SERIAL: u8 = 0x08;

/// Name reported for cards of this scheme.
pub const CARD_NAME: &str = "HSL";

/// Source of raw file contents, keyed by application and file identifier.
pub trait CardFiles {
    /// Retrieve the contents of a file, if the card has it.
    ///
    /// For record files, the contents are the concatenation of all records.
    fn read_file(&self, application: u32, file: u8) -> Option<&[u8]>;

    /// Whether the card carries an application, whatever files could be read
    /// from it.
    ///
    /// The default implementation looks for any of the fare application's
    /// files.
    fn has_application(&self, application: u32) -> bool {
        [FILE_SEASON_PASS, FILE_BALANCE, FILE_TRIPS, FILE_SERIAL]
            .into_iter()
            .any(|file| self.read_file(application, file).is_some())
    }

    /// Retrieve a file of the fare application.
    fn file(&self, file: u8) -> Option<&[u8]> {
        self.read_file(APPLICATION_ID, file)
    }

    /// Retrieve a file of the fare application, failing if it is absent.
    fn require(&self, file: u8) -> Result<&[u8], Error> {
        self.file(file).ok_or(Error::MissingFile {
            application: APPLICATION_ID,
            file,
        })
    }
}

impl CardFiles for HashMap<(u32, u8), Vec<u8>> {
    fn read_file(&self, application: u32, file: u8) -> Option<&[u8]> {
        self.get(&(application, file)).map(Vec::as_slice)
    }

    fn has_application(&self, application: u32) -> bool {
        self.keys().any(|&(a, _)| a == application)
    }
}

impl CardFiles for BTreeMap<(u32, u8), Vec<u8>> {
    fn read_file(&self, application: u32, file: u8) -> Option<&[u8]> {
        self.get(&(application, file)).map(Vec::as_slice)
    }

    fn has_application(&self, application: u32) -> bool {
        self.range((application, u8::MIN)..=(application, u8::MAX))
            .next()
            .is_some()
    }
}

/// Whether the files belong to an HSL card, i.e. the card carries the fare
/// application.
///
/// This does not require any particular file to be readable; a card whose
/// serial-number file is missing is still recognized, though [`identify`]
/// fails on it.
pub fn is_card(files: &(impl CardFiles + ?Sized)) -> bool {
    files.has_application(APPLICATION_ID)
}

/// The name and serial number of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitIdentity {
    pub name: &'static str,
    pub serial_number: String,
}

/// Identify a card from its serial-number file alone.
pub fn identify(files: &(impl CardFiles + ?Sized)) -> Result<TransitIdentity, Error> {
    Ok(TransitIdentity {
        name: CARD_NAME,
        serial_number: serial_number(files.require(FILE_SERIAL)?)?,
    })
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct SerialFile {
    _header: u8,
    serial: [u8; 9],
}

/// Decode the serial number from the contents of the serial-number file.
///
/// The serial is the hex dump of the nine bytes following a one-byte header.
/// Any bytes after them are ignored.
pub fn serial_number(data: &[u8]) -> Result<String, Error> {
    let (SerialFile { serial, .. }, _trailer) =
        SerialFile::read_from_prefix(data).map_err(|_| Error::TruncatedBuffer {
            required: size_of::<SerialFile>() * 8,
            available: data.len() * 8,
        })?;

    Ok(serial.iter().fold(String::with_capacity(18), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    }))
}
