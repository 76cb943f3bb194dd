//! A bit-precise decoder for HSL travel cards.
//!
//! HSL cards store their state in a handful of files of a single DESFire
//! application: a serial number, a stored-value balance with the latest refill,
//! a season-pass slot, and a cyclic trip log. Fields are packed at arbitrary
//! bit offsets, and their positions differ between revisions of the format.
//!
//! Reading the files off a card is outside the scope of this crate. Supply
//! their contents through the [`CardFiles`] trait, then call [`decode`]:
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! let files: HashMap<(u32, u8), Vec<u8>> = read_card();
//! let account = matkakortti::decode(&files, &matkakortti::DecodeOptions::now());
//!
//! if let Some(balance) = account.balance().decoded() {
//!     println!("{balance} cents");
//! }
//! ```
//!
//! Every section of the card decodes independently; one that fails is reported
//! as [`Section::Failed`] while the others are still available.
//!
//! Lower-level building blocks are exposed for other tooling: [`bits`] for
//! reading bit ranges, [`layout`] for the per-revision field tables, and
//! [`fields`] for decoding a table into a receiver.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `display`: enable locale-aware formatting helpers (default).
//! - `serde`: enable serialization of decoded values.

pub mod account;
pub mod agency;
pub mod bits;
pub mod card;
#[cfg(feature = "display")]
pub mod display;
pub mod error;
pub mod fields;
pub mod layout;
pub mod model;
pub mod time;
pub mod trips;

pub use account::{DecodeOptions, decode, decode_now};
pub use card::{CardFiles, TransitIdentity, identify, is_card};
pub use error::Error;
pub use layout::FormatVersion;
pub use model::{
    PassDetails, PaymentMode, Refill, RejectedRecord, SeasonPass, Section, TransitAccount, Trip,
    TripLog,
};
