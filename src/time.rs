//! Conversion of card-native dates to absolute timestamps.
//!
//! Cards count whole days from a fixed epoch, optionally with a minute of the
//! day. Timestamps are seconds since the Unix epoch; no time zone conversion
//! is applied.

/// The card epoch in seconds since the Unix epoch: midnight starting
/// 1997-01-01 at UTC+3 (1996-12-31T21:00:00Z).
pub const EPOCH: i64 = 0x32C9_7ED0;

/// Offset from UTC, in seconds, of the midnight that starts each card day.
pub const CARD_UTC_OFFSET: i32 = 3 * 60 * 60;

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Convert a day count and minute of the day to a timestamp.
///
/// Records without minute precision pass a minute of zero.
pub fn card_date_to_timestamp(day: u32, minute: u32) -> i64 {
    EPOCH + day as i64 * SECONDS_PER_DAY + minute as i64 * 60
}

/// The number of whole days between the card epoch and a timestamp.
///
/// Timestamps before the epoch yield negative day counts. The distance to the
/// epoch saturates at the bounds of `i64`.
pub fn days_since_epoch(timestamp: i64) -> i64 {
    timestamp.saturating_sub(EPOCH).div_euclid(SECONDS_PER_DAY)
}
