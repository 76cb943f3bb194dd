//! Presentation helpers for decoded values.
//!
//! _Requires Cargo feature `display`._
//!
//! Everything here is a pure function of decoded numbers and a [`Formatter`]
//! holding the locale and the UTC offset to render timestamps in. The default
//! offset is the one card days are counted in, so dates come out as the card
//! recorded them.

use chrono::{DateTime, FixedOffset, Locale};
use pure_rust_locales::locale_match;
use rust_decimal::Decimal;

use crate::{
    model::{PassDetails, PaymentMode, SeasonPass, Timestamp, TransitAccount, Trip},
    time::CARD_UTC_OFFSET,
};

/// Locale-aware formatting of amounts and timestamps.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    pub locale: Locale,
    /// Offset from UTC in seconds.
    pub utc_offset: i32,
}

impl Formatter {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            utc_offset: CARD_UTC_OFFSET,
        }
    }

    pub fn with_utc_offset(self, utc_offset: i32) -> Self {
        Self { utc_offset, ..self }
    }

    /// The decimal separator of the locale.
    pub fn decimal_point(&self) -> &'static str {
        locale_match!(self.locale => LC_NUMERIC::DECIMAL_POINT)
    }

    /// Format an amount in cents as euros.
    ///
    /// Locales writing a decimal point put the symbol in front; the others
    /// use their own separator and put the symbol after the amount.
    pub fn currency(&self, cents: i64) -> String {
        let amount = format!("{:.2}", Decimal::new(cents, 2));

        match self.decimal_point() {
            "." | "" => match amount.strip_prefix('-') {
                Some(amount) => format!("-€{amount}"),
                None => format!("€{amount}"),
            },
            separator => format!("{} €", amount.replacen('.', separator, 1)),
        }
    }

    fn localized(&self, timestamp: Timestamp, fmt: &str) -> Option<String> {
        let offset = FixedOffset::east_opt(self.utc_offset)?;
        let date = DateTime::from_timestamp(timestamp, 0)?.with_timezone(&offset);
        Some(date.format_localized(fmt, self.locale).to_string())
    }

    /// Format the date of a timestamp.
    pub fn date(&self, timestamp: Timestamp) -> Option<String> {
        self.localized(timestamp, "%x")
    }

    /// Format the date and time of a timestamp, to the minute.
    pub fn date_time(&self, timestamp: Timestamp) -> Option<String> {
        self.localized(timestamp, "%x %H:%M")
    }

    /// The balance, followed by the pass end date while a pass is valid.
    ///
    /// Returns `None` if the balance could not be decoded.
    pub fn balance_summary(&self, account: &TransitAccount) -> Option<String> {
        let balance = *account.balance().decoded()?;
        let mut summary = self.currency(balance as i64);

        let end = account
            .season_pass()
            .decoded()
            .and_then(SeasonPass::details)
            .filter(|d| d.valid)
            .and_then(|d| self.date(d.end));

        if let Some(end) = end {
            summary.push_str(&format!("\nSeason pass valid until {end}"));
        }

        Some(summary)
    }

    /// A description of the season pass, or `None` if no pass was ever loaded.
    pub fn season_pass_summary(&self, pass: &SeasonPass) -> Option<String> {
        let PassDetails {
            start,
            end,
            previous_start,
            previous_end,
            purchased_at,
            price,
            last_used_at,
            ..
        } = pass.details()?;

        Some(format!(
            "Current pass starts: {}\n\
             Current pass ends: {}\n\n\
             Pass bought on {} for {}\n\
             You last used this pass on {}\n\n\
             Previous pass was: {} - {}",
            self.date(*start)?,
            self.date(*end)?,
            self.date_time(*purchased_at)?,
            self.currency(*price as i64),
            self.date_time(*last_used_at)?,
            self.date(*previous_start)?,
            self.date(*previous_end)?,
        ))
    }
}

/// How a trip was paid: "Arvolla" (stored value) or "Kaudella" (pass).
pub fn route_name(trip: &Trip) -> &'static str {
    match trip.payment {
        PaymentMode::StoredValue => "Arvolla",
        PaymentMode::SeasonPass => "Kaudella",
    }
}
