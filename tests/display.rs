#![cfg(feature = "display")]

use chrono::Locale;
use matkakortti::{
    PassDetails, PaymentMode, SeasonPass, Trip,
    display::{Formatter, route_name},
    time::card_date_to_timestamp,
};

#[test]
fn currency() {
    let fi = Formatter::new(Locale::fi_FI);
    assert_eq!(fi.currency(1500), "15,00 €");
    assert_eq!(fi.currency(5), "0,05 €");

    let us = Formatter::new(Locale::en_US);
    assert_eq!(us.currency(123_456), "€1234.56");
    assert_eq!(us.currency(-250), "-€2.50");
}

#[test]
fn currency_separator_follows_locale() {
    for locale in [Locale::en_NZ, Locale::ko_KR, Locale::zh_TW, Locale::he_IL] {
        let fmt = Formatter::new(locale);
        assert_eq!(fmt.decimal_point(), ".", "{locale:?}");
        assert_eq!(fmt.currency(150), "€1.50", "{locale:?}");
    }

    for locale in [Locale::de_DE, Locale::sv_FI, Locale::fr_FR] {
        let fmt = Formatter::new(locale);
        assert_eq!(fmt.decimal_point(), ",", "{locale:?}");
        assert_eq!(fmt.currency(150), "1,50 €", "{locale:?}");
    }
}

#[test]
fn dates_use_card_offset() {
    let fmt = Formatter::new(Locale::POSIX);
    let midnight = card_date_to_timestamp(5721, 0);

    assert_eq!(fmt.date(midnight).as_deref(), Some("08/31/12"));
    assert_eq!(
        fmt.date_time(card_date_to_timestamp(5721, 615)).as_deref(),
        Some("08/31/12 10:15")
    );

    let utc = fmt.with_utc_offset(0);
    assert_eq!(utc.date(midnight).as_deref(), Some("08/30/12"));
}

#[test]
fn absent_pass_has_no_summary() {
    let fmt = Formatter::new(Locale::fi_FI);
    assert_eq!(fmt.season_pass_summary(&SeasonPass::Absent), None);
}

#[test]
fn pass_summary() {
    let fmt = Formatter::new(Locale::POSIX);
    let pass = SeasonPass::Present(PassDetails {
        start: card_date_to_timestamp(5690, 0),
        end: card_date_to_timestamp(5721, 0),
        previous_start: card_date_to_timestamp(5660, 0),
        previous_end: card_date_to_timestamp(5690, 0),
        purchased_at: card_date_to_timestamp(5689, 700),
        price: 4990,
        last_used_at: card_date_to_timestamp(5700, 480),
        valid: true,
    });

    let summary = fmt.season_pass_summary(&pass).unwrap();
    assert!(summary.starts_with("Current pass starts: 07/31/12\n"));
    assert!(summary.contains("Current pass ends: 08/31/12"));
    assert!(summary.contains("for €49.90"));
    assert!(summary.ends_with("Previous pass was: 07/01/12 - 07/31/12"));
}

#[test]
fn route_names() {
    let mut trip = Trip {
        timestamp: 0,
        coach: 0,
        fare: 0,
        balance: None,
        agency_code: 0,
        transaction_code: None,
        payment: PaymentMode::StoredValue,
    };
    assert_eq!(route_name(&trip), "Arvolla");

    trip.payment = PaymentMode::SeasonPass;
    assert_eq!(route_name(&trip), "Kaudella");
}
