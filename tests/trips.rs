mod common;

use common::trip_record;
use matkakortti::{
    Error, FormatVersion, PaymentMode,
    agency::{STATIONS, TransactionType, UNKNOWN_AGENCY},
    layout::FieldId::*,
    model::Mode,
    time::card_date_to_timestamp,
    trips::{decode_trip, decode_trip_log},
};

#[test]
fn ordered_by_timestamp() {
    let v = FormatVersion::PackedV1;
    let data = [
        trip_record(v, &[(TripDay, 100), (TripMinute, 30), (TripFare, 1)]),
        trip_record(v, &[(TripDay, 50), (TripMinute, 10), (TripFare, 2)]),
        trip_record(v, &[(TripDay, 100), (TripMinute, 10), (TripFare, 3)]),
    ]
    .concat();

    let log = decode_trip_log(&data, v);
    let fares: Vec<_> = log.trips.iter().map(|t| t.fare).collect();
    assert_eq!(fares, [2, 3, 1]);
    assert_eq!(log.trips[0].timestamp, card_date_to_timestamp(50, 10));
    assert_eq!(log.trips[1].timestamp, card_date_to_timestamp(100, 10));
    assert_eq!(log.trips[2].timestamp, card_date_to_timestamp(100, 30));
}

#[test]
fn ties_keep_record_order() {
    let v = FormatVersion::Legacy;
    let data = [
        trip_record(v, &[(TripDay, 7), (TripFare, 10)]),
        trip_record(v, &[(TripDay, 3), (TripFare, 20)]),
        trip_record(v, &[(TripDay, 7), (TripFare, 30)]),
        trip_record(v, &[(TripDay, 7), (TripFare, 40)]),
    ]
    .concat();

    let fares: Vec<_> = decode_trip_log(&data, v)
        .trips
        .iter()
        .map(|t| t.fare)
        .collect();
    assert_eq!(fares, [20, 10, 30, 40]);
}

#[test]
fn sorted_permutation_of_input() {
    let v = FormatVersion::PackedV2;
    let mut seed = 0x2545_f491_u32;
    let mut next = |m: u32| {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (seed >> 8) % m
    };

    let mut expected = Vec::new();
    let mut data = Vec::new();

    for _ in 0..40 {
        let (day, minute, fare) = (next(16384), next(1440), next(16384));
        data.extend(trip_record(
            v,
            &[(TripDay, day as u64), (TripMinute, minute as u64), (TripFare, fare as u64)],
        ));
        expected.push((card_date_to_timestamp(day, minute), fare));
    }

    let log = decode_trip_log(&data, v);
    assert!(log.rejected.is_empty());
    assert!(log.trips.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    let mut decoded: Vec<_> = log.trips.iter().map(|t| (t.timestamp, t.fare)).collect();
    decoded.sort();
    expected.sort();
    assert_eq!(decoded, expected);
}

#[test]
fn partial_record_is_rejected() {
    let v = FormatVersion::PackedV2;
    let mut data = [
        trip_record(v, &[(TripDay, 10)]),
        trip_record(v, &[(TripDay, 9)]),
    ]
    .concat();
    data.extend([0xFF; 5]);

    let log = decode_trip_log(&data, v);
    assert_eq!(log.trips.len(), 2);
    assert_eq!(log.rejected.len(), 1);
    assert_eq!(log.rejected[0].index, 2);
    assert_eq!(
        log.rejected[0].error,
        Error::TruncatedBuffer {
            required: 96,
            available: 40
        }
    );
}

#[test]
fn legacy_record() {
    let v = FormatVersion::Legacy;
    let record = trip_record(
        v,
        &[
            (TripTransactionType, 2),
            (TripAgency, 1),
            (TripDay, 5000),
            (TripFare, 220),
            (TripBalance, 1280),
            (TripCoach, 0x1234),
        ],
    );

    let trip = decode_trip(&record, v.layout().trip).unwrap();
    assert_eq!(trip.timestamp, card_date_to_timestamp(5000, 0));
    assert_eq!(trip.fare, 220);
    assert_eq!(trip.balance, Some(1280));
    assert_eq!(trip.coach, 0x1234);
    assert_eq!(trip.payment, PaymentMode::StoredValue);
    assert_eq!(trip.transaction_type(), Some(TransactionType::TapIn));
    assert_eq!(trip.agency().name, "Seutulippu");
}

#[test]
fn packed_v2_record() {
    let v = FormatVersion::PackedV2;
    // Agency occupies the top seven bits of the fare.
    let record = trip_record(
        v,
        &[
            (TripPaymentFlag, 1),
            (TripDay, 5700),
            (TripMinute, 1000),
            (TripFare, (1 << 7) | 21),
            (TripCoach, 512),
        ],
    );

    let trip = decode_trip(&record, v.layout().trip).unwrap();
    assert_eq!(trip.timestamp, card_date_to_timestamp(5700, 1000));
    assert_eq!(trip.fare, 149);
    assert_eq!(trip.agency_code, 1);
    assert_eq!(trip.balance, None);
    assert_eq!(trip.payment, PaymentMode::StoredValue);
    assert_eq!(trip.transaction_code, None);
    assert_eq!(trip.transaction_type(), None);
    assert_eq!(trip.coach, 512);
}

#[test]
fn packed_v2_bits_after_fare_are_not_a_transaction_type() {
    let v = FormatVersion::PackedV2;
    let mut record = trip_record(v, &[(TripDay, 5700), (TripCoach, 512)]);
    record[8] = 0xF0;

    let trip = decode_trip(&record, v.layout().trip).unwrap();
    assert_eq!(trip.transaction_code, None);
    assert_eq!(trip.transaction_type(), None);
    assert_eq!(trip.coach, 512);
}

#[test]
fn packed_v1_record() {
    let v = FormatVersion::PackedV1;
    let record = trip_record(
        v,
        &[
            (TripDay, 16383),
            (TripMinute, 1439),
            (TripAgency, 127),
            (TripTransactionType, 15),
            (TripFare, 300),
            (TripBalance, 1_000_000),
            (TripCoach, 1023),
        ],
    );

    let trip = decode_trip(&record, v.layout().trip).unwrap();
    assert_eq!(trip.timestamp, card_date_to_timestamp(16383, 1439));
    assert_eq!(trip.balance, Some(1_000_000));
    assert_eq!(trip.agency(), &UNKNOWN_AGENCY);
    assert_eq!(trip.transaction_type(), Some(TransactionType::Unknown(15)));
    assert_eq!(trip.transaction_type().map(|t| t.label()), Some("unknown"));
    assert_eq!(trip.coach, 1023);
}

#[test]
fn metro_stations() {
    let v = FormatVersion::PackedV1;
    let trip = |agency: u64, coach: u64| {
        let record = trip_record(v, &[(TripAgency, agency), (TripCoach, coach)]);
        decode_trip(&record, v.layout().trip).unwrap()
    };

    let rautatientori = trip(2, 0x302);
    assert_eq!(rautatientori.mode(), Mode::Metro);
    assert_eq!(rautatientori.station(), Ok(Some(&STATIONS[2])));
    assert_eq!(STATIONS[2].name, "Rautatientori");

    let vuosaari = trip(2, 0x310);
    assert_eq!(vuosaari.station().unwrap().unwrap().name, "Vuosaari");

    let beyond = trip(2, 0x311);
    assert_eq!(beyond.mode(), Mode::Metro);
    assert_eq!(
        beyond.station(),
        Err(Error::OutOfRangeIndex { index: 17, len: 17 })
    );

    let bus = trip(0, 0x302);
    assert_eq!(bus.mode(), Mode::Bus);
    assert_eq!(bus.station(), Ok(None));

    let metro_vehicle = trip(2, 0x2FF);
    assert_eq!(metro_vehicle.mode(), Mode::Bus);
    assert_eq!(metro_vehicle.station(), Ok(None));
}
