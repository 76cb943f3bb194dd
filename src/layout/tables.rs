//! Field tables of the known format revisions.

use super::{FieldId::*, FieldSpec, Layout};

const fn at(offset: u16, len: u8) -> FieldSpec {
    FieldSpec::new(offset, len)
}

pub(super) static LEGACY: Layout = Layout {
    trip_record_size: 16,
    // A 3-byte big-endian integer carrying four bits of padding.
    balance: &[(Balance, at(0, 24).shifted(4))],
    refill: None,
    season_pass: None,
    trip: &[
        (TripTransactionType, at(0, 8)),
        (TripAgency, at(8, 8)),
        (TripDay, at(16, 16)),
        (TripFare, at(32, 16)),
        (TripBalance, at(48, 16)),
        // Low nibble of byte 9, all of byte 10, high nibble of byte 11.
        (TripCoach, at(76, 16)),
    ],
};

pub(super) static PACKED_V1: Layout = Layout {
    trip_record_size: 11,
    balance: &[(Balance, at(0, 20))],
    refill: None,
    season_pass: None,
    trip: &[
        (TripDay, at(0, 14)),
        (TripMinute, at(14, 11)),
        (TripAgency, at(25, 7)),
        (TripTransactionType, at(32, 4)),
        (TripFare, at(36, 14)),
        (TripBalance, at(50, 20)),
        (TripCoach, at(70, 10)),
    ],
};

pub(super) static PACKED_V2: Layout = Layout {
    trip_record_size: 12,
    balance: &[(Balance, at(0, 20))],
    refill: Some(&[
        (RefillDay, at(20, 14)),
        (RefillMinute, at(34, 11)),
        (RefillAmount, at(45, 20)),
    ]),
    season_pass: Some(&[
        (PassEndDay, at(33, 14)),
        (PassStartDay, at(19, 14)),
        (PassPreviousStartDay, at(67, 14)),
        (PassPreviousEndDay, at(81, 14)),
        (PassPurchaseDay, at(110, 14)),
        (PassPurchaseMinute, at(124, 11)),
        (PassPrice, at(149, 15)),
        (PassLastUseDay, at(192, 14)),
        (PassLastUseMinute, at(206, 11)),
    ]),
    trip: &[
        (TripPaymentFlag, at(0, 1)),
        (TripDay, at(1, 14)),
        (TripMinute, at(15, 11)),
        // Agency and fare share their leading bits.
        (TripAgency, at(51, 7)),
        (TripFare, at(51, 14)),
        (TripCoach, at(79, 10)),
    ],
};
