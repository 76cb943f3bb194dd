#![allow(dead_code)]

use std::collections::HashMap;

use matkakortti::{
    card::APPLICATION_ID,
    layout::{FieldId, FieldTable, FormatVersion, Transform, find},
};

pub type Files = HashMap<(u32, u8), Vec<u8>>;

/// Write `len` bits of `value` at bit `offset`, most significant bit first.
pub fn put_bits(buf: &mut [u8], offset: usize, len: usize, value: u64) {
    for i in 0..len {
        let pos = offset + i;
        let mask = 0x80 >> (pos % 8);

        if (value >> (len - 1 - i)) & 1 == 1 {
            buf[pos / 8] |= mask;
        } else {
            buf[pos / 8] &= !mask;
        }
    }
}

/// Build a buffer of `size` bytes holding the given fields of a table.
pub fn encode(table: FieldTable, size: usize, values: &[(FieldId, u64)]) -> Vec<u8> {
    let mut buf = vec![0; size];

    for (id, value) in values {
        let spec = find(table, *id).unwrap_or_else(|| panic!("{} not in table", id.name()));

        let value = match spec.transform {
            Transform::Plain => *value,
            Transform::ShiftRight(by) => *value << by,
        };

        put_bits(&mut buf, spec.offset as usize, spec.len as usize, value);
    }

    buf
}

/// Build one trip record of a format revision.
pub fn trip_record(format: FormatVersion, values: &[(FieldId, u64)]) -> Vec<u8> {
    let layout = format.layout();
    encode(layout.trip, layout.trip_record_size, values)
}

/// A serial-number file with a one-byte header and a two-byte trailer.
pub fn serial_file() -> Vec<u8> {
    vec![
        0x3a, 0x92, 0x46, 0x20, 0x01, 0x23, 0x45, 0x67, 0x89, 0x01, 0xff, 0xee,
    ]
}

pub const SERIAL: &str = "924620012345678901";

pub fn files(entries: impl IntoIterator<Item = (u8, Vec<u8>)>) -> Files {
    entries
        .into_iter()
        .map(|(file, data)| ((APPLICATION_ID, file), data))
        .collect()
}
