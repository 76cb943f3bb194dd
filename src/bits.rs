//! Extraction of unsigned integers from arbitrary bit ranges.
//!
//! A buffer is treated as one big-endian bit string: bit 0 is the most
//! significant bit of byte 0, bit 8 the most significant bit of byte 1, and so
//! on. Fields need not start or end on a byte boundary.

use thiserror::Error;

/// An error reading a bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The range extends past the end of the buffer.
    #[error("Required {required} bits, but only {available} are present.")]
    OutOfBounds { required: usize, available: usize },
    /// The length is zero or wider than 64 bits.
    #[error("Unsupported field length ({0} bits).")]
    InvalidLength(u8),
}

/// Read `len` bits starting at bit `offset`, most significant bit first.
///
/// `len` must be between 1 and 64 inclusive. The range is checked against the
/// buffer before any byte is touched.
pub fn read_bits(data: &[u8], offset: usize, len: u8) -> Result<u64, Error> {
    if !(1..=64).contains(&len) {
        Err(Error::InvalidLength(len))?;
    }

    let available = data.len() * 8;
    let required = offset.checked_add(len as usize).unwrap_or(usize::MAX);

    if required > available {
        Err(Error::OutOfBounds {
            required,
            available,
        })?;
    }

    let first = offset / 8;
    let last = (required - 1) / 8;

    // Accumulate whole bytes, then trim the bits outside the range. A 64-bit
    // field may straddle nine bytes, so the accumulator is 128 bits wide.
    let acc = data[first..=last]
        .iter()
        .fold(0u128, |acc, b| (acc << 8) | *b as u128);

    let trailing = (last + 1) * 8 - required;
    let mask = u128::MAX >> (128 - len as u32);

    Ok(((acc >> trailing) & mask) as u64)
}

