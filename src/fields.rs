//! Receivers for decoded field values.
//!
//! Decoding a section walks the section's [`FieldTable`] and publishes each
//! raw value, tagged with its [`FieldId`], to a [`FromFields`] receiver. A
//! receiver usually stores the primitives it cares about and converts them to
//! domain types afterward.

use crate::{
    error::Error,
    layout::{FieldId, FieldTable},
};

/// Derive [`FromFields`] for a struct collecting raw field values.
///
/// # Example
///
/// To receive a field, add the `field(Id)` attribute to an `Option<u32>`
/// struct field, where `Id` is a [`FieldId`] variant. The generated code names
/// `FieldId` unqualified, so it must be in scope.
///
/// ```
/// #[derive(Debug, Default, FromFields)]
/// struct RawRefill {
///     #[field(RefillDay)]
///     day: Option<u32>,
///     #[field(RefillAmount)]
///     amount: Option<u32>,
/// }
/// ```
///
/// To convert while receiving, supply an accumulator closure. Its second
/// parameter must be typed.
///
/// ```
/// #[derive(Debug, Default, FromFields)]
/// struct RawTrip {
///     #[field(TripPaymentFlag, |m, x: u32| *m = Some(x == 1))]
///     stored_value: Option<bool>,
/// }
/// ```
pub use matkakortti_derive::FromFields;

/// Receive field values for one section or record.
///
/// See the [`FromFields`](macro@FromFields) derive macro for an automatic
/// implementation of this trait.
pub trait FromFields {
    /// Add the value of a field.
    fn add_field(&mut self, field: FieldId, value: u32);
}

/// Decode every field of a table from a buffer, publishing to a receiver.
///
/// Fields are read in table order. Decoding stops at the first field that
/// cannot be read.
pub fn decode_fields(data: &[u8], table: FieldTable, o: &mut impl FromFields) -> Result<(), Error> {
    for (id, spec) in table {
        o.add_field(*id, spec.read(data)?);
    }

    Ok(())
}

/// Decode a table into a fresh receiver.
pub fn decode_into<T: FromFields + Default>(data: &[u8], table: FieldTable) -> Result<T, Error> {
    let mut o = T::default();
    decode_fields(data, table, &mut o)?;
    Ok(o)
}
