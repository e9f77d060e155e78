use smallvec::SmallVec;

use crate::pedal::data::{ValueRange, ValueStatus};

/// Serialized form of a `Record`.
pub type RecordBuf = SmallVec<[u8; 128]>;

/// A fixed layout record of typed fields.
///
/// Implemented with `#[derive(Record)]`: each field carries a default value and,
/// for numeric fields, a valid range which is enforced on every write.
/// Serialization is little endian, in field declaration order.
pub trait Record: Default + Sized {
    type Field: Copy + Eq + std::fmt::Debug + std::fmt::Display + 'static;

    /// Length of the serialized record.
    const LEN: usize;

    fn fields() -> &'static [Self::Field];

    /// Returns the value of `field` converted to an `f32`.
    fn get(&self, field: Self::Field) -> f32;

    /// Sets `field` from an `f32`, clamping the value to the field's range.
    ///
    /// Non finite values are ignored.
    fn set(&mut self, field: Self::Field, value: f32) -> ValueStatus;

    fn range(field: Self::Field) -> Option<ValueRange>;

    fn serialize(&self) -> RecordBuf;

    fn parse(i: &[u8]) -> nom::IResult<&[u8], Self>;

    /// Resets all fields to their default value.
    fn reset(&mut self) {
        *self = Self::default();
    }
}
