// File: src/codec/schema.rs
// Project: Supernode Client
// Creation date: Wednesday 14 October 2026
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 14 October 2026 @ 14:23:26
// Modified by: Vincent Berthier
// -----
// Copyright (c) 2026 <Vincent Berthier>
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the 'Software'), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt::{self, Display};

use borsh::BorshSerialize;
use tracing::{trace, warn};

use crate::crypto::Pubkey;

use super::{Error, Reader, Result};

/// Declarative description of a value's wire layout.
///
/// Schemas are `const`, so whole instruction tables can be written as statics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    /// An unsigned 8 bits integer.
    U8,
    /// An unsigned 16 bits integer, little endian.
    U16,
    /// An unsigned 32 bits integer, little endian.
    U32,
    /// An unsigned 64 bits integer, little endian.
    U64,
    /// A single byte, 0 or 1.
    Bool,
    /// A 32 bytes address.
    Pubkey,
    /// UTF-8 bytes after a `u32` byte count.
    String,
    /// A fixed number of elements, without prefix.
    Array(&'static Schema, usize),
    /// A `u32` element count followed by the elements.
    Seq(&'static Schema),
    /// Fields one after the other, in declaration order.
    Record(&'static [Field]),
}

/// A named field of a record or of an instruction's parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    schema: Schema,
}

impl Field {
    /// Declare a field.
    #[must_use]
    pub const fn new(name: &'static str, schema: Schema) -> Self {
        Self { name, schema }
    }

    /// Name of the field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Layout of the field.
    #[must_use]
    pub const fn schema(&self) -> Schema {
        self.schema
    }
}

/// A dynamically typed value following a [`Schema`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// See [`Schema::U8`].
    U8(u8),
    /// See [`Schema::U16`].
    U16(u16),
    /// See [`Schema::U32`].
    U32(u32),
    /// See [`Schema::U64`].
    U64(u64),
    /// See [`Schema::Bool`].
    Bool(bool),
    /// See [`Schema::Pubkey`].
    Pubkey(Pubkey),
    /// See [`Schema::String`].
    String(String),
    /// See [`Schema::Array`].
    Array(Vec<Value>),
    /// See [`Schema::Seq`].
    Seq(Vec<Value>),
    /// Field values of a [`Schema::Record`], in declaration order.
    Record(Vec<Value>),
}

fn write<T>(value: &T, out: &mut Vec<u8>) -> Result<()>
where
    T: BorshSerialize + ?Sized,
{
    value.serialize(out).map_err(Error::Serialization)
}

impl Schema {
    /// Smallest number of bytes a value of this schema can take.
    #[must_use]
    pub fn min_size(&self) -> usize {
        match self {
            Self::U8 | Self::Bool => 1,
            Self::U16 => 2,
            Self::U32 | Self::String | Self::Seq(_) => 4,
            Self::U64 => 8,
            Self::Pubkey => 32,
            Self::Array(item, len) => item.min_size().saturating_mul(*len),
            Self::Record(fields) => fields.iter().map(|field| field.schema.min_size()).sum(),
        }
    }

    /// Whether the value has the shape the schema describes.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::U8, Value::U8(_))
            | (Self::U16, Value::U16(_))
            | (Self::U32, Value::U32(_))
            | (Self::U64, Value::U64(_))
            | (Self::Bool, Value::Bool(_))
            | (Self::Pubkey, Value::Pubkey(_))
            | (Self::String, Value::String(_)) => true,
            (Self::Array(item, len), Value::Array(items)) => {
                items.len() == *len && items.iter().all(|value| item.matches(value))
            }
            (Self::Seq(item), Value::Seq(items)) => items.iter().all(|value| item.matches(value)),
            (Self::Record(fields), Value::Record(values)) => {
                fields.len() == values.len()
                    && fields
                        .iter()
                        .zip(values)
                        .all(|(field, value)| field.schema.matches(value))
            }
            _ => false,
        }
    }

    /// Encode a value.
    ///
    /// # Errors
    /// If the value does not follow the schema.
    ///
    /// # Example
    /// ```rust
    /// # use supernode_client::codec::{Error, Schema, Value};
    /// static ITEM: Schema = Schema::U16;
    /// let bytes = Schema::Seq(&ITEM).encode(&Value::Seq(vec![Value::U16(1), Value::U16(2)]))?;
    /// assert_eq!(bytes, [2, 0, 0, 0, 1, 0, 2, 0]);
    ///
    /// # Ok::<(), Error>(())
    /// ```
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.min_size());
        self.encode_into(value, &mut out)?;
        Ok(out)
    }

    /// Encode a value at the end of a buffer.
    ///
    /// # Errors
    /// If the value does not follow the schema.
    pub fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        match (self, value) {
            (Self::U8, Value::U8(v)) => write(v, out),
            (Self::U16, Value::U16(v)) => write(v, out),
            (Self::U32, Value::U32(v)) => write(v, out),
            (Self::U64, Value::U64(v)) => write(v, out),
            (Self::Bool, Value::Bool(v)) => write(v, out),
            (Self::Pubkey, Value::Pubkey(v)) => write(v, out),
            (Self::String, Value::String(v)) => write(v.as_str(), out),
            (Self::Array(item, len), Value::Array(items)) if items.len() == *len => items
                .iter()
                .try_for_each(|value| item.encode_into(value, out)),
            (Self::Seq(item), Value::Seq(items)) => {
                let count = u32::try_from(items.len()).map_err(|_err| Error::InvalidData {
                    offset: out.len(),
                    reason: format!("{} elements do not fit a u32 prefix", items.len()),
                })?;
                write(&count, out)?;
                items
                    .iter()
                    .try_for_each(|value| item.encode_into(value, out))
            }
            (Self::Record(fields), Value::Record(values)) if fields.len() == values.len() => {
                fields.iter().zip(values).try_for_each(|(field, value)| {
                    trace!("encoding field '{}'", field.name);
                    field.schema.encode_into(value, out)
                })
            }
            _ => {
                warn!("value of type {} does not follow {self}", value.type_name());
                Err(Error::SchemaMismatch {
                    expected: self.to_string(),
                    actual: value.type_name(),
                })
            }
        }
    }

    /// Decode a value from the start of a buffer.
    ///
    /// # Returns
    /// The value and the number of bytes it took.
    ///
    /// # Errors
    /// If the bytes run out, or a length prefix cannot fit, or the content is invalid.
    pub fn decode(&self, bytes: &[u8]) -> Result<(Value, usize)> {
        let mut reader = Reader::new(bytes);
        let value = self.read(&mut reader)?;
        Ok((value, reader.offset()))
    }

    /// Decode a value at the reader's position.
    ///
    /// # Errors
    /// Same as [`Schema::decode`].
    pub fn read(&self, reader: &mut Reader<'_>) -> Result<Value> {
        Ok(match self {
            Self::U8 => Value::U8(reader.read()?),
            Self::U16 => Value::U16(reader.read()?),
            Self::U32 => Value::U32(reader.read()?),
            Self::U64 => Value::U64(reader.read()?),
            Self::Bool => Value::Bool(reader.read()?),
            Self::Pubkey => Value::Pubkey(reader.read()?),
            Self::String => Value::String(reader.read()?),
            Self::Array(item, len) => Value::Array(
                (0..*len)
                    .map(|_| item.read(reader))
                    .collect::<Result<_>>()?,
            ),
            Self::Seq(item) => {
                let offset = reader.offset();
                let declared: u32 = reader.read()?;
                let remaining = reader.remaining();
                // every element takes at least a byte
                let needed = (declared as usize).saturating_mul(item.min_size().max(1));
                if needed > remaining {
                    warn!("{declared} elements of {item} cannot fit in {remaining} bytes");
                    return Err(Error::MalformedLengthPrefix {
                        offset,
                        declared,
                        remaining,
                    });
                }
                Value::Seq(
                    (0..declared)
                        .map(|_| item.read(reader))
                        .collect::<Result<_>>()?,
                )
            }
            Self::Record(fields) => Value::Record(
                fields
                    .iter()
                    .map(|field| {
                        trace!("decoding field '{}' at offset {}", field.name, reader.offset());
                        field.schema.read(reader)
                    })
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

#[mutants::skip]
impl Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::Bool => write!(f, "bool"),
            Self::Pubkey => write!(f, "pubkey"),
            Self::String => write!(f, "string"),
            Self::Array(item, len) => write!(f, "[{item}; {len}]"),
            Self::Seq(item) => write!(f, "vec<{item}>"),
            Self::Record(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.schema)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Value {
    /// Short name of the value's type, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::Bool(_) => "bool",
            Self::Pubkey(_) => "pubkey",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Seq(_) => "vec",
            Self::Record(_) => "record",
        }
    }

    /// The integer held by the value, widened to `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U8(v) => Some(u64::from(*v)),
            Self::U16(v) => Some(u64::from(*v)),
            Self::U32(v) => Some(u64::from(*v)),
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// The address held by the value.
    #[must_use]
    pub const fn as_pubkey(&self) -> Option<&Pubkey> {
        match self {
            Self::Pubkey(key) => Some(key),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

value_from!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    bool => Bool,
    Pubkey => Pubkey,
    String => String,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

#[mutants::skip]
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
            write!(f, "{open}")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, "{close}")
        }
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Pubkey(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Array(items) | Self::Seq(items) => list(f, "[", items, "]"),
            Self::Record(items) => list(f, "{", items, "}"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    static SCHEDULE: [Field; 2] = [
        Field::new("day", Schema::U16),
        Field::new("amount", Schema::U64),
    ];
    static ITEM: Schema = Schema::Record(&SCHEDULE);
    static KEY: Schema = Schema::Pubkey;
    static VESTING: [Field; 4] = [
        Field::new("label", Schema::String),
        Field::new("active", Schema::Bool),
        Field::new("controllers", Schema::Array(&KEY, 2)),
        Field::new("schedules", Schema::Seq(&ITEM)),
    ];

    fn sample() -> Value {
        Value::Record(vec![
            "vesting".into(),
            true.into(),
            Value::Array(vec![
                Pubkey::from_bytes(&[1; 32]).into(),
                Pubkey::from_bytes(&[2; 32]).into(),
            ]),
            Value::Seq(vec![
                Value::Record(vec![3_u16.into(), 500_u64.into()]),
                Value::Record(vec![4_u16.into(), 250_u64.into()]),
            ]),
        ])
    }

    #[test]
    fn nested_layout() -> TestResult {
        // Given
        let schema = Schema::Record(&VESTING);
        let value = sample();

        // When
        let bytes = schema.encode(&value)?;
        let (decoded, consumed) = schema.decode(&bytes)?;

        // Then
        assert_eq!(&bytes[..4], &[7, 0, 0, 0]);
        assert_eq!(&bytes[4..11], b"vesting");
        assert_eq!(bytes[11], 1);
        assert_eq!(&bytes[12..44], &[1; 32]);
        assert_eq!(&bytes[76..80], &[2, 0, 0, 0]);
        assert_eq!(&bytes[80..82], &[3, 0]);
        assert_eq!(bytes.len(), 80 + 2 * 10);
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, value);

        Ok(())
    }

    #[test]
    fn decode_reports_consumed_bytes() -> TestResult {
        // Given
        let bytes = [5, 0, 0, 0, 0, 0, 0, 0, 0xaa, 0xbb];

        // When
        let (value, consumed) = Schema::U64.decode(&bytes)?;

        // Then
        assert_eq!(value, Value::U64(5));
        assert_eq!(consumed, 8);

        Ok(())
    }

    #[test]
    fn reject_oversized_sequences() -> TestResult {
        // Given
        let schema = Schema::Record(&VESTING);
        let mut bytes = schema.encode(&sample())?;
        bytes.truncate(80);
        bytes[76] = 9;

        // When
        let res = schema.decode(&bytes);

        // Then
        assert!(matches!(
            res,
            Err(Error::MalformedLengthPrefix { offset: 76, declared: 9, remaining: 0 })
        ));

        Ok(())
    }

    #[test]
    fn reject_truncated_fields() {
        // When
        let res = Schema::Array(&KEY, 2).decode(&[0; 40]);

        // Then
        assert!(matches!(
            res,
            Err(Error::TruncatedInput { offset: 32, needed: 32, remaining: 8 })
        ));
    }

    #[test]
    fn reject_values_of_the_wrong_shape() {
        // Given
        let schema = Schema::Array(&KEY, 2);
        let short = Value::Array(vec![Pubkey::from_bytes(&[1; 32]).into()]);

        // When
        let wrong_type = Schema::U64.encode(&Value::U16(1));
        let wrong_len = schema.encode(&short);

        // Then
        assert!(matches!(wrong_type, Err(Error::SchemaMismatch { actual: "u16", .. })));
        assert!(matches!(wrong_len, Err(Error::SchemaMismatch { actual: "array", .. })));
        assert!(!schema.matches(&short));
        assert!(Schema::Record(&VESTING).matches(&sample()));
    }
}
