//! Logical value types and the dynamically typed field value
//!
//! A field's [`ValueType`] decides how its raw wire value is reinterpreted.
//! It is independent of the [`WireType`]: `bool` and `enum` both travel as
//! varints but decode to different variants.

use crate::wire::WireType;

/// How a field's wire value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueType {
    /// 0 or 1 varint
    Bool,
    /// Protocol enum code as varint
    Enum,
    /// Raw unsigned 32-bit pattern in four bytes (timestamps)
    Fixed32,
    /// IEEE-754 single precision in four bytes
    Float,
    /// Two's-complement 32-bit pattern as varint
    Sint32,
    /// Byte run, usually UTF-8 text
    String,
    /// Unsigned varint
    Varint,
}

impl ValueType {
    /// Wire type a field of this value type travels as
    #[inline]
    pub const fn natural_wire_type(self) -> WireType {
        match self {
            ValueType::Bool | ValueType::Enum | ValueType::Sint32 | ValueType::Varint => {
                WireType::Varint
            }
            ValueType::Fixed32 | ValueType::Float => WireType::Fixed32,
            ValueType::String => WireType::LengthDelimited,
        }
    }

    /// Whether a repeated field may carry this value type
    #[inline]
    pub const fn is_repeatable(self) -> bool {
        matches!(self, ValueType::Enum | ValueType::String | ValueType::Varint)
    }
}

/// A decoded field value, or a value a caller wants encoded
///
/// Byte runs borrow from the payload they were decoded from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value<'a> {
    /// `bool` fields
    Bool(bool),
    /// `enum`, `varint` and `sint32` fields
    Int(i64),
    /// `varint` values above `i64::MAX`; smaller ones are always `Int`
    Uint(u64),
    /// `fixed32` fields; commands must use this variant for them too
    Fixed32(u32),
    /// `float` fields
    Float(f32),
    /// `string` fields; on the command side also an enum token
    Bytes(&'a [u8]),
}

impl<'a> Value<'a> {
    /// Boolean payload, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Unsigned varint value in its canonical variant
    ///
    /// Decoded varints and `From<u64>` both go through this, so equal wire
    /// values always compare equal.
    #[inline]
    pub fn unsigned(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Uint(value),
        }
    }

    /// Integer payload, if this is an integer variant that fits an `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            Value::Uint(n) => i64::try_from(n).ok(),
            Value::Fixed32(n) => Some(n as i64),
            _ => None,
        }
    }

    /// Integer payload, if this is a non-negative integer variant
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Int(n) => u64::try_from(n).ok(),
            Value::Uint(n) => Some(n),
            Value::Fixed32(n) => Some(n as u64),
            _ => None,
        }
    }

    /// Float payload, if this is a `Float`
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Raw bytes, if this is a `Bytes`
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Text, if this is a `Bytes` holding valid UTF-8
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|b| core::str::from_utf8(b).ok())
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value<'_> {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value<'_> {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value<'_> {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u64> for Value<'_> {
    fn from(value: u64) -> Self {
        Value::unsigned(value)
    }
}

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Bytes(value.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(value: &'a [u8]) -> Self {
        Value::Bytes(value)
    }
}
