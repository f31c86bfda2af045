//! On-wire representations: tags, fixed-width 32-bit values and
//! length-delimited byte runs
//!
//! A field on the wire is a varint tag `(field_number << 3) | wire_type`
//! followed by a value whose shape the low three bits announce.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::varint;

/// Largest field number a tag can carry
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Low three bits of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum WireType {
    /// Base-128 varint
    Varint = 0,
    /// Eight raw little-endian bytes
    Fixed64 = 1,
    /// Varint length followed by that many bytes
    LengthDelimited = 2,
    /// Four raw little-endian bytes
    Fixed32 = 5,
}

impl WireType {
    /// Parse the low bits of a tag
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }

    /// Numeric value placed in the tag
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Build the tag for a field
#[inline]
pub const fn make_tag(field_number: u32, wire_type: WireType) -> u64 {
    ((field_number as u64) << 3) | wire_type as u64
}

/// Split a decoded tag into field number and wire type
///
/// Field number 0, field numbers above [`MAX_FIELD_NUMBER`] and wire types
/// this protocol cannot skip (groups, reserved values) are rejected.
#[inline]
pub fn split_tag(tag: u64) -> Result<(u32, WireType)> {
    let field_number = tag >> 3;
    if field_number == 0 || field_number > MAX_FIELD_NUMBER as u64 {
        return Err(Error::InvalidTag(tag));
    }
    let wire_type = WireType::from_bits((tag & 0x7) as u8).ok_or(Error::InvalidTag(tag))?;
    Ok((field_number as u32, wire_type))
}

/// Append a tag to a growable buffer
#[inline]
pub fn put_tag(field_number: u32, wire_type: WireType, out: &mut Vec<u8>) {
    varint::put_u64(make_tag(field_number, wire_type), out);
}

/// Little-endian bytes of a raw 32-bit value
#[inline]
pub const fn encode_fixed32(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Little-endian bytes of an IEEE-754 single-precision value
#[inline]
pub const fn encode_float(value: f32) -> [u8; 4] {
    encode_fixed32(value.to_bits())
}

/// Read a raw 32-bit value from the start of `buf`
#[inline]
pub fn decode_fixed32(buf: &[u8]) -> Result<u32> {
    match buf.get(..4) {
        Some(bytes) => Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        None => Err(Error::TruncatedPayload),
    }
}

/// Read an IEEE-754 single-precision value from the start of `buf`
#[inline]
pub fn decode_float(buf: &[u8]) -> Result<f32> {
    decode_fixed32(buf).map(f32::from_bits)
}

/// Append `varint(len) ++ bytes`
#[inline]
pub fn put_length_delimited(bytes: &[u8], out: &mut Vec<u8>) {
    varint::put_u64(bytes.len() as u64, out);
    out.extend_from_slice(bytes);
}

/// Read a length-delimited run from the start of `buf`
///
/// Returns (run, bytes_consumed). The announced length is checked against the
/// bytes that remain before anything is sliced.
#[inline]
pub fn decode_length_delimited(buf: &[u8]) -> Result<(&[u8], usize)> {
    let (len, prefix) = varint::decode_u64(buf)?;
    let remaining = (buf.len() - prefix) as u64;
    if len > remaining {
        return Err(Error::TruncatedPayload);
    }
    let end = prefix + len as usize;
    Ok((&buf[prefix..end], end))
}
