//! Variable-length integer encoding (base-128, little-endian groups)
//!
//! Used for tags, varint-typed values and length prefixes. Decoding is bounded
//! to [`MAX_VARINT_SIZE`] bytes so a hostile peer cannot force an unbounded scan.

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Maximum bytes needed for a u64 varint (10 bytes)
pub const MAX_VARINT_SIZE: usize = 10;

/// Encode a u64 as varint into the given buffer
///
/// Returns the number of bytes written, or `Error::TruncatedPayload` if the
/// buffer cannot hold the encoding.
#[inline]
pub fn encode_u64(value: u64, buf: &mut [u8]) -> Result<usize> {
    let mut value = value;
    let mut pos = 0;

    loop {
        if pos >= buf.len() {
            return Err(Error::TruncatedPayload);
        }

        if value < 0x80 {
            buf[pos] = value as u8;
            return Ok(pos + 1);
        }

        buf[pos] = (value as u8) | 0x80;
        value >>= 7;
        pos += 1;
    }
}

/// Append a u64 varint to a growable buffer
#[inline]
pub fn put_u64(value: u64, out: &mut Vec<u8>) {
    let mut value = value;
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Decode a u64 varint from the start of the given buffer
///
/// Returns (value, bytes_consumed). Fails with `Error::MalformedVarint` if the
/// buffer ends before a terminating byte or the encoding exceeds 10 bytes.
/// Bits beyond the 64th are discarded.
#[inline]
pub fn decode_u64(buf: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut pos = 0;

    loop {
        if pos >= buf.len() || pos >= MAX_VARINT_SIZE {
            return Err(Error::MalformedVarint);
        }

        let byte = buf[pos];
        pos += 1;

        if shift < 64 {
            result |= ((byte & 0x7F) as u64) << shift;
        }

        if byte & 0x80 == 0 {
            return Ok((result, pos));
        }

        shift += 7;
    }
}

/// Number of bytes `value` occupies as a varint
#[inline]
pub const fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Wire form of a `sint32` value: the two's-complement bit pattern as an
/// unsigned 32-bit varint. This is not zig-zag.
#[inline]
pub const fn sint32_to_wire(value: i32) -> u64 {
    value as u32 as u64
}

/// Inverse of [`sint32_to_wire`], sign-extending from the low 32 bits
#[inline]
pub const fn sint32_from_wire(raw: u64) -> i32 {
    raw as u32 as i32
}
