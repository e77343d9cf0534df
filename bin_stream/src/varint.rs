use core::fmt::{Debug, Formatter};

use crate::{ByteSink, ByteSource, Decoder, Encoder, ReadFrom, WriteTo};

/// Maximum encoded length of a 16 bit varint.
pub const MAX_VARINT_LEN16: usize = 3;
/// Maximum encoded length of a 32 bit varint.
pub const MAX_VARINT_LEN32: usize = 5;
/// Maximum encoded length of a 64 bit varint.
pub const MAX_VARINT_LEN64: usize = 10;

const MORE_GROUPS: u8 = 0x80;
const GROUP_BITS: u8 = 0x7f;

#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VarintError {
    #[error("buffer ended in the middle of a varint")]
    Truncated,
    #[error("varint overflows 64 bits")]
    Overflow,
}

/// Unsigned LEB128 encoded u64.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uvarint(pub u64);

/// Zig-zag + unsigned LEB128 encoded i64.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Varint(pub i64);

/// Map signed to unsigned so that small magnitudes stay small: 0, -1, 1, -2 -> 0, 1, 2, 3.
#[inline]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of bytes `value` takes when LEB128 encoded.
pub const fn uvarint_len(value: u64) -> usize {
    if value == 0 {
        1
    } else {
        (64 - value.leading_zeros() as usize).div_ceil(7)
    }
}

/// Number of bytes `value` takes when zig-zag + LEB128 encoded.
pub const fn varint_len(value: i64) -> usize {
    uvarint_len(zigzag_encode(value))
}

/// Encode `value` into the front of `buf`, returns the number of bytes used.
pub fn encode_uvarint(mut value: u64, buf: &mut [u8; MAX_VARINT_LEN64]) -> usize {
    let mut len = 0;
    while value >= MORE_GROUPS as u64 {
        buf[len] = (value as u8 & GROUP_BITS) | MORE_GROUPS;
        value >>= 7;
        len += 1;
    }
    buf[len] = value as u8;
    len + 1
}

pub fn encode_varint(value: i64, buf: &mut [u8; MAX_VARINT_LEN64]) -> usize {
    encode_uvarint(zigzag_encode(value), buf)
}

/// Decode a varint from the front of `buf`, returns the value and the number of bytes consumed.
pub fn decode_uvarint(buf: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut bytes = buf.iter();
    let value = read_uvarint_with(
        |_| bytes.next().copied().ok_or(VarintError::Truncated),
        VarintError::Overflow,
    )?;
    Ok((value, buf.len() - bytes.len()))
}

pub fn decode_varint(buf: &[u8]) -> Result<(i64, usize), VarintError> {
    let (value, len) = decode_uvarint(buf)?;
    Ok((zigzag_decode(value), len))
}

/// LEB128 decoding loop over a byte puller, shared by slice and stream decoding.
///
/// `next_byte` is given the index of the group being read. Encodings longer than
/// [MAX_VARINT_LEN64] bytes, or with a 10th group not fitting into the last bit of u64, are
/// rejected with `overflow`.
pub(crate) fn read_uvarint_with<E>(
    mut next_byte: impl FnMut(usize) -> Result<u8, E>,
    overflow: E,
) -> Result<u64, E> {
    let mut value = 0u64;
    let mut shift = 0;
    for i in 0..MAX_VARINT_LEN64 {
        let byte = next_byte(i)?;
        if byte < MORE_GROUPS {
            if i == MAX_VARINT_LEN64 - 1 && byte > 1 {
                return Err(overflow);
            }
            return Ok(value | (byte as u64) << shift);
        }
        value |= ((byte & GROUP_BITS) as u64) << shift;
        shift += 7;
    }
    Err(overflow)
}

impl ReadFrom for Uvarint {
    fn read_from<R: ByteSource>(dec: &mut Decoder<R>) -> Option<Self> {
        dec.try_read_uvarint().map(Uvarint)
    }
}

impl ReadFrom for Varint {
    fn read_from<R: ByteSource>(dec: &mut Decoder<R>) -> Option<Self> {
        dec.try_read_varint().map(Varint)
    }
}

impl WriteTo for Uvarint {
    fn write_to<W: ByteSink>(&self, enc: &mut Encoder<W>) {
        enc.write_uvarint(self.0);
    }
}

impl WriteTo for Varint {
    fn write_to<W: ByteSink>(&self, enc: &mut Encoder<W>) {
        enc.write_varint(self.0);
    }
}

impl Debug for Uvarint {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for Varint {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
