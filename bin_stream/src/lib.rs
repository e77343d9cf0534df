#![cfg_attr(not(feature = "std"), no_std)]

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use stream::{ByteSink, ByteSource};
pub use traits::{ReadFrom, WriteTo};
pub use varint::{Uvarint, Varint, VarintError};

pub mod decoder;
pub mod encoder;
pub mod stream;
pub mod traits;
pub mod varint;

mod fixed;
mod sticky;

/// Size of the scratch area, enough for the widest fixed-width integer.
pub const SCRATCH_LEN: usize = 8;

/// Byte order used by multi-byte fixed-width accessors.
///
/// Should not be changed after the first multi-byte operation on a stream, nothing checks this.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// First error observed by a [Decoder] or [Encoder], `E` is the stream's own error type.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum Error<E> {
    #[error("stream error: {0:?}")]
    Stream(E),
    #[error("stream transferred 0 bytes")]
    EndOfStream,
    #[error("short transfer: {actual} of {expected} bytes")]
    ShortTransfer { expected: usize, actual: usize },
    #[error("stream ended in the middle of a varint")]
    UnexpectedEnd,
    #[error("varint overflows 64 bits")]
    VarintOverflow,
}

impl<E> Error<E> {
    /// True for errors caused by the stream running out of data or space.
    ///
    /// Includes [ShortTransfer](Error::ShortTransfer), which is only a single short call: the
    /// stream itself may still be able to move more bytes.
    pub fn is_eos(&self) -> bool {
        matches!(
            self,
            Error::EndOfStream | Error::ShortTransfer { .. } | Error::UnexpectedEnd
        )
    }
}

pub mod prelude {
    pub use crate::decoder::Decoder;
    pub use crate::encoder::Encoder;
    pub use crate::stream::{ByteSink, ByteSource};
    pub use crate::traits::{ReadFrom, WriteTo};
    pub use crate::varint::{Uvarint, Varint};
    pub use crate::ByteOrder;
    pub use crate::Error as BinStreamError;
}
