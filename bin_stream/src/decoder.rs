use crate::fixed::read_fixed;
use crate::sticky::Sticky;
use crate::varint::{read_uvarint_with, zigzag_decode};
use crate::{ByteOrder, ByteSource, Error, ReadFrom, SCRATCH_LEN};

/// Typed reader over a [ByteSource] with a sticky error.
///
/// The first failure is latched, after which every read is a no-op returning 0 (or `None`,
/// or leaving the destination untouched) until [reset](Decoder::reset). Check
/// [last_error](Decoder::last_error) once after a batch of reads instead of after every call.
///
/// # Example
/// ```
/// use bin_stream::{ByteOrder, Decoder};
///
/// let buf = [0x11, 0x22, 0x32];
/// let mut rd = Decoder::with_byte_order(&buf[..], ByteOrder::Big);
/// assert_eq!(rd.read_u16(), 0x1122);
/// assert_eq!(rd.read_varint(), 25);
/// assert!(rd.last_error().is_none());
///
/// assert_eq!(rd.read_u8(), 0);
/// assert!(rd.last_error().is_some());
/// assert_eq!(rd.total_bytes(), 3);
/// ```
pub struct Decoder<R: ByteSource> {
    src: R,
    byte_order: ByteOrder,
    scratch: [u8; SCRATCH_LEN],
    sticky: Sticky<R::Error>,
}

impl<R: ByteSource> Decoder<R> {
    /// Create a little endian decoder.
    pub fn new(src: R) -> Self {
        Self::with_byte_order(src, ByteOrder::default())
    }

    pub fn with_byte_order(src: R, byte_order: ByteOrder) -> Self {
        Self {
            src,
            byte_order,
            scratch: [0u8; SCRATCH_LEN],
            sticky: Sticky::new(),
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Changing the byte order in the middle of a stream is not checked in any way.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    /// Perform one read call on the underlying source.
    ///
    /// Returns the number of bytes actually transferred, which can be less than `buf.len()`,
    /// short reads are not retried. Returns 0 without touching the source if an error is latched.
    pub fn read_raw(&mut self, buf: &mut [u8]) -> usize {
        self.sticky.read(&mut self.src, buf)
    }

    read_fixed!(u8, u16, u32, u64, i8, i16, i32, i64);

    /// Read a LEB128 encoded u64, 0 on failure.
    pub fn read_uvarint(&mut self) -> u64 {
        self.try_read_uvarint().unwrap_or_default()
    }

    /// Read a zig-zag + LEB128 encoded i64, 0 on failure.
    pub fn read_varint(&mut self) -> i64 {
        self.try_read_varint().unwrap_or_default()
    }

    /// Read any value implementing [ReadFrom], default value on failure.
    pub fn read<T: ReadFrom + Default>(&mut self) -> T {
        T::read_from(self).unwrap_or_default()
    }

    /// Read into `dst`, leaving it unmodified on failure.
    pub fn read_into<T: ReadFrom>(&mut self, dst: &mut T) {
        if let Some(value) = T::read_from(self) {
            *dst = value;
        }
    }

    /// Read a value or `None` if the decoder is latched after the attempt.
    pub fn try_read<T: ReadFrom>(&mut self) -> Option<T> {
        T::read_from(self)
    }

    pub(crate) fn try_read_uvarint(&mut self) -> Option<u64> {
        if self.sticky.is_latched() {
            return None;
        }
        let Decoder { src, sticky, .. } = self;
        let value = read_uvarint_with(
            |idx| match src.read_byte() {
                Ok(Some(byte)) => {
                    sticky.count(1);
                    Ok(byte)
                }
                Ok(None) if idx == 0 => Err(Error::EndOfStream),
                Ok(None) => Err(Error::UnexpectedEnd),
                Err(e) => Err(Error::Stream(e)),
            },
            Error::VarintOverflow,
        );
        match value {
            Ok(value) => {
                #[cfg(feature = "defmt-extended")]
                defmt::trace!("read_uvarint() = {}", value);
                #[cfg(feature = "tracing-extended")]
                tracing::trace!("read_uvarint() = {}", value);

                Some(value)
            }
            Err(e) => {
                sticky.latch(e);
                None
            }
        }
    }

    pub(crate) fn try_read_varint(&mut self) -> Option<i64> {
        self.try_read_uvarint().map(zigzag_decode)
    }

    /// Fill the first `N` bytes of the scratch buffer, `None` if it could not be filled.
    fn read_scratch<const N: usize>(&mut self) -> Option<[u8; N]> {
        if !self.sticky.read_exact(&mut self.src, &mut self.scratch[..N]) {
            return None;
        }
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.scratch[..N]);
        Some(bytes)
    }

    /// Total number of bytes consumed from the source, including the ones consumed by reads
    /// that ultimately failed.
    pub fn total_bytes(&self) -> usize {
        self.sticky.total_bytes()
    }

    /// First error latched since creation or the last reset.
    pub fn last_error(&self) -> Option<&Error<R::Error>> {
        self.sticky.error()
    }

    /// Move the latched error out, making the decoder usable again. Byte count is kept.
    pub fn take_error(&mut self) -> Option<Error<R::Error>> {
        self.sticky.take()
    }

    /// Total bytes consumed, or the latched error.
    pub fn result(&self) -> Result<usize, &Error<R::Error>> {
        match self.sticky.error() {
            Some(e) => Err(e),
            None => Ok(self.sticky.total_bytes()),
        }
    }

    /// Clear the byte count and the latched error. Source and byte order are kept.
    pub fn reset(&mut self) {
        self.sticky.reset();
    }

    pub fn get_ref(&self) -> &R {
        &self.src
    }

    /// Reading from the source directly bypasses byte counting.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.src
    }

    pub fn into_inner(self) -> R {
        self.src
    }
}
