use crate::fixed::write_fixed;
use crate::sticky::Sticky;
use crate::varint::{encode_uvarint, zigzag_encode, MAX_VARINT_LEN64};
use crate::{ByteOrder, ByteSink, Error, WriteTo, SCRATCH_LEN};

/// Typed writer over a [ByteSink] with a sticky error.
///
/// Mirror of [Decoder](crate::Decoder): the first failure is latched and every write after it is
/// a no-op until [reset](Encoder::reset).
///
/// # Example
/// ```
/// use bin_stream::Encoder;
///
/// let mut wr = Encoder::new(Vec::new());
/// wr.write_u16(0x1122);
/// wr.write_uvarint(300);
/// assert_eq!(wr.total_bytes(), 4);
/// assert_eq!(wr.into_inner(), [0x22, 0x11, 0xac, 0x02]);
/// ```
pub struct Encoder<W: ByteSink> {
    sink: W,
    byte_order: ByteOrder,
    scratch: [u8; SCRATCH_LEN],
    sticky: Sticky<W::Error>,
}

impl<W: ByteSink> Encoder<W> {
    /// Create a little endian encoder.
    pub fn new(sink: W) -> Self {
        Self::with_byte_order(sink, ByteOrder::default())
    }

    pub fn with_byte_order(sink: W, byte_order: ByteOrder) -> Self {
        Self {
            sink,
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

    /// Perform one write call on the underlying sink.
    ///
    /// Returns the number of bytes the sink accepted, a short write is passed through as is.
    /// Returns 0 without touching the sink if an error is latched.
    pub fn write_raw(&mut self, bytes: &[u8]) -> usize {
        self.sticky.write(&mut self.sink, bytes)
    }

    write_fixed!(u8, u16, u32, u64, i8, i16, i32, i64);

    /// Write `value` as LEB128, 7 bits per byte, least significant group first.
    pub fn write_uvarint(&mut self, value: u64) {
        if self.sticky.is_latched() {
            return;
        }
        let mut buf = [0u8; MAX_VARINT_LEN64];
        let len = encode_uvarint(value, &mut buf);

        #[cfg(feature = "defmt-extended")]
        defmt::trace!("write_uvarint({}): {=[u8]:x}", value, &buf[..len]);
        #[cfg(feature = "tracing-extended")]
        tracing::trace!("write_uvarint({value}): {:02x?}", &buf[..len]);

        self.sticky.write_exact(&mut self.sink, &buf[..len]);
    }

    /// Zig-zag encode `value` and write it as LEB128.
    pub fn write_varint(&mut self, value: i64) {
        self.write_uvarint(zigzag_encode(value));
    }

    /// Write any value implementing [WriteTo].
    pub fn write<T: WriteTo + ?Sized>(&mut self, value: &T) {
        value.write_to(self);
    }

    /// Stage `bytes` in the scratch buffer and write them out in one call.
    fn write_scratch<const N: usize>(&mut self, bytes: &[u8; N]) {
        if self.sticky.is_latched() {
            return;
        }
        self.scratch[..N].copy_from_slice(bytes);
        self.sticky.write_exact(&mut self.sink, &self.scratch[..N]);
    }

    /// Total number of bytes accepted by the sink, including the ones accepted by writes that
    /// ultimately failed.
    pub fn total_bytes(&self) -> usize {
        self.sticky.total_bytes()
    }

    /// First error latched since creation or the last reset.
    pub fn last_error(&self) -> Option<&Error<W::Error>> {
        self.sticky.error()
    }

    /// Move the latched error out, making the encoder usable again. Byte count is kept.
    pub fn take_error(&mut self) -> Option<Error<W::Error>> {
        self.sticky.take()
    }

    /// Total bytes written, or the latched error.
    pub fn result(&self) -> Result<usize, &Error<W::Error>> {
        match self.sticky.error() {
            Some(e) => Err(e),
            None => Ok(self.sticky.total_bytes()),
        }
    }

    /// Clear the byte count and the latched error. Sink and byte order are kept.
    pub fn reset(&mut self) {
        self.sticky.reset();
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Writing to the sink directly bypasses byte counting.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use crate::{ByteOrder, Encoder, Error, Uvarint, Varint};
    use hex_literal::hex;
    use std::io;

    #[test]
    fn default_little_endian() {
        let mut wr = Encoder::new(Vec::new());
        wr.write_i16(0x1122);
        assert_eq!(wr.get_ref(), &[0x22, 0x11]);
    }

    #[test]
    fn respects_byte_order() {
        let mut wr = Encoder::with_byte_order(Vec::new(), ByteOrder::Big);
        wr.write_i16(0x1122);
        assert_eq!(wr.get_ref(), &[0x11, 0x22]);
    }

    #[test]
    fn ints_big_endian() {
        let mut wr = Encoder::with_byte_order(Vec::new(), ByteOrder::Big);
        wr.write_i8(0x69);
        wr.write_i16(0x6060);
        wr.write_i32(0x11AABBCC);
        wr.write_i64(0x0011AABBCCDDEEFF);
        assert_eq!(wr.total_bytes(), 15);
        assert_eq!(
            wr.into_inner(),
            hex!("69 60 60 11 AA BB CC 00 11 AA BB CC DD EE FF")
        );
    }

    #[test]
    fn negative_values() {
        let mut wr = Encoder::new(Vec::new());
        wr.write_i8(-1);
        wr.write_i32(-2);
        wr.write_u64(u64::MAX);
        assert_eq!(
            wr.into_inner(),
            hex!("ff fe ff ff ff ff ff ff ff ff ff ff ff")
        );
    }

    #[test]
    fn varints() {
        let mut wr = Encoder::with_byte_order(Vec::new(), ByteOrder::Big);
        wr.write_uvarint(0x11);
        wr.write_uvarint(0x0FAB);
        wr.write_varint(25);
        wr.write_varint(-1);
        wr.write(&Uvarint(300));
        wr.write(&Varint(i64::MIN));
        assert_eq!(
            wr.into_inner(),
            hex!("11 ab 1f 32 01 ac 02 ff ff ff ff ff ff ff ff ff 01")
        );
    }

    #[test]
    fn slices_and_tuples() {
        let mut wr = Encoder::new(Vec::new());
        wr.write(&[1u8, 2, 3][..]);
        wr.write(&(0xaabb_u16, Uvarint(1)));
        assert_eq!(wr.into_inner(), hex!("01 02 03 bb aa 01"));
    }

    /// Accepts `capacity` bytes, then fails every write.
    struct Limited {
        buf: Vec<u8>,
        capacity: usize,
    }

    impl io::Write for Limited {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.capacity - self.buf.len();
            if room == 0 {
                return Err(io::Error::other("sink closed"));
            }
            let n = room.min(buf.len());
            self.buf.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn keeps_first_error_and_count() {
        let mut wr = Encoder::new(Limited {
            buf: vec![],
            capacity: 6,
        });
        assert_eq!(wr.write_raw(b"123456"), 6);
        assert_eq!(wr.total_bytes(), 6);
        assert!(wr.last_error().is_none());

        assert_eq!(wr.write_raw(b"this doesn't get written"), 0);
        assert_eq!(wr.total_bytes(), 6);
        assert!(matches!(wr.last_error(), Some(Error::Stream(_))));

        assert_eq!(wr.write_raw(b"nor this"), 0);
        wr.write_u64(1);
        wr.write_varint(-5);
        assert_eq!(wr.total_bytes(), 6);
        assert!(matches!(wr.last_error(), Some(Error::Stream(e)) if e.to_string() == "sink closed"));
    }

    #[test]
    fn short_write_is_latched_for_typed_values() {
        let mut wr = Encoder::new(Limited {
            buf: vec![],
            capacity: 3,
        });
        wr.write_u32(0xdead_beef);
        assert_eq!(wr.total_bytes(), 3);
        assert!(matches!(
            wr.last_error(),
            Some(Error::ShortTransfer {
                expected: 4,
                actual: 3
            })
        ));
        assert_eq!(wr.get_ref().buf, [0xef, 0xbe, 0xad]);
    }

    #[test]
    fn full_slice_is_end_of_stream() {
        let mut buf = [0u8; 2];
        let mut wr = Encoder::new(&mut buf[..]);
        wr.write_u16(0xbeef);
        wr.write_u8(1);
        assert!(matches!(wr.last_error(), Some(Error::EndOfStream)));
        assert_eq!(wr.total_bytes(), 2);
        drop(wr);
        assert_eq!(buf, [0xef, 0xbe]);
    }

    #[test]
    fn reset_restores_live_state() {
        let mut wr = Encoder::with_byte_order(
            Limited {
                buf: vec![],
                capacity: 1,
            },
            ByteOrder::Big,
        );
        wr.reset();
        assert!(wr.result().is_ok());
        wr.write_u16(1);
        assert!(wr.result().is_err());

        wr.reset();
        assert!(matches!(wr.result(), Ok(0)));
        assert_eq!(wr.byte_order(), ByteOrder::Big);
        wr.get_mut().capacity = 3;
        wr.write_u16(0x0102);
        assert!(matches!(wr.result(), Ok(2)));
        assert_eq!(wr.into_inner().buf, [0x00, 0x01, 0x02]);
    }
}
