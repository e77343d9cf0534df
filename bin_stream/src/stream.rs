/// Source of bytes for a [Decoder](crate::Decoder).
///
/// One call to [read](ByteSource::read) is one attempt: it may transfer fewer bytes than requested,
/// returning 0 for a non-empty buffer means the source is exhausted.
pub trait ByteSource {
    type Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Pull a single byte, `None` when the source is exhausted.
    ///
    /// Default implementation goes through [read](ByteSource::read) with a one byte buffer,
    /// sources with a cheaper byte path can override it.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut byte = [0u8; 1];
        match self.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

/// Destination of bytes for an [Encoder](crate::Encoder).
///
/// One call to [write](ByteSink::write) is one attempt, returning 0 for a non-empty buffer means
/// the sink cannot accept more.
pub trait ByteSink {
    type Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
}

#[cfg(feature = "std")]
mod std_io {
    use super::{ByteSink, ByteSource};
    use std::io::{ErrorKind, Read, Write};

    impl<R: Read + ?Sized> ByteSource for R {
        type Error = std::io::Error;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            loop {
                match Read::read(self, buf) {
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    r => return r,
                }
            }
        }
    }

    impl<W: Write + ?Sized> ByteSink for W {
        type Error = std::io::Error;

        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            loop {
                match Write::write(self, buf) {
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    r => return r,
                }
            }
        }
    }
}

#[cfg(not(feature = "std"))]
mod slices {
    use super::{ByteSink, ByteSource};
    use core::convert::Infallible;

    impl ByteSource for &[u8] {
        type Error = Infallible;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let len = buf.len().min(self.len());
            let (head, tail) = self.split_at(len);
            buf[..len].copy_from_slice(head);
            *self = tail;
            Ok(len)
        }

        fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            let Some((&byte, tail)) = self.split_first() else {
                return Ok(None);
            };
            *self = tail;
            Ok(Some(byte))
        }
    }

    impl ByteSink for &mut [u8] {
        type Error = Infallible;

        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            let len = buf.len().min(self.len());
            let (head, tail) = core::mem::take(self).split_at_mut(len);
            head.copy_from_slice(&buf[..len]);
            *self = tail;
            Ok(len)
        }
    }

    impl<S: ByteSource + ?Sized> ByteSource for &mut S {
        type Error = S::Error;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            (**self).read(buf)
        }

        fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            (**self).read_byte()
        }
    }

    impl<W: ByteSink + ?Sized> ByteSink for &mut W {
        type Error = W::Error;

        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            (**self).write(buf)
        }
    }
}
