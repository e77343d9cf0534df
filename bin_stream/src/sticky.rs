use crate::{ByteSink, ByteSource, Error};

/// Running byte count and the first error of a session, shared by [Decoder](crate::Decoder)
/// and [Encoder](crate::Encoder).
///
/// Once an error is latched it stays until [reset](Sticky::reset) or [take](Sticky::take),
/// every transfer attempted in between is skipped.
pub(crate) struct Sticky<E> {
    total_bytes: usize,
    error: Option<Error<E>>,
}

impl<E> Sticky<E> {
    pub(crate) const fn new() -> Self {
        Self {
            total_bytes: 0,
            error: None,
        }
    }

    #[inline]
    pub(crate) fn is_latched(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub(crate) fn error(&self) -> Option<&Error<E>> {
        self.error.as_ref()
    }

    pub(crate) fn take(&mut self) -> Option<Error<E>> {
        self.error.take()
    }

    pub(crate) fn reset(&mut self) {
        self.total_bytes = 0;
        self.error = None;
    }

    /// Count bytes transferred outside of [read](Sticky::read) and [write](Sticky::write).
    #[inline]
    pub(crate) fn count(&mut self, n: usize) {
        self.total_bytes += n;
    }

    /// Remember `err` unless an earlier error is already latched.
    pub(crate) fn latch(&mut self, err: Error<E>) {
        if self.error.is_some() {
            return;
        }

        #[cfg(feature = "defmt-extended")]
        defmt::trace!(
            "latched error after {} bytes, eos: {}",
            self.total_bytes,
            err.is_eos()
        );
        #[cfg(feature = "tracing-extended")]
        tracing::trace!(
            "latched error after {} bytes, eos: {}",
            self.total_bytes,
            err.is_eos()
        );

        self.error = Some(err);
    }

    /// Account for one stream call that was asked to move `requested` bytes.
    fn record(&mut self, res: Result<usize, E>, requested: usize) -> usize {
        match res {
            Ok(0) if requested > 0 => {
                self.latch(Error::EndOfStream);
                0
            }
            Ok(n) => {
                self.total_bytes += n;
                n
            }
            Err(e) => {
                self.latch(Error::Stream(e));
                0
            }
        }
    }

    /// One read attempt into `buf`, skipped when latched.
    pub(crate) fn read<R>(&mut self, src: &mut R, buf: &mut [u8]) -> usize
    where
        R: ByteSource<Error = E> + ?Sized,
    {
        if self.is_latched() {
            return 0;
        }
        let res = src.read(buf);
        self.record(res, buf.len())
    }

    /// One write attempt of `buf`, skipped when latched.
    pub(crate) fn write<W>(&mut self, sink: &mut W, buf: &[u8]) -> usize
    where
        W: ByteSink<Error = E> + ?Sized,
    {
        if self.is_latched() {
            return 0;
        }
        let res = sink.write(buf);
        self.record(res, buf.len())
    }

    /// Like [read](Sticky::read), but a short transfer is latched as an error.
    /// Returns true if `buf` was filled.
    pub(crate) fn read_exact<R>(&mut self, src: &mut R, buf: &mut [u8]) -> bool
    where
        R: ByteSource<Error = E> + ?Sized,
    {
        let expected = buf.len();
        let actual = self.read(src, buf);
        self.check_exact(expected, actual)
    }

    /// Like [write](Sticky::write), but a short transfer is latched as an error.
    /// Returns true if all of `buf` was accepted.
    pub(crate) fn write_exact<W>(&mut self, sink: &mut W, buf: &[u8]) -> bool
    where
        W: ByteSink<Error = E> + ?Sized,
    {
        let actual = self.write(sink, buf);
        self.check_exact(buf.len(), actual)
    }

    fn check_exact(&mut self, expected: usize, actual: usize) -> bool {
        if actual < expected {
            self.latch(Error::ShortTransfer { expected, actual });
        }
        !self.is_latched()
    }
}
