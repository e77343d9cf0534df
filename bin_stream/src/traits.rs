use crate::{ByteSink, ByteSource, Decoder, Encoder};

/// Value that can be pulled out of a [Decoder].
pub trait ReadFrom: Sized {
    /// Returns `None` if the decoder is latched or becomes latched while reading.
    fn read_from<R: ByteSource>(dec: &mut Decoder<R>) -> Option<Self>;
}

/// Value that can be pushed into an [Encoder].
pub trait WriteTo {
    /// Failures are latched in the encoder, see [Encoder::last_error].
    fn write_to<W: ByteSink>(&self, enc: &mut Encoder<W>);
}

macro_rules! impl_fixed {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                impl ReadFrom for $ty {
                    fn read_from<R: ByteSource>(dec: &mut Decoder<R>) -> Option<Self> {
                        dec.[<try_read_ $ty>]()
                    }
                }

                impl WriteTo for $ty {
                    fn write_to<W: ByteSink>(&self, enc: &mut Encoder<W>) {
                        enc.[<write_ $ty>](*self);
                    }
                }
            )*
        }
    };
}
impl_fixed!(u8, u16, u32, u64, i8, i16, i32, i64);

impl<T: WriteTo + ?Sized> WriteTo for &T {
    fn write_to<W: ByteSink>(&self, enc: &mut Encoder<W>) {
        (**self).write_to(enc)
    }
}

impl<T: WriteTo> WriteTo for [T] {
    fn write_to<W: ByteSink>(&self, enc: &mut Encoder<W>) {
        for item in self {
            item.write_to(enc);
        }
    }
}

impl<T: ReadFrom + Default, const N: usize> ReadFrom for [T; N] {
    fn read_from<R: ByteSource>(dec: &mut Decoder<R>) -> Option<Self> {
        let mut items: [T; N] = core::array::from_fn(|_| T::default());
        for item in items.iter_mut() {
            *item = T::read_from(dec)?;
        }
        Some(items)
    }
}

impl<T: WriteTo, const N: usize> WriteTo for [T; N] {
    fn write_to<W: ByteSink>(&self, enc: &mut Encoder<W>) {
        self.as_slice().write_to(enc)
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: ReadFrom),+> ReadFrom for ($($name,)+) {
            fn read_from<R: ByteSource>(dec: &mut Decoder<R>) -> Option<Self> {
                Some(($($name::read_from(dec)?,)+))
            }
        }

        impl<$($name: WriteTo),+> WriteTo for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write_to<W: ByteSink>(&self, enc: &mut Encoder<W>) {
                let ($($name,)+) = self;
                $($name.write_to(enc);)+
            }
        }
    };
}
impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
