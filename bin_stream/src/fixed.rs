macro_rules! read_fixed {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                #[doc = "Read `" $ty "` in the configured byte order."]
                #[doc = ""]
                #[doc = "Returns 0 if the decoder is latched or the read fails."]
                pub fn [<read_ $ty>](&mut self) -> $ty {
                    self.[<try_read_ $ty>]().unwrap_or_default()
                }

                pub(crate) fn [<try_read_ $ty>](&mut self) -> Option<$ty> {
                    const LEN: usize = core::mem::size_of::<$ty>();
                    let bytes: [u8; LEN] = self.read_scratch()?;
                    Some(match self.byte_order {
                        $crate::ByteOrder::Little => $ty::from_le_bytes(bytes),
                        $crate::ByteOrder::Big => $ty::from_be_bytes(bytes),
                    })
                }
            )*
        }
    };
}
pub(crate) use read_fixed;

macro_rules! write_fixed {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                #[doc = "Write `" $ty "` in the configured byte order."]
                pub fn [<write_ $ty>](&mut self, value: $ty) {
                    let bytes = match self.byte_order {
                        $crate::ByteOrder::Little => value.to_le_bytes(),
                        $crate::ByteOrder::Big => value.to_be_bytes(),
                    };
                    self.write_scratch(&bytes);
                }
            )*
        }
    };
}
pub(crate) use write_fixed;
