/******************************************\
|==========================================|
|        Macro: impl_from_to_primitive     |
|==========================================|
\******************************************/

/// Adds `from_unchecked` and `index` to a fieldless `#[repr(u8)]` enum whose
/// variants are numbered `0..NUM`.
///
/// The second arm covers enums backed by another primitive (e.g. `i8` for
/// `Direction`), where only the conversion is generated.
#[macro_export]
macro_rules! impl_from_to_primitive {
    ($enum_name:ident) => {
        impl $enum_name {
            #[doc=concat!("Builds a ", stringify!($enum_name), " from its discriminant")]
            /// ## Safety
            /// `index` must be below `NUM`.
            #[inline]
            pub const unsafe fn from_unchecked(index: u8) -> Self {
                debug_assert!((index as usize) < Self::NUM, "discriminant out of range");
                unsafe { std::mem::transmute(index) }
            }

            #[doc=concat!("Builds a ", stringify!($enum_name), " from its discriminant, or `None` when out of range")]
            #[inline]
            pub const fn try_from_index(index: usize) -> Option<Self> {
                if index < Self::NUM {
                    Some(unsafe { Self::from_unchecked(index as u8) })
                } else {
                    None
                }
            }

            /// Discriminant as an array index
            #[inline]
            pub const fn index(&self) -> usize {
                *self as usize
            }
        }
    };

    ($enum_name:ident, $type_name:ty) => {
        impl $enum_name {
            #[doc=concat!("Reinterprets a raw ", stringify!($type_name), " as ", stringify!($enum_name))]
            pub const fn from_unchecked(value: $type_name) -> Self {
                unsafe { std::mem::transmute(value) }
            }
        }
    };
}

/******************************************\
|==========================================|
|          Macro: impl_enum_iter           |
|==========================================|
\******************************************/

/// Adds `iter()` walking every variant in discriminant order.
#[macro_export]
macro_rules! impl_enum_iter {
    ($enum_name:ident) => {
        impl $enum_name {
            #[doc=concat!("Iterates over every ", stringify!($enum_name), " in discriminant order")]
            pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
                (0..Self::NUM as u8).map(|i| unsafe { Self::from_unchecked(i) })
            }
        }
    };
}

/******************************************\
|==========================================|
|          Macro: impl_bit_ops             |
|==========================================|
\******************************************/

/// `&`, `|`, `^` and their assigning forms for a single-field newtype.
#[macro_export]
macro_rules! impl_bit_ops {
    ($struct_name:ident) => {
        $crate::impl_bit_ops!(@binary $struct_name, BitAnd, bitand, BitAndAssign, bitand_assign, &);
        $crate::impl_bit_ops!(@binary $struct_name, BitOr, bitor, BitOrAssign, bitor_assign, |);
        $crate::impl_bit_ops!(@binary $struct_name, BitXor, bitxor, BitXorAssign, bitxor_assign, ^);
    };

    (@binary $struct_name:ident, $op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $tok:tt) => {
        impl std::ops::$op for $struct_name {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self::Output {
                Self(self.0 $tok rhs.0)
            }
        }

        impl std::ops::$assign_op for $struct_name {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                self.0 = self.0 $tok rhs.0;
            }
        }
    };
}

/******************************************\
|==========================================|
|        Macro: impl_bit_shift_ops         |
|==========================================|
\******************************************/

/// `<<`, `>>` (by `u8`) and `!` for a single-field newtype.
#[macro_export]
macro_rules! impl_bit_shift_ops {
    ($struct_name:ident) => {
        impl std::ops::Shl<u8> for $struct_name {
            type Output = Self;

            #[inline]
            fn shl(self, rhs: u8) -> Self::Output {
                Self(self.0 << rhs)
            }
        }

        impl std::ops::Shr<u8> for $struct_name {
            type Output = Self;

            #[inline]
            fn shr(self, rhs: u8) -> Self::Output {
                Self(self.0 >> rhs)
            }
        }

        impl std::ops::Not for $struct_name {
            type Output = Self;

            #[inline]
            fn not(self) -> Self::Output {
                Self(!self.0)
            }
        }
    };
}
