use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};

use crate::{MapKey, Scalar, View, ViewRef};

macro_rules! impl_scalar_view {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl View for $ty {
                #[inline]
                fn view_ref(&self) -> ViewRef<'_> {
                    ViewRef::Scalar(Scalar::$variant(*self as $cast))
                }
            }
        )*
    };
}

impl_scalar_view!(
    i8 => I64 as i64,
    i16 => I64 as i64,
    i32 => I64 as i64,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U64 as u64,
    u16 => U64 as u64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    usize => U64 as u64,
    i128 => I128 as i128,
    u128 => U128 as u128,
    f32 => F64 as f64,
    f64 => F64 as f64,
);

impl View for bool {
    #[inline]
    fn view_ref(&self) -> ViewRef<'_> {
        ViewRef::Scalar(Scalar::Bool(*self))
    }
}

impl View for char {
    #[inline]
    fn view_ref(&self) -> ViewRef<'_> {
        ViewRef::Scalar(Scalar::Char(*self))
    }
}

impl View for () {
    #[inline]
    fn view_ref(&self) -> ViewRef<'_> {
        ViewRef::Null
    }
}

// -----------------------------------------------------------------------------
// Strings

macro_rules! impl_str_view {
    ($($ty:ty),* $(,)?) => {
        $(
            impl View for $ty {
                #[inline]
                fn view_ref(&self) -> ViewRef<'_> {
                    ViewRef::Scalar(Scalar::Str(AsRef::<str>::as_ref(self)))
                }
            }

            impl MapKey for $ty {
                #[inline]
                fn map_key(&self) -> Cow<'_, str> {
                    Cow::Borrowed(AsRef::<str>::as_ref(self))
                }
            }
        )*
    };
}

impl_str_view!(String, &'static str, Box<str>, Cow<'static, str>);

// -----------------------------------------------------------------------------
// Non-string keys

macro_rules! impl_display_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                #[inline]
                fn map_key(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_display_key!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

// -----------------------------------------------------------------------------
// Tests
