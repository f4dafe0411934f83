use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use jv_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Container for the [`TypeInfo`] of a non-generic type.
///
/// Intended to live in a `static` inside [`Typed::type_info`].
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Container for the [`TypeInfo`] of every instantiation of a generic type.
///
/// A `static` inside a generic function is shared by all instantiations,
/// so descriptors are keyed by [`TypeId`] and leaked once per type.
///
/// ```
/// use jv_view::View;
/// use jv_view::info::Typed;
///
/// #[derive(View)]
/// struct Page<T> {
///     items: Vec<T>,
///     total: u64,
/// }
///
/// let a = Page::<u8>::type_info();
/// let b = Page::<String>::type_info();
///
/// assert!(a.type_is::<Page<u8>>());
/// assert!(b.type_is::<Page<String>>());
/// assert!(core::ptr::eq(a, Page::<u8>::type_info()));
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor of `T`, building it with `f` on first access.
    ///
    /// `f` runs outside the lock. When two threads race, the first stored
    /// descriptor wins and the other one is dropped.
    pub fn get_or_insert<T: Any>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        let type_id = TypeId::of::<T>();

        if let Some(info) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return *info;
        }

        let built = f();

        let mut table = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *table.get_or_insert(type_id, || &*Box::leak(Box::new(built)))
    }
}
