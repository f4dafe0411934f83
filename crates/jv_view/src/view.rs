use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// View

/// A value the projection engine can walk.
///
/// Every node of an object graph is one of four shapes, reported by
/// [`View::view_ref`]:
///
/// - a scalar, emitted as-is;
/// - a sequence, whose elements are walked one by one;
/// - a string-keyed mapping, whose values are walked one by one;
/// - an object, described by a [`TypeInfo`] whose fields are resolved
///   against the active rules.
///
/// `Option::None` and `()` report [`ViewRef::Null`].
///
/// Objects should use [`#[derive(View)]`](crate::derive::View), which also
/// implements [`Typed`](crate::info::Typed). The standard scalar and
/// container types are implemented in [`impls`](crate::impls).
///
/// # Manual Implementation
///
/// ```
/// use jv_view::{Scalar, View, ViewRef};
///
/// struct Celsius(f64);
///
/// impl View for Celsius {
///     fn view_ref(&self) -> ViewRef<'_> {
///         ViewRef::Scalar(Scalar::F64(self.0))
///     }
/// }
/// ```
pub trait View: Any {
    /// Returns the shape of this value.
    fn view_ref(&self) -> ViewRef<'_>;

    /// Returns the type name of the underlying value, used in error messages.
    fn view_type_path(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl dyn View {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Downcasts the underlying value to `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn View<{}>", self.view_type_path())
    }
}

// -----------------------------------------------------------------------------
// ViewRef

/// The shape of a [`View`] value, borrowed from it.
pub enum ViewRef<'a> {
    Null,
    Scalar(Scalar<'a>),
    Sequence(&'a dyn Sequence),
    Mapping(&'a dyn Mapping),
    Object(ObjectRef<'a>),
}

impl fmt::Debug for ViewRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewRef::Null => f.write_str("Null"),
            ViewRef::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            ViewRef::Sequence(seq) => f.debug_struct("Sequence").field("len", &seq.len()).finish(),
            ViewRef::Mapping(map) => f.debug_struct("Mapping").field("len", &map.len()).finish(),
            ViewRef::Object(object) => f.debug_tuple("Object").field(&object.info().type_path()).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// A leaf value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F64(f64),
    Char(char),
    Str(&'a str),
}

// -----------------------------------------------------------------------------
// Sequence

/// An ordered (or unordered) collection of values.
///
/// Elements share the path of the collection itself: being inside a
/// collection never adds a path segment.
pub trait Sequence {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the elements in iteration order.
    fn elements(&self) -> Box<dyn Iterator<Item = &dyn View> + '_>;
}

// -----------------------------------------------------------------------------
// Mapping

/// A collection of values addressed by string-like keys.
///
/// Keys are data, not fields: entries are never filtered by rules and
/// their values share the path of the mapping itself.
pub trait Mapping {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns the entries in iteration order.
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn View)> + '_>;
}

/// A key usable in a [`Mapping`].
pub trait MapKey {
    fn map_key(&self) -> Cow<'_, str>;
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A borrowed object together with its runtime [`TypeInfo`].
///
/// The `info` must describe the concrete type of `value`; field getters
/// downcast `value` to the type that declares them.
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    info: &'static TypeInfo,
    value: &'a dyn Any,
}

impl<'a> ObjectRef<'a> {
    /// Creates an [`ObjectRef`] for `value` described by `info`.
    #[inline]
    pub const fn new(info: &'static TypeInfo, value: &'a dyn Any) -> Self {
        Self { info, value }
    }

    /// Returns the runtime type descriptor.
    #[inline]
    pub const fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Returns the object itself.
    #[inline]
    pub const fn value(&self) -> &'a dyn Any {
        self.value
    }

    /// Identity of this object during a walk.
    ///
    /// An embedded first field shares its owner's address, so the type
    /// is part of the identity.
    #[inline]
    pub fn identity(&self) -> (usize, TypeId) {
        let addr = self.value as *const dyn Any as *const () as usize;
        (addr, self.info.type_id())
    }
}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("type_path", &self.info.type_path())
            .finish_non_exhaustive()
    }
}
