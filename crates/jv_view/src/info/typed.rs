use core::any::Any;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeInfo`].
///
/// Implemented by [`#[derive(View)]`](crate::derive::View).
///
/// # Manually Impl
///
/// Use [`NonGenericTypeInfoCell`] (or [`GenericTypeInfoCell`] for generic
/// types) so the descriptor is built only once:
///
/// ```
/// use jv_view::{ObjectRef, View, ViewRef};
/// use jv_view::impls::NonGenericTypeInfoCell;
/// use jv_view::info::{NamedField, TypeInfo, Typed};
///
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::new::<Self>().with_fields([
///                 NamedField::new::<Self, _>("x", |p| &p.x),
///                 NamedField::new::<Self, _>("y", |p| &p.y),
///             ])
///         })
///     }
/// }
///
/// impl View for Point {
///     fn view_ref(&self) -> ViewRef<'_> {
///         ViewRef::Object(ObjectRef::new(Self::type_info(), self))
///     }
/// }
///
/// assert_eq!(Point::type_info().fields().len(), 2);
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: Any {
    fn type_info() -> &'static TypeInfo;
}
