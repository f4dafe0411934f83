//! Static type descriptors.
//!
//! - [`TypeInfo`]: one concrete type, its directly declared fields, its
//!   class-level ignore list and an optional [`ParentInfo`] link.
//! - [`NamedField`]: one declared field with its getter and static
//!   visibility.
//! - [`Typed`]: static access to a type's [`TypeInfo`].
//!
//! Descriptors are built once per type and never change afterwards.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::NamedField;
pub use type_info::{Lineage, ParentInfo, TypeInfo};
pub use typed::Typed;
