//! Parsed form of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod view_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use view_struct::ViewStruct;
