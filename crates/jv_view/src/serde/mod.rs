//! Serde integration.
//!
//! A [`Node`](crate::Node) tree already implements `Serialize`. The
//! [`SerializeDriver`] skips the intermediate step for callers that only
//! want encoded output: it walks the value when serialized and reports walk
//! failures through the serializer's own error type.

// -----------------------------------------------------------------------------
// Modules

mod driver;

// -----------------------------------------------------------------------------
// Exports

pub use driver::SerializeDriver;
