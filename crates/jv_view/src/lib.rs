//! Dynamic field projection over reflected object graphs.
//!
//! A type describes its fields once through [`Typed`](info::Typed), usually
//! generated by [`#[derive(View)]`](derive::View). Each serialization call
//! brings a [`RuleSet`](rules::RuleSet) of per-type include/exclude paths, and
//! the [`Walker`](walk::Walker) turns the value into a [`Node`] tree containing
//! only the fields that survive resolution. The tree implements
//! `serde::Serialize`, so any serde format can encode it.
//!
//! # Example
//!
//! ```
//! use jv_view::View;
//! use jv_view::rules::{Match, RuleSet};
//!
//! #[derive(View)]
//! struct Sub {
//!     val: String,
//!     other: u32,
//! }
//!
//! #[derive(View)]
//! struct Root {
//!     int1: i32,
//!     str2: String,
//!     #[view(ignore)]
//!     ignored_direct: String,
//!     sub: Sub,
//! }
//!
//! let root = Root {
//!     int1: 1,
//!     str2: "asdf".into(),
//!     ignored_direct: "ignore me".into(),
//!     sub: Sub { val: "qwer".into(), other: 2 },
//! };
//!
//! let rules = RuleSet::builder()
//!     .on::<Root>(Match::new().exclude("str2").exclude("sub.val").include("ignored_direct"))
//!     .build();
//!
//! let tree = jv_view::walk::emit(&root, &rules).unwrap();
//!
//! assert!(tree.get("str2").is_none());
//! assert_eq!(tree.get("ignored_direct").and_then(|n| n.as_str()), Some("ignore me"));
//! assert!(tree.get("sub").unwrap().get("val").is_none());
//! assert_eq!(tree.get("sub").unwrap().get("other").and_then(|n| n.as_u64()), Some(2));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub(crate) mod cfg {
    /// Expands the body only with debug assertions and the `debug` feature.
    macro_rules! debug {
        ($($tt:tt)*) => {
            #[cfg(all(debug_assertions, feature = "debug"))]
            {
                $($tt)*
            }
        };
    }

    pub(crate) use debug;
}

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names `::jv_view`, which must also resolve inside this crate.
extern crate self as jv_view;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod node;
mod view;

pub mod catalog;
pub mod impls;
pub mod info;
pub mod path;
pub mod resolve;
pub mod rules;
pub mod serde;
pub mod walk;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{AccessError, RuleError, WalkError};
pub use node::{Node, NodeMap};
pub use view::{MapKey, Mapping, ObjectRef, Scalar, Sequence, View, ViewRef};

pub use jv_view_derive as derive;
pub use jv_view_derive::View;
