use alloc::borrow::Cow;
use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// AccessError

/// Failure while reading a field value through its descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("field `{field}` expects an owner of type `{expected}`")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("`{type_path}` cannot reach its parent `{parent}`")]
    BrokenLineage {
        type_path: &'static str,
        parent: &'static str,
    },

    #[error("field `{field}` of `{type_path}` is unavailable: {reason}")]
    Unavailable {
        type_path: &'static str,
        field: &'static str,
        reason: Cow<'static, str>,
    },
}

impl AccessError {
    /// Creates an [`AccessError::Unavailable`] for a field of `T`.
    ///
    /// Fallible getters return this when the value cannot be produced.
    pub fn unavailable<T: ?Sized>(field: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Unavailable {
            type_path: core::any::type_name::<T>(),
            field,
            reason: reason.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// WalkError

/// Failure of one projection call. The whole call is aborted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WalkError {
    #[error("failed to read `{path}`: {source}")]
    Access {
        path: String,
        #[source]
        source: AccessError,
    },

    #[error("cycle detected at `{path}`: `{type_path}` is already being walked")]
    Cycle {
        path: String,
        type_path: &'static str,
    },

    #[error("maximum depth {limit} exceeded at `{path}`")]
    DepthLimit { limit: usize, path: String },
}

// -----------------------------------------------------------------------------
// RuleError

/// Rejected rule registration, see [`RuleSetBuilder::try_on`].
///
/// [`RuleSetBuilder::try_on`]: crate::rules::RuleSetBuilder::try_on
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("a match set is already registered for `{type_path}`")]
    DuplicateType { type_path: &'static str },
}
