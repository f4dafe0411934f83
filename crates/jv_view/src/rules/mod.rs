//! Caller-supplied include/exclude rules.
//!
//! - [`Match`]: the directives registered for one type.
//! - [`RuleSet`]: type to [`Match`], built once per projection call.
//!
//! Paths are plain field names joined by `.`, there are no wildcards.
//! Paths that name nothing are silently inert.

// -----------------------------------------------------------------------------
// Modules

mod matcher;
mod rule_set;

// -----------------------------------------------------------------------------
// Exports

pub use matcher::{Directive, Match, Polarity};
pub use rule_set::{RuleSet, RuleSetBuilder};
