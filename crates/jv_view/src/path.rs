//! The dotted location of a node during a walk.

use alloc::vec::Vec;
use core::fmt;

use crate::info::TypeInfo;
use crate::rules::Match;

// -----------------------------------------------------------------------------
// Scope

/// The [`Match`] set in effect at a node, with the node it was entered at.
///
/// Directive paths are interpreted relative to that node.
#[derive(Clone, Copy)]
pub struct Scope<'r> {
    owner: &'static TypeInfo,
    matches: &'r Match,
    depth: usize,
}

impl<'r> Scope<'r> {
    /// Creates a scope entered at a node `depth` segments below the root.
    #[inline]
    pub const fn new(owner: &'static TypeInfo, matches: &'r Match, depth: usize) -> Self {
        Self {
            owner,
            matches,
            depth,
        }
    }

    /// Returns the type the match set is registered on.
    #[inline]
    pub const fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    #[inline]
    pub const fn matches(&self) -> &'r Match {
        self.matches
    }

    /// Returns the depth of the node the scope was entered at.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("owner", &self.owner.type_path())
            .field("depth", &self.depth)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PathContext

/// Field names from the root down to the current node.
///
/// Never mutated in place: [`descend`](Self::descend) returns an extended
/// copy, so sibling branches of a walk never share state.
///
/// ```
/// use jv_view::path::PathContext;
///
/// let root = PathContext::root();
/// let val = root.descend("sub", None).descend("val", None);
///
/// assert_eq!(root.to_string(), "<root>");
/// assert_eq!(val.to_string(), "sub.val");
/// assert_eq!(val.depth(), 2);
/// assert_eq!(root.depth(), 0);
/// ```
#[derive(Clone, Default)]
pub struct PathContext<'r> {
    segments: Vec<&'static str>,
    scope: Option<Scope<'r>>,
}

impl<'r> PathContext<'r> {
    /// The context of the root value.
    #[inline]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
            scope: None,
        }
    }

    /// Returns the context of field `name` of the current node, under
    /// `scope`.
    pub fn descend(&self, name: &'static str, scope: Option<Scope<'r>>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(name);
        Self { segments, scope }
    }

    /// Returns the field names from the root.
    #[inline]
    pub fn segments(&self) -> &[&'static str] {
        &self.segments
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns the scope inherited from the enclosing nodes.
    #[inline]
    pub const fn scope(&self) -> Option<Scope<'r>> {
        self.scope
    }

    /// Returns the segments below the node `scope` was entered at.
    #[inline]
    pub fn relative_to(&self, scope: &Scope<'_>) -> &[&'static str] {
        self.segments.get(scope.depth..).unwrap_or_default()
    }
}

impl fmt::Display for PathContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.segments.iter();
        match iter.next() {
            None => f.write_str("<root>"),
            Some(first) => {
                f.write_str(first)?;
                for segment in iter {
                    write!(f, ".{segment}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for PathContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathContext")
            .field("path", &format_args!("{self}"))
            .field("scope", &self.scope)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{PathContext, Scope};
    use crate::impls::NonGenericTypeInfoCell;
    use crate::info::TypeInfo;
    use crate::rules::Match;

    #[test]
    fn siblings_do_not_share_segments() {
        let parent = PathContext::root().descend("sub", None);
        let a = parent.descend("a", None);
        let b = parent.descend("b", None);

        assert_eq!(parent.segments(), ["sub"]);
        assert_eq!(a.segments(), ["sub", "a"]);
        assert_eq!(b.segments(), ["sub", "b"]);
    }

    #[test]
    fn relative_segments() {
        static OWNER: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();

        let matches = Match::new();
        let scope = Scope::new(OWNER.get_or_init(TypeInfo::new::<u8>), &matches, 1);

        let ctx = PathContext::root()
            .descend("list", None)
            .descend("sub", Some(scope))
            .descend("val", Some(scope));

        assert!(scope.owner().type_is::<u8>());
        assert_eq!(scope.depth(), 1);
        assert_eq!(ctx.relative_to(&scope), ["sub", "val"]);
        assert_eq!(PathContext::root().relative_to(&scope), [] as [&str; 0]);
    }
}
