use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use jv_utils::hash::HashSet;

// -----------------------------------------------------------------------------
// Polarity

/// Whether a directive adds or removes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Include,
    Exclude,
}

// -----------------------------------------------------------------------------
// Directive

/// One dotted path with its polarity.
///
/// `"sub.val"` names the field `val` of the object stored in field `sub`.
/// An empty exclude path names every top-level field of the type the
/// directive is registered on. An empty include path names nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directive {
    pub path: Box<str>,
    pub polarity: Polarity,
}

impl Directive {
    #[inline]
    pub fn include(path: impl Into<Box<str>>) -> Self {
        Self {
            path: path.into(),
            polarity: Polarity::Include,
        }
    }

    #[inline]
    pub fn exclude(path: impl Into<Box<str>>) -> Self {
        Self {
            path: path.into(),
            polarity: Polarity::Exclude,
        }
    }
}

// -----------------------------------------------------------------------------
// Match

/// The include and exclude paths registered for one type.
///
/// Directives form two sets: call order does not matter and repeating a
/// directive has no effect. When a field is named by both sets, the include
/// wins.
///
/// # Examples
///
/// ```
/// use jv_view::rules::{Match, Polarity};
///
/// let m = Match::new()
///     .include("ignored_direct")
///     .exclude("str2")
///     .exclude("sub.val")
///     .exclude("str2");
///
/// assert_eq!(m.len(), 3);
/// assert_eq!(m.decide(&[], "str2"), Some(Polarity::Exclude));
/// assert_eq!(m.decide(&["sub"], "val"), Some(Polarity::Exclude));
/// assert_eq!(m.decide(&[], "val"), None);
/// assert_eq!(m.decide(&[], "ignored_direct"), Some(Polarity::Include));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Match {
    include: HashSet<Box<str>>,
    exclude: HashSet<Box<str>>,
}

impl Match {
    /// Creates an empty match set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include directive.
    #[inline]
    pub fn include(mut self, path: impl Into<Box<str>>) -> Self {
        self.include.insert(path.into());
        self
    }

    /// Adds an exclude directive.
    #[inline]
    pub fn exclude(mut self, path: impl Into<Box<str>>) -> Self {
        self.exclude.insert(path.into());
        self
    }

    /// Adds every path as an include directive.
    pub fn include_all<P: Into<Box<str>>>(mut self, paths: impl IntoIterator<Item = P>) -> Self {
        self.include.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds every path as an exclude directive.
    pub fn exclude_all<P: Into<Box<str>>>(mut self, paths: impl IntoIterator<Item = P>) -> Self {
        self.exclude.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds a directive.
    pub fn with(self, directive: Directive) -> Self {
        match directive.polarity {
            Polarity::Include => self.include(directive.path),
            Polarity::Exclude => self.exclude(directive.path),
        }
    }

    /// Returns the number of distinct directives.
    #[inline]
    pub fn len(&self) -> usize {
        self.include.len() + self.exclude.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Iterates the directives in arbitrary order.
    pub fn directives(&self) -> impl Iterator<Item = Directive> + '_ {
        let include = self.include.iter().map(|p| Directive::include(p.clone()));
        let exclude = self.exclude.iter().map(|p| Directive::exclude(p.clone()));
        include.chain(exclude)
    }

    /// Decides the field `field` of a node located at `scope`, relative to
    /// the type this set is registered on.
    ///
    /// Returns `None` when no directive names the field.
    pub fn decide(&self, scope: &[&str], field: &str) -> Option<Polarity> {
        if self.is_empty() {
            return None;
        }

        let path = join(scope, field);

        if self.include.contains(path.as_str()) {
            Some(Polarity::Include)
        } else if self.exclude.contains(path.as_str())
            || (scope.is_empty() && self.exclude.contains(""))
        {
            Some(Polarity::Exclude)
        } else {
            None
        }
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .finish()
    }
}

fn join(scope: &[&str], field: &str) -> String {
    let len = scope.iter().map(|s| s.len() + 1).sum::<usize>() + field.len();
    let mut path = String::with_capacity(len);
    for segment in scope {
        path.push_str(segment);
        path.push('.');
    }
    path.push_str(field);
    path
}

// -----------------------------------------------------------------------------
// Tests
