use core::any::{Any, TypeId};
use core::fmt;

use jv_utils::TypeIdMap;

use crate::RuleError;
use crate::info::TypeInfo;
use crate::rules::Match;

struct Entry {
    type_path: &'static str,
    matches: Match,
}

// -----------------------------------------------------------------------------
// RuleSet

/// Per-type [`Match`] sets for one projection call.
///
/// Built with [`RuleSet::builder`] and immutable afterwards. A set applies
/// to the type it is registered on and to every type inheriting from it,
/// unless a nearer ancestor has its own set.
///
/// # Examples
///
/// ```
/// use jv_view::View;
/// use jv_view::info::Typed;
/// use jv_view::rules::{Match, RuleSet};
///
/// #[derive(View)]
/// struct Base {
///     str2: String,
/// }
///
/// #[derive(View)]
/// struct Child {
///     #[view(parent)]
///     base: Base,
/// }
///
/// let rules = RuleSet::builder()
///     .on::<Base>(Match::new().exclude("str2"))
///     .build();
///
/// let (owner, matches) = rules.lookup(Child::type_info()).unwrap();
/// assert!(owner.type_is::<Base>());
/// assert_eq!(matches.len(), 1);
/// ```
pub struct RuleSet {
    rules: TypeIdMap<Entry>,
}

impl Default for RuleSet {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl RuleSet {
    /// Creates a rule set without any match set.
    ///
    /// Projection with it emits exactly the fields not statically excluded.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            rules: TypeIdMap::new(),
        }
    }

    /// Starts building a rule set.
    #[inline]
    pub const fn builder() -> RuleSetBuilder {
        RuleSetBuilder {
            rules: TypeIdMap::new(),
        }
    }

    /// Returns the match set registered exactly on `T`.
    #[inline]
    pub fn get<T: Any>(&self) -> Option<&Match> {
        self.rules.get_type::<T>().map(|e| &e.matches)
    }

    /// Finds the match set governing `ty`: its own, or the one of its
    /// nearest ancestor that has one.
    ///
    /// Also returns the type the set is registered on.
    pub fn lookup(&self, ty: &'static TypeInfo) -> Option<(&'static TypeInfo, &Match)> {
        if self.rules.is_empty() {
            return None;
        }
        ty.lineage()
            .find_map(|info| self.rules.get(&info.type_id()).map(|e| (info, &e.matches)))
    }

    /// Returns the number of types with a match set.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rules.values().map(|e| (e.type_path, &e.matches)))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// RuleSetBuilder

/// Builder of a [`RuleSet`].
pub struct RuleSetBuilder {
    rules: TypeIdMap<Entry>,
}

impl RuleSetBuilder {
    /// Registers the match set of `T`.
    ///
    /// Registering a second set for the same type replaces the first one
    /// and logs a warning. Use [`try_on`](Self::try_on) to reject it.
    pub fn on<T: Any>(self, matches: Match) -> Self {
        self.register(TypeId::of::<T>(), core::any::type_name::<T>(), matches)
    }

    /// Registers a match set for the type described by `ty`.
    ///
    /// Same replacement policy as [`on`](Self::on).
    pub fn on_type(self, ty: &'static TypeInfo, matches: Match) -> Self {
        self.register(ty.type_id(), ty.type_path(), matches)
    }

    /// Registers the match set of `T`, failing if `T` already has one.
    ///
    /// ```
    /// use jv_view::RuleError;
    /// use jv_view::rules::{Match, RuleSet};
    ///
    /// let builder = RuleSet::builder().try_on::<u8>(Match::new()).unwrap();
    /// let err = builder.try_on::<u8>(Match::new()).unwrap_err();
    ///
    /// assert_eq!(err, RuleError::DuplicateType { type_path: "u8" });
    /// ```
    pub fn try_on<T: Any>(self, matches: Match) -> Result<Self, RuleError> {
        self.try_register(TypeId::of::<T>(), core::any::type_name::<T>(), matches)
    }

    /// Strict variant of [`on_type`](Self::on_type).
    pub fn try_on_type(self, ty: &'static TypeInfo, matches: Match) -> Result<Self, RuleError> {
        self.try_register(ty.type_id(), ty.type_path(), matches)
    }

    /// Finishes the rule set.
    #[inline]
    pub fn build(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }

    fn register(mut self, type_id: TypeId, type_path: &'static str, matches: Match) -> Self {
        let previous = self.rules.insert(type_id, Entry { type_path, matches });
        if previous.is_some() {
            log::warn!("match set for `{type_path}` registered twice, the last one wins");
        }
        self
    }

    fn try_register(
        mut self,
        type_id: TypeId,
        type_path: &'static str,
        matches: Match,
    ) -> Result<Self, RuleError> {
        if self.rules.contains(&type_id) {
            return Err(RuleError::DuplicateType { type_path });
        }
        self.rules.insert(type_id, Entry { type_path, matches });
        Ok(self)
    }
}

impl fmt::Debug for RuleSetBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSetBuilder")
            .field("types", &self.rules.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::RuleSet;
    use crate::RuleError;
    use crate::impls::NonGenericTypeInfoCell;
    use crate::info::{ParentInfo, TypeInfo, Typed};
    use crate::rules::{Match, Polarity};

    struct Base;

    struct Middle {
        base: Base,
    }

    struct Leaf {
        middle: Middle,
    }

    impl Typed for Base {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(TypeInfo::new::<Self>)
        }
    }

    impl Typed for Middle {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>().with_parent(ParentInfo::new::<Self, Base>(|v| &v.base))
            })
        }
    }

    impl Typed for Leaf {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>().with_parent(ParentInfo::new::<Self, Middle>(|v| &v.middle))
            })
        }
    }

    #[test]
    fn nearest_ancestor_wins() {
        let rules = RuleSet::builder()
            .on::<Base>(Match::new().exclude("a"))
            .on::<Middle>(Match::new().exclude("b"))
            .build();

        let (owner, matches) = rules.lookup(Leaf::type_info()).unwrap();
        assert!(owner.type_is::<Middle>());
        assert_eq!(matches.decide(&[], "b"), Some(Polarity::Exclude));
        assert_eq!(matches.decide(&[], "a"), None);

        let (owner, _) = rules.lookup(Base::type_info()).unwrap();
        assert!(owner.type_is::<Base>());
    }

    #[test]
    fn unrelated_types_have_no_rules() {
        let rules = RuleSet::builder()
            .on::<Middle>(Match::new().exclude("b"))
            .build();
        assert!(rules.lookup(Base::type_info()).is_none());
        assert!(RuleSet::empty().lookup(Leaf::type_info()).is_none());
    }

    #[test]
    fn last_registration_wins() {
        let rules = RuleSet::builder()
            .on::<Base>(Match::new().exclude("first"))
            .on_type(Base::type_info(), Match::new().exclude("second"))
            .build();

        let matches = rules.get::<Base>().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(matches.decide(&[], "first"), None);
        assert_eq!(matches.decide(&[], "second"), Some(Polarity::Exclude));
    }

    #[test]
    fn strict_registration_rejects_duplicates() {
        let result = RuleSet::builder()
            .try_on::<Base>(Match::new())
            .and_then(|b| b.try_on_type(Base::type_info(), Match::new()));

        assert!(matches!(result, Err(RuleError::DuplicateType { .. })));
    }
}
