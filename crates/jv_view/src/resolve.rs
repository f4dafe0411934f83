//! Per-node field selection.

use alloc::vec::Vec;

use crate::catalog::{CatalogField, FieldCatalog};
use crate::info::TypeInfo;
use crate::path::{PathContext, Scope};
use crate::rules::{Polarity, RuleSet};

// -----------------------------------------------------------------------------
// Resolution

/// The fields to emit for one node, and the scope its children inherit.
#[derive(Debug, Clone)]
pub struct Resolution<'r> {
    fields: Vec<CatalogField>,
    scope: Option<Scope<'r>>,
}

impl<'r> Resolution<'r> {
    /// Returns the included fields in catalog order.
    #[inline]
    pub fn fields(&self) -> &[CatalogField] {
        &self.fields
    }

    /// Returns the scope in effect at this node.
    #[inline]
    pub const fn scope(&self) -> Option<Scope<'r>> {
        self.scope
    }

    /// Returns the names of the included fields.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(CatalogField::name)
    }
}

// -----------------------------------------------------------------------------
// Resolver

/// Decides which fields of a node are emitted.
///
/// For every field of the node's type, in catalog order:
///
/// 1. it starts included unless statically excluded;
/// 2. an exclude directive naming it removes it;
/// 3. an include directive naming it adds it back, whatever 1 and 2 said.
///
/// The directives come from the match set of the node's type or of its
/// nearest ancestor. A type without one keeps the set of the nearest
/// enclosing node that had one, with paths read relative to that node.
///
/// ```
/// use jv_view::View;
/// use jv_view::info::Typed;
/// use jv_view::path::PathContext;
/// use jv_view::resolve::Resolver;
/// use jv_view::rules::{Match, RuleSet};
///
/// #[derive(View)]
/// struct Account {
///     id: u64,
///     #[view(ignore)]
///     secret: String,
///     email: String,
/// }
///
/// let rules = RuleSet::builder()
///     .on::<Account>(Match::new().exclude("email").include("secret"))
///     .build();
///
/// let resolution = Resolver::shared().resolve(Account::type_info(), &PathContext::root(), &rules);
/// assert_eq!(resolution.names().collect::<Vec<_>>(), ["id", "secret"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'c> {
    catalog: &'c FieldCatalog,
}

impl Resolver<'static> {
    /// A resolver over [`FieldCatalog::shared`].
    #[inline]
    pub fn shared() -> Self {
        Self::new(FieldCatalog::shared())
    }
}

impl<'c> Resolver<'c> {
    #[inline]
    pub const fn new(catalog: &'c FieldCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog fields are read from.
    #[inline]
    pub const fn catalog(&self) -> &'c FieldCatalog {
        self.catalog
    }

    /// Selects the fields of a node of type `ty` located at `ctx`.
    pub fn resolve<'r>(
        &self,
        ty: &'static TypeInfo,
        ctx: &PathContext<'r>,
        rules: &'r RuleSet,
    ) -> Resolution<'r> {
        let scope = match rules.lookup(ty) {
            Some((owner, matches)) => Some(Scope::new(owner, matches, ctx.depth())),
            None => ctx.scope(),
        };

        let catalog = self.catalog.fields_for(ty);
        let relative = scope.as_ref().map(|s| ctx.relative_to(s)).unwrap_or_default();

        let fields = catalog
            .iter()
            .filter(|field| {
                let decision = scope.and_then(|s| s.matches().decide(relative, field.name()));
                let included = match decision {
                    Some(polarity) => polarity == Polarity::Include,
                    None => !field.is_statically_excluded(),
                };

                log::trace!(
                    "{ctx}: `{}` of `{}` {} ({decision:?})",
                    field.name(),
                    ty.type_ident(),
                    if included { "included" } else { "excluded" },
                );

                included
            })
            .copied()
            .collect();

        Resolution { fields, scope }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::Resolver;
    use crate::catalog::FieldCatalog;
    use crate::impls::NonGenericTypeInfoCell;
    use crate::info::{NamedField, TypeInfo, Typed};
    use crate::path::PathContext;
    use crate::rules::{Match, RuleSet};

    struct Sub {
        val: String,
        other: u8,
    }

    impl Typed for Sub {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>().with_fields([
                    NamedField::new::<Self, _>("val", |v| &v.val),
                    NamedField::new::<Self, _>("other", |v| &v.other),
                ])
            })
        }
    }

    struct Root {
        str2: String,
        hidden: bool,
    }

    impl Typed for Root {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>().with_fields([
                    NamedField::new::<Self, _>("str2", |v| &v.str2),
                    NamedField::new::<Self, _>("hidden", |v| &v.hidden).ignored(),
                ])
            })
        }
    }

    fn names(
        resolver: Resolver<'_>,
        ty: &'static TypeInfo,
        ctx: &PathContext<'_>,
        rules: &RuleSet,
    ) -> Vec<&'static str> {
        resolver.resolve(ty, ctx, rules).names().collect()
    }

    #[test]
    fn no_rules_means_static_visibility() {
        let catalog = FieldCatalog::new();
        let resolver = Resolver::new(&catalog);
        let rules = RuleSet::empty();

        let got = names(resolver, Root::type_info(), &PathContext::root(), &rules);
        assert_eq!(got, ["str2"]);
    }

    #[test]
    fn enclosing_scope_reaches_nested_nodes() {
        let catalog = FieldCatalog::new();
        let resolver = Resolver::new(&catalog);
        let rules = RuleSet::builder()
            .on::<Root>(Match::new().exclude("sub.val"))
            .build();

        let root = resolver.resolve(Root::type_info(), &PathContext::root(), &rules);
        let sub_ctx = PathContext::root().descend("sub", root.scope());
        assert_eq!(names(resolver, Sub::type_info(), &sub_ctx, &rules), ["other"]);

        let deeper = sub_ctx.descend("sub", root.scope());
        assert_eq!(names(resolver, Sub::type_info(), &deeper, &rules), ["val", "other"]);
    }

    #[test]
    fn own_rules_restart_relative_paths() {
        let catalog = FieldCatalog::new();
        let resolver = Resolver::new(&catalog);
        let rules = RuleSet::builder()
            .on::<Root>(Match::new().exclude("sub.val"))
            .on::<Sub>(Match::new().exclude("other"))
            .build();

        let root = resolver.resolve(Root::type_info(), &PathContext::root(), &rules);
        let sub_ctx = PathContext::root().descend("sub", root.scope());
        assert_eq!(names(resolver, Sub::type_info(), &sub_ctx, &rules), ["val"]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let catalog = FieldCatalog::new();
        let resolver = Resolver::new(&catalog);
        let rules = RuleSet::builder()
            .on::<Root>(Match::new().include("hidden").exclude("str2"))
            .build();

        let ctx = PathContext::root();
        let first = names(resolver, Root::type_info(), &ctx, &rules);
        let second = names(resolver, Root::type_info(), &ctx, &rules);
        assert_eq!(first, ["hidden"]);
        assert_eq!(first, second);
    }
}
