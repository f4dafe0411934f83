//! Object graph traversal.
//!
//! [`Walker`] turns a [`View`] into a [`Node`] tree:
//!
//! - scalars are copied as-is;
//! - `None` and `()` become [`Node::Null`] and are never recursed into;
//! - sequence elements and mapping values are walked with the path of the
//!   collection itself;
//! - objects become mappings holding the fields the [`Resolver`] selects,
//!   each walked with the path extended by the field name.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::catalog::FieldCatalog;
use crate::path::PathContext;
use crate::resolve::Resolver;
use crate::rules::RuleSet;
use crate::{Node, NodeMap, ObjectRef, View, ViewRef, WalkError};

// -----------------------------------------------------------------------------
// WalkOptions

/// Safety limits of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Maximum number of sequences, mappings and objects enclosing any
    /// sequence, mapping or object.
    ///
    /// The root container sits at depth 0. Scalars never count. `None`
    /// means unlimited.
    pub max_depth: Option<usize>,
    /// Fail with [`WalkError::Cycle`] when an object is reached again
    /// through its own fields.
    ///
    /// Without it a cyclic graph recurses until the stack overflows.
    pub detect_cycles: bool,
}

impl Default for WalkOptions {
    #[inline]
    fn default() -> Self {
        Self {
            max_depth: None,
            detect_cycles: true,
        }
    }
}

// -----------------------------------------------------------------------------
// Walker

/// Walks values and emits [`Node`] trees.
///
/// A walker holds no per-call state and can be reused for any number of
/// calls, with different rule sets.
///
/// ```
/// use jv_view::View;
/// use jv_view::rules::RuleSet;
/// use jv_view::walk::{WalkOptions, Walker};
///
/// #[derive(View)]
/// struct Tag {
///     name: &'static str,
/// }
///
/// let tags = vec![Tag { name: "a" }, Tag { name: "b" }];
///
/// let walker = Walker::new().with_options(WalkOptions { max_depth: Some(4), ..Default::default() });
/// let tree = walker.walk(&tags, &RuleSet::empty()).unwrap();
///
/// let json = serde_json::to_string(&tree).unwrap();
/// assert_eq!(json, r#"[{"name":"a"},{"name":"b"}]"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Walker<'c> {
    resolver: Resolver<'c>,
    options: WalkOptions,
}

impl Default for Walker<'static> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Walker<'static> {
    /// A walker over [`FieldCatalog::shared`] with default options.
    #[inline]
    pub fn new() -> Self {
        Self::with_catalog(FieldCatalog::shared())
    }
}

impl<'c> Walker<'c> {
    /// A walker over a private catalog.
    #[inline]
    pub fn with_catalog(catalog: &'c FieldCatalog) -> Self {
        Self {
            resolver: Resolver::new(catalog),
            options: WalkOptions::default(),
        }
    }

    /// Replaces the options.
    #[inline]
    pub const fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub const fn options(&self) -> &WalkOptions {
        &self.options
    }

    #[inline]
    pub const fn resolver(&self) -> Resolver<'c> {
        self.resolver
    }

    /// Walks `value` under `rules`.
    ///
    /// The first failure aborts the whole call.
    pub fn walk(&self, value: &dyn View, rules: &RuleSet) -> Result<Node, WalkError> {
        Walk {
            walker: self,
            rules,
            ancestors: Vec::new(),
            level: 0,
        }
        .node(value, &PathContext::root())
    }
}

/// Walks `value` under `rules` with a default [`Walker`].
///
/// See the [crate-level](crate) example.
#[inline]
pub fn emit(value: &dyn View, rules: &RuleSet) -> Result<Node, WalkError> {
    Walker::new().walk(value, rules)
}

// -----------------------------------------------------------------------------
// Walk

// State of one call.
struct Walk<'w, 'c, 'r> {
    walker: &'w Walker<'c>,
    rules: &'r RuleSet,
    // Objects currently being walked, root first.
    ancestors: Vec<(usize, TypeId)>,
    // Containers enclosing the current node.
    level: usize,
}

impl<'r> Walk<'_, '_, 'r> {
    fn node(&mut self, value: &dyn View, ctx: &PathContext<'r>) -> Result<Node, WalkError> {
        match value.view_ref() {
            ViewRef::Null => Ok(Node::Null),
            ViewRef::Scalar(scalar) => Ok(Node::from(scalar)),
            ViewRef::Sequence(seq) => self.nested(ctx, |walk| {
                let mut items = Vec::with_capacity(seq.len());
                for element in seq.elements() {
                    items.push(walk.node(element, ctx)?);
                }
                Ok(Node::Sequence(items))
            }),
            ViewRef::Mapping(map) => self.nested(ctx, |walk| {
                let mut entries = NodeMap::with_capacity(map.len());
                for (key, value) in map.entries() {
                    let node = walk.node(value, ctx)?;
                    // Source maps never repeat a key.
                    entries.push_unique(key.into_owned(), node);
                }
                Ok(Node::Mapping(entries))
            }),
            ViewRef::Object(object) => self.nested(ctx, |walk| walk.object(object, ctx)),
        }
    }

    // Runs `f` one container level deeper.
    fn nested(
        &mut self,
        ctx: &PathContext<'r>,
        f: impl FnOnce(&mut Self) -> Result<Node, WalkError>,
    ) -> Result<Node, WalkError> {
        if let Some(limit) = self.walker.options.max_depth
            && self.level > limit
        {
            return Err(WalkError::DepthLimit {
                limit,
                path: ctx.to_string(),
            });
        }

        self.level += 1;
        let node = f(self);
        self.level -= 1;
        node
    }

    fn object(&mut self, object: ObjectRef<'_>, ctx: &PathContext<'r>) -> Result<Node, WalkError> {
        let options = self.walker.options;

        if options.detect_cycles {
            let identity = object.identity();
            if self.ancestors.contains(&identity) {
                return Err(WalkError::Cycle {
                    path: ctx.to_string(),
                    type_path: object.info().type_path(),
                });
            }
            self.ancestors.push(identity);
        }

        let resolution = self.walker.resolver.resolve(object.info(), ctx, self.rules);
        let mut fields = NodeMap::with_capacity(resolution.fields().len());

        for field in resolution.fields() {
            let child = ctx.descend(field.name(), resolution.scope());
            let value = field.read(object).map_err(|source| WalkError::Access {
                path: child.to_string(),
                source,
            })?;
            // Catalog names are unique after shadowing.
            fields.push_unique(field.name(), self.node(value, &child)?);
        }

        if options.detect_cycles {
            self.ancestors.pop();
        }

        Ok(Node::Mapping(fields))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use std::sync::OnceLock;

    use super::{WalkOptions, Walker};
    use crate::catalog::FieldCatalog;
    use crate::impls::NonGenericTypeInfoCell;
    use crate::info::{NamedField, TypeInfo, Typed};
    use crate::rules::RuleSet;
    use crate::{Node, ObjectRef, View, ViewRef, WalkError};

    // A singly linked node whose successor is set after construction.
    struct Link {
        name: String,
        next: Next,
    }

    struct Next(OnceLock<Arc<Link>>);

    impl View for Next {
        fn view_ref(&self) -> ViewRef<'_> {
            match self.0.get() {
                Some(link) => link.view_ref(),
                None => ViewRef::Null,
            }
        }
    }

    impl Typed for Link {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>().with_fields([
                    NamedField::new::<Self, _>("name", |v| &v.name),
                    NamedField::new::<Self, _>("next", |v| &v.next),
                ])
            })
        }
    }

    impl View for Link {
        fn view_ref(&self) -> ViewRef<'_> {
            ViewRef::Object(ObjectRef::new(Self::type_info(), self))
        }
    }

    fn link(name: &str) -> Arc<Link> {
        Arc::new(Link {
            name: String::from(name),
            next: Next(OnceLock::new()),
        })
    }

    #[test]
    fn chain_without_cycle() {
        let a = link("a");
        let b = link("b");
        let _ = a.next.0.set(Arc::clone(&b));

        let catalog = FieldCatalog::new();
        let tree = Walker::with_catalog(&catalog)
            .walk(&*a, &RuleSet::empty())
            .unwrap();

        let b = tree.get("next").unwrap();
        assert_eq!(b.get("name").and_then(Node::as_str), Some("b"));
        assert!(b.get("next").unwrap().is_null());
    }

    #[test]
    fn cycle_is_reported() {
        let a = link("a");
        let b = link("b");
        let _ = a.next.0.set(Arc::clone(&b));
        let _ = b.next.0.set(Arc::clone(&a));

        let err = Walker::new().walk(&*a, &RuleSet::empty()).unwrap_err();
        assert_eq!(
            err,
            WalkError::Cycle {
                path: String::from("next.next"),
                type_path: core::any::type_name::<Link>(),
            }
        );
    }

    #[test]
    fn depth_limit() {
        let a = link("a");
        let b = link("b");
        let c = link("c");
        let _ = b.next.0.set(Arc::clone(&c));
        let _ = a.next.0.set(Arc::clone(&b));

        let walker = Walker::new().with_options(WalkOptions {
            max_depth: Some(1),
            ..WalkOptions::default()
        });
        let err = walker.walk(&*a, &RuleSet::empty()).unwrap_err();
        assert!(matches!(err, WalkError::DepthLimit { limit: 1, ref path } if path == "next.next"));

        let walker = walker.with_options(WalkOptions {
            max_depth: Some(2),
            ..WalkOptions::default()
        });
        assert!(walker.walk(&*a, &RuleSet::empty()).is_ok());
    }

    #[test]
    fn depth_limit_counts_nested_collections() {
        use alloc::boxed::Box;
        use alloc::vec;
        use alloc::vec::Vec;

        let mut value: Box<dyn View> = Box::new(1_u8);
        for _ in 0..4 {
            value = Box::new(vec![value]);
        }
        let nested: Vec<Box<dyn View>> = vec![value];

        let limited = Walker::new().with_options(WalkOptions {
            max_depth: Some(3),
            ..WalkOptions::default()
        });
        let err = limited.walk(&nested, &RuleSet::empty()).unwrap_err();
        assert!(matches!(err, WalkError::DepthLimit { limit: 3, ref path } if path == "<root>"));

        let relaxed = limited.with_options(WalkOptions {
            max_depth: Some(4),
            ..WalkOptions::default()
        });
        assert!(relaxed.walk(&nested, &RuleSet::empty()).is_ok());
    }

    #[test]
    fn same_address_different_type_is_not_a_cycle() {
        struct Outer {
            inner: Inner,
        }

        struct Inner {
            value: u8,
        }

        impl Typed for Outer {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::new::<Self>()
                        .with_fields([NamedField::new::<Self, _>("inner", |v| &v.inner)])
                })
            }
        }

        impl View for Outer {
            fn view_ref(&self) -> ViewRef<'_> {
                ViewRef::Object(ObjectRef::new(Self::type_info(), self))
            }
        }

        impl Typed for Inner {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::new::<Self>()
                        .with_fields([NamedField::new::<Self, _>("value", |v| &v.value)])
                })
            }
        }

        impl View for Inner {
            fn view_ref(&self) -> ViewRef<'_> {
                ViewRef::Object(ObjectRef::new(Self::type_info(), self))
            }
        }

        let outer = Outer {
            inner: Inner { value: 3 },
        };
        let tree = Walker::new().walk(&outer, &RuleSet::empty()).unwrap();
        let value = tree.get("inner").and_then(|n| n.get("value"));
        assert_eq!(value.and_then(Node::as_u64), Some(3));
    }

    #[test]
    fn large_mapping_keeps_every_entry() {
        use std::collections::HashMap;

        let map: HashMap<String, u32> = (0..50_000_u32).map(|i| (i.to_string(), i)).collect();

        let tree = Walker::new().walk(&map, &RuleSet::empty()).unwrap();
        let entries = tree.as_mapping().unwrap();

        assert_eq!(entries.len(), map.len());
        for key in ["0", "12345", "49999"] {
            let expected = key.parse::<u64>().unwrap();
            assert_eq!(entries.get(key).and_then(Node::as_u64), Some(expected));
        }
    }
}
