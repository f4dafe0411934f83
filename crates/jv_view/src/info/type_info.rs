use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{NamedField, Typed};

type Upcast = dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync;

#[inline(always)]
fn upcast<F>(f: F) -> F
where
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync,
{
    f
}

// -----------------------------------------------------------------------------
// ParentInfo

/// The link from a type to its parent type.
///
/// Rust has no inheritance, so a "subclass" embeds its parent as a field and
/// the link records how to reach it. Fields declared on the parent (and on
/// its own ancestors) are inherited by the child.
#[derive(Clone)]
pub struct ParentInfo {
    type_info: fn() -> &'static TypeInfo,
    upcast: Arc<Upcast>,
}

impl ParentInfo {
    /// Creates a link from `T` to its embedded parent `P`.
    pub fn new<T: Any, P: Typed>(get: fn(&T) -> &P) -> Self {
        let upcast = upcast(move |value: &dyn Any| {
            value.downcast_ref::<T>().map(|child| get(child) as &dyn Any)
        });

        Self {
            type_info: P::type_info,
            upcast: Arc::new(upcast),
        }
    }

    /// Returns the parent's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the embedded parent value of `child`.
    ///
    /// Returns `None` if `child` is not of the type this link belongs to.
    #[inline]
    pub fn upcast<'a>(&self, child: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.upcast)(child)
    }
}

impl fmt::Debug for ParentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParentInfo")
            .field(&self.type_info().type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static description of one concrete type.
///
/// Holds only what is declared on the type itself. Inherited fields are
/// collected by the [`FieldCatalog`](crate::catalog::FieldCatalog).
///
/// # Examples
///
/// ```
/// use jv_view::View;
/// use jv_view::info::Typed;
///
/// #[derive(View)]
/// #[view(ignore_properties("ignore_indirect"))]
/// struct Base {
///     int1: i32,
///     ignore_indirect: String,
/// }
///
/// #[derive(View)]
/// struct Child {
///     #[view(parent)]
///     base: Base,
///     child_field: String,
/// }
///
/// let info = Child::type_info();
///
/// assert_eq!(info.type_ident(), "Child");
/// assert_eq!(info.fields().len(), 1);
/// assert!(info.parent().unwrap().type_info().type_is::<Base>());
/// assert_eq!(info.lineage().count(), 2);
/// ```
pub struct TypeInfo {
    type_id: TypeId,
    type_path: &'static str,
    type_ident: &'static str,
    parent: Option<ParentInfo>,
    fields: Box<[NamedField]>,
    ignore_properties: Box<[&'static str]>,
}

impl TypeInfo {
    /// Creates an empty descriptor for `T`.
    pub fn new<T: Any>() -> Self {
        let type_path = core::any::type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_ident: short_ident(type_path),
            parent: None,
            fields: Box::new([]),
            ignore_properties: Box::new([]),
        }
    }

    /// Sets the fields declared directly on this type, in declaration order.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = NamedField>) -> Self {
        self.fields = fields.into_iter().collect();

        crate::cfg::debug! {
            for (index, field) in self.fields.iter().enumerate() {
                assert!(
                    self.fields[..index].iter().all(|f| f.name() != field.name()),
                    "`{}` declares field `{}` twice",
                    self.type_path,
                    field.name(),
                );
            }
        }

        self
    }

    /// Sets the parent link.
    #[inline]
    pub fn with_parent(mut self, parent: ParentInfo) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the class-level ignore list.
    ///
    /// Names listed here are statically excluded on this type and on every
    /// type inheriting from it, wherever the field is declared.
    pub fn with_ignore_properties(mut self, names: impl IntoIterator<Item = &'static str>) -> Self {
        self.ignore_properties = names.into_iter().collect();
        self
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the described type is `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the full type path, e.g. `my_crate::model::Account`.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the type name without module path or generics, e.g. `Account`.
    #[inline]
    pub const fn type_ident(&self) -> &'static str {
        self.type_ident
    }

    /// Returns the parent link, if any.
    #[inline]
    pub fn parent(&self) -> Option<&ParentInfo> {
        self.parent.as_ref()
    }

    /// Returns the fields declared directly on this type.
    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    /// Returns the directly declared field named `name`.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the class-level ignore list declared on this type.
    #[inline]
    pub fn ignore_properties(&self) -> &[&'static str] {
        &self.ignore_properties
    }

    /// Iterates this type, then its parent, then the parent's parent, ...
    #[inline]
    pub fn lineage(&'static self) -> Lineage {
        Lineage { next: Some(self) }
    }

    /// Returns `true` if this type is `type_id` or inherits from it.
    pub fn inherits(&'static self, type_id: TypeId) -> bool {
        self.lineage().any(|info| info.type_id == type_id)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path)
            .field("parent", &self.parent)
            .field("fields", &self.fields)
            .field("ignore_properties", &self.ignore_properties)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Lineage

/// Iterator over a type and its ancestors, nearest first.
#[derive(Clone, Debug)]
pub struct Lineage {
    next: Option<&'static TypeInfo>,
}

impl Iterator for Lineage {
    type Item = &'static TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent().map(ParentInfo::type_info);
        Some(current)
    }
}

// `a::b::Foo<c::Bar>` -> `Foo`
fn short_ident(type_path: &'static str) -> &'static str {
    let end = type_path.find('<').unwrap_or(type_path.len());
    let path = &type_path[..end];
    match path.rfind("::") {
        Some(index) => &path[index + 2..],
        None => path,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::{ParentInfo, TypeInfo, short_ident};
    use crate::impls::NonGenericTypeInfoCell;
    use crate::info::{NamedField, Typed};

    struct Base {
        id: u32,
    }

    struct Derived {
        base: Base,
        label: char,
    }

    impl Typed for Base {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>().with_fields([NamedField::new::<Self, _>("id", |v| &v.id)])
            })
        }
    }

    impl Typed for Derived {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>()
                    .with_parent(ParentInfo::new::<Self, Base>(|v| &v.base))
                    .with_fields([NamedField::new::<Self, _>("label", |v| &v.label)])
            })
        }
    }

    #[test]
    fn direct_field_lookup() {
        let info = Derived::type_info();
        assert_eq!(info.field("label").map(NamedField::name), Some("label"));
        // Inherited fields are not declared here.
        assert!(info.field("id").is_none());
        assert!(Base::type_info().field("id").is_some());
    }

    #[test]
    fn inheritance() {
        assert!(Derived::type_info().inherits(TypeId::of::<Derived>()));
        assert!(Derived::type_info().inherits(TypeId::of::<Base>()));
        assert!(!Base::type_info().inherits(TypeId::of::<Derived>()));
        assert!(!Base::type_info().inherits(TypeId::of::<u8>()));
    }

    #[test]
    fn ident_of_type_path() {
        assert_eq!(short_ident("jv_view::tests::Account"), "Account");
        assert_eq!(short_ident("a::Wrapper<b::Inner<u8>>"), "Wrapper");
        assert_eq!(short_ident("u8"), "u8");
    }
}
