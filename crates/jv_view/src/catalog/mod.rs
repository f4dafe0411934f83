//! Per-type field listings, inherited fields included.
//!
//! A [`FieldCatalog`] flattens a type and its ancestors into one ordered
//! list of [`CatalogField`]s and caches it by [`TypeId`](core::any::TypeId).
//!
//! Ordering: ancestor fields come first, starting at the root-most ancestor,
//! each type contributing its fields in declaration order. A field declared
//! again by a descendant replaces the ancestor's entry and takes the
//! position of the descendant's declaration.
//!
//! ```
//! use jv_view::View;
//! use jv_view::catalog::FieldCatalog;
//! use jv_view::info::Typed;
//!
//! #[derive(View)]
//! #[view(ignore_properties("ignore_indirect"))]
//! struct Base {
//!     int1: i32,
//!     ignore_indirect: String,
//! }
//!
//! #[derive(View)]
//! struct Child {
//!     #[view(parent)]
//!     base: Base,
//!     child_field: String,
//! }
//!
//! let fields = FieldCatalog::shared().fields_for(Child::type_info());
//! let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
//!
//! assert_eq!(names, ["int1", "ignore_indirect", "child_field"]);
//! assert!(fields[1].is_statically_excluded());
//! assert!(fields[1].declaring().type_is::<Base>());
//! ```

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use jv_utils::TypeIdMap;

use crate::info::{NamedField, TypeInfo};
use crate::{AccessError, ObjectRef, View};

// -----------------------------------------------------------------------------
// Modules

mod annotations;

// -----------------------------------------------------------------------------
// Exports

pub use annotations::{AnnotationSource, DeclaredAnnotations};

// -----------------------------------------------------------------------------
// CatalogField

/// One serializable field of a type, as seen from that type.
#[derive(Clone, Copy)]
pub struct CatalogField {
    field: &'static NamedField,
    declaring: &'static TypeInfo,
    hops: usize,
    statically_excluded: bool,
}

impl CatalogField {
    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.field.name()
    }

    /// Returns the type that declares the field.
    #[inline]
    pub const fn declaring(&self) -> &'static TypeInfo {
        self.declaring
    }

    /// Returns the underlying descriptor.
    #[inline]
    pub const fn descriptor(&self) -> &'static NamedField {
        self.field
    }

    /// Returns `true` if static metadata hides the field by default.
    #[inline]
    pub const fn is_statically_excluded(&self) -> bool {
        self.statically_excluded
    }

    /// Reads the field from `object`, upcasting to the declaring type first.
    ///
    /// `object` must be of the type this field was cataloged for.
    pub fn read<'a>(&self, object: ObjectRef<'a>) -> Result<&'a dyn View, AccessError> {
        let mut info = object.info();
        let mut value = object.value();

        for _ in 0..self.hops {
            let broken = || AccessError::BrokenLineage {
                type_path: info.type_path(),
                parent: self.declaring.type_path(),
            };
            let parent = info.parent().ok_or_else(broken)?;
            value = parent.upcast(value).ok_or_else(broken)?;
            info = parent.type_info();
        }

        self.field.read(value)
    }
}

impl fmt::Debug for CatalogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogField")
            .field("name", &self.name())
            .field("declaring", &self.declaring.type_path())
            .field("statically_excluded", &self.statically_excluded)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// FieldCatalog

/// Builds and caches the field listing of each type.
///
/// Entries are computed on first request. Two threads racing on the same
/// type both compute it and the first stored entry is kept; the results
/// are identical, so the race is harmless.
pub struct FieldCatalog {
    source: Box<dyn AnnotationSource>,
    cache: RwLock<TypeIdMap<Arc<[CatalogField]>>>,
}

impl Default for FieldCatalog {
    /// See [`FieldCatalog::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl FieldCatalog {
    /// Creates an empty catalog over [`DeclaredAnnotations`].
    #[inline]
    pub fn new() -> Self {
        Self::with_source(DeclaredAnnotations)
    }

    /// Creates an empty catalog over a custom annotation source.
    pub fn with_source(source: impl AnnotationSource) -> Self {
        Self {
            source: Box::new(source),
            cache: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the process-wide catalog over [`DeclaredAnnotations`].
    pub fn shared() -> &'static FieldCatalog {
        static SHARED: OnceLock<FieldCatalog> = OnceLock::new();
        SHARED.get_or_init(FieldCatalog::new)
    }

    /// Returns the ordered fields of `ty`, inherited fields included.
    pub fn fields_for(&self, ty: &'static TypeInfo) -> Arc<[CatalogField]> {
        let type_id = ty.type_id();

        if let Some(fields) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return Arc::clone(fields);
        }

        let built: Arc<[CatalogField]> = self.collect(ty).into();
        log::debug!(
            "cataloged {} field(s) for `{}`",
            built.len(),
            ty.type_path()
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.get_or_insert(type_id, || built))
    }

    /// Returns the number of cached types.
    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been cataloged yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect(&self, ty: &'static TypeInfo) -> Vec<CatalogField> {
        // (declaring, hops), root-most first
        let lineage: Vec<_> = ty.lineage().enumerate().collect();
        let mut fields: Vec<CatalogField> = Vec::new();

        for &(hops, declaring) in lineage.iter().rev() {
            for field in declaring.fields() {
                fields.retain(|f| f.name() != field.name());
                fields.push(CatalogField {
                    field,
                    declaring,
                    hops,
                    statically_excluded: self.source.is_statically_excluded(ty, declaring, field),
                });
            }
        }

        fields
    }
}

impl fmt::Debug for FieldCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCatalog")
            .field("cached_types", &self.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
