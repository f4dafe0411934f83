use crate::info::{NamedField, TypeInfo};

// -----------------------------------------------------------------------------
// AnnotationSource

/// Static visibility metadata consulted by a [`FieldCatalog`].
///
/// Queried once per field when a catalog entry is built; the answer is
/// cached together with the entry.
///
/// [`FieldCatalog`]: super::FieldCatalog
pub trait AnnotationSource: Send + Sync + 'static {
    /// Returns `true` if `field`, declared on `declaring`, must be hidden
    /// when `ty` is projected unless a rule includes it again.
    ///
    /// `declaring` is `ty` itself or one of its ancestors.
    fn is_statically_excluded(
        &self,
        ty: &'static TypeInfo,
        declaring: &'static TypeInfo,
        field: &NamedField,
    ) -> bool;
}

// -----------------------------------------------------------------------------
// DeclaredAnnotations

/// The annotations declared on the descriptors themselves.
///
/// A field is excluded when it is marked ignored, or when `ty` or any of
/// its ancestors lists its name in
/// [`ignore_properties`](TypeInfo::ignore_properties).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredAnnotations;

impl AnnotationSource for DeclaredAnnotations {
    fn is_statically_excluded(
        &self,
        ty: &'static TypeInfo,
        _declaring: &'static TypeInfo,
        field: &NamedField,
    ) -> bool {
        field.is_ignored()
            || ty
                .lineage()
                .any(|info| info.ignore_properties().contains(&field.name()))
    }
}
