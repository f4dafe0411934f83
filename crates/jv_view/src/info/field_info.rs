use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::{AccessError, View};

type Getter = dyn for<'a> Fn(&'a dyn Any) -> Result<&'a dyn View, AccessError> + Send + Sync;

// Pins the higher-ranked signature, closure inference alone does not.
#[inline(always)]
fn getter<F>(f: F) -> F
where
    F: for<'a> Fn(&'a dyn Any) -> Result<&'a dyn View, AccessError> + Send + Sync,
{
    f
}

// -----------------------------------------------------------------------------
// NamedField

/// A field declared directly on one type.
///
/// The getter receives the declaring type's value as `&dyn Any`; a value of
/// any other type yields [`AccessError::TypeMismatch`].
///
/// # Examples
///
/// ```
/// use jv_view::info::NamedField;
///
/// struct Account {
///     id: u64,
///     secret: String,
/// }
///
/// let id = NamedField::new::<Account, _>("id", |a| &a.id);
/// let secret = NamedField::new::<Account, _>("secret", |a| &a.secret).ignored();
///
/// let account = Account { id: 7, secret: String::new() };
/// let value = id.read(&account).unwrap();
///
/// assert_eq!(value.downcast_ref::<u64>(), Some(&7));
/// assert!(!id.is_ignored());
/// assert!(secret.is_ignored());
/// ```
#[derive(Clone)]
pub struct NamedField {
    name: &'static str,
    ignored: bool,
    getter: Arc<Getter>,
}

impl NamedField {
    /// Creates a field of owner `T` read through `get`.
    pub fn new<T: Any, F: View>(name: &'static str, get: fn(&T) -> &F) -> Self {
        let getter = getter(move |value: &dyn Any| match value.downcast_ref::<T>() {
            Some(owner) => Ok(get(owner) as &dyn View),
            None => Err(AccessError::TypeMismatch {
                field: name,
                expected: core::any::type_name::<T>(),
            }),
        });

        Self {
            name,
            ignored: false,
            getter: Arc::new(getter),
        }
    }

    /// Creates a field of owner `T` whose getter may fail.
    ///
    /// The error aborts the projection call that reads the field.
    pub fn fallible<T: Any>(
        name: &'static str,
        get: fn(&T) -> Result<&dyn View, AccessError>,
    ) -> Self {
        let getter = getter(move |value: &dyn Any| match value.downcast_ref::<T>() {
            Some(owner) => get(owner),
            None => Err(AccessError::TypeMismatch {
                field: name,
                expected: core::any::type_name::<T>(),
            }),
        });

        Self {
            name,
            ignored: false,
            getter: Arc::new(getter),
        }
    }

    /// Marks the field as statically ignored.
    #[inline]
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the field is hidden unless explicitly included.
    #[inline]
    pub const fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Reads the field from its declaring type's value.
    #[inline]
    pub fn read<'a>(&self, owner: &'a dyn Any) -> Result<&'a dyn View, AccessError> {
        (self.getter)(owner)
    }
}

impl fmt::Debug for NamedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedField")
            .field("name", &self.name)
            .field("ignored", &self.ignored)
            .finish_non_exhaustive()
    }
}
