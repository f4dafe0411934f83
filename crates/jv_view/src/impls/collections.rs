use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::collections::{HashMap, HashSet};

use jv_utils::hash::hashbrown;

use crate::{MapKey, Mapping, Sequence, View, ViewRef};

#[inline(always)]
fn as_view<T: View>(value: &T) -> &dyn View {
    value
}

// -----------------------------------------------------------------------------
// Option

impl<T: View> View for Option<T> {
    #[inline]
    fn view_ref(&self) -> ViewRef<'_> {
        match self {
            Some(value) => value.view_ref(),
            None => ViewRef::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Pointers

macro_rules! impl_pointer_view {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: View + ?Sized> View for $ptr<T> {
                #[inline]
                fn view_ref(&self) -> ViewRef<'_> {
                    (**self).view_ref()
                }

                #[inline]
                fn view_type_path(&self) -> &'static str {
                    (**self).view_type_path()
                }
            }
        )*
    };
}

impl_pointer_view!(Box, Arc, Rc);

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence_view {
    ($({ $($generics:tt)* } $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Sequence for $ty {
                #[inline]
                fn len(&self) -> usize {
                    self.iter().len()
                }

                fn elements(&self) -> Box<dyn Iterator<Item = &dyn View> + '_> {
                    Box::new(self.iter().map(as_view::<T>))
                }
            }

            impl<$($generics)*> View for $ty {
                #[inline]
                fn view_ref(&self) -> ViewRef<'_> {
                    ViewRef::Sequence(self)
                }
            }
        )*
    };
}

impl_sequence_view!(
    { T: View, const N: usize } [T; N],
    { T: View } Vec<T>,
    { T: View } VecDeque<T>,
    { T: View } BTreeSet<T>,
    { T: View, S: 'static } HashSet<T, S>,
    { T: View, S: 'static } hashbrown::HashSet<T, S>,
);

// -----------------------------------------------------------------------------
// Mappings

macro_rules! impl_mapping_view {
    ($({ $($generics:tt)* } $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Mapping for $ty {
                #[inline]
                fn len(&self) -> usize {
                    self.iter().len()
                }

                fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn View)> + '_> {
                    Box::new(self.iter().map(|(key, value)| (key.map_key(), as_view::<V>(value))))
                }
            }

            impl<$($generics)*> View for $ty {
                #[inline]
                fn view_ref(&self) -> ViewRef<'_> {
                    ViewRef::Mapping(self)
                }
            }
        )*
    };
}

impl_mapping_view!(
    { K: MapKey + 'static, V: View } BTreeMap<K, V>,
    { K: MapKey + 'static, V: View, S: 'static } HashMap<K, V, S>,
    { K: MapKey + 'static, V: View, S: 'static } hashbrown::HashMap<K, V, S>,
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::{Scalar, View, ViewRef};

    #[test]
    fn option_and_pointers_are_transparent() {
        let none: Option<u8> = None;
        assert!(matches!(none.view_ref(), ViewRef::Null));

        let boxed: Box<dyn View> = Box::new(Some(3_u8));
        assert!(matches!(boxed.view_ref(), ViewRef::Scalar(Scalar::U64(3))));
        assert_eq!(boxed.view_type_path(), core::any::type_name::<Option<u8>>());
    }

    #[test]
    fn sequences_keep_order() {
        let list = vec![String::from("red"), String::from("blue"), String::from("green")];
        let ViewRef::Sequence(seq) = list.view_ref() else {
            panic!("expected a sequence");
        };

        assert_eq!(seq.len(), 3);
        let names: Vec<_> = seq
            .elements()
            .map(|e| match e.view_ref() {
                ViewRef::Scalar(Scalar::Str(s)) => s,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, ["red", "blue", "green"]);
    }

    #[test]
    fn mappings_expose_string_keys() {
        let mut map = BTreeMap::new();
        map.insert(2_u32, "two");
        map.insert(1_u32, "one");

        let ViewRef::Mapping(mapping) = map.view_ref() else {
            panic!("expected a mapping");
        };

        let keys: Vec<_> = mapping.entries().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(keys, ["1", "2"]);
    }
}
