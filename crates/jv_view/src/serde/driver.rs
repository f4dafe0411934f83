use serde_core::ser::Error;
use serde_core::{Serialize, Serializer};

use crate::View;
use crate::rules::RuleSet;
use crate::walk::Walker;

// -----------------------------------------------------------------------------
// SerializeDriver

/// Serializes a value projected under a [`RuleSet`].
///
/// # Examples
///
/// ```
/// use jv_view::View;
/// use jv_view::rules::{Match, RuleSet};
/// use jv_view::serde::SerializeDriver;
///
/// #[derive(View)]
/// struct MyStruct {
///     value: i32,
///     note: String,
/// }
///
/// let input = MyStruct { value: 123, note: "draft".into() };
/// let rules = RuleSet::builder()
///     .on::<MyStruct>(Match::new().exclude("note"))
///     .build();
///
/// let driver = SerializeDriver::new(&input, &rules);
///
/// assert_eq!(ron::to_string(&driver).unwrap(), r#"{"value":123}"#);
/// assert_eq!(serde_json::to_string(&driver).unwrap(), r#"{"value":123}"#);
/// ```
pub struct SerializeDriver<'a> {
    value: &'a dyn View,
    rules: &'a RuleSet,
    walker: Walker<'a>,
}

impl<'a> SerializeDriver<'a> {
    /// Creates a driver using the default [`Walker`].
    #[inline]
    pub fn new(value: &'a dyn View, rules: &'a RuleSet) -> Self {
        Self::with_walker(value, rules, Walker::new())
    }

    /// Creates a driver using a configured [`Walker`].
    #[inline]
    pub const fn with_walker(value: &'a dyn View, rules: &'a RuleSet, walker: Walker<'a>) -> Self {
        Self {
            value,
            rules,
            walker,
        }
    }
}

impl Serialize for SerializeDriver<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.walker.walk(self.value, self.rules) {
            Ok(node) => node.serialize(serializer),
            Err(err) => Err(S::Error::custom(err)),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
