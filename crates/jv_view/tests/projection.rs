//! End-to-end projection of object graphs into JSON.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use jv_view::catalog::{AnnotationSource, FieldCatalog};
use jv_view::info::{NamedField, TypeInfo};
use jv_view::rules::{Match, RuleSet};
use jv_view::walk::{Walker, emit};
use jv_view::{Node, View};
use serde_json::{Value, json};

#[derive(View, Default)]
struct TestSubobject {
    val: String,
    sub: Option<Box<TestSubobject>>,
}

impl TestSubobject {
    fn new(val: &str) -> Self {
        Self {
            val: val.into(),
            sub: None,
        }
    }

    fn with_sub(val: &str, sub: TestSubobject) -> Self {
        Self {
            val: val.into(),
            sub: Some(Box::new(sub)),
        }
    }
}

#[derive(View, Default)]
#[view(ignore_properties("ignore_indirect"))]
struct TestObject {
    int1: i32,
    str2: Option<String>,
    #[view(ignore)]
    ignored_direct: Option<String>,
    ignore_indirect: Option<String>,
    array: Vec<String>,
    list: Vec<String>,
    sub: Option<TestSubobject>,
}

#[derive(View, Default)]
struct TestChildObject {
    #[view(parent)]
    base: TestObject,
    child_field: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_json(node: &Node) -> Value {
    serde_json::to_value(node).unwrap()
}

fn test_object_rules() -> RuleSet {
    RuleSet::builder()
        .on::<TestObject>(
            Match::new()
                .exclude("str2")
                .exclude("sub.val")
                .include("ignored_direct"),
        )
        .build()
}

#[test]
fn field_level_ignore_hides_field() {
    let value = TestObject {
        int1: 1,
        ignored_direct: Some("ignore me".into()),
        ..Default::default()
    };

    let tree = to_json(&emit(&value, &RuleSet::empty()).unwrap());

    assert_eq!(
        tree,
        json!({ "int1": 1, "str2": null, "array": [], "list": [], "sub": null })
    );
}

#[test]
fn class_level_ignore_hides_field() {
    let value = TestObject {
        int1: 1,
        ignore_indirect: Some("ignore me".into()),
        ..Default::default()
    };

    let tree = to_json(&emit(&value, &RuleSet::empty()).unwrap());

    assert_eq!(tree["int1"], 1);
    assert!(tree.get("ignore_indirect").is_none());
}

#[test]
fn basic_rules() {
    let value = TestObject {
        int1: 1,
        str2: Some("asdf".into()),
        ignored_direct: Some("shown".into()),
        array: strings(&["apple", "banana"]),
        list: strings(&["red", "blue", "green"]),
        sub: Some(TestSubobject::with_sub(
            "qwerqwerqwerqw",
            TestSubobject::new("poxcpvoxcv"),
        )),
        ..Default::default()
    };

    let tree = to_json(&emit(&value, &test_object_rules()).unwrap());

    assert_eq!(
        tree,
        json!({
            "int1": 1,
            "ignored_direct": "shown",
            "array": ["apple", "banana"],
            "list": ["red", "blue", "green"],
            "sub": {
                "sub": { "val": "poxcpvoxcv", "sub": null }
            }
        })
    );
}

#[test]
fn subtype_follows_ancestor_rules() {
    let value = TestChildObject {
        base: TestObject {
            ignored_direct: Some("ignore me".into()),
            ignore_indirect: Some("ignore me too".into()),
            array: strings(&["pizza", "french fry"]),
            ..Default::default()
        },
        child_field: "green".into(),
    };

    let tree = emit(&value, &test_object_rules()).unwrap();
    let keys: Vec<_> = tree.as_mapping().unwrap().keys().collect();

    assert_eq!(
        keys,
        ["int1", "ignored_direct", "array", "list", "sub", "child_field"]
    );
    assert_eq!(tree.get("ignored_direct").and_then(Node::as_str), Some("ignore me"));
    assert_eq!(tree.get("child_field").and_then(Node::as_str), Some("green"));
    assert!(tree.get("ignore_indirect").is_none());
}

#[test]
fn sequences_apply_rules_per_element() {
    let first = TestObject {
        int1: 1,
        str2: Some("asdf".into()),
        array: strings(&["apple", "banana"]),
        list: strings(&["red", "blue", "green"]),
        sub: Some(TestSubobject::with_sub(
            "qwerqwerqwerqw",
            TestSubobject::new("poxcpvoxcv"),
        )),
        ..Default::default()
    };
    let second = TestObject {
        int1: 2,
        str2: Some("asdf".into()),
        array: strings(&["orange", "kiwi"]),
        list: strings(&["cyan", "indigo", "violet"]),
        sub: Some(TestSubobject::with_sub(
            "zxcvxzcv",
            TestSubobject::new("hjhljkljh"),
        )),
        ..Default::default()
    };
    let values = vec![first, second];

    let tree = emit(&values, &test_object_rules()).unwrap();
    let items = tree.as_sequence().unwrap();

    assert_eq!(items.len(), values.len());
    for (item, value) in items.iter().zip(&values) {
        assert_eq!(item.get("int1").and_then(Node::as_i64), Some(i64::from(value.int1)));
        assert!(item.get("str2").is_none());
        assert!(item.get("sub").unwrap().get("val").is_none());

        let array: Vec<_> = item
            .get("array")
            .and_then(Node::as_sequence)
            .unwrap()
            .iter()
            .map(|n| n.as_str().unwrap())
            .collect();
        assert_eq!(array, value.array);

        let list: Vec<_> = item
            .get("list")
            .and_then(Node::as_sequence)
            .unwrap()
            .iter()
            .map(|n| n.as_str().unwrap())
            .collect();
        assert_eq!(list, value.list);
    }
}

#[test]
fn heterogeneous_sequence() {
    let values: Vec<Box<dyn View>> = vec![
        Box::new(TestObject {
            int1: 1,
            ..Default::default()
        }),
        Box::new(TestChildObject {
            child_field: "leaf".into(),
            ..Default::default()
        }),
        Box::new(7_u8),
    ];

    let rules = RuleSet::builder()
        .on::<TestObject>(Match::new().exclude("array").exclude("list").exclude("sub"))
        .build();

    let tree = to_json(&emit(&values, &rules).unwrap());

    assert_eq!(
        tree,
        json!([
            { "int1": 1, "str2": null },
            { "int1": 0, "str2": null, "child_field": "leaf" },
            7
        ])
    );
}

#[test]
fn mapping_values_share_the_map_path() {
    #[derive(View)]
    struct Registry {
        entries: BTreeMap<String, TestSubobject>,
    }

    let mut entries = BTreeMap::new();
    entries.insert("b".to_string(), TestSubobject::new("second"));
    entries.insert("a".to_string(), TestSubobject::new("first"));
    let registry = Registry { entries };

    let rules = RuleSet::builder()
        .on::<Registry>(Match::new().exclude("entries.val"))
        .build();

    let tree = to_json(&emit(&registry, &rules).unwrap());

    assert_eq!(
        tree,
        json!({ "entries": { "a": { "sub": null }, "b": { "sub": null } } })
    );
}

#[test]
fn type_without_fields_is_an_empty_object() {
    #[derive(View)]
    struct Marker;

    #[derive(View)]
    struct OnlyHidden {
        #[view(ignore)]
        secret: u32,
    }

    assert_eq!(to_json(&emit(&Marker, &RuleSet::empty()).unwrap()), json!({}));
    assert_eq!(
        to_json(&emit(&OnlyHidden { secret: 1 }, &RuleSet::empty()).unwrap()),
        json!({})
    );
}

#[test]
fn descendant_field_shadows_ancestor_field() {
    #[derive(View)]
    struct Base {
        id: u32,
        label: u32,
    }

    #[derive(View)]
    struct Derived {
        #[view(parent)]
        base: Base,
        label: String,
    }

    let value = Derived {
        base: Base { id: 1, label: 2 },
        label: "two".into(),
    };

    let tree = to_json(&emit(&value, &RuleSet::empty()).unwrap());
    assert_eq!(tree, json!({ "id": 1, "label": "two" }));
}

#[test]
fn generic_skip_and_raw_identifiers() {
    #[derive(View)]
    struct Page<T> {
        items: Vec<T>,
        r#type: &'static str,
        #[view(skip)]
        marker: PhantomData<T>,
    }

    let page = Page {
        items: vec![1_u16, 2, 3],
        r#type: "numbers",
        marker: PhantomData,
    };

    let rules = RuleSet::builder()
        .on::<Page<u16>>(Match::new().exclude("type"))
        .build();

    let tree = to_json(&emit(&page, &rules).unwrap());
    assert_eq!(tree, json!({ "items": [1, 2, 3] }));
}

#[test]
fn private_catalog_with_custom_annotations() {
    struct HideStrings;

    impl AnnotationSource for HideStrings {
        fn is_statically_excluded(
            &self,
            _ty: &'static TypeInfo,
            _declaring: &'static TypeInfo,
            field: &NamedField,
        ) -> bool {
            field.name().starts_with("str")
        }
    }

    let value = TestSubobject::new("kept");
    let holder = TestObject {
        str2: Some("hidden".into()),
        ignored_direct: Some("shown".into()),
        sub: Some(value),
        ..Default::default()
    };

    let catalog = FieldCatalog::with_source(HideStrings);
    let tree = Walker::with_catalog(&catalog)
        .walk(&holder, &RuleSet::empty())
        .unwrap();

    assert!(tree.get("str2").is_none());
    // The custom source replaces the declared annotations entirely.
    assert!(tree.get("ignored_direct").is_some());
    assert!(tree.get("ignore_indirect").is_some());
}

#[test]
fn projection_is_idempotent() {
    let value = TestChildObject {
        base: TestObject {
            str2: Some("asdf".into()),
            sub: Some(TestSubobject::new("x")),
            ..Default::default()
        },
        child_field: "c".into(),
    };
    let rules = test_object_rules();

    let first = emit(&value, &rules).unwrap();
    let second = emit(&value, &rules).unwrap();
    assert_eq!(first, second);
}
