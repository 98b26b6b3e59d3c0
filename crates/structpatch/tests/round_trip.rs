mod common;

use std::collections::{BTreeMap, BTreeSet};

use common::replay;
use common::tracker::diff;
use proptest::prelude::*;
use serde_json::json;
use structpatch::patch::{from_json_patch, to_json_patch};
use structpatch::{apply_patches, deep_clone, PatchOp, PathStep, Value};

fn count(patches: &[structpatch::Patch], op: PatchOp) -> usize {
    patches.iter().filter(|p| p.op == op).count()
}

proptest! {
    #[test]
    fn arrays_round_trip(
        base in prop::collection::vec(0i64..6, 0..10),
        copy in prop::collection::vec(0i64..6, 0..10),
    ) {
        let base = Value::array(base);
        let copy = Value::array(copy);
        let (patches, inverse) = diff(&base, &copy);
        prop_assert_eq!(replay(&base, &patches), copy.clone());
        prop_assert_eq!(replay(&copy, &inverse), base);
    }

    #[test]
    fn append_is_only_adds(
        base in prop::collection::vec(any::<i64>(), 0..8),
        extra in prop::collection::vec(any::<i64>(), 1..6),
    ) {
        let grown: Vec<i64> = base.iter().chain(extra.iter()).copied().collect();
        let (patches, inverse) = diff(&Value::array(base), &Value::array(grown));
        prop_assert_eq!(patches.len(), extra.len());
        prop_assert_eq!(count(&patches, PatchOp::Add), extra.len());
        prop_assert_eq!(count(&inverse, PatchOp::Remove), extra.len());
    }

    #[test]
    fn truncation_is_only_removes(
        (items, keep) in prop::collection::vec(any::<i64>(), 1..10)
            .prop_flat_map(|v| { let len = v.len(); (Just(v), 0..len) })
    ) {
        let removed = items.len() - keep;
        let (patches, inverse) = diff(&Value::array(items.clone()), &Value::array(items[..keep].to_vec()));
        prop_assert_eq!(patches.len(), removed);
        prop_assert_eq!(count(&patches, PatchOp::Remove), removed);
        prop_assert_eq!(count(&inverse, PatchOp::Add), removed);
    }

    #[test]
    fn records_round_trip(
        base in prop::collection::btree_map("[a-e]", 0i64..4, 0..5),
        copy in prop::collection::btree_map("[a-e]", 0i64..4, 0..5),
    ) {
        let base = Value::record(base);
        let copy = Value::record(copy);
        let (patches, inverse) = diff(&base, &copy);
        prop_assert_eq!(replay(&base, &patches), copy.clone());
        prop_assert_eq!(replay(&copy, &inverse), base);
    }

    #[test]
    fn sets_round_trip_symmetrically(
        base in prop::collection::btree_set(0i64..8, 0..6),
        copy in prop::collection::btree_set(0i64..8, 0..6),
    ) {
        let removed = base.difference(&copy).count();
        let added = copy.difference(&base).count();
        let (base, copy) = (Value::set(base), Value::set(copy));
        let (patches, inverse) = diff(&base, &copy);

        prop_assert_eq!(count(&patches, PatchOp::Remove), removed);
        prop_assert_eq!(count(&patches, PatchOp::Add), added);
        prop_assert_eq!(replay(&base, &patches), copy.clone());
        prop_assert_eq!(replay(&copy, &inverse), base);
    }
}

fn todo(title: &str, done: bool) -> Value {
    Value::from(json!({ "title": title, "done": done }))
}

#[test]
fn nested_document_round_trips() {
    let base = Value::record([
        ("todos", Value::array([todo("write", false), todo("test", false)])),
        ("tags", Value::set(["draft", "rust"])),
        ("owners", Value::map([(PathStep::Index(1), "ada"), (PathStep::from("lead"), "bob")])),
        ("meta", Value::from(json!({ "rev": 1, "gone": true }))),
    ]);
    let copy = Value::record([
        (
            "todos",
            Value::array([todo("write", true), todo("test", false), todo("ship", false)]),
        ),
        ("tags", Value::set(["rust", "final"])),
        ("owners", Value::map([(PathStep::Index(1), "ada"), (PathStep::Index(2), "cy")])),
        ("meta", Value::from(json!({ "rev": 2 }))),
    ]);

    let (patches, inverse) = diff(&base, &copy);
    assert_eq!(replay(&base, &patches), copy);
    assert_eq!(replay(&copy, &inverse), base);

    let paths: BTreeSet<Vec<PathStep>> = patches.iter().map(|p| p.path.clone()).collect();
    assert!(paths.contains(&vec![PathStep::from("todos"), PathStep::Index(0)]));
    assert!(paths.contains(&vec![PathStep::from("meta"), PathStep::from("gone")]));
}

#[test]
fn untouched_subtrees_produce_no_patches() {
    let shared = Value::array((0..1000).collect::<Vec<i64>>());
    let base = Value::record([("big", shared.clone()), ("n", Value::from(0))]);
    let copy = Value::record([("big", shared), ("n", Value::from(1))]);

    let (patches, _) = diff(&base, &copy);
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].path, vec![PathStep::from("n")]);
}

#[test]
fn replaying_twice_yields_independent_documents() {
    let base = Value::from(json!({ "list": [] }));
    let copy = Value::from(json!({ "list": [{ "x": 1 }] }));
    let (patches, _) = diff(&base, &copy);

    let mut first = deep_clone(&base);
    apply_patches(&mut first, &patches).unwrap();
    let item = first
        .get_mut(&"list".into())
        .and_then(|list| list.get_mut(&PathStep::Index(0)))
        .and_then(|item| item.get_mut(&"x".into()))
        .unwrap();
    *item = Value::from(99);

    let second = replay(&base, &patches);
    assert_eq!(second, copy);
    assert_eq!(patches[0].value, Some(Value::from(json!({ "x": 1 }))));
}

#[test]
fn patches_survive_the_wire() {
    let base = Value::from(json!({ "a": [1, 2, 3], "b": { "c": "d" } }));
    let copy = Value::from(json!({ "a": [1, 3], "b": { "c": "e", "f": null } }));
    let (patches, inverse) = diff(&base, &copy);

    let wire = serde_json::to_string(&to_json_patch(&patches)).unwrap();
    let decoded = from_json_patch(&serde_json::from_str(&wire).unwrap()).unwrap();
    assert_eq!(decoded, patches);
    assert_eq!(replay(&base, &decoded), copy);
    assert_eq!(replay(&copy, &inverse), base);
}

#[test]
fn set_add_replayed_twice_is_idempotent() {
    let base = Value::set([1]);
    let copy = Value::set([1, 2]);
    let (patches, _) = diff(&base, &copy);

    let mut doc = deep_clone(&base);
    apply_patches(&mut doc, &patches).unwrap();
    apply_patches(&mut doc, &patches).unwrap();
    assert_eq!(doc, copy);
    assert_eq!(doc.as_set().map(|s| s.len()), Some(2));
}

#[test]
fn record_order_is_irrelevant_to_equality() {
    let base: BTreeMap<&str, i64> = [("a", 1), ("b", 2)].into_iter().collect();
    let base = Value::record(base);
    let copy = Value::record([("b", 2), ("a", 1), ("c", 3)]);
    let (patches, inverse) = diff(&base, &copy);
    assert_eq!(patches.len(), 1);
    assert_eq!(replay(&base, &patches), copy);
    assert_eq!(replay(&copy, &inverse), base);
}
