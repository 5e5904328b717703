//! Reading and writing trees by path
//!
//! Reads never fail: anything that cannot be reached is simply absent
//! (`None`). Writes never fail either: containers are created on the way
//! down and values of the wrong shape are replaced, so the last writer wins.
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

use super::ast::{Path, Segment};
use crate::Tree;
use serde_json::{Map, Value};
use tracing::debug;

/// Read the value at `path`, or `None` if any step cannot be followed
///
/// A terminal `null` is a present value and comes back as `Some(&Value::Null)`.
pub fn read<'a>(tree: &'a Tree, path: &Path) -> Option<&'a Tree> {
    path.segments()
        .iter()
        .try_fold(tree, |current, segment| step(current, segment))
}

/// Read the value at `path` and clone it
pub fn read_owned(tree: &Tree, path: &Path) -> Option<Tree> {
    read(tree, path).cloned()
}

/// Whether a value (including an explicit `null`) is reachable at `path`
pub fn exists(tree: &Tree, path: &Path) -> bool {
    read(tree, path).is_some()
}

/// Follow one segment from `current`
fn step<'a>(current: &'a Tree, segment: &Segment) -> Option<&'a Tree> {
    let field = match current {
        Value::Object(map) => map.get(&segment.name)?,
        _ => return None,
    };

    match segment.index {
        None => Some(field),
        Some(index) => match field {
            Value::Array(items) => items.get(index),
            _ => None,
        },
    }
}

/// Write `value` at `path`, creating or replacing containers as needed
pub fn write(tree: &mut Tree, path: &Path, value: Tree) {
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };

    let mut current = ensure_object(tree, "$");
    for segment in parents {
        let slot = ensure_slot(current, segment);
        current = ensure_object(slot, &segment.name);
    }

    match last.index {
        None => {
            current.insert(last.name.clone(), value);
        }
        Some(index) => {
            let items = ensure_array(current, &last.name);
            pad_to(items, index);
            items[index] = value;
        }
    }
}

/// Make `value` an object, replacing it if it is anything else
///
/// `field` only names the location in the conflict log.
pub(crate) fn ensure_object<'a>(value: &'a mut Tree, field: &str) -> &'a mut Map<String, Value> {
    if !value.is_object() {
        if !value.is_null() {
            debug!(field, found = kind_of(value), "Replacing value with an object");
        }
        *value = Value::Object(Map::new());
    }

    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

/// Resolve the slot a non-terminal segment descends into
///
/// For a plain segment this is the entry under `name`, created as an empty
/// object when missing. For an indexed segment it is element `index` of the
/// sequence under `name`, padding the sequence with empty objects first.
pub(crate) fn ensure_slot<'a>(map: &'a mut Map<String, Value>, segment: &Segment) -> &'a mut Tree {
    match segment.index {
        None => map
            .entry(segment.name.clone())
            .or_insert_with(|| Value::Object(Map::new())),
        Some(index) => {
            let items = ensure_array(map, &segment.name);
            pad_to(items, index);
            &mut items[index]
        }
    }
}

/// Make the entry under `name` an array, replacing anything else
fn ensure_array<'a>(map: &'a mut Map<String, Value>, name: &str) -> &'a mut Vec<Value> {
    let entry = map.entry(name.to_string()).or_insert_with(|| Value::Array(Vec::new()));

    if !entry.is_array() {
        debug!(field = name, found = kind_of(entry), "Replacing value with an array");
        *entry = Value::Array(Vec::new());
    }

    match entry {
        Value::Array(items) => items,
        _ => unreachable!("entry was just replaced with an array"),
    }
}

/// Extend `items` with empty-object placeholders until `index` is in range
///
/// Indices reaching here come from a validated [`Path`], so `index` is at
/// most [`MAX_INDEX`](super::ast::MAX_INDEX).
fn pad_to(items: &mut Vec<Value>, index: usize) {
    if items.len() <= index {
        items.resize_with(index + 1, || Value::Object(Map::new()));
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(s: &str) -> Path {
        s.parse().unwrap()
    }

    #[test]
    fn test_read_nested_index() {
        let tree = json!({"a": {"b": [{"c": 5}]}});
        assert_eq!(read(&tree, &p("a.b[0].c")), Some(&json!(5)));
    }

    #[test]
    fn test_read_returns_substructures() {
        let tree = json!({"company": {"eins": ["12-3456789"]}});
        assert_eq!(read(&tree, &p("company")), Some(&json!({"eins": ["12-3456789"]})));
        assert_eq!(read(&tree, &p("company.eins")), Some(&json!(["12-3456789"])));
        assert_eq!(read(&tree, &p("company.eins[0]")), Some(&json!("12-3456789")));
    }

    #[test]
    fn test_read_absent_cases() {
        let tree = json!({"a": 1, "list": [1, 2], "obj": {"k": "v"}});
        assert_eq!(read(&tree, &p("missing.field")), None);
        assert_eq!(read(&tree, &p("a.b")), None);
        assert_eq!(read(&tree, &p("list[2]")), None);
        assert_eq!(read(&tree, &p("obj[0]")), None);
        assert_eq!(read(&tree, &p("a[0]")), None);
        assert_eq!(read(&json!([1, 2]), &p("a")), None);
        assert_eq!(read(&json!("scalar"), &p("a")), None);
    }

    #[test]
    fn test_read_null_is_present() {
        let tree = json!({"terminationDate": null, "nested": null});
        assert_eq!(read(&tree, &p("terminationDate")), Some(&Value::Null));
        assert!(exists(&tree, &p("terminationDate")));
        assert_eq!(read(&tree, &p("nested.inner")), None);
    }

    #[test]
    fn test_read_owned_clones() {
        let tree = json!({"a": [1, 2, 3]});
        assert_eq!(read_owned(&tree, &p("a")), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_write_creates_containers_and_placeholders() {
        let mut dest = json!({});
        write(&mut dest, &p("x.y[2].z"), json!(5));
        assert_eq!(dest, json!({"x": {"y": [{}, {}, {"z": 5}]}}));
    }

    #[test]
    fn test_write_terminal_index() {
        let mut dest = json!({});
        write(&mut dest, &p("tags[1]"), json!("b"));
        assert_eq!(dest, json!({"tags": [{}, "b"]}));

        write(&mut dest, &p("tags[0]"), json!("a"));
        assert_eq!(dest, json!({"tags": ["a", "b"]}));
    }

    #[test]
    fn test_write_extends_existing_sequence() {
        let mut dest = json!({"list": [{"keep": true}]});
        write(&mut dest, &p("list[2].v"), json!(1));
        assert_eq!(dest, json!({"list": [{"keep": true}, {}, {"v": 1}]}));

        write(&mut dest, &p("list[0].other"), json!(2));
        assert_eq!(dest, json!({"list": [{"keep": true, "other": 2}, {}, {"v": 1}]}));
    }

    #[test]
    fn test_write_overwrites_structural_conflicts() {
        let mut dest = json!({"a": 1});
        write(&mut dest, &p("a.b"), json!(2));
        assert_eq!(dest, json!({"a": {"b": 2}}));

        let mut dest = json!({"a": {"not": "a list"}});
        write(&mut dest, &p("a[0]"), json!(true));
        assert_eq!(dest, json!({"a": [true]}));

        let mut dest = json!({"a": ["scalar"]});
        write(&mut dest, &p("a[0].b"), json!(3));
        assert_eq!(dest, json!({"a": [{"b": 3}]}));
    }

    #[test]
    fn test_write_replaces_non_object_root() {
        let mut dest = json!([1, 2]);
        write(&mut dest, &p("a"), json!(1));
        assert_eq!(dest, json!({"a": 1}));

        let mut dest = Value::Null;
        write(&mut dest, &p("a"), json!(1));
        assert_eq!(dest, json!({"a": 1}));
    }

    #[test]
    fn test_write_terminal_overwrites_container() {
        let mut dest = json!({"a": {"b": {"c": 1}}});
        write(&mut dest, &p("a.b"), json!(null));
        assert_eq!(dest, json!({"a": {"b": null}}));
    }

    #[test]
    fn test_write_then_read() {
        let mut dest = json!({});
        let value = json!({"amount": 900, "type": "Federal Tax"});
        let path = p("salaries[0].taxDetails[0]");
        write(&mut dest, &path, value.clone());
        assert_eq!(read(&dest, &path), Some(&value));
    }

    #[test]
    fn test_ensure_slot_policy() {
        let mut map = Map::new();
        let slot = ensure_slot(&mut map, &Segment::field("home"));
        assert_eq!(*slot, json!({}));

        let slot = ensure_slot(&mut map, &Segment::indexed("rows", 1));
        assert_eq!(*slot, json!({}));
        assert_eq!(map.get("rows"), Some(&json!([{}, {}])));
    }
}
