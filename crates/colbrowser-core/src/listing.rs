//! Listing extraction and normalization.
//!
//! Servers answer a listing request in several shapes. [`SHAPES`] is the
//! ordered list of matchers; the first one that recognizes the document
//! wins. The extracted [`RawEntry`] values are then normalized into
//! [`Item`]s by [`normalize_listing`].

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::models::{Item, ItemKind, PARENT_NAME};
use crate::path::{is_within_root, join_path, last_segment, normalize_path, parent_path};

/// A listing entry as sent by the server, before normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub name: Option<String>,
    pub key: Option<String>,
    pub path: Option<String>,
    pub is_collection: Option<bool>,
    pub mime: Option<String>,
}

impl RawEntry {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Lenient conversion from one JSON entry.
    ///
    /// Strings become bare names; objects contribute whichever known fields
    /// they carry; anything else yields an empty entry that normalization
    /// will drop.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::named(name),
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let text = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let is_collection = ["isCollection", "is_collection", "collection"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_bool))
            .or_else(|| match map.get("type").and_then(Value::as_str) {
                Some("collection" | "directory" | "folder") => Some(true),
                Some("resource" | "file" | "document" | "binary") => Some(false),
                _ => None,
            });

        Self {
            name: text(&["name"]),
            key: text(&["key"]),
            path: text(&["path"]),
            is_collection,
            mime: text(&["mime", "mimeType", "mime-type", "contentType"]),
        }
    }

    fn with_default_kind(mut self, is_collection: bool) -> Self {
        self.is_collection.get_or_insert(is_collection);
        self
    }
}

/// A named shape matcher.
pub type ShapeMatcher = fn(&Value) -> Option<Vec<RawEntry>>;

/// Recognized listing shapes, tried in order.
pub const SHAPES: &[(&str, ShapeMatcher)] = &[
    ("items", items_shape),
    ("collection", collection_shape),
    ("resources+collections", split_shape),
    ("array", array_shape),
    ("object", object_shape),
];

fn entries_of(values: &[Value]) -> Vec<RawEntry> {
    values.iter().map(RawEntry::from_value).collect()
}

/// `{items: [...]}`
fn items_shape(value: &Value) -> Option<Vec<RawEntry>> {
    value.get("items")?.as_array().map(|a| entries_of(a))
}

/// `{collection: [...]}`
fn collection_shape(value: &Value) -> Option<Vec<RawEntry>> {
    value.get("collection")?.as_array().map(|a| entries_of(a))
}

/// `{collections: [...], resources: [...]}`, collections first.
fn split_shape(value: &Value) -> Option<Vec<RawEntry>> {
    let collections = value.get("collections").and_then(Value::as_array);
    let resources = value.get("resources").and_then(Value::as_array);
    if collections.is_none() && resources.is_none() {
        return None;
    }
    let mut entries: Vec<RawEntry> = collections
        .into_iter()
        .flatten()
        .map(|v| RawEntry::from_value(v).with_default_kind(true))
        .collect();
    entries.extend(
        resources
            .into_iter()
            .flatten()
            .map(|v| RawEntry::from_value(v).with_default_kind(false)),
    );
    Some(entries)
}

/// Bare `[...]`
fn array_shape(value: &Value) -> Option<Vec<RawEntry>> {
    value.as_array().map(|a| entries_of(a))
}

/// Any other object: each object-valued member is an entry, keyed by name.
fn object_shape(value: &Value) -> Option<Vec<RawEntry>> {
    let map = value.as_object()?;
    Some(
        map.iter()
            .filter(|(_, v)| v.is_object())
            .map(|(name, v)| {
                let mut entry = RawEntry::from_value(v);
                entry.name.get_or_insert_with(|| name.clone());
                entry
            })
            .collect(),
    )
}

/// Run the shape matchers in order and return the first match.
pub fn extract_entries(value: &Value) -> Result<Vec<RawEntry>, ApiError> {
    SHAPES
        .iter()
        .find_map(|(_, matcher)| matcher(value))
        .ok_or_else(|| ApiError::Parse(format!("unrecognized listing: {}", value)))
}

/// Normalize raw entries for `request_path` and drop anything outside `root`.
///
/// Entries are handled independently and keep their order. Nothing is
/// deduplicated and failures are skipped silently.
pub fn normalize_listing(entries: Vec<RawEntry>, request_path: &str, root: &str) -> Vec<Item> {
    entries
        .into_iter()
        .filter_map(|entry| normalize_entry(entry, request_path, root))
        .collect()
}

/// Normalize a single entry, or `None` if it must be excluded.
pub fn normalize_entry(entry: RawEntry, request_path: &str, root: &str) -> Option<Item> {
    if entry.name.is_none() && entry.path.is_none() && entry.key.is_none() {
        return None;
    }

    let name = entry.name.clone().or_else(|| {
        entry
            .key
            .as_deref()
            .or(entry.path.as_deref())
            .and_then(last_segment)
            .map(String::from)
    })?;
    if name.is_empty() || name == "." {
        return None;
    }

    if name == PARENT_NAME {
        let parent = match entry.key.as_deref() {
            Some(key) => normalize_path(key),
            None => parent_path(request_path),
        };
        if !is_within_root(&parent, root) {
            return None;
        }
        return Some(Item {
            name,
            path: parent,
            kind: ItemKind::Collection,
            mime: None,
        });
    }

    let path = match entry.path.as_deref().or(entry.key.as_deref()) {
        Some(p) => normalize_path(p),
        None => join_path(request_path, &name),
    };
    if !is_within_root(&path, root) {
        return None;
    }

    let kind = match entry.is_collection {
        Some(true) => ItemKind::Collection,
        Some(false) => ItemKind::Resource,
        None if name.contains('.') => ItemKind::Resource,
        None => ItemKind::Collection,
    };

    Some(Item {
        name,
        path,
        kind,
        mime: entry.mime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROOT: &str = "/db/apps/test";

    fn normalize(value: Value) -> Vec<Item> {
        normalize_listing(extract_entries(&value).unwrap(), ROOT, ROOT)
    }

    fn detect_shape(value: &Value) -> Option<&'static str> {
        SHAPES
            .iter()
            .find(|(_, matcher)| matcher(value).is_some())
            .map(|(name, _)| *name)
    }

    #[test]
    fn test_shapes_in_order() {
        assert_eq!(detect_shape(&json!({"items": []})), Some("items"));
        assert_eq!(detect_shape(&json!({"collection": []})), Some("collection"));
        assert_eq!(
            detect_shape(&json!({"resources": [], "collections": []})),
            Some("resources+collections")
        );
        assert_eq!(detect_shape(&json!([])), Some("array"));
        assert_eq!(detect_shape(&json!({"whatever": 1})), Some("object"));
        assert_eq!(detect_shape(&json!(42)), None);
        assert!(extract_entries(&json!("text")).is_err());
    }

    #[test]
    fn test_items_shape_wins_over_array_members() {
        let value = json!({"items": [{"name": "a.xml"}], "collection": [{"name": "b"}]});
        let items = normalize(value);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "a.xml");
    }

    #[test]
    fn test_dotted_name_is_resource() {
        let items = normalize(json!([{"name": "a.xml", "path": "/db/apps/test/a.xml"}]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::Resource);
        assert_eq!(items[0].path, "/db/apps/test/a.xml");
    }

    #[test]
    fn test_bare_name_is_collection_under_request_path() {
        let items = normalize(json!([{"name": "sub"}]));
        assert_eq!(items[0].kind, ItemKind::Collection);
        assert_eq!(items[0].path, "/db/apps/test/sub");
    }

    #[test]
    fn test_parent_outside_root_dropped() {
        let items = normalize(json!([{"name": "..", "key": "/db"}, {"name": "x.xml"}]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "x.xml");
    }

    #[test]
    fn test_parent_inside_root_kept() {
        let entries = vec![RawEntry::named("..")];
        let items = normalize_listing(entries, "/db/apps/test/sub", ROOT);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, ROOT);
        assert_eq!(items[0].kind, ItemKind::Collection);
    }

    #[test]
    fn test_name_backfilled_from_key_then_path() {
        let items = normalize(json!([
            {"key": "/db/apps/test/from-key.xml"},
            {"path": "/db/apps/test/nested/"}
        ]));
        assert_eq!(items[0].name, "from-key.xml");
        assert_eq!(items[0].path, "/db/apps/test/from-key.xml");
        assert_eq!(items[1].name, "nested");
        assert_eq!(items[1].path, "/db/apps/test/nested");
    }

    #[test]
    fn test_explicit_flag_beats_inference() {
        let items = normalize(json!([
            {"name": "v1.0", "isCollection": true},
            {"name": "Makefile", "type": "resource"}
        ]));
        assert_eq!(items[0].kind, ItemKind::Collection);
        assert_eq!(items[1].kind, ItemKind::Resource);
    }

    #[test]
    fn test_split_shape_defaults_kinds() {
        let items = normalize(json!({
            "collections": [{"name": "v2.1"}],
            "resources": [{"name": "README"}]
        }));
        assert_eq!(items[0].kind, ItemKind::Collection);
        assert_eq!(items[1].kind, ItemKind::Resource);
    }

    #[test]
    fn test_object_shape_uses_member_names() {
        let items = normalize(json!({
            "a.xml": {"mime": "application/xml"},
            "count": 2
        }));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "a.xml");
        assert_eq!(items[0].mime.as_deref(), Some("application/xml"));
    }

    #[test]
    fn test_escaping_and_empty_entries_dropped() {
        let items = normalize(json!([
            {"name": "evil", "path": "/db/apps/other/evil"},
            {},
            42,
            {"path": "/"},
            {"path": "/db/apps/test/../../secret"},
            {"name": "sneaky", "path": "/db/apps/test/sub/../../x"},
            {"name": "../up.xml"},
            {"name": "."},
            "plain.txt"
        ]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, "/db/apps/test/plain.txt");
    }

    #[test]
    fn test_no_dedup_and_order_kept() {
        let items = normalize(json!(["b.xml", "a.xml", "b.xml"]));
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b.xml", "a.xml", "b.xml"]);
    }

    #[test]
    fn test_every_survivor_inside_root_with_name() {
        let items = normalize(json!([
            {"name": ".."},
            {"name": "ok"},
            {"key": "/elsewhere/x"},
            {"name": "", "path": "/db/apps/test/named-by-path"}
        ]));
        for item in &items {
            assert!(item.path.starts_with(ROOT));
            assert!(!item.name.is_empty());
        }
    }
}
