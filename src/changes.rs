//! ChangeSet Model
//!
//! Requested attribute changes keyed by element id. Every map here is an
//! `IndexMap` because later identifiers observe the edits of earlier ones, so
//! iteration must follow the order the caller declared.

use crate::core::scanner::is_attribute_name_char;
use crate::error::ChangeSetError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Changes for one element: attribute name to requested change
pub type ElementChanges = IndexMap<String, AttributeChange>;

/// A requested change to one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeChange {
    /// Replace the whole attribute value
    Scalar(String),
    /// Replace the whole attribute value with a JSON number or boolean,
    /// kept in its JSON spelling
    Literal(String),
    /// Merge sub-properties into a `prop: value; …` attribute
    Compound(IndexMap<String, String>),
}

impl AttributeChange {
    /// Full replacement value
    pub fn scalar(value: impl Into<String>) -> Self {
        AttributeChange::Scalar(value.into())
    }

    /// Sub-property merge, applied in iteration order
    pub fn compound<I, K, V>(props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        AttributeChange::Compound(props.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// All requested changes for one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    elements: IndexMap<String, ElementChanges>,
}

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `change` on `attribute` of element `id`
    ///
    /// A repeated attribute replaces the earlier request but keeps its
    /// position.
    pub fn set(&mut self, id: impl Into<String>, attribute: impl Into<String>, change: AttributeChange) -> &mut Self {
        self.elements
            .entry(id.into())
            .or_default()
            .insert(attribute.into(), change);
        self
    }

    /// Number of element ids in the change set
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the change set holds no element ids
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Changes requested for `id`
    pub fn get(&self, id: &str) -> Option<&ElementChanges> {
        self.elements.get(id)
    }

    /// Iterate elements in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementChanges)> {
        self.elements.iter().map(|(id, changes)| (id.as_str(), changes))
    }

    /// Decode the JSON body sent by the inspector
    ///
    /// Shape: `{ "<id>": { "<attr>": "<value>" | { "<prop>": <value> } } }`.
    /// Numbers and booleans are accepted wherever a string is, using their
    /// JSON spelling.
    pub fn from_json(body: &str) -> Result<Self, ChangeSetError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Build from an already-decoded JSON value
    pub fn from_value(value: Value) -> Result<Self, ChangeSetError> {
        let Value::Object(root) = value else {
            return Err(ChangeSetError::NotAnObject);
        };

        let mut set = ChangeSet::new();
        for (id, entry) in root {
            let Value::Object(attributes) = entry else {
                return Err(ChangeSetError::InvalidElement { id });
            };
            let changes = element_changes(&id, attributes)?;
            set.elements.insert(id, changes);
        }
        Ok(set)
    }
}

impl FromStr for ChangeSet {
    type Err = ChangeSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

fn element_changes(id: &str, attributes: Map<String, Value>) -> Result<ElementChanges, ChangeSetError> {
    let mut changes = ElementChanges::with_capacity(attributes.len());

    for (attribute, value) in attributes {
        if !is_attribute_name(&attribute) {
            return Err(ChangeSetError::InvalidAttributeName {
                id: id.to_string(),
                attribute,
            });
        }

        let change = match value {
            Value::Object(props) => {
                let mut merged = IndexMap::with_capacity(props.len());
                for (property, value) in props {
                    if !is_property_name(&property) {
                        return Err(ChangeSetError::InvalidPropertyName {
                            id: id.to_string(),
                            attribute,
                            property,
                        });
                    }
                    match scalar_text(&value) {
                        Ok(text) => {
                            merged.insert(property, text);
                        }
                        Err(kind) => {
                            return Err(ChangeSetError::UnsupportedProperty {
                                id: id.to_string(),
                                attribute,
                                property,
                                kind,
                            });
                        }
                    }
                }
                AttributeChange::Compound(merged)
            }
            other => match scalar_text(&other) {
                Ok(text) if other.is_string() => AttributeChange::Scalar(text),
                Ok(text) => AttributeChange::Literal(text),
                Err(kind) => {
                    return Err(ChangeSetError::UnsupportedValue {
                        id: id.to_string(),
                        attribute,
                        kind,
                    });
                }
            },
        };
        changes.insert(attribute, change);
    }

    Ok(changes)
}

/// Whether `name` reads back as a single attribute name once written
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_attribute_name_char)
}

/// Whether `name` reads back as the same sub-property name once written
fn is_property_name(name: &str) -> bool {
    !name.is_empty() && name.trim() == name && !name.contains([':', ';', '"', '\''])
}

/// Render a JSON scalar as attribute text, or name the unsupported kind
fn scalar_text(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err("null"),
        Value::Array(_) => Err("array"),
        Value::Object(_) => Err("object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_declaration_order() {
        let set = ChangeSet::from_json(
            r#"{"zeta": {"scale": "1 1 1"}, "alpha": {"rotation": "0 90 0", "position": "1 2 3"}}"#,
        )
        .unwrap();

        let ids: Vec<&str> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);

        let attrs: Vec<&str> = set.get("alpha").unwrap().keys().map(String::as_str).collect();
        assert_eq!(attrs, vec!["rotation", "position"]);
    }

    #[test]
    fn test_scalar_and_compound_are_decided_once() {
        let set = ChangeSet::from_json(r#"{"foo": {"position": "2 3 4", "bar": {"a": 1, "b": true}}}"#).unwrap();
        let foo = set.get("foo").unwrap();
        assert_eq!(foo["position"], AttributeChange::scalar("2 3 4"));
        assert_eq!(foo["bar"], AttributeChange::compound([("a", "1"), ("b", "true")]));
    }

    #[test]
    fn test_numbers_use_json_spelling() {
        let set: ChangeSet = r#"{"foo": {"opacity": 0.5, "visible": false}}"#.parse().unwrap();
        let foo = set.get("foo").unwrap();
        assert_eq!(foo["opacity"], AttributeChange::Literal("0.5".to_string()));
        assert_eq!(foo["visible"], AttributeChange::Literal("false".to_string()));
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(matches!(ChangeSet::from_json("[1, 2]"), Err(ChangeSetError::NotAnObject)));
        assert!(matches!(ChangeSet::from_json("{"), Err(ChangeSetError::Json(_))));
    }

    #[test]
    fn test_rejects_bad_element_entry() {
        let err = ChangeSet::from_json(r#"{"foo": "2 3 4"}"#).unwrap_err();
        assert!(matches!(err, ChangeSetError::InvalidElement { ref id } if id == "foo"));
    }

    #[test]
    fn test_rejects_unsupported_values() {
        let err = ChangeSet::from_json(r#"{"foo": {"position": [1, 2, 3]}}"#).unwrap_err();
        assert!(matches!(err, ChangeSetError::UnsupportedValue { kind: "array", .. }));

        let err = ChangeSet::from_json(r#"{"foo": {"material": {"color": null}}}"#).unwrap_err();
        assert!(matches!(err, ChangeSetError::UnsupportedProperty { kind: "null", .. }));
    }

    #[test]
    fn test_rejects_unwritable_names() {
        for body in [r#"{"foo": {"": "x"}}"#, r#"{"foo": {"on click": "x"}}"#, r#"{"foo": {"a=b": "x"}}"#] {
            let err = ChangeSet::from_json(body).unwrap_err();
            assert!(matches!(err, ChangeSetError::InvalidAttributeName { .. }), "{body}");
        }

        for body in [r#"{"foo": {"bar": {"": 1}}}"#, r#"{"foo": {"bar": {" a": 1}}}"#, r#"{"foo": {"bar": {"a:b": 1}}}"#] {
            let err = ChangeSet::from_json(body).unwrap_err();
            assert!(matches!(err, ChangeSetError::InvalidPropertyName { .. }), "{body}");
        }
    }

    #[test]
    fn test_accepts_framework_attribute_names() {
        let set = ChangeSet::from_json(r#"{"foo": {"@click": "go", "3d": "yes", "sound__1": {"on": "click"}}}"#).unwrap();
        assert_eq!(set.get("foo").unwrap().len(), 3);
    }

    #[test]
    fn test_set_builder() {
        let mut set = ChangeSet::new();
        set.set("foo", "position", AttributeChange::scalar("1 2 3"))
            .set("foo", "rotation", AttributeChange::scalar("0 0 0"))
            .set("foo", "position", AttributeChange::scalar("4 5 6"));

        let foo = set.get("foo").unwrap();
        assert_eq!(foo.len(), 2);
        assert_eq!(foo.get_index(0), Some((&"position".to_string(), &AttributeChange::scalar("4 5 6"))));
        assert_eq!(set.len(), 1);
        assert!(ChangeSet::new().is_empty());
    }
}
