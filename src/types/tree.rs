//! UI tree and element records.
//!
//! The tree is a persistent value: cloning is O(1) and updating one key shares
//! every other record with the previous snapshot.

use im::OrdMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// One node of the UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub key: String,
    /// Catalog tag, kept verbatim even when the catalog does not know it.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub props: Map<String, Value>,
    /// Ordered child keys. Only container kinds look at these.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty_vec")]
    pub children: Vec<String>,
}

impl Element {
    pub fn new(key: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            props: Map::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }
}

fn null_as_empty_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root key plus a key → element mapping.
///
/// Child and root references are not checked against the mapping; a dangling
/// reference simply renders as nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiTree {
    root: Option<String>,
    elements: OrdMap<String, Arc<Element>>,
}

impl UiTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn root_element(&self) -> Option<&Arc<Element>> {
        self.root.as_ref().and_then(|k| self.elements.get(k))
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Element>> {
        self.elements.get(key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.elements.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.elements.keys()
    }

    /// New tree with the root key replaced.
    pub fn with_root(&self, key: impl Into<String>) -> Self {
        Self {
            root: Some(key.into()),
            elements: self.elements.clone(),
        }
    }

    /// New tree with the record at `key` replaced wholesale.
    pub fn with_element(&self, key: impl Into<String>, element: Element) -> Self {
        Self {
            root: self.root.clone(),
            elements: self.elements.update(key.into(), Arc::new(element)),
        }
    }

    /// Keys whose record was added or replaced since `previous`.
    ///
    /// Records are compared by identity, so a snapshot produced by
    /// [`UiTree::with_element`] reports exactly the touched key.
    pub fn changed_keys(&self, previous: &UiTree) -> Vec<String> {
        self.elements
            .iter()
            .filter(|(k, v)| match previous.elements.get(*k) {
                Some(old) => !Arc::ptr_eq(old, v),
                None => true,
            })
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// `{ "root": ..., "elements": { key: element } }`, the shape the wire protocol builds.
    pub fn to_value(&self) -> Value {
        let elements: Map<String, Value> = self
            .elements
            .iter()
            .map(|(k, v)| {
                (
                    k.clone(),
                    serde_json::to_value(v.as_ref()).unwrap_or(Value::Null),
                )
            })
            .collect();
        serde_json::json!({
            "root": self.root,
            "elements": elements,
        })
    }
}
