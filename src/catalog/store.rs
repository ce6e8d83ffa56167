//! In-memory node store
//!
//! Collections keep insertion order, both across collections and within one.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::debug;

/// Nodes of one type
#[derive(Debug, Clone, Default)]
pub struct NodeCollection {
    type_name: String,
    nodes: Vec<JsonObject>,
    index: HashMap<String, usize>,
}

impl NodeCollection {
    fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn nodes(&self) -> &[JsonObject] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by ID
    pub fn get(&self, id: &str) -> Option<&JsonObject> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Insert a node, replacing any node with the same ID in place
    fn insert(&mut self, id: String, node: JsonObject) {
        if let Some(&i) = self.index.get(&id) {
            debug!("Replacing {} node '{}'", self.type_name, id);
            self.nodes[i] = node;
        } else {
            self.index.insert(id, self.nodes.len());
            self.nodes.push(node);
        }
    }
}

/// Ordered set of node collections
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    collections: Vec<NodeCollection>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection, or return the existing one
    pub fn add_collection(&mut self, type_name: &str) -> &mut NodeCollection {
        let position = match self.position(type_name) {
            Some(i) => i,
            None => {
                self.collections.push(NodeCollection::new(type_name));
                self.collections.len() - 1
            }
        };
        &mut self.collections[position]
    }

    /// Look up a collection
    pub fn get(&self, type_name: &str) -> Option<&NodeCollection> {
        self.position(type_name).map(|i| &self.collections[i])
    }

    /// Add a node to an existing collection and return a reference to it
    ///
    /// The node must be an object with a string `id`.
    pub fn add_node(&mut self, type_name: &str, node: JsonValue) -> Result<JsonValue> {
        let position = self
            .position(type_name)
            .ok_or_else(|| Error::UnknownCollection {
                type_name: type_name.to_string(),
            })?;

        let JsonValue::Object(node) = node else {
            return Err(Error::invalid_node(type_name, "node is not an object"));
        };
        let id = node
            .get("id")
            .and_then(JsonValue::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::invalid_node(type_name, "node has no id"))?;

        let reference = Self::create_reference(type_name, &id);
        self.collections[position].insert(id, node);
        Ok(reference)
    }

    /// Reference to a node by type and ID
    pub fn create_reference(type_name: &str, id: &str) -> JsonValue {
        serde_json::json!({ "typeName": type_name, "id": id })
    }

    /// Collections in creation order
    pub fn collections(&self) -> &[NodeCollection] {
        &self.collections
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.collections.iter().map(NodeCollection::len).sum()
    }

    fn position(&self, type_name: &str) -> Option<usize> {
        self.collections
            .iter()
            .position(|c| c.type_name == type_name)
    }
}

impl Serialize for NodeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.collections.len()))?;
        for collection in &self.collections {
            map.serialize_entry(&collection.type_name, &collection.nodes)?;
        }
        map.end()
    }
}
