//! Resources: (type, id)-identified records with attribute and relationship
//! values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// RelValue
// ---------------------------------------------------------------------------

/// Value of a relationship on a concrete resource.
///
/// The variant is fixed by the schema's cardinality for the relationship, so
/// access sites match on the variant instead of inspecting dynamic types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelValue {
    /// Single referenced id; `None` when the relationship is empty.
    ToOne(Option<String>),
    /// Ordered list of referenced ids.
    ToMany(Vec<String>),
}

impl RelValue {
    /// Referenced ids regardless of cardinality; empty for `ToOne(None)`.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::ToOne(None) => Vec::new(),
            Self::ToOne(Some(id)) => vec![id.as_str()],
            Self::ToMany(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

/// One record of a resource type, identified by (type, id).
///
/// Owned by whichever handler or loader produced it; the inclusion tracker
/// and document take clones, never shared mutable references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Name of the resource type this record belongs to.
    pub res_type: String,
    /// Identifier, unique within the type.
    pub id: String,
    attrs: HashMap<String, Value>,
    rels: HashMap<String, RelValue>,
}

impl Resource {
    /// Creates a resource with no attribute or relationship values.
    #[must_use]
    pub fn new(res_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            res_type: res_type.into(),
            id: id.into(),
            attrs: HashMap::new(),
            rels: HashMap::new(),
        }
    }

    /// Set an attribute value, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: Value) {
        self.attrs.insert(name.into(), value);
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Set a relationship value, replacing any previous value.
    pub fn set_rel(&mut self, name: impl Into<String>, value: RelValue) {
        self.rels.insert(name.into(), value);
    }

    /// Relationship value by name.
    #[must_use]
    pub fn rel(&self, name: &str) -> Option<&RelValue> {
        self.rels.get(name)
    }

    /// Builder-style attribute setter for test and fixture code.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style relationship setter for test and fixture code.
    #[must_use]
    pub fn with_rel(mut self, name: impl Into<String>, value: RelValue) -> Self {
        self.set_rel(name, value);
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
