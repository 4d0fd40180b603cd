//! Resource schema: type, attribute, and relationship metadata.
//!
//! A `Schema` is built once at startup, validated with [`Schema::check`],
//! and shared read-only across requests. Attribute typing and validation of
//! attribute payloads are the URL/serialization collaborator's concern; the
//! schema here carries only the metadata the router needs to classify
//! requests and resolve inclusions.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Attr / Rel
// ---------------------------------------------------------------------------

/// Attribute declared on a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    /// Name of the attribute.
    pub name: String,
}

/// Relationship declared on a resource type.
///
/// Cardinality is fixed here, once, and determines which `RelValue` variant
/// a resource carries for this relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rel {
    /// Name of the relationship as it appears in URLs and fieldsets.
    pub name: String,
    /// Resource type the relationship points at.
    pub to_type: String,
    /// `true` for to-one (single id), `false` for to-many (ordered id list).
    pub to_one: bool,
    /// Name of the inverse relationship on the target type, if declared.
    pub inverse: Option<String>,
}

/// Declaration of a relationship together with its inverse, registered on
/// both endpoint types in one call.
#[derive(Debug, Clone)]
pub struct TwoWayRel {
    pub from_type: String,
    pub from_name: String,
    /// Cardinality in the forward direction.
    pub to_one: bool,
    pub to_type: String,
    pub to_name: String,
    /// Cardinality in the inverse direction.
    pub from_one: bool,
}

// ---------------------------------------------------------------------------
// ResourceType
// ---------------------------------------------------------------------------

/// Immutable description of one resource type: its name, attributes, and
/// relationships. Maps are ordered by name so iteration is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceType {
    /// Type name (e.g. `"articles"`).
    pub name: String,
    attrs: BTreeMap<String, Attr>,
    rels: BTreeMap<String, Rel>,
}

impl ResourceType {
    /// Creates an empty type with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: BTreeMap::new(),
            rels: BTreeMap::new(),
        }
    }

    /// Declare an attribute on this type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateAttr` if an attribute with the same
    /// name already exists.
    pub fn add_attr(&mut self, attr: Attr) -> Result<(), SchemaError> {
        if self.attrs.contains_key(&attr.name) {
            return Err(SchemaError::DuplicateAttr {
                res_type: self.name.clone(),
                attr: attr.name,
            });
        }
        self.attrs.insert(attr.name.clone(), attr);
        Ok(())
    }

    /// Declare a relationship on this type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateRel` if a relationship with the same
    /// name already exists.
    pub fn add_rel(&mut self, rel: Rel) -> Result<(), SchemaError> {
        if self.rels.contains_key(&rel.name) {
            return Err(SchemaError::DuplicateRel {
                res_type: self.name.clone(),
                rel: rel.name,
            });
        }
        self.rels.insert(rel.name.clone(), rel);
        Ok(())
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Attr> {
        self.attrs.get(name)
    }

    /// Look up a relationship by name.
    #[must_use]
    pub fn rel(&self, name: &str) -> Option<&Rel> {
        self.rels.get(name)
    }

    /// Relationships in name order.
    pub fn rels(&self) -> impl Iterator<Item = &Rel> {
        self.rels.values()
    }

    /// Attributes in name order.
    pub fn attrs(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.values()
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// The set of resource types an API serves, keyed by type name.
///
/// Built at startup, checked with [`Schema::check`], then shared behind an
/// `Arc` and never mutated again.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: HashMap<String, ResourceType>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateType` if a type with the same name is
    /// already registered.
    pub fn add_type(&mut self, res_type: ResourceType) -> Result<(), SchemaError> {
        if self.types.contains_key(&res_type.name) {
            return Err(SchemaError::DuplicateType {
                res_type: res_type.name,
            });
        }
        self.types.insert(res_type.name.clone(), res_type);
        Ok(())
    }

    /// Register a relationship and its inverse on both endpoint types.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint type is unknown or either
    /// relationship name collides with an existing one.
    pub fn add_two_way_rel(&mut self, rel: TwoWayRel) -> Result<(), SchemaError> {
        // Validate both endpoints before mutating either.
        for endpoint in [&rel.from_type, &rel.to_type] {
            if !self.types.contains_key(endpoint) {
                return Err(SchemaError::UnknownType {
                    res_type: endpoint.clone(),
                });
            }
        }
        let forward = Rel {
            name: rel.from_name.clone(),
            to_type: rel.to_type.clone(),
            to_one: rel.to_one,
            inverse: Some(rel.to_name.clone()),
        };
        let backward = Rel {
            name: rel.to_name,
            to_type: rel.from_type.clone(),
            to_one: rel.from_one,
            inverse: Some(rel.from_name),
        };
        self.type_mut(&rel.from_type)?.add_rel(forward)?;
        self.type_mut(&rel.to_type)?.add_rel(backward)?;
        Ok(())
    }

    /// Look up a resource type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResourceType> {
        self.types.get(name)
    }

    /// Whether a type with the given name is registered.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Validate referential integrity: every relationship target must be a
    /// registered type, and every declared inverse must exist on the target
    /// type and point back.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn check(&self) -> Result<(), SchemaError> {
        for res_type in self.types.values() {
            for rel in res_type.rels() {
                let Some(target) = self.types.get(&rel.to_type) else {
                    return Err(SchemaError::UnknownType {
                        res_type: rel.to_type.clone(),
                    });
                };
                if let Some(inverse) = &rel.inverse {
                    let points_back = target
                        .rel(inverse)
                        .is_some_and(|r| r.to_type == res_type.name);
                    if !points_back {
                        return Err(SchemaError::MissingInverse {
                            res_type: res_type.name.clone(),
                            rel: rel.name.clone(),
                            inverse: inverse.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn type_mut(&mut self, name: &str) -> Result<&mut ResourceType, SchemaError> {
        self.types.get_mut(name).ok_or_else(|| SchemaError::UnknownType {
            res_type: name.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building or checking a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("type already registered: {res_type}")]
    DuplicateType { res_type: String },
    #[error("attribute already declared on {res_type}: {attr}")]
    DuplicateAttr { res_type: String, attr: String },
    #[error("relationship already declared on {res_type}: {rel}")]
    DuplicateRel { res_type: String, rel: String },
    #[error("unknown resource type: {res_type}")]
    UnknownType { res_type: String },
    #[error("inverse relationship {inverse} for {res_type}.{rel} missing on target type")]
    MissingInverse {
        res_type: String,
        rel: String,
        inverse: String,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
