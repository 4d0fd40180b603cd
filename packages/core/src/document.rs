//! Documents: primary data plus included resources and linkage records.
//!
//! A `Document` is built fresh per request. Handlers write primary data and
//! linkage into it; the router's inclusion tracker merges related resources
//! into its per-type include map; the serialization collaborator consumes
//! the finished value.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::resource::Resource;

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Ordered list of resources, all of one type.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Type every member must belong to.
    pub res_type: String,
    resources: Vec<Resource>,
}

impl Collection {
    /// Creates an empty collection for the given type.
    #[must_use]
    pub fn new(res_type: impl Into<String>) -> Self {
        Self {
            res_type: res_type.into(),
            resources: Vec::new(),
        }
    }

    /// Append a resource.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::TypeMismatch` if the resource's type differs
    /// from the collection's.
    pub fn push(&mut self, resource: Resource) -> Result<(), DocumentError> {
        if resource.res_type != self.res_type {
            return Err(DocumentError::TypeMismatch {
                expected: self.res_type.clone(),
                got: resource.res_type,
            });
        }
        self.resources.push(resource);
        Ok(())
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the collection has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

// ---------------------------------------------------------------------------
// PrimaryData
// ---------------------------------------------------------------------------

/// Primary data of a document: nothing, one resource, or a collection.
#[derive(Debug, Clone, Default)]
pub enum PrimaryData {
    /// No primary data (error responses, relationship deletions).
    #[default]
    None,
    /// A single resource.
    One(Resource),
    /// A homogeneous collection.
    Many(Collection),
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A compound document under assembly.
///
/// `included` is keyed type -> id -> resource, so inclusion is deduplicated
/// by id and iteration order is deterministic for the serializer. `linkage`
/// is the per-type record of relationship names a handler populated ids for;
/// the inclusion tracker's scan consults it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Primary data written by the handler.
    pub data: PrimaryData,
    included: BTreeMap<String, BTreeMap<String, Resource>>,
    linkage: HashMap<String, BTreeSet<String>>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a resource into the include set. Duplicate (type, id) pairs are
    /// dropped. Returns `true` if the resource was newly added.
    pub fn include(&mut self, resource: Resource) -> bool {
        let per_type = self.included.entry(resource.res_type.clone()).or_default();
        if per_type.contains_key(&resource.id) {
            debug!(res_type = %resource.res_type, id = %resource.id, "duplicate include dropped");
            return false;
        }
        per_type.insert(resource.id.clone(), resource);
        true
    }

    /// Included resources for a type, in id order.
    pub fn included_for(&self, res_type: &str) -> impl Iterator<Item = &Resource> {
        self.included.get(res_type).into_iter().flat_map(BTreeMap::values)
    }

    /// Total number of included resources across all types.
    #[must_use]
    pub fn included_len(&self) -> usize {
        self.included.values().map(BTreeMap::len).sum()
    }

    /// Record that the handler populated linkage ids for `rel_name` on
    /// resources of `res_type`.
    pub fn add_linkage(&mut self, res_type: impl Into<String>, rel_name: impl Into<String>) {
        self.linkage
            .entry(res_type.into())
            .or_default()
            .insert(rel_name.into());
    }

    /// Relationship names with populated linkage for a type.
    #[must_use]
    pub fn linkage(&self, res_type: &str) -> Option<&BTreeSet<String>> {
        self.linkage.get(res_type)
    }

    /// The whole per-type linkage record, as the inclusion scan consumes it.
    #[must_use]
    pub fn linkage_map(&self) -> &HashMap<String, BTreeSet<String>> {
        &self.linkage
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("cannot add resource of type {got} to collection of type {expected}")]
    TypeMismatch { expected: String, got: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn collection_rejects_wrong_type() {
        let mut col = Collection::new("articles");
        col.push(Resource::new("articles", "1")).unwrap();
        let err = col.push(Resource::new("tags", "t1")).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::TypeMismatch { expected, got }
                if expected == "articles" && got == "tags"
        ));
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn include_deduplicates_by_id() {
        let mut doc = Document::new();
        assert!(doc.include(Resource::new("tags", "t1")));
        assert!(!doc.include(Resource::new("tags", "t1")));
        assert!(doc.include(Resource::new("tags", "t2")));
        assert_eq!(doc.included_len(), 2);
    }

    #[test]
    fn include_keeps_types_separate() {
        let mut doc = Document::new();
        doc.include(Resource::new("tags", "1"));
        doc.include(Resource::new("users", "1"));
        assert_eq!(doc.included_for("tags").count(), 1);
        assert_eq!(doc.included_for("users").count(), 1);
    }

    #[test]
    fn included_for_iterates_in_id_order() {
        let mut doc = Document::new();
        doc.include(Resource::new("tags", "t2"));
        doc.include(Resource::new("tags", "t1"));
        let ids: Vec<_> = doc.included_for("tags").map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn linkage_accumulates_per_type() {
        let mut doc = Document::new();
        doc.add_linkage("articles", "tags");
        doc.add_linkage("articles", "author");
        doc.add_linkage("articles", "tags");
        let rels = doc.linkage("articles").unwrap();
        assert_eq!(rels.len(), 2);
        assert!(doc.linkage("tags").is_none());
    }

    proptest! {
        /// However many times the same ids arrive, the include set holds
        /// exactly the distinct ones.
        #[test]
        fn include_is_idempotent(ids in proptest::collection::vec("[a-z][a-z0-9]{0,4}", 0..40)) {
            let mut doc = Document::new();
            for id in &ids {
                doc.include(Resource::new("tags", id.clone()));
            }
            let distinct: std::collections::BTreeSet<_> = ids.iter().collect();
            prop_assert_eq!(doc.included_len(), distinct.len());
        }
    }
}
