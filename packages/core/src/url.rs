//! URL descriptors: the parsed shape of a request URL.
//!
//! URL string parsing belongs to the schema/URL collaborator; the router
//! consumes only this descriptor.

use std::collections::{BTreeSet, HashMap};

// ---------------------------------------------------------------------------
// RelKind
// ---------------------------------------------------------------------------

/// Which relationship segment, if any, the URL addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelKind {
    /// No relationship segment (`/articles`, `/articles/1`).
    #[default]
    None,
    /// Related-resource URL (`/articles/1/author`).
    Related,
    /// Relationship self URL (`/articles/1/relationships/author`).
    SelfLink,
}

// ---------------------------------------------------------------------------
// UrlDescriptor
// ---------------------------------------------------------------------------

/// Parsed shape of a request URL plus the client's per-type field and
/// linkage requests.
///
/// `fields` is the sparse fieldset: per type, the attribute and relationship
/// names the client wants returned. `linkage` is the set of relationship
/// names per type the client asked to have included; handlers consult it and
/// record what they actually populated in `Document::linkage`.
#[derive(Debug, Clone, Default)]
pub struct UrlDescriptor {
    /// Whether the URL addresses a collection rather than a single resource.
    pub is_collection: bool,
    /// Resource type the URL addresses.
    pub res_type: String,
    /// Resource id, when the URL addresses a single resource.
    pub res_id: Option<String>,
    /// Relationship segment kind.
    pub rel_kind: RelKind,
    /// Relationship name, when `rel_kind` is not `None`.
    pub rel_name: Option<String>,
    /// Sparse fieldsets: type -> requested field names.
    pub fields: HashMap<String, BTreeSet<String>>,
    /// Requested inclusion paths: type -> relationship names.
    pub linkage: HashMap<String, BTreeSet<String>>,
}

impl UrlDescriptor {
    /// Descriptor for a collection URL like `GET /articles`.
    #[must_use]
    pub fn collection(res_type: impl Into<String>) -> Self {
        Self {
            is_collection: true,
            res_type: res_type.into(),
            ..Self::default()
        }
    }

    /// Descriptor for a single-resource URL like `GET /articles/1`.
    #[must_use]
    pub fn resource(res_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            res_type: res_type.into(),
            res_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Descriptor for a relationship URL on a single resource.
    #[must_use]
    pub fn relationship(
        res_type: impl Into<String>,
        id: impl Into<String>,
        rel_kind: RelKind,
        rel_name: impl Into<String>,
    ) -> Self {
        Self {
            res_type: res_type.into(),
            res_id: Some(id.into()),
            rel_kind,
            rel_name: Some(rel_name.into()),
            ..Self::default()
        }
    }

    /// Requested field names for a type, if the client sent a fieldset.
    #[must_use]
    pub fn fields_for(&self, res_type: &str) -> Option<&BTreeSet<String>> {
        self.fields.get(res_type)
    }

    /// Add a field to the sparse fieldset for a type.
    pub fn request_field(&mut self, res_type: impl Into<String>, field: impl Into<String>) {
        self.fields.entry(res_type.into()).or_default().insert(field.into());
    }

    /// Add a relationship to the requested inclusion paths for a type.
    pub fn request_linkage(&mut self, res_type: impl Into<String>, rel_name: impl Into<String>) {
        self.linkage.entry(res_type.into()).or_default().insert(rel_name.into());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_descriptor_shape() {
        let url = UrlDescriptor::collection("articles");
        assert!(url.is_collection);
        assert_eq!(url.res_type, "articles");
        assert_eq!(url.res_id, None);
        assert_eq!(url.rel_kind, RelKind::None);
    }

    #[test]
    fn resource_descriptor_shape() {
        let url = UrlDescriptor::resource("articles", "1");
        assert!(!url.is_collection);
        assert_eq!(url.res_id.as_deref(), Some("1"));
    }

    #[test]
    fn relationship_descriptor_shape() {
        let url = UrlDescriptor::relationship("articles", "1", RelKind::SelfLink, "tags");
        assert_eq!(url.rel_kind, RelKind::SelfLink);
        assert_eq!(url.rel_name.as_deref(), Some("tags"));
    }

    #[test]
    fn field_and_linkage_requests_accumulate() {
        let mut url = UrlDescriptor::collection("articles");
        url.request_field("articles", "title");
        url.request_field("articles", "tags");
        url.request_linkage("articles", "tags");
        assert_eq!(url.fields_for("articles").unwrap().len(), 2);
        assert!(url.linkage["articles"].contains("tags"));
    }
}
