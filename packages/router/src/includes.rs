//! Inclusion tracking: per-request state machine over (type, id) entries.
//!
//! Splitting `required` from "a resource is held" lets resources a handler
//! already produced skip a redundant load while still guaranteeing that
//! every client-requested include either appears in the document or fails
//! the request. Entry lifecycle:
//!
//! ```text
//! unknown -> indexed -> required -> resourced -> included (terminal)
//! ```
//!
//! Only [`Includes::flush`] moves an entry to `included`, exactly once.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use resrouter_core::document::{Document, PrimaryData};
use resrouter_core::resource::Resource;
use resrouter_core::schema::Schema;
use tracing::warn;

// ---------------------------------------------------------------------------
// IncludeEntry
// ---------------------------------------------------------------------------

/// Per-(type, id) tracking state.
#[derive(Debug, Default)]
struct IncludeEntry {
    /// Monotonic: set by `mark_required`, never cleared.
    required: bool,
    /// Write-once: set only by `flush`, after a resource is held.
    included: bool,
    /// Held resource, attached by a handler pre-seed or a loader batch.
    resource: Option<Resource>,
}

// ---------------------------------------------------------------------------
// Includes
// ---------------------------------------------------------------------------

/// Tracks which (type, id) pairs a request requires, which resources are
/// held for them, and which made it into the document.
///
/// Constructed fresh per request and dropped with it; nothing here is shared
/// across requests.
#[derive(Debug)]
pub struct Includes {
    schema: Arc<Schema>,
    /// Direct lookup by composite key; one entry per (type, id).
    entries: HashMap<(String, String), IncludeEntry>,
    /// First-seen id order per type, for stable batch-load id sequences.
    order: BTreeMap<String, Vec<String>>,
}

impl Includes {
    /// Creates an empty tracker over the given schema.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            entries: HashMap::new(),
            order: BTreeMap::new(),
        }
    }

    /// Mark (type, id) as required in the final document. Idempotent; the
    /// entry is created if absent. O(1) amortized.
    pub fn mark_required(&mut self, res_type: &str, id: &str) {
        self.entry_mut(res_type, id).required = true;
    }

    /// Attach a concrete resource to its entry, creating the entry on
    /// demand. Used to pre-seed resources a handler already produced and to
    /// ingest loader output. A held resource is included only if its entry
    /// is (or later becomes) required.
    pub fn hold_resource(&mut self, resource: Resource) {
        let res_type = resource.res_type.clone();
        let id = resource.id.clone();
        self.entry_mut(&res_type, &id).resource = Some(resource);
    }

    /// Attach a batch of resources of one type. Resources whose own type
    /// differs from `res_type` are dropped with a warning; a loader
    /// returning them is misbehaving.
    pub fn hold_resources(&mut self, res_type: &str, resources: Vec<Resource>) {
        for resource in resources {
            if resource.res_type == res_type {
                self.hold_resource(resource);
            } else {
                warn!(
                    expected = res_type,
                    got = %resource.res_type,
                    id = %resource.id,
                    "dropping held resource of unexpected type"
                );
            }
        }
    }

    /// Walk the primary data and mark every id referenced by a relationship
    /// whose name is both in its type's requested field set and in the
    /// linkage record.
    ///
    /// To-many id lists are sorted lexicographically before marking, so the
    /// order of required ids never depends on the order a handler produced
    /// them in.
    pub fn scan(
        &mut self,
        data: &PrimaryData,
        fields: &HashMap<String, BTreeSet<String>>,
        linkage: &HashMap<String, BTreeSet<String>>,
    ) {
        match data {
            PrimaryData::None => {}
            PrimaryData::One(resource) => self.scan_resource(resource, fields, linkage),
            PrimaryData::Many(collection) => {
                for resource in collection {
                    self.scan_resource(resource, fields, linkage);
                }
            }
        }
    }

    /// Ids of `res_type` that are required but have no held resource, in
    /// first-seen order. This is the minimal batch a loader must fetch:
    /// already-held and never-required ids are excluded.
    #[must_use]
    pub fn pending_load_ids(&self, res_type: &str) -> Vec<String> {
        let Some(ids) = self.order.get(res_type) else {
            return Vec::new();
        };
        ids.iter()
            .filter(|id| {
                self.entries
                    .get(&(res_type.to_string(), (*id).clone()))
                    .is_some_and(|e| e.required && e.resource.is_none())
            })
            .cloned()
            .collect()
    }

    /// Merge every required, held, not-yet-included resource into the
    /// document's include set and mark it included.
    ///
    /// # Errors
    ///
    /// Returns `IncludeError::IncompleteInclusion` listing every required
    /// (type, id) with no held resource. The caller must fail the request;
    /// the document is never sent with entries silently missing.
    pub fn flush(&mut self, doc: &mut Document) -> Result<(), IncludeError> {
        let mut missing = Vec::new();
        for (res_type, ids) in &self.order {
            for id in ids {
                let Some(entry) = self.entries.get_mut(&(res_type.clone(), id.clone())) else {
                    continue;
                };
                if !entry.required || entry.included {
                    continue;
                }
                if let Some(resource) = entry.resource.take() {
                    doc.include(resource);
                    entry.included = true;
                } else {
                    missing.push((res_type.clone(), id.clone()));
                }
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IncludeError::IncompleteInclusion { missing })
        }
    }

    fn scan_resource(
        &mut self,
        resource: &Resource,
        fields: &HashMap<String, BTreeSet<String>>,
        linkage: &HashMap<String, BTreeSet<String>>,
    ) {
        let Some(res_type) = self.schema.get(&resource.res_type) else {
            warn!(res_type = %resource.res_type, "primary resource of unknown type, skipping scan");
            return;
        };
        let Some(requested) = fields.get(&resource.res_type) else {
            return;
        };
        let Some(linked) = linkage.get(&resource.res_type) else {
            return;
        };
        // Collect first: marking needs &mut self while the schema type is
        // borrowed from self.
        let mut to_mark: Vec<(String, Vec<String>)> = Vec::new();
        for rel in res_type.rels() {
            if !requested.contains(&rel.name) || !linked.contains(&rel.name) {
                continue;
            }
            let Some(value) = resource.rel(&rel.name) else {
                continue;
            };
            let mut ids: Vec<String> = value.ids().into_iter().map(ToString::to_string).collect();
            ids.sort();
            to_mark.push((rel.to_type.clone(), ids));
        }
        for (to_type, ids) in to_mark {
            for id in ids {
                self.mark_required(&to_type, &id);
            }
        }
    }

    fn entry_mut(&mut self, res_type: &str, id: &str) -> &mut IncludeEntry {
        let key = (res_type.to_string(), id.to_string());
        self.entries.entry(key).or_insert_with(|| {
            self.order
                .entry(res_type.to_string())
                .or_default()
                .push(id.to_string());
            IncludeEntry::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from inclusion resolution.
#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
    #[error("required inclusions left unresolved: {missing:?}")]
    IncompleteInclusion {
        /// Every required (type, id) that had no held resource at flush.
        missing: Vec<(String, String)>,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
