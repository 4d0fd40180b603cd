//! Handler registry: one handler per (kind, resource type[, relationship])
//! key.
//!
//! A single table with a composite key rather than one map per kind. The
//! registry is owned by the `Router`, populated during server startup, and
//! read-only afterwards; `lookup` never mutates state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::classify::HandlerKind;
use crate::handler::RouteHandler;

// ---------------------------------------------------------------------------
// HandlerKey
// ---------------------------------------------------------------------------

/// Composite registration key.
///
/// For relationship-scoped kinds (`GetRelated`, `GetRelationships`,
/// `UpdateRelationships`), `res_type` is the *owning* type of the
/// relationship, not the target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    pub kind: HandlerKind,
    pub res_type: String,
    pub rel_name: Option<String>,
}

impl HandlerKey {
    /// Key for a kind scoped to a resource type only.
    #[must_use]
    pub fn resource(kind: HandlerKind, res_type: impl Into<String>) -> Self {
        Self {
            kind,
            res_type: res_type.into(),
            rel_name: None,
        }
    }

    /// Key for a relationship-scoped kind on the owning type.
    #[must_use]
    pub fn relationship(
        kind: HandlerKind,
        res_type: impl Into<String>,
        rel_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            res_type: res_type.into(),
            rel_name: Some(rel_name.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// HandlerRegistry
// ---------------------------------------------------------------------------

/// Registry mapping composite keys to handlers.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<HandlerKey, Arc<dyn RouteHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under the given key.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the exact key already
    /// holds a handler.
    pub fn register(
        &mut self,
        key: HandlerKey,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        if self.handlers.contains_key(&key) {
            return Err(RegistryError::DuplicateHandler { key });
        }
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// Look up the handler for a classified request. Pure; never mutates.
    #[must_use]
    pub fn lookup(
        &self,
        kind: HandlerKind,
        res_type: &str,
        rel_name: Option<&str>,
    ) -> Option<Arc<dyn RouteHandler>> {
        // Borrowed-key lookup would need a custom Borrow impl over the
        // composite; registration is rare enough that building an owned
        // key per lookup is the simpler trade.
        let key = HandlerKey {
            kind,
            res_type: res_type.to_string(),
            rel_name: rel_name.map(ToString::to_string),
        };
        self.handlers.get(&key).cloned()
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised during handler or loader registration. Setup-time fatal.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("handler already registered for {key:?}")]
    DuplicateHandler { key: HandlerKey },
    #[error("loader already registered for {res_type}")]
    DuplicateLoader { res_type: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
