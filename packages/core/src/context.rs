use serde::{Deserialize, Serialize};

/// Caller identity attached to a request once the transport layer has
/// authenticated it. Authorization decisions belong to handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier for the authenticated entity.
    pub id: String,
    /// Roles assigned to this principal for authorization checks.
    pub roles: Vec<String>,
}

/// Per-request context carrying identity and tracing information.
/// Threaded through handlers and loaders for audit and observability.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Distributed trace identifier for observability.
    pub trace_id: String,
    /// Authenticated principal, if the request is authenticated.
    pub principal: Option<Principal>,
}

impl RequestContext {
    /// Creates a context with the given trace id and no principal.
    #[must_use]
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            principal: None,
        }
    }
}
