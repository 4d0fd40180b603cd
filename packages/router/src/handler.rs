//! Handler contract: user code invoked for a classified request.

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use resrouter_core::document::Document;
use resrouter_core::schema::Schema;
use resrouter_core::url::UrlDescriptor;
use resrouter_core::RequestContext;

use crate::includes::Includes;
use crate::response::ResponseSink;

// ---------------------------------------------------------------------------
// HandlerStatus
// ---------------------------------------------------------------------------

/// Outcome a handler reports back to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerStatus {
    /// Primary data (if any) was written; proceed with inclusion resolution.
    Ok,
    /// The addressed resource does not exist.
    NotFound,
    /// The caller may not perform this operation.
    Unauthorized,
    /// The handler failed internally.
    Error,
}

// ---------------------------------------------------------------------------
// RoutedRequest
// ---------------------------------------------------------------------------

/// A classified request on its way through a handler.
///
/// The handler writes primary data into `doc` and records the relationship
/// names it populated linkage ids for via `Document::add_linkage`; the
/// router's inclusion scan consults that record afterwards. A handler that
/// already has related resources in hand can pre-seed them via
/// `includes.hold_resource` so the batch loaders skip them.
#[derive(Debug)]
pub struct RoutedRequest {
    /// HTTP method the transport received.
    pub method: Method,
    /// Parsed URL shape and per-type field/linkage requests.
    pub url: UrlDescriptor,
    /// Working document, fresh per request.
    pub doc: Document,
    /// Inclusion tracker, fresh per request.
    pub includes: Includes,
}

impl RoutedRequest {
    /// Creates a request with an empty working document and tracker.
    #[must_use]
    pub fn new(method: Method, url: UrlDescriptor, schema: Arc<Schema>) -> Self {
        Self {
            method,
            url,
            doc: Document::new(),
            includes: Includes::new(schema),
        }
    }
}

// ---------------------------------------------------------------------------
// RouteHandler
// ---------------------------------------------------------------------------

/// A request handler registered for one (kind, type[, relationship]) key.
///
/// Handlers own fetching the primary data. They must not write the response
/// payload themselves for successful requests; serialization happens after
/// inclusion resolution. The sink is available for transport concerns such
/// as response headers.
#[async_trait]
pub trait RouteHandler: Send + Sync {
    async fn handle(
        &self,
        sink: &mut dyn ResponseSink,
        ctx: &RequestContext,
        req: &mut RoutedRequest,
    ) -> HandlerStatus;
}
