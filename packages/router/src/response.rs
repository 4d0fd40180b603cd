//! Response surface: status mapping, the transport sink, and the
//! serialization collaborator.

use resrouter_core::document::Document;
use resrouter_core::url::UrlDescriptor;

use crate::handler::HandlerStatus;

// ---------------------------------------------------------------------------
// ResponseStatus
// ---------------------------------------------------------------------------

/// User-visible response status the transport adapter maps to its own codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// Request succeeded; the payload carries the document.
    Ok,
    /// Classification failed: unrecognized URL shape or method.
    BadRequest,
    /// Handler reported the resource missing.
    NotFound,
    /// Handler reported the caller unauthorized.
    Forbidden,
    /// No handler is registered for the classified key.
    NotImplemented,
    /// Handler, loader, inclusion, or serialization failure.
    ServerError,
}

impl ResponseStatus {
    /// Map a non-`Ok` handler status to its response status.
    ///
    /// `HandlerStatus::Ok` has no single mapping (it continues the
    /// pipeline), so it maps to `Ok` here only for completeness.
    #[must_use]
    pub fn from_handler(status: HandlerStatus) -> Self {
        match status {
            HandlerStatus::Ok => Self::Ok,
            HandlerStatus::NotFound => Self::NotFound,
            HandlerStatus::Unauthorized => Self::Forbidden,
            HandlerStatus::Error => Self::ServerError,
        }
    }
}

// ---------------------------------------------------------------------------
// ResponseSink
// ---------------------------------------------------------------------------

/// Receives the finished response. Implemented by the transport adapter;
/// the router never performs I/O itself.
pub trait ResponseSink: Send {
    /// Deliver the response. Called exactly once per request.
    fn send(&mut self, status: ResponseStatus, payload: Vec<u8>);
}

// ---------------------------------------------------------------------------
// Serializer
// ---------------------------------------------------------------------------

/// Serialization collaborator: turns an assembled document into the wire
/// payload. The router never constructs wire bytes.
pub trait Serializer: Send + Sync {
    /// Serialize the document for the given URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized; the router
    /// maps it to `ResponseStatus::ServerError`.
    fn serialize(&self, doc: &Document, url: &UrlDescriptor) -> anyhow::Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
