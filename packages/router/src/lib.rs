//! Resrouter — dispatches resource-API requests to registered handlers and
//! assembles compound documents.
//!
//! The request pipeline:
//!
//! 1. **Classification** (`classify`): (method, URL shape) -> `HandlerKind`
//! 2. **Registry** (`registry`): lookup by (kind, type, relationship) key
//! 3. **Handler** (`handler`): user code writes primary data and linkage
//! 4. **Inclusion tracking** (`includes`): required/held/included state per
//!    (type, id), batch load id computation, flush into the document
//! 5. **Assembly** (`router`): orchestrates the above and hands the finished
//!    document to the serialization collaborator

pub mod classify;
pub mod config;
pub mod handler;
pub mod includes;
pub mod loader;
pub mod registry;
pub mod response;
pub mod router;

// Re-export key types for convenient access.
pub use classify::{classify, ClassifyError, HandlerKind};
pub use config::RouterConfig;
pub use handler::{HandlerStatus, RouteHandler, RoutedRequest};
pub use includes::{IncludeError, Includes};
pub use loader::ResourceLoader;
pub use registry::{HandlerKey, HandlerRegistry, RegistryError};
pub use response::{ResponseSink, ResponseStatus, Serializer};
pub use router::{Router, RouterError};
