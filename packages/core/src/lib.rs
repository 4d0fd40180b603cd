//! Resrouter Core — resource schema, documents, and URL descriptors.
//!
//! Transport-free data model shared by handlers, loaders, and the router.
//! Nothing in this crate performs I/O or depends on an async runtime.

pub mod context;
pub mod document;
pub mod resource;
pub mod schema;
pub mod url;

pub use context::{Principal, RequestContext};
pub use document::{Collection, Document, DocumentError, PrimaryData};
pub use resource::{RelValue, Resource};
pub use schema::{Attr, Rel, ResourceType, Schema, SchemaError, TwoWayRel};
pub use url::{RelKind, UrlDescriptor};
