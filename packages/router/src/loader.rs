//! Batch loader seam: fetches resources of one type by id.

use async_trait::async_trait;
use resrouter_core::resource::Resource;
use resrouter_core::RequestContext;

/// Pluggable per-type batch loader.
/// Implementations: database queries, upstream API calls, memory (tests).
///
/// Contract:
/// - Called at most once per request per type, with every missing id for
///   that type in one batch.
/// - Must return at most one resource per requested id. Missing ids are
///   simply absent from the result, not an error; the router reports them
///   as unresolved inclusions.
/// - May return resources for ids it was not asked for; they are held and
///   included only if something later requires them.
/// - Any `Err` aborts the whole request. Timeouts are the implementation's
///   responsibility.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Load resources for the given ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be served; the router maps it to
    /// a server-error response.
    async fn load(&self, ids: &[String], ctx: &RequestContext) -> anyhow::Result<Vec<Resource>>;
}
