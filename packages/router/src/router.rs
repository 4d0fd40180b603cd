//! Document assembly: classify -> dispatch -> scan -> batch-load -> flush ->
//! serialize.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::try_join_all;
use http::Method;
use resrouter_core::schema::Schema;
use resrouter_core::url::UrlDescriptor;
use resrouter_core::RequestContext;
use tracing::{debug, warn};

use crate::classify::{classify, ClassifyError, HandlerKind};
use crate::config::RouterConfig;
use crate::handler::{HandlerStatus, RouteHandler, RoutedRequest};
use crate::includes::IncludeError;
use crate::loader::ResourceLoader;
use crate::registry::{HandlerKey, HandlerRegistry, RegistryError};
use crate::response::{ResponseSink, ResponseStatus, Serializer};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatches classified requests to registered handlers and assembles the
/// compound document before handing it to the serializer.
///
/// Handlers and loaders are registered at startup; after that the router is
/// shared read-only across requests. All per-request state lives in the
/// `RoutedRequest` built by [`Router::handle`] and is dropped with it.
/// Cancelling the `handle` future abandons any outstanding loader calls, so
/// a flush never observes a partially merged hold state.
pub struct Router {
    schema: Arc<Schema>,
    registry: HandlerRegistry,
    /// Per-type batch loaders in type order, so sequential load order is
    /// deterministic.
    loaders: BTreeMap<String, Arc<dyn ResourceLoader>>,
    serializer: Arc<dyn Serializer>,
    config: RouterConfig,
}

impl Router {
    /// Creates a router with default configuration.
    #[must_use]
    pub fn new(schema: Arc<Schema>, serializer: Arc<dyn Serializer>) -> Self {
        Self::with_config(schema, serializer, RouterConfig::default())
    }

    /// Creates a router with the given configuration.
    #[must_use]
    pub fn with_config(
        schema: Arc<Schema>,
        serializer: Arc<dyn Serializer>,
        config: RouterConfig,
    ) -> Self {
        Self {
            schema,
            registry: HandlerRegistry::new(),
            loaders: BTreeMap::new(),
            serializer,
            config,
        }
    }

    /// The schema this router serves.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    // -- registration -------------------------------------------------------

    /// Register the handler for `GET /{res_type}`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the key is taken.
    pub fn get_collection(
        &mut self,
        res_type: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        self.registry
            .register(HandlerKey::resource(HandlerKind::GetCollection, res_type), handler)
    }

    /// Register the handler for `GET /{res_type}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the key is taken.
    pub fn get_resource(
        &mut self,
        res_type: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        self.registry
            .register(HandlerKey::resource(HandlerKind::GetResource, res_type), handler)
    }

    /// Register the handler for `GET /{res_type}/{id}/{rel_name}`. The key
    /// is the relationship's owning type, not its target type.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the key is taken.
    pub fn get_related(
        &mut self,
        res_type: impl Into<String>,
        rel_name: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        self.registry.register(
            HandlerKey::relationship(HandlerKind::GetRelated, res_type, rel_name),
            handler,
        )
    }

    /// Register the handler for `GET /{res_type}/{id}/relationships/{rel_name}`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the key is taken.
    pub fn get_relationships(
        &mut self,
        res_type: impl Into<String>,
        rel_name: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        self.registry.register(
            HandlerKey::relationship(HandlerKind::GetRelationships, res_type, rel_name),
            handler,
        )
    }

    /// Register the handler for `POST /{res_type}`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the key is taken.
    pub fn create_resource(
        &mut self,
        res_type: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        self.registry
            .register(HandlerKey::resource(HandlerKind::CreateResource, res_type), handler)
    }

    /// Register the handler for `PATCH /{res_type}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the key is taken.
    pub fn update_resource(
        &mut self,
        res_type: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        self.registry
            .register(HandlerKey::resource(HandlerKind::UpdateResource, res_type), handler)
    }

    /// Register the handler for `PATCH /{res_type}/{id}/relationships/{rel_name}`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the key is taken.
    pub fn update_relationships(
        &mut self,
        res_type: impl Into<String>,
        rel_name: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        self.registry.register(
            HandlerKey::relationship(HandlerKind::UpdateRelationships, res_type, rel_name),
            handler,
        )
    }

    /// Register the handler for `DELETE /{res_type}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateHandler` if the key is taken.
    pub fn delete_resource(
        &mut self,
        res_type: impl Into<String>,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<(), RegistryError> {
        self.registry
            .register(HandlerKey::resource(HandlerKind::DeleteResource, res_type), handler)
    }

    /// Register the batch loader for a resource type.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateLoader` if the type already has one.
    pub fn register_loader(
        &mut self,
        res_type: impl Into<String>,
        loader: Arc<dyn ResourceLoader>,
    ) -> Result<(), RegistryError> {
        let res_type = res_type.into();
        if self.loaders.contains_key(&res_type) {
            return Err(RegistryError::DuplicateLoader { res_type });
        }
        self.loaders.insert(res_type, loader);
        Ok(())
    }

    // -- request handling ---------------------------------------------------

    /// Handle one request end to end. Sends exactly one response through the
    /// sink and returns the status it sent.
    pub async fn handle(
        &self,
        sink: &mut dyn ResponseSink,
        ctx: &RequestContext,
        method: Method,
        url: UrlDescriptor,
    ) -> ResponseStatus {
        let mut req = RoutedRequest::new(method, url, Arc::clone(&self.schema));
        match self.process(sink, ctx, &mut req).await {
            Ok(Outcome::Document(payload)) => {
                sink.send(ResponseStatus::Ok, payload);
                ResponseStatus::Ok
            }
            Ok(Outcome::Status(status)) => {
                sink.send(status, Vec::new());
                status
            }
            Err(err) => {
                let status = err.response_status();
                warn!(trace_id = %ctx.trace_id, error = %err, ?status, "request failed");
                sink.send(status, Vec::new());
                status
            }
        }
    }

    /// The pipeline proper. A short-circuiting handler status is an
    /// `Outcome::Status`, not an error; errors are pipeline failures.
    async fn process(
        &self,
        sink: &mut dyn ResponseSink,
        ctx: &RequestContext,
        req: &mut RoutedRequest,
    ) -> Result<Outcome, RouterError> {
        let kind = classify(&req.method, &req.url)?;
        debug!(trace_id = %ctx.trace_id, ?kind, res_type = %req.url.res_type, "classified");

        let rel_name = if kind.is_relationship_scoped() {
            req.url.rel_name.as_deref()
        } else {
            None
        };
        let handler = self
            .registry
            .lookup(kind, &req.url.res_type, rel_name)
            .ok_or_else(|| RouterError::HandlerNotFound {
                kind,
                res_type: req.url.res_type.clone(),
                rel_name: rel_name.map(ToString::to_string),
            })?;

        let status = handler.handle(sink, ctx, req).await;
        if status != HandlerStatus::Ok {
            debug!(trace_id = %ctx.trace_id, ?status, "handler short-circuited");
            return Ok(Outcome::Status(ResponseStatus::from_handler(status)));
        }

        req.includes
            .scan(&req.doc.data, &req.url.fields, req.doc.linkage_map());
        self.load_pending(ctx, req).await?;
        req.includes.flush(&mut req.doc)?;

        let payload = self
            .serializer
            .serialize(&req.doc, &req.url)
            .map_err(|source| RouterError::Serialize { source })?;
        Ok(Outcome::Document(payload))
    }

    /// Invoke each registered loader at most once with the full pending
    /// batch for its type, then merge the results into the tracker.
    async fn load_pending(
        &self,
        ctx: &RequestContext,
        req: &mut RoutedRequest,
    ) -> Result<(), RouterError> {
        let batches: Vec<(String, Vec<String>, Arc<dyn ResourceLoader>)> = self
            .loaders
            .iter()
            .filter_map(|(res_type, loader)| {
                let ids = req.includes.pending_load_ids(res_type);
                if ids.is_empty() {
                    None
                } else {
                    Some((res_type.clone(), ids, Arc::clone(loader)))
                }
            })
            .collect();

        if self.config.concurrent_loads {
            // Loads run concurrently; merging stays on this task, after
            // every future has resolved, so flush sees a consistent state.
            let loads = batches.into_iter().map(|(res_type, ids, loader)| async move {
                debug!(res_type = %res_type, count = ids.len(), "batch load");
                match loader.load(&ids, ctx).await {
                    Ok(resources) => Ok((res_type, resources)),
                    Err(source) => Err(RouterError::LoaderFailure { res_type, source }),
                }
            });
            for (res_type, resources) in try_join_all(loads).await? {
                req.includes.hold_resources(&res_type, resources);
            }
        } else {
            for (res_type, ids, loader) in batches {
                debug!(res_type = %res_type, count = ids.len(), "batch load");
                let resources = loader
                    .load(&ids, ctx)
                    .await
                    .map_err(|source| RouterError::LoaderFailure {
                        res_type: res_type.clone(),
                        source,
                    })?;
                req.includes.hold_resources(&res_type, resources);
            }
        }
        Ok(())
    }
}

/// Result of a pipeline run that did not fail outright.
enum Outcome {
    /// Serialized document for an `Ok` response.
    Document(Vec<u8>),
    /// Short-circuit response with an empty document.
    Status(ResponseStatus),
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Pipeline failures. Classification and registration problems map to
/// client-visible statuses; loader, inclusion, and serialization failures
/// all map to a server error so a partial document is never sent.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("no handler registered for {kind:?} on {res_type} (rel: {rel_name:?})")]
    HandlerNotFound {
        kind: HandlerKind,
        res_type: String,
        rel_name: Option<String>,
    },
    #[error("loader for {res_type} failed")]
    LoaderFailure {
        res_type: String,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Include(#[from] IncludeError),
    #[error("document serialization failed")]
    Serialize {
        #[source]
        source: anyhow::Error,
    },
}

impl RouterError {
    /// The user-visible status for this failure.
    #[must_use]
    pub fn response_status(&self) -> ResponseStatus {
        match self {
            Self::Classify(_) => ResponseStatus::BadRequest,
            Self::HandlerNotFound { .. } => ResponseStatus::NotImplemented,
            Self::LoaderFailure { .. } | Self::Include(_) | Self::Serialize { .. } => {
                ResponseStatus::ServerError
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use resrouter_core::document::{Collection, Document, PrimaryData};
    use resrouter_core::resource::{RelValue, Resource};
    use resrouter_core::schema::{Attr, ResourceType, TwoWayRel};

    use super::*;

    fn test_schema() -> Arc<Schema> {
        let mut schema = Schema::new();
        for (name, attr) in [("articles", "title"), ("tags", "name"), ("users", "username")] {
            let mut res_type = ResourceType::new(name);
            res_type
                .add_attr(Attr {
                    name: attr.to_string(),
                })
                .unwrap();
            schema.add_type(res_type).unwrap();
        }
        schema
            .add_two_way_rel(TwoWayRel {
                from_type: "articles".to_string(),
                from_name: "author".to_string(),
                to_one: true,
                to_type: "users".to_string(),
                to_name: "articles".to_string(),
                from_one: false,
            })
            .unwrap();
        schema
            .add_two_way_rel(TwoWayRel {
                from_type: "articles".to_string(),
                from_name: "tags".to_string(),
                to_one: false,
                to_type: "tags".to_string(),
                to_name: "articles".to_string(),
                from_one: false,
            })
            .unwrap();
        schema.check().unwrap();
        Arc::new(schema)
    }

    // -- test doubles -------------------------------------------------------

    /// Sink capturing the single response a request produces.
    #[derive(Default)]
    struct TestSink {
        sent: Vec<(ResponseStatus, Vec<u8>)>,
    }

    impl ResponseSink for TestSink {
        fn send(&mut self, status: ResponseStatus, payload: Vec<u8>) {
            self.sent.push((status, payload));
        }
    }

    /// Serializer recording the document shape it was handed.
    #[derive(Default)]
    struct RecordingSerializer {
        included_counts: Mutex<Vec<usize>>,
    }

    impl Serializer for RecordingSerializer {
        fn serialize(&self, doc: &Document, _url: &UrlDescriptor) -> anyhow::Result<Vec<u8>> {
            self.included_counts.lock().unwrap().push(doc.included_len());
            Ok(format!("included={}", doc.included_len()).into_bytes())
        }
    }

    /// Handler producing the articles A (tags T1, T2) and B (tags T1)
    /// fixture and recording tags linkage.
    struct ArticlesHandler;

    #[async_trait]
    impl RouteHandler for ArticlesHandler {
        async fn handle(
            &self,
            _sink: &mut dyn ResponseSink,
            _ctx: &RequestContext,
            req: &mut RoutedRequest,
        ) -> HandlerStatus {
            let mut col = Collection::new("articles");
            for (id, tags) in [("A", vec!["T1", "T2"]), ("B", vec!["T1"])] {
                let article = Resource::new("articles", id).with_rel(
                    "tags",
                    RelValue::ToMany(tags.into_iter().map(ToString::to_string).collect()),
                );
                col.push(article).unwrap();
            }
            req.doc.data = PrimaryData::Many(col);
            req.doc.add_linkage("articles", "tags");
            HandlerStatus::Ok
        }
    }

    /// Handler returning a fixed status without touching the document.
    struct StatusHandler(HandlerStatus);

    #[async_trait]
    impl RouteHandler for StatusHandler {
        async fn handle(
            &self,
            _sink: &mut dyn ResponseSink,
            _ctx: &RequestContext,
            _req: &mut RoutedRequest,
        ) -> HandlerStatus {
            self.0
        }
    }

    /// Loader serving tag resources from a fixed id set and recording every
    /// batch it is asked for.
    struct TagLoader {
        known: Vec<&'static str>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl TagLoader {
        fn new(known: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                known,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ResourceLoader for TagLoader {
        async fn load(
            &self,
            ids: &[String],
            _ctx: &RequestContext,
        ) -> anyhow::Result<Vec<Resource>> {
            self.calls.lock().unwrap().push(ids.to_vec());
            Ok(ids
                .iter()
                .filter(|id| self.known.contains(&id.as_str()))
                .map(|id| Resource::new("tags", id.clone()))
                .collect())
        }
    }

    /// Loader that always fails.
    struct FailingLoader;

    #[async_trait]
    impl ResourceLoader for FailingLoader {
        async fn load(
            &self,
            _ids: &[String],
            _ctx: &RequestContext,
        ) -> anyhow::Result<Vec<Resource>> {
            anyhow::bail!("backend unavailable")
        }
    }

    fn articles_url_with_tags() -> UrlDescriptor {
        let mut url = UrlDescriptor::collection("articles");
        url.request_field("articles", "tags");
        url.request_linkage("articles", "tags");
        url
    }

    // -- tests --------------------------------------------------------------

    #[tokio::test]
    async fn compound_document_scenario() {
        let serializer = Arc::new(RecordingSerializer::default());
        let mut router = Router::new(test_schema(), serializer.clone());
        router.get_collection("articles", Arc::new(ArticlesHandler)).unwrap();
        let loader = TagLoader::new(vec!["T1", "T2"]);
        router.register_loader("tags", loader.clone()).unwrap();

        let mut sink = TestSink::default();
        let status = router
            .handle(
                &mut sink,
                &RequestContext::new("t-1"),
                Method::GET,
                articles_url_with_tags(),
            )
            .await;

        assert_eq!(status, ResponseStatus::Ok);
        // One batch, deduplicated and sorted: T1 referenced twice, T2 once.
        assert_eq!(*loader.calls.lock().unwrap(), vec![vec!["T1", "T2"]]);
        // Exactly two tags reached the document.
        assert_eq!(*serializer.included_counts.lock().unwrap(), vec![2]);
        assert_eq!(sink.sent.len(), 1);
        assert_eq!(sink.sent[0].1, b"included=2");
    }

    #[tokio::test]
    async fn unauthorized_skips_scan_load_flush() {
        let serializer = Arc::new(RecordingSerializer::default());
        let mut router = Router::new(test_schema(), serializer.clone());
        router
            .get_collection("articles", Arc::new(StatusHandler(HandlerStatus::Unauthorized)))
            .unwrap();
        let loader = TagLoader::new(vec!["T1"]);
        router.register_loader("tags", loader.clone()).unwrap();

        let mut sink = TestSink::default();
        let status = router
            .handle(
                &mut sink,
                &RequestContext::new("t-2"),
                Method::GET,
                articles_url_with_tags(),
            )
            .await;

        assert_eq!(status, ResponseStatus::Forbidden);
        assert!(loader.calls.lock().unwrap().is_empty());
        assert!(serializer.included_counts.lock().unwrap().is_empty());
        // Forbidden response with an empty document.
        assert_eq!(sink.sent, vec![(ResponseStatus::Forbidden, Vec::new())]);
    }

    #[tokio::test]
    async fn handler_not_found_maps_to_not_implemented() {
        let mut sink = TestSink::default();
        let router = Router::new(test_schema(), Arc::new(RecordingSerializer::default()));
        let status = router
            .handle(
                &mut sink,
                &RequestContext::new("t-3"),
                Method::GET,
                UrlDescriptor::collection("articles"),
            )
            .await;
        assert_eq!(status, ResponseStatus::NotImplemented);
    }

    #[tokio::test]
    async fn unsupported_method_maps_to_bad_request() {
        let mut sink = TestSink::default();
        let router = Router::new(test_schema(), Arc::new(RecordingSerializer::default()));
        let status = router
            .handle(
                &mut sink,
                &RequestContext::new("t-4"),
                Method::PUT,
                UrlDescriptor::collection("articles"),
            )
            .await;
        assert_eq!(status, ResponseStatus::BadRequest);
    }

    #[tokio::test]
    async fn loader_failure_aborts_request() {
        let serializer = Arc::new(RecordingSerializer::default());
        let mut router = Router::new(test_schema(), serializer.clone());
        router.get_collection("articles", Arc::new(ArticlesHandler)).unwrap();
        router.register_loader("tags", Arc::new(FailingLoader)).unwrap();

        let mut sink = TestSink::default();
        let status = router
            .handle(
                &mut sink,
                &RequestContext::new("t-5"),
                Method::GET,
                articles_url_with_tags(),
            )
            .await;

        assert_eq!(status, ResponseStatus::ServerError);
        // No partial document was serialized.
        assert!(serializer.included_counts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unresolved_inclusion_aborts_request() {
        let serializer = Arc::new(RecordingSerializer::default());
        let mut router = Router::new(test_schema(), serializer.clone());
        router.get_collection("articles", Arc::new(ArticlesHandler)).unwrap();
        // Loader only knows T1; T2 stays unresolved.
        let loader = TagLoader::new(vec!["T1"]);
        router.register_loader("tags", loader).unwrap();

        let mut sink = TestSink::default();
        let status = router
            .handle(
                &mut sink,
                &RequestContext::new("t-6"),
                Method::GET,
                articles_url_with_tags(),
            )
            .await;

        assert_eq!(status, ResponseStatus::ServerError);
        assert!(serializer.included_counts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_loads_produce_the_same_document() {
        let serializer = Arc::new(RecordingSerializer::default());
        let mut router = Router::with_config(
            test_schema(),
            serializer.clone(),
            RouterConfig {
                concurrent_loads: true,
            },
        );
        router.get_collection("articles", Arc::new(ArticlesHandler)).unwrap();
        let loader = TagLoader::new(vec!["T1", "T2"]);
        router.register_loader("tags", loader.clone()).unwrap();

        let mut sink = TestSink::default();
        let status = router
            .handle(
                &mut sink,
                &RequestContext::new("t-7"),
                Method::GET,
                articles_url_with_tags(),
            )
            .await;

        assert_eq!(status, ResponseStatus::Ok);
        assert_eq!(*loader.calls.lock().unwrap(), vec![vec!["T1", "T2"]]);
        assert_eq!(*serializer.included_counts.lock().unwrap(), vec![2]);
    }

    /// Handler that pre-seeds one tag it already has; the loader should only
    /// be asked for the rest.
    struct PreSeedingHandler;

    #[async_trait]
    impl RouteHandler for PreSeedingHandler {
        async fn handle(
            &self,
            _sink: &mut dyn ResponseSink,
            _ctx: &RequestContext,
            req: &mut RoutedRequest,
        ) -> HandlerStatus {
            let article = Resource::new("articles", "A").with_rel(
                "tags",
                RelValue::ToMany(vec!["T1".to_string(), "T2".to_string()]),
            );
            let mut col = Collection::new("articles");
            col.push(article).unwrap();
            req.doc.data = PrimaryData::Many(col);
            req.doc.add_linkage("articles", "tags");
            req.includes.hold_resource(Resource::new("tags", "T1"));
            HandlerStatus::Ok
        }
    }

    #[tokio::test]
    async fn pre_seeded_resources_skip_the_loader() {
        let serializer = Arc::new(RecordingSerializer::default());
        let mut router = Router::new(test_schema(), serializer.clone());
        router.get_collection("articles", Arc::new(PreSeedingHandler)).unwrap();
        let loader = TagLoader::new(vec!["T2"]);
        router.register_loader("tags", loader.clone()).unwrap();

        let mut sink = TestSink::default();
        let status = router
            .handle(
                &mut sink,
                &RequestContext::new("t-8"),
                Method::GET,
                articles_url_with_tags(),
            )
            .await;

        assert_eq!(status, ResponseStatus::Ok);
        assert_eq!(*loader.calls.lock().unwrap(), vec![vec!["T2"]]);
        assert_eq!(*serializer.included_counts.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn duplicate_registration_fails_at_setup() {
        let mut router = Router::new(test_schema(), Arc::new(RecordingSerializer::default()));
        router.get_collection("articles", Arc::new(ArticlesHandler)).unwrap();
        let err = router
            .get_collection("articles", Arc::new(ArticlesHandler))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateHandler { .. }));

        router.register_loader("tags", TagLoader::new(vec![])).unwrap();
        let err = router
            .register_loader("tags", TagLoader::new(vec![]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateLoader { .. }));
    }
}
