/// Configuration for the document assembly pipeline.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// When `true`, per-type batch loads run concurrently; results are still
    /// merged by the request task before flush. When `false` (the default),
    /// loads run one type at a time in type order.
    pub concurrent_loads: bool,
}
