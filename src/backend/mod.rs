use anyhow::Result;

mod http;
mod parse;

pub use self::http::HttpBackend;
pub use self::parse::{QueryResult, RawLink, RawNode, RawTopology};

/// Narrow interface over the three backend fetch flows, so the engine and the
/// UI never depend on transport mechanics.
pub trait Backend: Send + Sync {
    fn list_topologies(&self) -> Result<Vec<String>>;

    fn load_topology(&self, name: &str) -> Result<RawTopology>;

    fn submit_query(&self, expr: &str) -> Result<Vec<QueryResult>>;
}
