//! Linkup Tools - real-time web search for rig agents
//!
//! Modules:
//! - config: search options and credential resolution
//! - linkup: Linkup Search API client
//! - web_search: the `web_search` tool handed to an agent

pub mod config;
pub mod linkup;
pub mod web_search;

pub use config::{SearchConfig, SearchOptions, API_KEY_ENV, BASE_URL_ENV};
pub use linkup::{
    ClientOptions, Connect, Depth, LinkupClient, LinkupConnector, LinkupError, OutputType,
    SearchBackend, SearchParams, SearchResponse, SearchResult,
};
pub use web_search::{
    Query, QueryError, WebSearch, WebSearchArgs, WebSearchError, PROVIDER_ERROR_TAG,
};

/// Create a `web_search` tool. `LINKUP_API_KEY` is read here when the config
/// carries no key.
pub fn web_search(config: SearchConfig) -> WebSearch {
    WebSearch::new(config)
}
