//! Web search tool using the Linkup Search API
//!
//! The tool validates a single non-empty query, builds a fresh Linkup client
//! per call and hands the raw response back to the agent.

use crate::config::{SearchConfig, SearchOptions, BASE_URL_ENV};
use crate::linkup::{
    ClientOptions, Connect, LinkupConnector, LinkupError, SearchBackend, SearchResponse,
};
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Prefix on every provider failure surfaced by the tool
pub const PROVIDER_ERROR_TAG: &str = "Linkup Search error: ";

const DESCRIPTION: &str = "Search the web in real time with Linkup for current information, facts and news from trusted sources. \
    Use it for live data (weather, stock prices, sports scores, schedules), breaking news, recent research, product details \
    and anything outside your training data. Returns content from the most relevant sources.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query must not be empty")]
    Empty,
}

#[derive(Debug, Error)]
pub enum WebSearchError {
    #[error("Invalid query: {0}")]
    Validation(#[from] QueryError),
    #[error("LINKUP_API_KEY is required. Set it in environment variables or pass it in config.")]
    MissingApiKey,
    #[error("Linkup Search error: {0}")]
    Provider(String),
    /// Failures without a message, returned as the client produced them
    #[error(transparent)]
    Client(LinkupError),
}

/// A search query of at least one character
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Query(String);

impl Query {
    pub fn new(query: impl Into<String>) -> Result<Self, QueryError> {
        let query = query.into();
        if query.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(query))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Query {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl JsonSchema for Query {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "Query".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "minLength": 1
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WebSearchArgs {
    #[schemars(
        description = "Natural language search query. Full questions work best, e.g. \"How does the new EU AI Act affect startups?\""
    )]
    pub query: Query,
}

fn parameters_schema() -> serde_json::Value {
    let mut schema = schemars::schema_for!(WebSearchArgs).to_value();
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    schema
}

pub struct WebSearch<C = LinkupConnector> {
    connector: Arc<C>,
    api_key: Option<String>,
    options: SearchOptions,
    base_url: Option<String>,
}

impl<C> Clone for WebSearch<C> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
            api_key: self.api_key.clone(),
            options: self.options.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C> std::fmt::Debug for WebSearch<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearch")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("options", &self.options)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl WebSearch {
    /// Tool backed by the real Linkup API. The credential is resolved now.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_connector(config, LinkupConnector)
    }
}

impl Default for WebSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<C: Connect> WebSearch<C> {
    pub fn with_connector(config: SearchConfig, connector: C) -> Self {
        let (api_key, options) = config.resolve();
        Self::from_parts(api_key, options, connector)
    }

    /// Build from an already resolved credential.
    pub fn from_parts(api_key: Option<String>, options: SearchOptions, connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            api_key,
            options,
            base_url: None,
        }
    }

    /// Pin the base URL instead of reading `LINKUP_BASE_URL` on each call.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Validate `query` and run it.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, WebSearchError> {
        let query = Query::new(query)?;
        self.execute(query).await
    }

    async fn execute(&self, query: Query) -> Result<SearchResponse, WebSearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(WebSearchError::MissingApiKey)?;

        let base_url = self
            .base_url
            .clone()
            .or_else(|| std::env::var(BASE_URL_ENV).ok());

        let client = self
            .connector
            .connect(ClientOptions {
                api_key: api_key.to_string(),
                base_url,
            })
            .map_err(WebSearchError::Client)?;

        debug!("Searching Linkup for: {}", query.as_str());
        let params = self.options.to_params(query.into_inner());

        match client.search(params).await {
            Ok(response) => Ok(response),
            Err(e) => match e.message() {
                Some(message) => {
                    warn!("Linkup search failed: {}", e);
                    Err(WebSearchError::Provider(message))
                }
                None => Err(WebSearchError::Client(e)),
            },
        }
    }
}

impl<C: Connect> Tool for WebSearch<C> {
    const NAME: &'static str = "web_search";
    type Error = WebSearchError;
    type Args = WebSearchArgs;
    type Output = SearchResponse;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: DESCRIPTION.to_string(),
            parameters: parameters_schema(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        self.execute(args.query).await
    }
}
