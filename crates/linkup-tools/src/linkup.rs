//! Linkup Search API client
//!
//! Thin client for `POST /v1/search`:
//! - request parameters with the Linkup wire names
//! - opaque response pass-through with an optional typed view
//! - status/code aware error taxonomy
//!
//! The web search tool reaches the client through [`Connect`] and
//! [`SearchBackend`], so a fresh client is built per call and tests can swap
//! in their own backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

pub const LINKUP_API_BASE: &str = "https://api.linkup.so/v1";

#[derive(Debug, thiserror::Error)]
pub enum LinkupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
    #[error("no result: {message}")]
    NoResult { message: String },
    #[error("authentication failed: {message}")]
    Authentication { message: String },
    #[error("insufficient credit: {message}")]
    InsufficientCredit { message: String },
    #[error("too many requests: {message}")]
    TooManyRequests { message: String },
    #[error("API error: {status} - {message}")]
    Unknown { status: u16, message: String },
    /// Message-carrying failure for custom [`SearchBackend`]s
    #[error("{0}")]
    Other(String),
    /// Failure body without any message text.
    #[error("Linkup failure without message: {0}")]
    Opaque(serde_json::Value),
}

impl LinkupError {
    /// Original message text, without the category label shown by `Display`.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Http(e) => Some(e.to_string()),
            Self::InvalidRequest { message }
            | Self::NoResult { message }
            | Self::Authentication { message }
            | Self::InsufficientCredit { message }
            | Self::TooManyRequests { message }
            | Self::Unknown { message, .. }
            | Self::Other(message) => Some(message.clone()),
            Self::Opaque(_) => None,
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Search depth: `standard` is fast, `deep` runs an agentic multi-step search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    #[default]
    Standard,
    Deep,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown search depth '{0}', expected 'standard' or 'deep'")]
pub struct ParseDepthError(String);

impl FromStr for Depth {
    type Err = ParseDepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "deep" => Ok(Self::Deep),
            _ => Err(ParseDepthError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputType {
    #[default]
    SearchResults,
    SourcedAnswer,
    Structured,
}

/// Body of a search request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(rename = "q")]
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<Depth>,
    pub output_type: OutputType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_images: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    /// Only meaningful with `OutputType::Structured`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_sources: Option<bool>,
    /// JSON schema string, required by `OutputType::Structured`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_output_schema: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Raw Linkup response, kept exactly as returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResponse(pub serde_json::Value);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult {
    Text {
        name: String,
        url: String,
        content: String,
    },
    Image {
        name: String,
        url: String,
    },
}

impl SearchResponse {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Typed view over a `searchResults` payload. Missing `results` yields an
    /// empty list.
    pub fn results(&self) -> Result<Vec<SearchResult>, serde_json::Error> {
        match self.0.get("results") {
            Some(results) => serde_json::from_value(results.clone()),
            None => Ok(Vec::new()),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub api_key: String,
    /// Overrides [`LINKUP_API_BASE`]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Clone)]
pub struct LinkupClient {
    client: reqwest::Client,
    api_key: Arc<String>,
    base_url: String,
}

impl LinkupClient {
    pub fn new(options: ClientOptions) -> Result<Self, LinkupError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("linkup-tools/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = options
            .base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(LINKUP_API_BASE)
            .to_string();

        Ok(Self {
            client,
            api_key: Arc::new(options.api_key),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse, LinkupError> {
        let url = format!("{}/search", self.base_url);
        debug!(
            "Linkup search (depth: {:?}, output: {:?})",
            params.depth, params.output_type
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.as_str())
            .header("Accept", "application/json")
            .json(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let error = refine_error(status.as_u16(), &body);
            warn!("Linkup search failed: {}", error);
            return Err(error);
        }

        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for LinkupClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkupClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    field: String,
    #[serde(default)]
    message: String,
}

/// Map a non-2xx response onto the error taxonomy.
fn refine_error(status: u16, body: &str) -> LinkupError {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let message = if body.trim().is_empty() {
            "empty response body".to_string()
        } else {
            body.to_string()
        };
        return LinkupError::Unknown { status, message };
    };

    let error = match serde_json::from_value::<ErrorEnvelope>(value.clone()) {
        Ok(ErrorEnvelope { error: Some(error) }) => error,
        _ => {
            return LinkupError::Unknown {
                status,
                message: body.to_string(),
            }
        }
    };

    let Some(mut message) = error.message.filter(|m| !m.is_empty()) else {
        return LinkupError::Opaque(value);
    };

    if !error.details.is_empty() {
        let details = error
            .details
            .iter()
            .map(|d| format!("{}: {}", d.field, d.message))
            .collect::<Vec<_>>()
            .join(", ");
        message = format!("{} ({})", message, details);
    }

    match (status, error.code.as_deref()) {
        (400, Some("SEARCH_QUERY_NO_RESULT")) => LinkupError::NoResult { message },
        (400, _) => LinkupError::InvalidRequest { message },
        (401 | 403, _) => LinkupError::Authentication { message },
        (402, _) | (429, Some("INSUFFICIENT_FUNDS_CREDITS")) => {
            LinkupError::InsufficientCredit { message }
        }
        (429, Some("TOO_MANY_REQUESTS")) => LinkupError::TooManyRequests { message },
        _ => LinkupError::Unknown { status, message },
    }
}

// ============================================================================
// Backend Seams
// ============================================================================

/// Something that can run a Linkup search
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, params: SearchParams) -> Result<SearchResponse, LinkupError>;
}

/// Builds a search backend for a single call
pub trait Connect: Send + Sync {
    type Backend: SearchBackend;

    fn connect(&self, options: ClientOptions) -> Result<Self::Backend, LinkupError>;
}

#[async_trait]
impl SearchBackend for LinkupClient {
    async fn search(&self, params: SearchParams) -> Result<SearchResponse, LinkupError> {
        LinkupClient::search(self, &params).await
    }
}

/// Connects to the real Linkup API
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkupConnector;

impl Connect for LinkupConnector {
    type Backend = LinkupClient;

    fn connect(&self, options: ClientOptions) -> Result<LinkupClient, LinkupError> {
        LinkupClient::new(options)
    }
}
