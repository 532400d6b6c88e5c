//! Search configuration for the web search tool

use chrono::NaiveDate;
use serde::Deserialize;

use crate::linkup::{Depth, OutputType, SearchParams};

/// Default credential, read when the tool is constructed
pub const API_KEY_ENV: &str = "LINKUP_API_KEY";
/// Base URL override, read on every call
pub const BASE_URL_ENV: &str = "LINKUP_BASE_URL";

/// Search-tuning fields merged into every query
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub depth: Option<Depth>,
    pub include_images: Option<bool>,
    pub include_domains: Option<Vec<String>>,
    pub exclude_domains: Option<Vec<String>>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl SearchOptions {
    /// Request for `query` in the search-results output form.
    pub fn to_params(&self, query: impl Into<String>) -> SearchParams {
        SearchParams {
            query: query.into(),
            depth: self.depth,
            output_type: OutputType::SearchResults,
            include_images: self.include_images,
            include_domains: self.include_domains.clone(),
            exclude_domains: self.exclude_domains.clone(),
            from_date: self.from_date,
            to_date: self.to_date,
            include_sources: None,
            structured_output_schema: None,
        }
    }
}

/// Tool configuration: search options plus an optional credential.
///
/// `SearchConfig::default()` only selects standard depth. A config built any
/// other way (including deserialization) carries exactly the fields given.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    #[serde(flatten)]
    pub options: SearchOptions,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            options: SearchOptions {
                depth: Some(Depth::Standard),
                ..Default::default()
            },
            api_key: None,
        }
    }
}

impl From<SearchOptions> for SearchConfig {
    fn from(options: SearchOptions) -> Self {
        Self {
            options,
            api_key: None,
        }
    }
}

impl SearchConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Split into credential and options, falling back to `LINKUP_API_KEY`.
    pub fn resolve(self) -> (Option<String>, SearchOptions) {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Same as [`SearchConfig::resolve`] with a custom environment lookup.
    pub fn resolve_with<F>(self, lookup: F) -> (Option<String>, SearchOptions)
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let api_key = match self.api_key {
            Some(key) => Some(key),
            None => lookup(API_KEY_ENV),
        };
        (api_key, self.options)
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("options", &self.options)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
