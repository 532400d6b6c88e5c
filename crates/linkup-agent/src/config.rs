use anyhow::{Context, Result};
use linkup_tools::{Depth, SearchConfig, SearchOptions};

pub const DEFAULT_PROMPT: &str =
    "What was Microsoft's revenue last quarter and was it well perceived by the market?";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_model: String,

    /// Depth passed to every Linkup search
    pub linkup_depth: Depth,

    /// Upper bound on model/tool round trips for one prompt
    pub max_turns: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("OPENAI_API_KEY")
            .filter(|k| !k.is_empty())
            .context("OPENAI_API_KEY must be set")?;

        Ok(Self {
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),

            linkup_depth: match lookup("LINKUP_DEPTH") {
                Some(depth) => depth.parse().context("LINKUP_DEPTH must be standard or deep")?,
                None => Depth::Standard,
            },

            max_turns: lookup("AGENT_MAX_TURNS")
                .unwrap_or_else(|| "3".to_string())
                .parse()
                .context("AGENT_MAX_TURNS must be a positive integer")?,
        })
    }

    /// Search config for the web search tool; the Linkup key comes from the environment.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::from(SearchOptions {
            depth: Some(self.linkup_depth),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.linkup_depth, Depth::Standard);
        assert_eq!(config.max_turns, 3);
        assert_eq!(config.search_config().options.depth, Some(Depth::Standard));
        assert!(config.search_config().api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("LINKUP_DEPTH", "deep"),
            ("AGENT_MAX_TURNS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.linkup_depth, Depth::Deep);
        assert_eq!(config.max_turns, 5);
    }

    #[test]
    fn test_requires_openai_key() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_rejects_unknown_depth() {
        let err = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LINKUP_DEPTH", "shallow"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("LINKUP_DEPTH"));
    }
}
