//! Service configuration
//!
//! Deserializable from a config file and overridable from `TALENTGRAPH_*`
//! environment variables. The embedding section mirrors the provider
//! client's needs; everything else has workable defaults.

use crate::embed::{EmbedConfig, EmbedProvider};
use crate::search::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Embedding provider settings
    pub embed: EmbedConfig,
    /// Result-set size when the caller does not pass top_k
    pub default_top_k: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            embed: EmbedConfig::default(),
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

impl ServiceConfig {
    /// Defaults overridden by whatever `TALENTGRAPH_*` variables are set
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(provider) = std::env::var("TALENTGRAPH_EMBED_PROVIDER") {
            match provider.to_lowercase().as_str() {
                "openai" => config.embed.provider = EmbedProvider::OpenAI,
                "ollama" => config.embed.provider = EmbedProvider::Ollama,
                _ => {}
            }
        }
        if let Ok(model) = std::env::var("TALENTGRAPH_EMBED_MODEL") {
            config.embed.model = model;
        }
        if let Ok(api_key) = std::env::var("TALENTGRAPH_EMBED_API_KEY") {
            config.embed.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("TALENTGRAPH_EMBED_BASE_URL") {
            config.embed.api_base_url = Some(base_url);
        }
        if let Ok(dimensions) = std::env::var("TALENTGRAPH_EMBED_DIMENSIONS") {
            if let Ok(dimensions) = dimensions.parse() {
                config.embed.dimensions = dimensions;
            }
        }
        if let Ok(top_k) = std::env::var("TALENTGRAPH_TOP_K") {
            if let Ok(top_k) = top_k.parse() {
                config.default_top_k = top_k;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.default_top_k, 20);
        assert_eq!(config.embed.provider, EmbedProvider::Ollama);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{"default_top_k": 5}"#;
        let config: ServiceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_top_k, 5);
        assert_eq!(config.embed.dimensions, 384);
    }
}
