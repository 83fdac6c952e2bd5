//! Embedding provider collaborator
//!
//! Both ingestion (whole-report embedding) and search (query-text
//! embedding) go through [`EmbeddingProvider`]. Vectors are fixed-length
//! and L2-normalized by the provider; the store does not version-tag them
//! and assumes a single provider for its lifetime.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::HttpEmbeddingClient;

/// Embed errors
#[derive(Error, Debug)]
pub enum EmbedError {
    /// API error from the embedding provider
    #[error("embedding API error: {0}")]
    ApiError(String),

    /// Configuration error
    #[error("embedding configuration error: {0}")]
    ConfigError(String),

    /// Network error
    #[error("embedding network error: {0}")]
    NetworkError(String),

    /// Serialization/Deserialization error
    #[error("embedding serialization error: {0}")]
    SerializationError(String),
}

pub type EmbedResult<T> = Result<T, EmbedError>;

/// Supported embedding backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedProvider {
    OpenAI,
    Ollama,
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// The backend to use
    pub provider: EmbedProvider,
    /// Model name (e.g. "text-embedding-3-small", "all-minilm")
    pub model: String,
    /// API key (optional; Ollama needs none)
    pub api_key: Option<String>,
    /// API base URL (defaults per provider)
    pub api_base_url: Option<String>,
    /// Vector dimension size
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            provider: EmbedProvider::Ollama,
            model: "all-minilm".to_string(),
            api_key: None,
            api_base_url: None,
            dimensions: 384,
            timeout_secs: 30,
        }
    }
}

/// Text-to-vector collaborator interface.
///
/// Calls are synchronous from the caller's point of view and are not
/// retried internally; a failure surfaces as [`EmbedError`] and aborts the
/// operation that needed the vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text into a fixed-length, L2-normalized vector
    async fn embed(&self, text: &str) -> EmbedResult<Vec<f32>>;

    /// Dimensionality of the vectors this provider produces
    fn dimensions(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbedConfig::default();
        assert_eq!(config.provider, EmbedProvider::Ollama);
        assert_eq!(config.dimensions, 384);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_roundtrips_through_serde() {
        let config = EmbedConfig {
            provider: EmbedProvider::OpenAI,
            model: "text-embedding-3-small".to_string(),
            api_key: Some("sk-test".to_string()),
            api_base_url: None,
            dimensions: 1536,
            timeout_secs: 10,
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: EmbedConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.provider, EmbedProvider::OpenAI);
        assert_eq!(back.dimensions, 1536);
    }
}
