//! Service wiring
//!
//! Owns the shared store handle and the embedding provider, and hands
//! both to the ingestion and search engines. The store's lifecycle (open
//! at service start, dropped at shutdown) belongs here, not to each
//! operation.

use crate::config::ServiceConfig;
use crate::embed::{EmbedError, EmbeddingProvider, HttpEmbeddingClient};
use crate::graph::GraphStore;
use crate::ingest::{CandidateId, IngestEngine, IngestError};
use crate::search::{SearchEngine, SearchError, SearchParams, SearchResult};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct TalentGraphService {
    store: Arc<RwLock<GraphStore>>,
    ingest: IngestEngine,
    search: SearchEngine,
    config: ServiceConfig,
}

impl TalentGraphService {
    /// Build the service with the configured HTTP embedding client
    pub fn new(config: ServiceConfig) -> Result<Self, EmbedError> {
        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(HttpEmbeddingClient::new(&config.embed)?);
        Ok(Self::with_embedder(config, embedder))
    }

    /// Build the service around an explicit embedding provider
    pub fn with_embedder(config: ServiceConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        let store = Arc::new(RwLock::new(GraphStore::new()));
        let ingest = IngestEngine::new(Arc::clone(&store), Arc::clone(&embedder));
        let search = SearchEngine::new(Arc::clone(&store), embedder);
        Self {
            store,
            ingest,
            search,
            config,
        }
    }

    /// Shared handle to the underlying store
    pub fn store(&self) -> Arc<RwLock<GraphStore>> {
        Arc::clone(&self.store)
    }

    /// Ingest one analysis report; returns the new candidate's id
    pub async fn ingest(
        &self,
        report_text: &str,
        resume_url: &str,
        analysis_url: &str,
        years_of_experience: f64,
    ) -> Result<CandidateId, IngestError> {
        self.ingest
            .ingest(report_text, resume_url, analysis_url, years_of_experience)
            .await
    }

    /// Search candidates; `top_k` falls back to the configured default
    pub async fn search(
        &self,
        params: &SearchParams,
        from_experience: f64,
        to_experience: Option<f64>,
        top_k: Option<usize>,
        similarity_threshold: f64,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.search
            .search(
                params,
                from_experience,
                to_experience,
                top_k.unwrap_or(self.config.default_top_k),
                similarity_threshold,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::EmbedResult;
    use async_trait::async_trait;

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _text: &str) -> EmbedResult<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    #[tokio::test]
    async fn test_service_wires_both_paths_over_one_store() {
        let service =
            TalentGraphService::with_embedder(ServiceConfig::default(), Arc::new(FixedEmbedder));

        let report = "=== CANDIDATE PROFILE ===\nName: Jane Doe\n\n=== SKILLS ===\nPython\n";
        let id = service.ingest(report, "r", "a", 3.0).await.unwrap();

        let params = SearchParams {
            name: Some(crate::search::TextCriterion::One("Jane".to_string())),
            ..SearchParams::default()
        };
        let results = service.search(&params, 0.0, None, None, 0.4).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate_id, id);
        assert_eq!(results[0].scores.total_score, 1.0);
    }
}
