//! Candidate search: gated traversal, scoring, ranking
//!
//! The read path: compile the request, embed its query text, collect the
//! gated candidate set (whole set, no pagination), score each candidate,
//! then rank. No writes, no partial results on failure.

pub mod engine;
pub mod params;
pub mod rank;
pub mod scoring;

use crate::embed::{EmbedError, EmbeddingProvider};
use crate::graph::GraphStore;
use crate::ingest::CandidateId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub use engine::{collect_matches, CandidateMatch, EducationRecord, LocationRecord};
pub use params::{Criteria, GateClause, SearchParams, SearchRequest, SoftClause, TextCriterion};
pub use rank::{rank, DEFAULT_TOP_K};
pub use scoring::{cosine_similarity, score_candidate, CriterionScores};

/// Search failures. The read path performs no writes; an embedding
/// failure aborts the whole search with no partial results.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbedError),
}

/// One ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub candidate_id: CandidateId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub years_experience: f64,
    pub resume_file_url: String,
    pub analysis_file_url: String,
    pub matched_skills: Vec<String>,
    pub total_skills: Vec<String>,
    pub matched_roles: Vec<String>,
    pub current_designation: Option<String>,
    pub locations: Vec<LocationRecord>,
    pub education: Vec<EducationRecord>,
    pub companies: Vec<String>,
    #[serde(flatten)]
    pub scores: CriterionScores,
}

/// Answers multi-criteria relevance queries against the shared store
pub struct SearchEngine {
    store: Arc<RwLock<GraphStore>>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SearchEngine {
    pub fn new(store: Arc<RwLock<GraphStore>>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embedder }
    }

    /// Run a search: hard gates exclude, soft criteria and embedding
    /// similarity rank, results are truncated to `top_k`.
    pub async fn search(
        &self,
        params: &SearchParams,
        from_experience: f64,
        to_experience: Option<f64>,
        top_k: usize,
        similarity_threshold: f64,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let request = SearchRequest::compile(params, from_experience, to_experience);

        let query_text = request.criteria.query_text();
        let query_embedding = if query_text.is_empty() {
            None
        } else {
            Some(self.embedder.embed(&query_text).await?)
        };

        let matches = {
            let store = self.store.read().await;
            collect_matches(&store, &request)
        };
        debug!(
            gated = matches.len(),
            query = %query_text,
            "collected gated candidate set"
        );

        let scored = matches
            .into_iter()
            .map(|candidate| {
                let scores = score_candidate(
                    &request.criteria,
                    &candidate,
                    query_embedding.as_deref(),
                );
                into_result(candidate, scores)
            })
            .collect();

        let ranked = rank(scored, top_k, similarity_threshold);
        info!(results = ranked.len(), top_k, "search complete");
        Ok(ranked)
    }
}

fn into_result(candidate: CandidateMatch, scores: CriterionScores) -> SearchResult {
    SearchResult {
        candidate_id: candidate.candidate_id,
        name: candidate.name,
        email: candidate.email,
        phone: candidate.phone,
        years_experience: candidate.years_experience,
        resume_file_url: candidate.resume_file_url,
        analysis_file_url: candidate.analysis_file_url,
        matched_skills: candidate.matched_skills,
        total_skills: candidate.total_skills,
        matched_roles: candidate.matched_roles,
        current_designation: candidate.current_designation,
        locations: candidate.locations,
        education: candidate.education,
        companies: candidate.companies,
        scores,
    }
}
