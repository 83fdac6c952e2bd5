//! Relevance scoring
//!
//! A pure function over the collected match sets: no store access, no
//! I/O. Each criterion contributes a raw score and a base weight; the
//! total renormalizes the weights over the criteria that actually
//! contributed (similarity is always treated as contributing).

use super::engine::CandidateMatch;
use super::params::Criteria;
use serde::{Deserialize, Serialize};

const SKILL_WEIGHT: f64 = 0.30;
const ROLE_WEIGHT: f64 = 0.25;
const LOCATION_WEIGHT: f64 = 0.15;
const EDUCATION_WEIGHT: f64 = 0.10;
const SIMILARITY_WEIGHT: f64 = 0.20;

/// Per-criterion scores plus the renormalized total
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScores {
    pub skill_score: f64,
    pub role_score: f64,
    pub location_score: f64,
    pub education_score: f64,
    pub similarity_score: f64,
    pub total_score: f64,
}

/// Cosine similarity between two vectors; 0.0 when either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += (*x as f64) * (*y as f64);
        norm_a += (*x as f64) * (*x as f64);
        norm_b += (*y as f64) * (*y as f64);
    }

    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Score one gated candidate against the requested criteria.
///
/// `query_embedding` is the embedding of the concatenated textual
/// representation of all requested criteria, or `None` when the query
/// text was empty.
pub fn score_candidate(
    criteria: &Criteria,
    candidate: &CandidateMatch,
    query_embedding: Option<&[f32]>,
) -> CriterionScores {
    let mut scores = CriterionScores::default();

    // name match is purely a gate; nothing further discriminates
    if criteria.name_only() {
        scores.total_score = 1.0;
        return scores;
    }

    if !criteria.skills.is_empty() {
        scores.skill_score = candidate.matched_skills.len() as f64 / criteria.skills.len() as f64;
    }

    if !criteria.roles.is_empty() {
        scores.role_score = candidate.matched_roles.len() as f64 / criteria.roles.len() as f64;
    }

    if !criteria.locations.is_empty() {
        let satisfied = criteria
            .locations
            .iter()
            .filter(|requested| {
                let requested_lower = requested.to_lowercase();
                candidate
                    .locations
                    .iter()
                    .any(|loc| loc.matches(&requested_lower))
            })
            .count();
        scores.location_score = (satisfied as f64 / criteria.locations.len() as f64).min(1.0);
    }

    if !criteria.education.is_empty() {
        let satisfied = criteria
            .education
            .iter()
            .filter(|requested| {
                let requested_lower = requested.to_lowercase();
                candidate
                    .education
                    .iter()
                    .any(|edu| edu.matches(&requested_lower))
            })
            .count();
        scores.education_score = (satisfied as f64 / criteria.education.len() as f64).min(1.0);
    }

    if let (Some(query), Some(candidate_embedding)) = (query_embedding, &candidate.embedding) {
        scores.similarity_score = cosine_similarity(query, candidate_embedding);
    }

    scores.total_score = total_score(&scores);
    scores
}

/// Weighted total over the active criteria only. A criterion is active
/// when its score is nonzero; similarity is always active. With nothing
/// contributing at all, the total is 0.
fn total_score(scores: &CriterionScores) -> f64 {
    let entries = [
        ("skill", scores.skill_score, SKILL_WEIGHT),
        ("role", scores.role_score, ROLE_WEIGHT),
        ("location", scores.location_score, LOCATION_WEIGHT),
        ("education", scores.education_score, EDUCATION_WEIGHT),
        ("similarity", scores.similarity_score, SIMILARITY_WEIGHT),
    ];

    if !entries.iter().any(|(_, score, _)| *score > 0.0) {
        return 0.0;
    }

    let active = |name: &str, score: f64| score > 0.0 || name == "similarity";
    let weight_sum: f64 = entries
        .iter()
        .filter(|(name, score, _)| active(name, *score))
        .map(|(_, _, weight)| weight)
        .sum();
    entries
        .iter()
        .filter(|(name, score, _)| active(name, *score))
        .map(|(_, score, weight)| score * weight)
        .sum::<f64>()
        / weight_sum
}
