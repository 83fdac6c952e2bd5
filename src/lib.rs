//! TalentGraph
//!
//! Stores candidate profiles extracted from résumés in an in-process
//! property graph and answers multi-criteria relevance queries against
//! it, combining exact/partial textual matches with vector-similarity
//! ranking.
//!
//! # Architecture
//!
//! - [`report`]: parses the canonical sectioned analysis report into a
//!   typed candidate record; never fails, fields degrade softly
//! - [`graph`]: the property graph store with typed nodes and
//!   relationships, natural-key merge for deduplicated entities, and a
//!   singleton sentinel for explicitly-unknown values
//! - [`embed`]: the embedding provider collaborator (trait + HTTP
//!   client)
//! - [`ingest`]: the write path; one new Candidate per report,
//!   merge-or-create for every referenced entity
//! - [`search`]: the read path; compiled predicate tree, hard gates,
//!   soft-scored criteria, weighted scoring, top-K ranking
//! - [`service`]: wires the shared store handle into both engines
//!
//! # Example
//!
//! ```rust
//! use talentgraph::graph::{GraphStore, NodeKind, PropertyMap, RelType};
//!
//! let mut store = GraphStore::new();
//!
//! let candidate = store.create_node(NodeKind::Candidate);
//!
//! // deduplicated entities merge on their natural key
//! let mut props = PropertyMap::new();
//! props.insert("name".to_string(), "Python".into());
//! let (skill, created) = store
//!     .merge_node(NodeKind::Skill, "python", props)
//!     .unwrap();
//! assert!(created);
//!
//! store.create_edge(candidate, skill, RelType::HasSkill).unwrap();
//! assert_eq!(store.node_count(), 2);
//! assert_eq!(store.edge_count(), 1);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod embed;
pub mod graph;
pub mod ingest;
pub mod report;
pub mod search;
pub mod service;

// Re-export main types for convenience
pub use config::ServiceConfig;
pub use embed::{EmbedConfig, EmbedError, EmbedProvider, EmbedResult, EmbeddingProvider, HttpEmbeddingClient};
pub use graph::{
    Edge, EdgeId, GraphError, GraphResult, GraphStore, Node, NodeId, NodeKind, PropertyMap,
    PropertyValue, RelType,
};
pub use ingest::{CandidateId, IngestEngine, IngestError};
pub use report::{parse_report, ParsedReport};
pub use search::{
    CriterionScores, SearchEngine, SearchError, SearchParams, SearchResult, DEFAULT_TOP_K,
};
pub use service::TalentGraphService;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "1.0.0");
    }
}
