//! Property graph model for candidate profiles
//!
//! The graph has a closed schema: a fixed set of node kinds and
//! relationship types (see [`types`]). Deduplicated kinds are merged by
//! natural key; Candidate, Achievement and Project nodes are always
//! created fresh.

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, NodeId, NodeKind, RelType};
