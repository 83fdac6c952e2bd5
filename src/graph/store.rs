//! In-memory candidate graph storage
//!
//! Nodes and edges live in append-only arenas; ids are assigned
//! sequentially and never reused (the ingestion lifecycle never deletes).
//! Two secondary indexes are maintained inline:
//!
//! - kind index: NodeKind -> node ids in creation order (the search
//!   traversal order, and the ranker's tie-break order)
//! - natural-key index: (NodeKind, key) -> NodeId, backing `merge_node`
//!   upserts so concurrent ingestions cannot race into duplicate entity
//!   nodes

use super::edge::Edge;
use super::node::Node;
use super::property::PropertyMap;
use super::types::{EdgeId, NodeId, NodeKind, RelType};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Node kind {0} has no natural key and cannot be merged")]
    NotDeduplicated(NodeKind),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory candidate graph store
#[derive(Debug, Default)]
pub struct GraphStore {
    /// Node arena; NodeId(n) lives at index n-1
    nodes: Vec<Node>,

    /// Edge arena; EdgeId(n) lives at index n-1
    edges: Vec<Edge>,

    /// Outgoing edges for each node (adjacency list, parallel to `nodes`)
    outgoing: Vec<Vec<EdgeId>>,

    /// Incoming edges for each node (adjacency list, parallel to `nodes`)
    incoming: Vec<Vec<EdgeId>>,

    /// Kind index: node ids in creation order
    kind_index: FxHashMap<NodeKind, Vec<NodeId>>,

    /// Natural-key index for deduplicated kinds
    natural_keys: FxHashMap<(NodeKind, String), NodeId>,

    /// The singleton sentinel node, once created
    sentinel: Option<NodeId>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            nodes: Vec::with_capacity(1024),
            edges: Vec::with_capacity(4096),
            outgoing: Vec::with_capacity(1024),
            incoming: Vec::with_capacity(1024),
            kind_index: FxHashMap::default(),
            natural_keys: FxHashMap::default(),
            sentinel: None,
        }
    }

    fn node_index(&self, id: NodeId) -> Option<usize> {
        let raw = id.as_u64();
        if raw >= 1 && (raw as usize) <= self.nodes.len() {
            Some((raw - 1) as usize)
        } else {
            None
        }
    }

    fn edge_index(&self, id: EdgeId) -> Option<usize> {
        let raw = id.as_u64();
        if raw >= 1 && (raw as usize) <= self.edges.len() {
            Some((raw - 1) as usize)
        } else {
            None
        }
    }

    /// Create a node with an auto-generated id
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        self.create_node_with_properties(kind, PropertyMap::new())
    }

    /// Create a node with an auto-generated id and initial properties
    pub fn create_node_with_properties(
        &mut self,
        kind: NodeKind,
        properties: PropertyMap,
    ) -> NodeId {
        let node_id = NodeId::new(self.nodes.len() as u64 + 1);
        let node = Node::new_with_properties(node_id, kind, properties);

        self.kind_index.entry(kind).or_default().push(node_id);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());

        node_id
    }

    /// Create-if-absent-else-reuse against the natural-key index.
    ///
    /// Returns the node id and whether the node was created by this call.
    /// On reuse the stored properties are left untouched (first write
    /// wins, as `MERGE ... ON CREATE SET` semantics demand).
    pub fn merge_node(
        &mut self,
        kind: NodeKind,
        natural_key: &str,
        properties: PropertyMap,
    ) -> GraphResult<(NodeId, bool)> {
        if !kind.is_deduplicated() {
            return Err(GraphError::NotDeduplicated(kind));
        }

        let key = (kind, natural_key.to_string());
        if let Some(&existing) = self.natural_keys.get(&key) {
            return Ok((existing, false));
        }

        let node_id = self.create_node_with_properties(kind, properties);
        self.natural_keys.insert(key, node_id);
        Ok((node_id, true))
    }

    /// Look up a deduplicated node by its natural key
    pub fn find_by_natural_key(&self, kind: NodeKind, natural_key: &str) -> Option<NodeId> {
        self.natural_keys
            .get(&(kind, natural_key.to_string()))
            .copied()
    }

    /// Get the singleton sentinel node, creating it on first use
    pub fn ensure_sentinel(&mut self) -> NodeId {
        if let Some(id) = self.sentinel {
            return id;
        }
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), "N/A".into());
        let id = self.create_node_with_properties(NodeKind::Unknown, props);
        self.sentinel = Some(id);
        id
    }

    /// Get the sentinel node id, if one has been created
    pub fn sentinel(&self) -> Option<NodeId> {
        self.sentinel
    }

    /// Get a node by id
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.node_index(id).map(|idx| &self.nodes[idx])
    }

    /// Get a mutable node by id
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.node_index(id).map(|idx| &mut self.nodes[idx])
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.node_index(id).is_some()
    }

    /// Create a directed edge between two existing nodes
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        rel_type: RelType,
    ) -> GraphResult<EdgeId> {
        self.create_edge_with_properties(source, target, rel_type, PropertyMap::new())
    }

    /// Create a directed edge with properties between two existing nodes
    pub fn create_edge_with_properties(
        &mut self,
        source: NodeId,
        target: NodeId,
        rel_type: RelType,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId> {
        let source_idx = self
            .node_index(source)
            .ok_or(GraphError::InvalidEdgeSource(source))?;
        let target_idx = self
            .node_index(target)
            .ok_or(GraphError::InvalidEdgeTarget(target))?;

        let edge_id = EdgeId::new(self.edges.len() as u64 + 1);
        let edge = Edge::new_with_properties(edge_id, source, target, rel_type, properties);

        self.edges.push(edge);
        self.outgoing[source_idx].push(edge_id);
        self.incoming[target_idx].push(edge_id);

        Ok(edge_id)
    }

    /// Get an edge by id
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index(id).map(|idx| &self.edges[idx])
    }

    /// All outgoing edges of a node, in creation order
    pub fn outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        match self.node_index(node_id).map(|idx| &self.outgoing[idx]) {
            Some(edge_ids) => edge_ids
                .iter()
                .filter_map(|&id| self.get_edge(id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// All incoming edges of a node, in creation order
    pub fn incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        match self.node_index(node_id).map(|idx| &self.incoming[idx]) {
            Some(edge_ids) => edge_ids
                .iter()
                .filter_map(|&id| self.get_edge(id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Outgoing edges of a node filtered by relationship type
    pub fn edges_from(&self, node_id: NodeId, rel_type: RelType) -> Vec<&Edge> {
        self.outgoing_edges(node_id)
            .into_iter()
            .filter(|e| e.rel_type == rel_type)
            .collect()
    }

    /// Target nodes reachable from a node over a relationship type,
    /// paired with the traversed edge
    pub fn neighbors_via(&self, node_id: NodeId, rel_type: RelType) -> Vec<(&Edge, &Node)> {
        self.edges_from(node_id, rel_type)
            .into_iter()
            .filter_map(|e| self.get_node(e.target).map(|n| (e, n)))
            .collect()
    }

    /// Node ids of a kind, in creation order
    pub fn node_ids_by_kind(&self, kind: NodeKind) -> &[NodeId] {
        self.kind_index
            .get(&kind)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes of a kind, in creation order
    pub fn nodes_by_kind(&self, kind: NodeKind) -> Vec<&Node> {
        self.node_ids_by_kind(kind)
            .iter()
            .filter_map(|&id| self.get_node(id))
            .collect()
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
