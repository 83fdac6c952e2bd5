//! Edge implementation for the candidate graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, NodeId, RelType};
use serde::{Deserialize, Serialize};

/// A directed, typed edge in the candidate graph.
///
/// Edges always run from a Candidate node to one of its referenced
/// entities, and carry the attributes of the relationship (e.g. the
/// `order` of a past employer, the `locationType` of a location).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Type of relationship
    pub rel_type: RelType,

    /// Properties associated with this edge
    pub properties: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, rel_type: RelType) -> Self {
        Edge {
            id,
            source,
            target,
            rel_type,
            properties: PropertyMap::new(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Create a new edge with properties
    pub fn new_with_properties(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        rel_type: RelType,
        properties: PropertyMap,
    ) -> Self {
        Edge {
            id,
            source,
            target,
            rel_type,
            properties,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Get a string property
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_string())
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, node: NodeId) -> bool {
        self.source == node
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, node: NodeId) -> bool {
        self.target == node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_edge() {
        let edge = Edge::new(
            EdgeId::new(1),
            NodeId::new(10),
            NodeId::new(20),
            RelType::HasSkill,
        );
        assert_eq!(edge.id, EdgeId::new(1));
        assert_eq!(edge.rel_type, RelType::HasSkill);
        assert!(edge.starts_from(NodeId::new(10)));
        assert!(edge.ends_at(NodeId::new(20)));
    }

    #[test]
    fn test_edge_properties() {
        let mut props = PropertyMap::new();
        props.insert("isCurrent".to_string(), false.into());
        props.insert("order".to_string(), 2i64.into());

        let edge = Edge::new_with_properties(
            EdgeId::new(2),
            NodeId::new(1),
            NodeId::new(2),
            RelType::WorksAt,
            props,
        );

        assert_eq!(
            edge.get_property("isCurrent").unwrap().as_boolean(),
            Some(false)
        );
        assert_eq!(edge.get_property("order").unwrap().as_integer(), Some(2));
    }
}
