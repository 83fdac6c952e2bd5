//! Core type definitions for the candidate graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

/// Node kind. The candidate graph has a closed schema: every node carries
/// exactly one of these kinds.
///
/// `Unknown` is the singleton sentinel targeted by edges that record an
/// explicitly-unknown field value, as opposed to a field that was simply
/// absent from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum NodeKind {
    Candidate,
    Skill,
    Designation,
    Role,
    Company,
    Location,
    Education,
    Language,
    Link,
    Achievement,
    Project,
    Unknown,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Candidate => "Candidate",
            NodeKind::Skill => "Skill",
            NodeKind::Designation => "Designation",
            NodeKind::Role => "Role",
            NodeKind::Company => "Company",
            NodeKind::Location => "Location",
            NodeKind::Education => "Education",
            NodeKind::Language => "Language",
            NodeKind::Link => "Link",
            NodeKind::Achievement => "Achievement",
            NodeKind::Project => "Project",
            NodeKind::Unknown => "Unknown",
        }
    }

    /// Whether nodes of this kind are deduplicated by natural key.
    /// Candidate, Achievement and Project nodes are created fresh per
    /// occurrence; everything else is merged.
    pub fn is_deduplicated(&self) -> bool {
        !matches!(
            self,
            NodeKind::Candidate | NodeKind::Achievement | NodeKind::Project
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relationship type. All relationships are directed from the Candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum RelType {
    HasSkill,
    HasDesignation,
    WorksAt,
    StudiedAt,
    LocatedIn,
    Speaks,
    Achieved,
    WorkedOn,
    SuitableFor,
    HasLink,
    /// Edge to the sentinel node, tagged with a `field` property naming the
    /// explicitly-unknown field.
    FieldUnknown,
}

impl RelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelType::HasSkill => "HAS_SKILL",
            RelType::HasDesignation => "HAS_DESIGNATION",
            RelType::WorksAt => "WORKS_AT",
            RelType::StudiedAt => "STUDIED_AT",
            RelType::LocatedIn => "LOCATED_IN",
            RelType::Speaks => "SPEAKS",
            RelType::Achieved => "ACHIEVED",
            RelType::WorkedOn => "WORKED_ON",
            RelType::SuitableFor => "SUITABLE_FOR",
            RelType::HasLink => "HAS_LINK",
            RelType::FieldUnknown => "FIELD_UNKNOWN",
        }
    }
}

impl fmt::Display for RelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
