//! Gated graph traversal and per-criterion match-set collection
//!
//! Candidates are visited in creation order; hard gates exclude outright,
//! soft clauses only annotate. The full set of the candidate's skills,
//! designation, locations, education and employers is always collected
//! alongside the matched subsets, for the result payload.

use super::params::{GateClause, SearchRequest, SoftClause};
use crate::graph::{GraphStore, Node, NodeId, NodeKind, RelType};
use crate::ingest::CandidateId;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One candidate location, as collected for gating and the payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub location_type: Option<String>,
}

impl LocationRecord {
    /// Substring containment against a lowercased requested value, on any
    /// of the four name parts
    pub fn matches(&self, requested_lower: &str) -> bool {
        [&self.name, &self.city, &self.state, &self.country]
            .into_iter()
            .flatten()
            .any(|part| part.to_lowercase().contains(requested_lower))
    }
}

/// One candidate education entry, as collected for gating and the payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRecord {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub grades: Option<String>,
}

impl EducationRecord {
    /// Substring containment against a lowercased requested value, on
    /// institution or degree
    pub fn matches(&self, requested_lower: &str) -> bool {
        [&self.institution, &self.degree]
            .into_iter()
            .flatten()
            .any(|part| part.to_lowercase().contains(requested_lower))
    }
}

/// A candidate that passed every hard gate, with its collected match sets
#[derive(Debug, Clone)]
pub struct CandidateMatch {
    pub node_id: NodeId,
    pub candidate_id: CandidateId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub years_experience: f64,
    pub resume_file_url: String,
    pub analysis_file_url: String,
    pub embedding: Option<Vec<f32>>,
    pub total_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub current_designation: Option<String>,
    pub matched_roles: Vec<String>,
    pub locations: Vec<LocationRecord>,
    pub education: Vec<EducationRecord>,
    pub companies: Vec<String>,
}

/// Collect all candidates passing the request's hard gates, in creation
/// order, each annotated with its soft-criterion match sets.
pub fn collect_matches(store: &GraphStore, request: &SearchRequest) -> Vec<CandidateMatch> {
    let mut matches = Vec::new();

    for &candidate_id in store.node_ids_by_kind(NodeKind::Candidate) {
        let Some(node) = store.get_node(candidate_id) else {
            continue;
        };
        if let Some(candidate) = gate_and_collect(store, node, request) {
            matches.push(candidate);
        }
    }

    matches
}

fn gate_and_collect(
    store: &GraphStore,
    node: &Node,
    request: &SearchRequest,
) -> Option<CandidateMatch> {
    let years = node
        .get_property("yearsOfExperience")
        .and_then(|v| v.as_float())
        .unwrap_or(0.0);

    // scalar gates first; entity data is only collected when needed
    for gate in &request.gates {
        match gate {
            GateClause::Experience { from, to } => {
                if years < *from {
                    return None;
                }
                if let Some(to) = to {
                    if years > *to {
                        return None;
                    }
                }
            }
            GateClause::FieldContains { field, phrase } => {
                let value = node.get_str(field.property_key())?;
                if !value.to_lowercase().contains(phrase) {
                    return None;
                }
            }
            GateClause::LocationAny(_) | GateClause::EducationAny(_) => {}
        }
    }

    let locations = collect_locations(store, node.id);
    let education = collect_education(store, node.id);

    for gate in &request.gates {
        match gate {
            GateClause::LocationAny(requested) => {
                let hit = locations
                    .iter()
                    .any(|loc| requested.iter().any(|r| loc.matches(r)));
                if !hit {
                    return None;
                }
            }
            GateClause::EducationAny(requested) => {
                let hit = education
                    .iter()
                    .any(|edu| requested.iter().any(|r| edu.matches(r)));
                if !hit {
                    return None;
                }
            }
            _ => {}
        }
    }

    let total_skills = collect_skills(store, node.id);
    let current_designation = store
        .neighbors_via(node.id, RelType::HasDesignation)
        .first()
        .and_then(|(_, n)| n.get_str("title"))
        .map(str::to_string);
    let suitable_roles: Vec<String> = store
        .neighbors_via(node.id, RelType::SuitableFor)
        .into_iter()
        .filter_map(|(_, n)| n.get_str("name"))
        .map(str::to_string)
        .collect();

    let mut matched_skills = Vec::new();
    let mut matched_roles = Vec::new();
    for clause in &request.soft {
        match clause {
            SoftClause::SkillsAnyOf(requested) => {
                matched_skills = total_skills
                    .iter()
                    .filter(|skill| requested.contains(&skill.to_lowercase()))
                    .cloned()
                    .collect();
            }
            SoftClause::RolesAnyOf(requested) => {
                // the candidate's current designation is unioned with its
                // suitable roles for role matching
                let all_roles = current_designation
                    .iter()
                    .chain(suitable_roles.iter());
                matched_roles = all_roles
                    .filter(|role| {
                        let role_lower = role.to_lowercase();
                        requested
                            .iter()
                            .any(|r| role_lower.contains(r.as_str()) || r.contains(&role_lower))
                    })
                    .cloned()
                    .collect();
            }
        }
    }

    Some(CandidateMatch {
        node_id: node.id,
        candidate_id: CandidateId(node.get_str("candidateId").unwrap_or_default().to_string()),
        name: node.get_str("name").unwrap_or("Unknown").to_string(),
        email: node.get_str("email").map(str::to_string),
        phone: node.get_str("phone").map(str::to_string),
        years_experience: years,
        resume_file_url: node.get_str("resumeFileUrl").unwrap_or_default().to_string(),
        analysis_file_url: node
            .get_str("analysisFileUrl")
            .unwrap_or_default()
            .to_string(),
        embedding: node
            .get_property("embedding")
            .and_then(|v| v.as_vector())
            .map(|v| v.to_vec()),
        total_skills,
        matched_skills,
        current_designation,
        matched_roles,
        locations,
        education,
        companies: collect_companies(store, node.id),
    })
}

fn collect_skills(store: &GraphStore, candidate: NodeId) -> Vec<String> {
    let mut seen = FxHashSet::default();
    store
        .neighbors_via(candidate, RelType::HasSkill)
        .into_iter()
        .filter(|(_, n)| seen.insert(n.id))
        .filter_map(|(_, n)| n.get_str("name"))
        .map(str::to_string)
        .collect()
}

fn collect_companies(store: &GraphStore, candidate: NodeId) -> Vec<String> {
    let mut seen = FxHashSet::default();
    store
        .neighbors_via(candidate, RelType::WorksAt)
        .into_iter()
        .filter(|(_, n)| seen.insert(n.id))
        .filter_map(|(_, n)| n.get_str("name"))
        .map(str::to_string)
        .collect()
}

fn collect_locations(store: &GraphStore, candidate: NodeId) -> Vec<LocationRecord> {
    store
        .neighbors_via(candidate, RelType::LocatedIn)
        .into_iter()
        .map(|(edge, n)| LocationRecord {
            name: n.get_str("name").map(str::to_string),
            city: n.get_str("city").map(str::to_string),
            state: n.get_str("state").map(str::to_string),
            country: n.get_str("country").map(str::to_string),
            location_type: edge.get_str("locationType").map(str::to_string),
        })
        .collect()
}

fn collect_education(store: &GraphStore, candidate: NodeId) -> Vec<EducationRecord> {
    store
        .neighbors_via(candidate, RelType::StudiedAt)
        .into_iter()
        .map(|(_, n)| EducationRecord {
            institution: n.get_str("institutionName").map(str::to_string),
            degree: n.get_str("degree").map(str::to_string),
            grades: n.get_str("grades").map(str::to_string),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PropertyMap, PropertyValue};
    use crate::search::params::SearchParams;
    use crate::search::params::TextCriterion;

    struct Seed<'a> {
        name: &'a str,
        email: Option<&'a str>,
        years: f64,
        skills: &'a [&'a str],
        designation: Option<&'a str>,
        roles: &'a [&'a str],
        location: Option<&'a str>,
        institution: Option<&'a str>,
    }

    impl Default for Seed<'_> {
        fn default() -> Self {
            Seed {
                name: "Candidate",
                email: None,
                years: 0.0,
                skills: &[],
                designation: None,
                roles: &[],
                location: None,
                institution: None,
            }
        }
    }

    fn seed_candidate(store: &mut GraphStore, seed: Seed<'_>) -> NodeId {
        let mut props = PropertyMap::new();
        props.insert("candidateId".to_string(), format!("id-{}", seed.name).into());
        props.insert("name".to_string(), seed.name.into());
        props.insert(
            "email".to_string(),
            match seed.email {
                Some(e) => PropertyValue::String(e.to_string()),
                None => PropertyValue::Null,
            },
        );
        props.insert("phone".to_string(), PropertyValue::Null);
        props.insert("yearsOfExperience".to_string(), seed.years.into());
        props.insert("resumeFileUrl".to_string(), "r".into());
        props.insert("analysisFileUrl".to_string(), "a".into());
        props.insert("embedding".to_string(), vec![1.0f32, 0.0].into());
        let candidate = store.create_node_with_properties(NodeKind::Candidate, props);

        for skill in seed.skills {
            let mut p = PropertyMap::new();
            p.insert("name".to_string(), (*skill).into());
            let (node, _) = store
                .merge_node(NodeKind::Skill, &skill.to_lowercase(), p)
                .unwrap();
            store.create_edge(candidate, node, RelType::HasSkill).unwrap();
        }
        if let Some(title) = seed.designation {
            let mut p = PropertyMap::new();
            p.insert("title".to_string(), title.into());
            let (node, _) = store.merge_node(NodeKind::Designation, title, p).unwrap();
            store
                .create_edge(candidate, node, RelType::HasDesignation)
                .unwrap();
        }
        for role in seed.roles {
            let mut p = PropertyMap::new();
            p.insert("name".to_string(), (*role).into());
            let (node, _) = store.merge_node(NodeKind::Role, role, p).unwrap();
            store
                .create_edge(candidate, node, RelType::SuitableFor)
                .unwrap();
        }
        if let Some(location) = seed.location {
            let parts: Vec<&str> = location.split(',').map(str::trim).collect();
            let mut p = PropertyMap::new();
            p.insert("name".to_string(), location.into());
            p.insert("city".to_string(), parts.first().copied().into());
            p.insert("state".to_string(), parts.get(1).copied().into());
            p.insert("country".to_string(), parts.get(2).copied().into());
            let (node, _) = store.merge_node(NodeKind::Location, location, p).unwrap();
            let mut rel = PropertyMap::new();
            rel.insert("locationType".to_string(), "current".into());
            store
                .create_edge_with_properties(candidate, node, RelType::LocatedIn, rel)
                .unwrap();
        }
        if let Some(institution) = seed.institution {
            let mut p = PropertyMap::new();
            p.insert("institutionName".to_string(), institution.into());
            p.insert("degree".to_string(), "B.Tech".into());
            let key = format!("{}\u{1f}B.Tech", institution);
            let (node, _) = store.merge_node(NodeKind::Education, &key, p).unwrap();
            store.create_edge(candidate, node, RelType::StudiedAt).unwrap();
        }

        candidate
    }

    fn request(params: SearchParams, from: f64, to: Option<f64>) -> SearchRequest {
        SearchRequest::compile(&params, from, to)
    }

    #[test]
    fn test_experience_gate() {
        let mut store = GraphStore::new();
        seed_candidate(&mut store, Seed { name: "Junior", years: 1.0, ..Seed::default() });
        seed_candidate(&mut store, Seed { name: "Mid", years: 4.0, ..Seed::default() });
        seed_candidate(&mut store, Seed { name: "Senior", years: 9.0, ..Seed::default() });

        let matches = collect_matches(&store, &request(SearchParams::default(), 2.0, Some(8.0)));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Mid");

        // unbounded upper end
        let matches = collect_matches(&store, &request(SearchParams::default(), 2.0, None));
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_name_gate_is_case_insensitive_substring() {
        let mut store = GraphStore::new();
        seed_candidate(&mut store, Seed { name: "Jane Doe", ..Seed::default() });
        seed_candidate(&mut store, Seed { name: "John Smith", ..Seed::default() });

        let params = SearchParams {
            name: Some(TextCriterion::One("jane".to_string())),
            ..SearchParams::default()
        };
        let matches = collect_matches(&store, &request(params, 0.0, None));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Jane Doe");
    }

    #[test]
    fn test_email_gate_excludes_candidates_without_email() {
        let mut store = GraphStore::new();
        seed_candidate(
            &mut store,
            Seed { name: "With", email: Some("jane@example.com"), ..Seed::default() },
        );
        seed_candidate(&mut store, Seed { name: "Without", ..Seed::default() });

        let params = SearchParams {
            email: Some(TextCriterion::One("@example.com".to_string())),
            ..SearchParams::default()
        };
        let matches = collect_matches(&store, &request(params, 0.0, None));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "With");
    }

    #[test]
    fn test_location_is_a_hard_gate() {
        let mut store = GraphStore::new();
        seed_candidate(
            &mut store,
            Seed {
                name: "Mumbai",
                location: Some("Mumbai, Maharashtra, India"),
                skills: &["python"],
                ..Seed::default()
            },
        );
        seed_candidate(
            &mut store,
            Seed {
                name: "Bangalore",
                location: Some("Bangalore, Karnataka, India"),
                ..Seed::default()
            },
        );

        let params = SearchParams {
            location: Some(vec!["Bangalore".to_string()]),
            ..SearchParams::default()
        };
        let matches = collect_matches(&store, &request(params, 0.0, None));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Bangalore");
    }

    #[test]
    fn test_location_matches_state_and_country_parts() {
        let mut store = GraphStore::new();
        seed_candidate(
            &mut store,
            Seed {
                name: "Pune",
                location: Some("Pune, Maharashtra, India"),
                ..Seed::default()
            },
        );

        for requested in ["maharashtra", "India", "pune"] {
            let params = SearchParams {
                location: Some(vec![requested.to_string()]),
                ..SearchParams::default()
            };
            let matches = collect_matches(&store, &request(params, 0.0, None));
            assert_eq!(matches.len(), 1, "requested {:?}", requested);
        }
    }

    #[test]
    fn test_location_and_education_gates_are_anded() {
        let mut store = GraphStore::new();
        seed_candidate(
            &mut store,
            Seed {
                name: "Both",
                location: Some("Bangalore, Karnataka"),
                institution: Some("IIT Bombay"),
                ..Seed::default()
            },
        );
        seed_candidate(
            &mut store,
            Seed {
                name: "LocationOnly",
                location: Some("Bangalore, Karnataka"),
                ..Seed::default()
            },
        );
        seed_candidate(
            &mut store,
            Seed {
                name: "EducationOnly",
                institution: Some("IIT Bombay"),
                ..Seed::default()
            },
        );

        let params = SearchParams {
            location: Some(vec!["Bangalore".to_string()]),
            education: Some(vec!["IIT".to_string()]),
            ..SearchParams::default()
        };
        let matches = collect_matches(&store, &request(params, 0.0, None));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Both");
    }

    #[test]
    fn test_skills_are_soft_and_matched_exactly() {
        let mut store = GraphStore::new();
        seed_candidate(
            &mut store,
            Seed { name: "Pythonista", skills: &["Python", "Java"], ..Seed::default() },
        );

        let params = SearchParams {
            skills: Some(vec!["python".to_string(), "go".to_string()]),
            ..SearchParams::default()
        };
        let matches = collect_matches(&store, &request(params, 0.0, None));

        // not excluded despite only a partial skill match
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_skills, vec!["Python"]);
        assert_eq!(matches[0].total_skills, vec!["Python", "Java"]);
    }

    #[test]
    fn test_roles_union_designation_and_bidirectional_substring() {
        let mut store = GraphStore::new();
        seed_candidate(
            &mut store,
            Seed {
                name: "Backend",
                designation: Some("Senior Backend Engineer"),
                roles: &["Platform Engineer"],
                ..Seed::default()
            },
        );

        // requested value is a substring of the designation
        let params = SearchParams {
            role: Some(vec!["Backend Engineer".to_string()]),
            ..SearchParams::default()
        };
        let matches = collect_matches(&store, &request(params, 0.0, None));
        assert_eq!(matches[0].matched_roles, vec!["Senior Backend Engineer"]);

        // candidate role is a substring of the requested value
        let params = SearchParams {
            role: Some(vec!["Lead Platform Engineer".to_string()]),
            ..SearchParams::default()
        };
        let matches = collect_matches(&store, &request(params, 0.0, None));
        assert_eq!(matches[0].matched_roles, vec!["Platform Engineer"]);
    }

    #[test]
    fn test_traversal_order_is_creation_order() {
        let mut store = GraphStore::new();
        let first = seed_candidate(&mut store, Seed { name: "First", ..Seed::default() });
        let second = seed_candidate(&mut store, Seed { name: "Second", ..Seed::default() });

        let matches = collect_matches(&store, &request(SearchParams::default(), 0.0, None));
        assert_eq!(matches[0].node_id, first);
        assert_eq!(matches[1].node_id, second);
    }
}
