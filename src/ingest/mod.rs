//! Ingestion engine
//!
//! Consumes a parsed report, an embedding and file locations, and writes
//! the candidate sub-graph. Every call creates exactly one new Candidate
//! node; re-ingesting the same résumé produces a second, independent
//! candidate record. Referenced entities are merged by natural key; the
//! relationship edges are always created fresh.
//!
//! The whole write set for one candidate executes under a single store
//! write guard: readers never observe a partially-populated candidate,
//! and natural-key merges cannot race into duplicate entity nodes.

use crate::embed::{EmbedError, EmbeddingProvider};
use crate::graph::{
    GraphError, GraphStore, NodeId, NodeKind, PropertyMap, PropertyValue, RelType,
};
use crate::report::{parse_report, FieldText, ParsedReport};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Opaque candidate identifier, generated at ingestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    fn generate() -> Self {
        CandidateId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ingestion failures. Parse problems never appear here (the parser
/// degrades soft); only collaborator and store failures abort.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("graph write failed: {0}")]
    Graph(#[from] GraphError),
}

/// Writes candidate records into the shared graph store
pub struct IngestEngine {
    store: Arc<RwLock<GraphStore>>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl IngestEngine {
    pub fn new(store: Arc<RwLock<GraphStore>>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embedder }
    }

    /// Embed and parse a report, then write the candidate sub-graph.
    pub async fn ingest(
        &self,
        report_text: &str,
        resume_url: &str,
        analysis_url: &str,
        years_of_experience: f64,
    ) -> Result<CandidateId, IngestError> {
        let embedding = self.embedder.embed(report_text).await?;
        let record = parse_report(report_text);
        self.ingest_record(&record, embedding, resume_url, analysis_url, years_of_experience)
            .await
    }

    /// Write a candidate sub-graph from an already-parsed record and a
    /// precomputed embedding vector.
    pub async fn ingest_record(
        &self,
        record: &ParsedReport,
        embedding: Vec<f32>,
        resume_url: &str,
        analysis_url: &str,
        years_of_experience: f64,
    ) -> Result<CandidateId, IngestError> {
        let candidate_id = CandidateId::generate();
        let mut store = self.store.write().await;

        let candidate = write_candidate(
            &mut store,
            &candidate_id,
            record,
            embedding,
            resume_url,
            analysis_url,
            years_of_experience,
        );

        write_locations(&mut store, candidate, record)?;
        write_companies(&mut store, candidate, record)?;
        write_designation(&mut store, candidate, record)?;
        write_education(&mut store, candidate, record)?;
        write_skills(&mut store, candidate, record)?;
        write_languages(&mut store, candidate, record)?;
        write_achievements(&mut store, candidate, record)?;
        write_projects(&mut store, candidate, record)?;
        write_suitable_roles(&mut store, candidate, record)?;
        write_links(&mut store, candidate, record)?;
        write_unknown_fields(&mut store, candidate, record)?;

        info!(
            candidate = %candidate_id,
            name = record.profile.name.value().unwrap_or("Unknown"),
            nodes = store.node_count(),
            edges = store.edge_count(),
            "candidate ingested"
        );

        Ok(candidate_id)
    }
}

fn text_or_null(field: &FieldText) -> PropertyValue {
    match field.value() {
        Some(v) => PropertyValue::String(v.to_string()),
        None => PropertyValue::Null,
    }
}

fn write_candidate(
    store: &mut GraphStore,
    candidate_id: &CandidateId,
    record: &ParsedReport,
    embedding: Vec<f32>,
    resume_url: &str,
    analysis_url: &str,
    years_of_experience: f64,
) -> NodeId {
    let profile = &record.profile;
    let mut props = PropertyMap::new();
    props.insert("candidateId".to_string(), candidate_id.as_str().into());
    props.insert(
        "name".to_string(),
        profile.name.value().unwrap_or("Unknown").into(),
    );
    props.insert("email".to_string(), text_or_null(&profile.email));
    props.insert("phone".to_string(), text_or_null(&profile.phone));
    props.insert(
        "yearsOfExperience".to_string(),
        years_of_experience.max(0.0).into(),
    );
    props.insert("resumeFileUrl".to_string(), resume_url.into());
    props.insert("analysisFileUrl".to_string(), analysis_url.into());
    props.insert("embedding".to_string(), embedding.into());

    store.create_node_with_properties(NodeKind::Candidate, props)
}

fn write_locations(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    let profile = &record.profile;
    let locations = [
        ("current", &profile.location),
        ("preferred", &profile.preferred_location),
    ];

    for (location_type, field) in locations {
        let Some(name) = field.value() else { continue };

        // "City, State, Country"; missing parts stay null
        let parts: Vec<&str> = name.split(',').map(str::trim).collect();
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), name.into());
        props.insert("city".to_string(), parts.first().copied().into());
        props.insert("state".to_string(), parts.get(1).copied().into());
        props.insert("country".to_string(), parts.get(2).copied().into());

        let (location, created) = store.merge_node(NodeKind::Location, name, props)?;
        if !created {
            debug!(location = name, "reusing location node");
        }

        let mut rel = PropertyMap::new();
        rel.insert("locationType".to_string(), location_type.into());
        store.create_edge_with_properties(candidate, location, RelType::LocatedIn, rel)?;
    }

    Ok(())
}

fn write_companies(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    let profile = &record.profile;

    if let Some(employer) = profile.current_employer.value() {
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), employer.into());
        let (company, _) = store.merge_node(NodeKind::Company, employer, props)?;

        let mut rel = PropertyMap::new();
        rel.insert("isCurrent".to_string(), true.into());
        store.create_edge_with_properties(candidate, company, RelType::WorksAt, rel)?;
    }

    for (order, employer) in profile.previous_employers.iter().enumerate() {
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), employer.as_str().into());
        let (company, _) = store.merge_node(NodeKind::Company, employer, props)?;

        let mut rel = PropertyMap::new();
        rel.insert("isCurrent".to_string(), false.into());
        rel.insert("order".to_string(), (order as i64).into());
        store.create_edge_with_properties(candidate, company, RelType::WorksAt, rel)?;
    }

    Ok(())
}

fn write_designation(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    let profile = &record.profile;
    let Some(title) = profile.current_designation.value() else {
        return Ok(());
    };

    let mut props = PropertyMap::new();
    props.insert("title".to_string(), title.into());
    let (designation, _) = store.merge_node(NodeKind::Designation, title, props)?;

    let mut rel = PropertyMap::new();
    rel.insert("isCurrent".to_string(), true.into());
    rel.insert(
        "company".to_string(),
        text_or_null(&profile.current_employer),
    );
    store.create_edge_with_properties(candidate, designation, RelType::HasDesignation, rel)?;

    Ok(())
}

/// Natural key for an education node: the (institution, degree) pair.
fn education_key(institution: &str, degree: &str) -> String {
    format!("{}\u{1f}{}", institution, degree)
}

fn write_education(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    for entry in &record.education {
        let degree = entry.degree.as_deref().unwrap_or("Unknown");

        let mut props = PropertyMap::new();
        props.insert("institutionName".to_string(), entry.institution.as_str().into());
        props.insert("degree".to_string(), degree.into());
        props.insert("grades".to_string(), entry.grades.as_deref().into());
        let (education, _) = store.merge_node(
            NodeKind::Education,
            &education_key(&entry.institution, degree),
            props,
        )?;

        let mut rel = PropertyMap::new();
        rel.insert("graduationYear".to_string(), entry.year.as_deref().into());
        rel.insert("grades".to_string(), entry.grades.as_deref().into());
        store.create_edge_with_properties(candidate, education, RelType::StudiedAt, rel)?;
    }

    Ok(())
}

fn write_skills(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    for skill in &record.skills {
        // skills dedup case-insensitively; the display name is first-seen
        let key = skill.name.to_lowercase();

        let mut props = PropertyMap::new();
        props.insert("name".to_string(), skill.name.as_str().into());
        props.insert("category".to_string(), skill.category.as_str().into());
        let (node, created) = store.merge_node(NodeKind::Skill, &key, props)?;
        if !created {
            debug!(skill = %skill.name, "reusing skill node");
        }

        let mut rel = PropertyMap::new();
        rel.insert("category".to_string(), skill.category.as_str().into());
        store.create_edge_with_properties(candidate, node, RelType::HasSkill, rel)?;
    }

    Ok(())
}

fn write_languages(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    for language in &record.languages {
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), language.as_str().into());
        let (node, _) = store.merge_node(NodeKind::Language, language, props)?;
        store.create_edge(candidate, node, RelType::Speaks)?;
    }

    Ok(())
}

/// Display title for free-text nodes: first 100 chars, ellipsized.
fn truncate_title(text: &str) -> String {
    if text.chars().count() > 100 {
        let short: String = text.chars().take(100).collect();
        format!("{}...", short)
    } else {
        text.to_string()
    }
}

fn write_achievements(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    for achievement in &record.achievements {
        let mut props = PropertyMap::new();
        props.insert("title".to_string(), truncate_title(achievement).into());
        props.insert("description".to_string(), achievement.as_str().into());
        let node = store.create_node_with_properties(NodeKind::Achievement, props);
        store.create_edge(candidate, node, RelType::Achieved)?;
    }

    Ok(())
}

fn write_projects(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    for project in &record.projects {
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), truncate_title(project).into());
        props.insert("description".to_string(), project.as_str().into());
        let node = store.create_node_with_properties(NodeKind::Project, props);
        store.create_edge(candidate, node, RelType::WorkedOn)?;
    }

    Ok(())
}

fn write_suitable_roles(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    for role in &record.suitable_roles {
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), role.as_str().into());
        let (node, _) = store.merge_node(NodeKind::Role, role, props)?;
        store.create_edge(candidate, node, RelType::SuitableFor)?;
    }

    Ok(())
}

fn write_links(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    for link in &record.links {
        let mut props = PropertyMap::new();
        props.insert("url".to_string(), link.url.as_str().into());
        props.insert("linkType".to_string(), link.link_type.as_str().into());
        let (node, _) = store.merge_node(NodeKind::Link, &link.url, props)?;

        let mut rel = PropertyMap::new();
        rel.insert("linkType".to_string(), link.link_type.as_str().into());
        store.create_edge_with_properties(candidate, node, RelType::HasLink, rel)?;
    }

    Ok(())
}

/// One sentinel edge per explicitly-unknown scalar field, tagged with the
/// field name; explicitly-unknown or empty list sections get one too.
fn write_unknown_fields(
    store: &mut GraphStore,
    candidate: NodeId,
    record: &ParsedReport,
) -> Result<(), GraphError> {
    let profile = &record.profile;
    let scalar_fields = [
        ("gender", &profile.gender),
        ("age", &profile.age),
        ("email", &profile.email),
        ("phone", &profile.phone),
        ("location", &profile.location),
        ("preferredLocation", &profile.preferred_location),
        ("interestsHobbies", &profile.interests_hobbies),
        ("currentDesignation", &profile.current_designation),
        ("currentEmployer", &profile.current_employer),
        ("noticePeriod", &profile.notice_period),
        ("expectedCtc", &profile.expected_ctc),
        ("currentCtc", &profile.current_ctc),
    ];

    let mut unknown: Vec<&str> = scalar_fields
        .iter()
        .filter(|(_, field)| field.is_unknown())
        .map(|(name, _)| *name)
        .collect();

    if record.languages.is_empty() {
        unknown.push("languages");
    }
    if record.projects.is_empty() {
        unknown.push("projects");
    }
    if record.achievements.is_empty() {
        unknown.push("achievements");
    }

    if unknown.is_empty() {
        return Ok(());
    }

    let sentinel = store.ensure_sentinel();
    for field in unknown {
        let mut rel = PropertyMap::new();
        rel.insert("field".to_string(), field.into());
        store.create_edge_with_properties(candidate, sentinel, RelType::FieldUnknown, rel)?;
    }

    Ok(())
}
