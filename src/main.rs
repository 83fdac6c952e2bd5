use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use talentgraph::embed::{EmbedResult, EmbeddingProvider};
use talentgraph::search::TextCriterion;
use talentgraph::{SearchParams, ServiceConfig, TalentGraphService};

/// Deterministic local embedder for the demo: hashes tokens into a fixed
/// number of buckets and L2-normalizes. Stands in for the real provider
/// so the demo runs without a network.
struct DemoEmbedder;

const DEMO_DIMENSIONS: usize = 64;

#[async_trait]
impl EmbeddingProvider for DemoEmbedder {
    async fn embed(&self, text: &str) -> EmbedResult<Vec<f32>> {
        let mut vector = vec![0.0f32; DEMO_DIMENSIONS];
        for token in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            vector[(hasher.finish() as usize) % DEMO_DIMENSIONS] += 1.0;
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        DEMO_DIMENSIONS
    }
}

const SAMPLE_REPORT: &str = "\
=== CANDIDATE PROFILE ===
Name: Jane Doe
Gender: Female
Age: N/A
E-mail: jane.doe@example.com
Phone number: +91 98765 43210
Location: Bangalore, Karnataka, India
Preferred Location: N/A
Years of Experience: 4.5
Current/Last Designation: Senior Backend Engineer
Current/Last Employer: Acme Corp
Previous Employer: Globex
- Initech

=== EDUCATION ===
Institution: IIT Bombay
- Degree/Program: B.Tech Computer Science
- Year of Passing: 2019

=== SKILLS ===
Programming Languages:
Python
Go
Databases:
PostgreSQL

=== LANGUAGES ===
English, Hindi

=== PROJECTS ===
1. Fraud detection pipeline on streaming data

=== ACHIEVEMENTS ===
Best engineer award 2022

=== SUITABLE ROLES ===
Backend Engineer, Platform Engineer

=== LINKS ===
[GitHub]: https://github.com/janedoe
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("TalentGraph v{}", talentgraph::version());
    println!("=========================================");
    println!();

    let service =
        TalentGraphService::with_embedder(ServiceConfig::default(), Arc::new(DemoEmbedder));

    // Write path: ingest a sample report
    let candidate_id = service
        .ingest(
            SAMPLE_REPORT,
            "https://files.example.com/jane_doe.pdf",
            "https://files.example.com/jane_doe_analysis.pdf",
            4.5,
        )
        .await?;
    println!("Ingested candidate {}", candidate_id);

    {
        let store = service.store();
        let store = store.read().await;
        println!(
            "Graph now holds {} nodes and {} edges",
            store.node_count(),
            store.edge_count()
        );
    }
    println!();

    // Read path: multi-criteria search
    let params = SearchParams {
        skills: Some(vec!["python".to_string(), "rust".to_string()]),
        role: Some(vec!["Backend Engineer".to_string()]),
        location: Some(vec!["Bangalore".to_string()]),
        ..SearchParams::default()
    };
    let results = service.search(&params, 1.0, Some(10.0), None, 0.2).await?;

    println!("Search returned {} candidate(s):", results.len());
    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. {} ({} yrs) total {:.3}",
            i + 1,
            result.name,
            result.years_experience,
            result.scores.total_score
        );
        println!(
            "   skills {:?} of {:?}, roles {:?}",
            result.matched_skills, result.total_skills, result.matched_roles
        );
        println!(
            "   skill {:.2} role {:.2} location {:.2} education {:.2} similarity {:.2}",
            result.scores.skill_score,
            result.scores.role_score,
            result.scores.location_score,
            result.scores.education_score,
            result.scores.similarity_score
        );
    }

    // A name-only search is purely a gate: total score is exactly 1.0
    let params = SearchParams {
        name: Some(TextCriterion::One("Jane".to_string())),
        ..SearchParams::default()
    };
    let results = service.search(&params, 0.0, None, None, 0.4).await?;
    println!();
    println!(
        "Name-only search matched {} candidate(s) at total score {:.1}",
        results.len(),
        results.first().map(|r| r.scores.total_score).unwrap_or(0.0)
    );

    Ok(())
}
