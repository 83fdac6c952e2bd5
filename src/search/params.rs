//! Search request types
//!
//! The raw [`SearchParams`] a caller sends are compiled once into a
//! [`SearchRequest`] (an explicit list of hard gate clauses plus
//! soft-match clauses) before any candidate is visited. Matching code
//! walks the compiled clauses; it never re-inspects the raw parameters.

use serde::{Deserialize, Serialize};

/// A criterion that may arrive as a single string or as a list of strings.
/// Multiple values are treated as one combined phrase, not OR-matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextCriterion {
    One(String),
    Many(Vec<String>),
}

impl TextCriterion {
    /// First value only (e-mail semantics)
    fn first(&self) -> Option<String> {
        let value = match self {
            TextCriterion::One(s) => s.trim().to_string(),
            TextCriterion::Many(v) => v.first().map(|s| s.trim().to_string()).unwrap_or_default(),
        };
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// All values joined into one space-separated phrase (name/phone
    /// semantics)
    fn joined(&self) -> Option<String> {
        let value = match self {
            TextCriterion::One(s) => s.trim().to_string(),
            TextCriterion::Many(v) => v.join(" ").trim().to_string(),
        };
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Sparse search criteria as received from the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub skills: Option<Vec<String>>,
    pub role: Option<Vec<String>>,
    pub location: Option<Vec<String>>,
    pub education: Option<Vec<String>>,
    pub email: Option<TextCriterion>,
    pub phone: Option<TextCriterion>,
    pub name: Option<TextCriterion>,
}

/// Candidate scalar fields addressable by a text gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateField {
    Email,
    Phone,
    Name,
}

impl CandidateField {
    pub fn property_key(&self) -> &'static str {
        match self {
            CandidateField::Email => "email",
            CandidateField::Phone => "phone",
            CandidateField::Name => "name",
        }
    }
}

/// One hard gate clause. A candidate failing any gate is excluded from
/// the result set entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum GateClause {
    /// yearsOfExperience within [from, to]; `to` unset means unbounded
    Experience { from: f64, to: Option<f64> },
    /// Case-insensitive substring containment on a candidate field;
    /// the phrase is stored lowercased
    FieldContains { field: CandidateField, phrase: String },
    /// At least one candidate location must match one of these lowercased
    /// values (on name, city, state or country)
    LocationAny(Vec<String>),
    /// At least one candidate education entry must match one of these
    /// lowercased values (on institution or degree)
    EducationAny(Vec<String>),
}

/// One soft-match clause. Soft clauses never exclude; they only feed the
/// per-criterion match sets used by scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum SoftClause {
    /// Case-insensitive equality against these lowercased skill names
    SkillsAnyOf(Vec<String>),
    /// Bidirectional case-insensitive substring match against these
    /// lowercased role names
    RolesAnyOf(Vec<String>),
}

/// Normalized criteria in caller casing, kept for score denominators and
/// the similarity query text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub skills: Vec<String>,
    pub roles: Vec<String>,
    pub locations: Vec<String>,
    pub education: Vec<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
}

impl Criteria {
    fn from_params(params: &SearchParams) -> Self {
        Criteria {
            skills: params.skills.clone().unwrap_or_default(),
            roles: params.role.clone().unwrap_or_default(),
            locations: params.location.clone().unwrap_or_default(),
            education: params.education.clone().unwrap_or_default(),
            email: params.email.as_ref().and_then(TextCriterion::first),
            phone: params.phone.as_ref().and_then(TextCriterion::joined),
            name: params.name.as_ref().and_then(TextCriterion::joined),
        }
    }

    /// Name is the only non-empty criterion. A match is then purely a
    /// gate; scoring short-circuits to 1.0.
    pub fn name_only(&self) -> bool {
        self.name.is_some()
            && self.skills.is_empty()
            && self.roles.is_empty()
            && self.locations.is_empty()
            && self.education.is_empty()
            && self.email.is_none()
            && self.phone.is_none()
    }

    /// Textual representation of all requested criteria, embedded as the
    /// query side of the similarity score. Empty when nothing was
    /// requested.
    pub fn query_text(&self) -> String {
        let mut parts = Vec::new();
        if !self.skills.is_empty() {
            parts.push(format!("Skills: {}", self.skills.join(", ")));
        }
        if !self.roles.is_empty() {
            parts.push(format!("Role: {}", self.roles.join(", ")));
        }
        if !self.locations.is_empty() {
            parts.push(format!("Location: {}", self.locations.join(", ")));
        }
        if let Some(name) = &self.name {
            parts.push(format!("Name: {}", name));
        }
        if let Some(phone) = &self.phone {
            parts.push(format!("Phone: {}", phone));
        }
        if let Some(email) = &self.email {
            parts.push(format!("Email: {}", email));
        }
        parts.join(" ")
    }
}

/// The compiled search request: gates first, then soft clauses.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub gates: Vec<GateClause>,
    pub soft: Vec<SoftClause>,
    pub criteria: Criteria,
}

impl SearchRequest {
    /// Compile raw parameters into the predicate tree. Values are
    /// lowercased here, once; matching never lowercases the request side
    /// again.
    pub fn compile(
        params: &SearchParams,
        from_experience: f64,
        to_experience: Option<f64>,
    ) -> Self {
        let criteria = Criteria::from_params(params);

        let mut gates = vec![GateClause::Experience {
            from: from_experience.max(0.0),
            to: to_experience,
        }];
        if let Some(email) = &criteria.email {
            gates.push(GateClause::FieldContains {
                field: CandidateField::Email,
                phrase: email.to_lowercase(),
            });
        }
        if let Some(phone) = &criteria.phone {
            gates.push(GateClause::FieldContains {
                field: CandidateField::Phone,
                phrase: phone.to_lowercase(),
            });
        }
        if let Some(name) = &criteria.name {
            gates.push(GateClause::FieldContains {
                field: CandidateField::Name,
                phrase: name.to_lowercase(),
            });
        }
        if !criteria.locations.is_empty() {
            gates.push(GateClause::LocationAny(lowered(&criteria.locations)));
        }
        if !criteria.education.is_empty() {
            gates.push(GateClause::EducationAny(lowered(&criteria.education)));
        }

        let mut soft = Vec::new();
        if !criteria.skills.is_empty() {
            soft.push(SoftClause::SkillsAnyOf(lowered(&criteria.skills)));
        }
        if !criteria.roles.is_empty() {
            soft.push(SoftClause::RolesAnyOf(lowered(&criteria.roles)));
        }

        SearchRequest {
            gates,
            soft,
            criteria,
        }
    }
}

fn lowered(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_criterion_normalization() {
        let email = TextCriterion::Many(vec!["a@x.com".to_string(), "b@y.com".to_string()]);
        assert_eq!(email.first(), Some("a@x.com".to_string()));

        let name = TextCriterion::Many(vec!["Jane".to_string(), "Doe".to_string()]);
        assert_eq!(name.joined(), Some("Jane Doe".to_string()));

        let blank = TextCriterion::One("   ".to_string());
        assert_eq!(blank.first(), None);
        assert_eq!(blank.joined(), None);
    }

    #[test]
    fn test_params_deserialize_string_or_list() {
        let json = r#"{"name": "Jane Doe", "phone": ["+91", "98765"]}"#;
        let params: SearchParams = serde_json::from_str(json).unwrap();
        let request = SearchRequest::compile(&params, 0.0, None);
        assert_eq!(request.criteria.name.as_deref(), Some("Jane Doe"));
        assert_eq!(request.criteria.phone.as_deref(), Some("+91 98765"));
    }

    #[test]
    fn test_compile_builds_gates_and_soft_clauses() {
        let params = SearchParams {
            skills: Some(vec!["Python".to_string()]),
            location: Some(vec!["Bangalore".to_string()]),
            name: Some(TextCriterion::One("Jane".to_string())),
            ..SearchParams::default()
        };
        let request = SearchRequest::compile(&params, 2.0, Some(8.0));

        assert_eq!(request.gates.len(), 3);
        assert_eq!(
            request.gates[0],
            GateClause::Experience {
                from: 2.0,
                to: Some(8.0)
            }
        );
        assert!(matches!(
            &request.gates[1],
            GateClause::FieldContains {
                field: CandidateField::Name,
                phrase
            } if phrase == "jane"
        ));
        assert_eq!(
            request.gates[2],
            GateClause::LocationAny(vec!["bangalore".to_string()])
        );
        assert_eq!(
            request.soft,
            vec![SoftClause::SkillsAnyOf(vec!["python".to_string()])]
        );
    }

    #[test]
    fn test_negative_from_experience_clamps() {
        let request = SearchRequest::compile(&SearchParams::default(), -1.0, None);
        assert_eq!(
            request.gates[0],
            GateClause::Experience {
                from: 0.0,
                to: None
            }
        );
    }

    #[test]
    fn test_name_only_detection() {
        let name_only = SearchParams {
            name: Some(TextCriterion::One("Jane Doe".to_string())),
            ..SearchParams::default()
        };
        assert!(SearchRequest::compile(&name_only, 0.0, None)
            .criteria
            .name_only());

        let name_and_skills = SearchParams {
            name: Some(TextCriterion::One("Jane Doe".to_string())),
            skills: Some(vec!["python".to_string()]),
            ..SearchParams::default()
        };
        assert!(!SearchRequest::compile(&name_and_skills, 0.0, None)
            .criteria
            .name_only());

        let name_and_email = SearchParams {
            name: Some(TextCriterion::One("Jane Doe".to_string())),
            email: Some(TextCriterion::One("jane@x.com".to_string())),
            ..SearchParams::default()
        };
        assert!(!SearchRequest::compile(&name_and_email, 0.0, None)
            .criteria
            .name_only());
    }

    #[test]
    fn test_query_text_assembly() {
        let params = SearchParams {
            skills: Some(vec!["python".to_string(), "go".to_string()]),
            role: Some(vec!["backend engineer".to_string()]),
            ..SearchParams::default()
        };
        let request = SearchRequest::compile(&params, 0.0, None);
        assert_eq!(
            request.criteria.query_text(),
            "Skills: python, go Role: backend engineer"
        );

        let empty = SearchRequest::compile(&SearchParams::default(), 0.0, None);
        assert!(empty.criteria.query_text().is_empty());
    }
}
