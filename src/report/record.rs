//! Typed candidate record produced by the report parser

use serde::{Deserialize, Serialize};

/// Three-state field value.
///
/// The source text distinguishes a field that was explicitly stated as
/// unknown ("N/A", optionally with a parenthetical explanation) from one
/// that was simply absent or nulled out. Ingestion turns `Unknown` into an
/// edge to the sentinel node; `Absent` produces no edge at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldText {
    #[default]
    Absent,
    Unknown,
    Value(String),
}

impl FieldText {
    /// The contained value, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            FieldText::Value(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldText::Unknown)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldText::Absent)
    }
}

impl From<Option<String>> for FieldText {
    fn from(opt: Option<String>) -> Self {
        match opt {
            Some(s) => FieldText::Value(s),
            None => FieldText::Absent,
        }
    }
}

/// CANDIDATE PROFILE section fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: FieldText,
    pub gender: FieldText,
    pub age: FieldText,
    pub email: FieldText,
    pub phone: FieldText,
    pub location: FieldText,
    pub preferred_location: FieldText,
    pub interests_hobbies: FieldText,
    /// First float-looking substring of the value; 0.0 when absent or
    /// unparseable, never an error
    pub years_of_experience: f64,
    pub current_designation: FieldText,
    pub current_employer: FieldText,
    pub notice_period: FieldText,
    pub expected_ctc: FieldText,
    pub current_ctc: FieldText,
    /// Past employers in résumé listing order
    pub previous_employers: Vec<String>,
}

/// One EDUCATION entry, keyed by institution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: Option<String>,
    pub grades: Option<String>,
    pub year: Option<String>,
}

/// One SKILLS entry with its category context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub category: String,
}

/// One LINKS entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub link_type: String,
    pub url: String,
}

/// Fully parsed analysis report.
///
/// Serializable so callers can persist the structured analysis alongside
/// the source files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedReport {
    pub profile: Profile,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
    pub languages: Vec<String>,
    pub achievements: Vec<String>,
    pub projects: Vec<String>,
    pub suitable_roles: Vec<String>,
    pub links: Vec<LinkEntry>,
}
