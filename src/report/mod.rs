//! Analysis report parsing
//!
//! Turns the canonical sectioned report text into a typed
//! [`ParsedReport`]. Parsing is soft: malformed fields degrade to
//! absent/unknown/empty, never to an error.

pub mod parser;
pub mod record;

pub use parser::{clean_text, parse_report};
pub use record::{
    EducationEntry, FieldText, LinkEntry, ParsedReport, Profile, SkillEntry,
};
