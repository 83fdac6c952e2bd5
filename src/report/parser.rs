//! Section-delimited analysis report parser
//!
//! The canonical report is a sequence of sections, each opened by a header
//! line whose trimmed content starts and ends with `===` and carries the
//! section name in between. Parsing never fails: every field degrades to
//! absent/unknown/empty on malformed input.

use super::record::{EducationEntry, FieldText, LinkEntry, ParsedReport, Profile, SkillEntry};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

static NA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^n/?a\s*(\([^)]*\))?$").expect("valid regex"));
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid regex"));
static INSTITUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Institution:\s*([^,]*)").expect("valid regex"));
static NUMBERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid regex"));
static BRACKET_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\]:\s*(.*)$").expect("valid regex"));
static DASH_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s*(.*?):\s*(.*)$").expect("valid regex"));

/// Profile field labels recognized in the CANDIDATE PROFILE section,
/// matched case-insensitively on the text before the first colon.
const PROFILE_KEYS: &[&str] = &[
    "name",
    "gender",
    "age",
    "e-mail",
    "phone number",
    "location",
    "preferred location",
    "interests/hobbies",
    "years of experience",
    "current/last designation",
    "current/last employer",
    "current notice period",
    "expected ctc",
    "current ctc",
    "previous employer",
    "previous employer(s)",
];

/// Normalize a raw field value into its three-state form.
///
/// "n/a" / "na" (any case, optionally with a parenthetical explanation) is
/// explicitly Unknown; "null" / "none" / empty is true absence; anything
/// else is the trimmed value.
pub fn clean_text(raw: &str) -> FieldText {
    let text = raw.trim();
    if text.is_empty() {
        return FieldText::Absent;
    }
    if NA_RE.is_match(text) {
        return FieldText::Unknown;
    }
    let lower = text.to_lowercase();
    if lower == "null" || lower == "none" {
        return FieldText::Absent;
    }
    FieldText::Value(text.to_string())
}

/// Parse a canonical sectioned analysis report into a typed record
pub fn parse_report(text: &str) -> ParsedReport {
    let sections = split_sections(text);
    let mut report = ParsedReport::default();

    if let Some(body) = sections.get("CANDIDATE PROFILE") {
        report.profile = parse_profile(body);
    }
    if let Some(body) = sections.get("EDUCATION") {
        report.education = parse_education(body);
    }
    if let Some(body) = sections.get("SKILLS") {
        report.skills = parse_skills(body);
    }
    if let Some(body) = sections.get("LANGUAGES") {
        report.languages = parse_list_section(body);
    }
    if let Some(body) = sections.get("ACHIEVEMENTS") {
        report.achievements = parse_list_section(body);
    }
    if let Some(body) = sections.get("PROJECTS") {
        report.projects = parse_projects(body);
    }
    if let Some(body) = sections.get("SUITABLE ROLES") {
        report.suitable_roles = parse_suitable_roles(body);
    }
    if let Some(body) = sections.get("LINKS") {
        report.links = parse_links(body);
    }

    report
}

/// Split the report into named sections. Text before the first header is
/// ignored; section names are uppercased for lookup.
fn split_sections(text: &str) -> IndexMap<String, String> {
    let mut sections: IndexMap<String, String> = IndexMap::new();
    let mut current: Option<String> = None;
    let mut content: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("===") && trimmed.ends_with("===") {
            if let Some(name) = current.take() {
                sections.insert(name, content.join("\n"));
            }
            content.clear();
            current = Some(trimmed.replace("===", "").trim().to_uppercase());
        } else if current.is_some() {
            content.push(line);
        }
    }
    if let Some(name) = current.take() {
        sections.insert(name, content.join("\n"));
    }

    sections
}

fn is_profile_key_line(line: &str) -> bool {
    match line.split_once(':') {
        Some((key, _)) => PROFILE_KEYS.contains(&key.trim().to_lowercase().as_str()),
        None => false,
    }
}

/// Extract the first float-looking substring; 0.0 when there is none
fn extract_years(value: &str) -> f64 {
    NUMBER_RE
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|y| y.max(0.0))
        .unwrap_or(0.0)
}

fn parse_profile(body: &str) -> Profile {
    let mut profile = Profile::default();
    let lines: Vec<&str> = body.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        match key.trim().to_lowercase().as_str() {
            "name" => profile.name = clean_text(value),
            "gender" => profile.gender = clean_text(value),
            "age" => profile.age = clean_text(value),
            "e-mail" => profile.email = clean_text(value),
            "phone number" => profile.phone = clean_text(value),
            "location" => profile.location = clean_text(value),
            "preferred location" => profile.preferred_location = clean_text(value),
            "interests/hobbies" => profile.interests_hobbies = clean_text(value),
            "years of experience" => profile.years_of_experience = extract_years(value),
            "current/last designation" => profile.current_designation = clean_text(value),
            "current/last employer" => profile.current_employer = clean_text(value),
            "current notice period" => profile.notice_period = clean_text(value),
            "expected ctc" => profile.expected_ctc = clean_text(value),
            "current ctc" => profile.current_ctc = clean_text(value),
            "previous employer" | "previous employer(s)" => {
                let mut employers = Vec::new();
                push_employer(&mut employers, value);
                // the list may continue on following lines, until the next
                // recognized "Key:" line
                while i < lines.len() {
                    let next = lines[i].trim();
                    if is_profile_key_line(next) {
                        break;
                    }
                    push_employer(&mut employers, next);
                    i += 1;
                }
                profile.previous_employers = employers;
            }
            _ => {}
        }
    }

    profile
}

fn push_employer(employers: &mut Vec<String>, raw: &str) {
    let stripped = raw.trim().trim_matches(['-', ' ']);
    if let FieldText::Value(employer) = clean_text(stripped) {
        employers.push(employer);
    }
}

fn parse_education(body: &str) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut current: Option<EducationEntry> = None;

    for raw in body.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if !line.starts_with('-') && line.contains(':') {
            // institution line: closes the open entry, opens a new one when
            // it carries a usable institution name (text up to the first
            // comma after the label)
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            if let Some(caps) = INSTITUTION_RE.captures(line) {
                if let FieldText::Value(institution) = clean_text(&caps[1]) {
                    current = Some(EducationEntry {
                        institution,
                        degree: None,
                        grades: None,
                        year: None,
                    });
                }
            }
        } else if line.starts_with('-') {
            if let Some(entry) = current.as_mut() {
                if let Some(v) = labeled_value(line, "Degree/Program:") {
                    entry.degree = clean_text(v).value().map(str::to_string);
                } else if let Some(v) = labeled_value(line, "Grades/CGPA/Percentage:") {
                    entry.grades = clean_text(v).value().map(str::to_string);
                } else if let Some(v) = labeled_value(line, "Year of Passing:") {
                    entry.year = clean_text(v).value().map(str::to_string);
                }
            }
        }
    }
    if let Some(entry) = current.take() {
        entries.push(entry);
    }

    entries
}

fn labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.find(label).map(|pos| &line[pos + label.len()..])
}

fn parse_skills(body: &str) -> Vec<SkillEntry> {
    let mut skills = Vec::new();
    let mut category: Option<String> = None;

    for raw in body.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.ends_with(':') {
            // category line sets the context for the skills that follow
            let name = line
                .trim_start_matches(['-', '*', '•', ' '])
                .trim_end_matches(':')
                .trim_matches(['*', ' ']);
            if let FieldText::Value(name) = clean_text(name) {
                category = Some(name);
            }
            continue;
        }

        let stripped = line.trim_start_matches(['-', '*', '•', ' ', '\t']);
        if let FieldText::Value(name) = clean_text(stripped) {
            if name.chars().count() > 1 {
                skills.push(SkillEntry {
                    name,
                    category: category.clone().unwrap_or_else(|| "General".to_string()),
                });
            }
        }
    }

    skills
}

/// LANGUAGES / ACHIEVEMENTS: one item per line, comma-split when the line
/// has commas and no leading bullet; deduplicated within the section.
fn parse_list_section(body: &str) -> Vec<String> {
    let mut items = Vec::new();

    for raw in body.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = if line.contains(',') && !line.starts_with('-') {
            line.split(',').collect()
        } else {
            vec![line]
        };
        for part in parts {
            let stripped = part.trim().trim_start_matches(['-', '*', '•', ' ']);
            if let FieldText::Value(item) = clean_text(stripped) {
                if !items.contains(&item) {
                    items.push(item);
                }
            }
        }
    }

    items
}

fn parse_projects(body: &str) -> Vec<String> {
    let mut projects: Vec<String> = Vec::new();

    for raw in body.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if NUMBERED_ITEM_RE.is_match(line) || line.starts_with('*') || line.starts_with('-') {
            let stripped = line.trim_start_matches(|c: char| {
                c.is_ascii_digit() || c == '.' || c == '-' || c == '*' || c.is_whitespace()
            });
            if let FieldText::Value(project) = clean_text(stripped) {
                projects.push(project);
            }
        } else if let FieldText::Value(continuation) = clean_text(line) {
            // unmarked line continues the previous project; dropped when
            // there is none
            if let Some(last) = projects.last_mut() {
                last.push(' ');
                last.push_str(&continuation);
            }
        }
    }

    projects
}

/// SUITABLE ROLES: comma-split if the section contains any comma, else
/// newline-split.
fn parse_suitable_roles(body: &str) -> Vec<String> {
    let mut roles = Vec::new();
    let parts: Vec<&str> = if body.contains(',') {
        body.split(',').collect()
    } else {
        body.lines().collect()
    };

    for part in parts {
        let stripped = part.trim().trim_start_matches(['-', '*', '•', ' ']);
        if let FieldText::Value(role) = clean_text(stripped) {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
    }

    roles
}

fn parse_links(body: &str) -> Vec<LinkEntry> {
    let mut links = Vec::new();

    for raw in body.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        // bracketed-label form: [label]: url
        if let Some(caps) = BRACKET_LINK_RE.captures(line) {
            if let (FieldText::Value(link_type), FieldText::Value(url)) =
                (clean_text(&caps[1]), clean_text(&caps[2]))
            {
                links.push(LinkEntry { link_type, url });
            }
            continue;
        }

        // dashed form: - label: url
        if let Some(caps) = DASH_LINK_RE.captures(line) {
            if let (FieldText::Value(link_type), FieldText::Value(url)) =
                (clean_text(&caps[1]), clean_text(&caps[2]))
            {
                links.push(LinkEntry { link_type, url });
            }
            continue;
        }

        // bare token: email by '@', URLs classified by domain substring,
        // anything else silently dropped
        let bare = line.trim_matches(['-', '*', ' ']);
        if let FieldText::Value(token) = clean_text(bare) {
            let lower = token.to_lowercase();
            if token.contains('@') {
                links.push(LinkEntry {
                    link_type: "Email".to_string(),
                    url: token,
                });
            } else if ["http://", "https://", ".com", ".org", ".net"]
                .iter()
                .any(|marker| lower.contains(marker))
            {
                let link_type = if lower.contains("linkedin") {
                    "LinkedIn"
                } else if lower.contains("github") {
                    "GitHub"
                } else {
                    "Other"
                };
                links.push(LinkEntry {
                    link_type: link_type.to_string(),
                    url: token,
                });
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_states() {
        assert_eq!(clean_text("  Pune  "), FieldText::Value("Pune".to_string()));
        assert_eq!(clean_text("N/A"), FieldText::Unknown);
        assert_eq!(clean_text("n/a"), FieldText::Unknown);
        assert_eq!(clean_text("na"), FieldText::Unknown);
        assert_eq!(clean_text("N/A (not mentioned in resume)"), FieldText::Unknown);
        assert_eq!(clean_text("null"), FieldText::Absent);
        assert_eq!(clean_text("None"), FieldText::Absent);
        assert_eq!(clean_text(""), FieldText::Absent);
        assert_eq!(clean_text("   "), FieldText::Absent);
        // "napoli" is a value, not a sentinel
        assert_eq!(clean_text("napoli"), FieldText::Value("napoli".to_string()));
    }

    #[test]
    fn test_section_splitting() {
        let text = "preamble is ignored\n=== CANDIDATE PROFILE ===\nName: Jane\n\n=== SKILLS ===\nPython\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 2);
        assert!(sections.get("CANDIDATE PROFILE").unwrap().contains("Name: Jane"));
        assert!(sections.get("SKILLS").unwrap().contains("Python"));
    }

    #[test]
    fn test_extract_years() {
        assert_eq!(extract_years(" 4.5"), 4.5);
        assert_eq!(extract_years("about 3 years"), 3.0);
        assert_eq!(extract_years("1.2 (1 year 2 months)"), 1.2);
        assert_eq!(extract_years("fresher"), 0.0);
        assert_eq!(extract_years(""), 0.0);
    }

    #[test]
    fn test_parse_profile_fields() {
        let body = "\
Name: Jane Doe
Gender: Female
Age: N/A
E-mail: jane@example.com
Phone number: +91 98765 43210
Location: Bangalore, Karnataka, India
Preferred Location: N/A (open to relocation)
Interests/Hobbies: null
Years of Experience: 4.5
Current/Last Designation: Senior Software Engineer
Current/Last Employer: Acme Corp
Current Notice Period: 30 days
Expected CTC: N/A
Current CTC: none
Previous Employer: Globex
- Initech
Umbrella Corp
";
        let profile = parse_profile(body);
        assert_eq!(profile.name.value(), Some("Jane Doe"));
        assert_eq!(profile.age, FieldText::Unknown);
        assert_eq!(profile.email.value(), Some("jane@example.com"));
        assert_eq!(profile.preferred_location, FieldText::Unknown);
        assert_eq!(profile.interests_hobbies, FieldText::Absent);
        assert_eq!(profile.years_of_experience, 4.5);
        assert_eq!(profile.expected_ctc, FieldText::Unknown);
        assert_eq!(profile.current_ctc, FieldText::Absent);
        assert_eq!(
            profile.previous_employers,
            vec!["Globex", "Initech", "Umbrella Corp"]
        );
    }

    #[test]
    fn test_previous_employers_stop_at_next_key() {
        let body = "\
Previous Employer: Globex
- Initech
Interests/Hobbies: chess
";
        let profile = parse_profile(body);
        assert_eq!(profile.previous_employers, vec!["Globex", "Initech"]);
        assert_eq!(profile.interests_hobbies.value(), Some("chess"));
    }

    #[test]
    fn test_parse_education() {
        let body = "\
Institution: IIT Bombay, Mumbai
- Degree/Program: B.Tech Computer Science
- Grades/CGPA/Percentage: 8.9
- Year of Passing: 2019
Institution: Delhi Public School
- Degree/Program: Senior Secondary
- Grades/CGPA/Percentage: N/A
- Year of Passing: 2015
";
        let entries = parse_education(body);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].institution, "IIT Bombay");
        assert_eq!(entries[0].degree.as_deref(), Some("B.Tech Computer Science"));
        assert_eq!(entries[0].grades.as_deref(), Some("8.9"));
        assert_eq!(entries[0].year.as_deref(), Some("2019"));
        assert_eq!(entries[1].institution, "Delhi Public School");
        assert_eq!(entries[1].grades, None);
    }

    #[test]
    fn test_parse_skills_with_categories() {
        let body = "Programming Languages:\nPython\nGo\nDatabases:\nPostgreSQL";
        let skills = parse_skills(body);
        assert_eq!(
            skills,
            vec![
                SkillEntry {
                    name: "Python".to_string(),
                    category: "Programming Languages".to_string()
                },
                SkillEntry {
                    name: "Go".to_string(),
                    category: "Programming Languages".to_string()
                },
                SkillEntry {
                    name: "PostgreSQL".to_string(),
                    category: "Databases".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_skills_default_category_and_markers() {
        let body = "- Rust\n* Docker\nC";
        let skills = parse_skills(body);
        // single-character entries are dropped
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].name, "Rust");
        assert_eq!(skills[0].category, "General");
        assert_eq!(skills[1].name, "Docker");
    }

    #[test]
    fn test_parse_list_section_comma_split_and_dedup() {
        let body = "English, Hindi\n- Marathi, with note\nEnglish\nN/A";
        let items = parse_list_section(body);
        // the bulleted line is not comma-split
        assert_eq!(items, vec!["English", "Hindi", "Marathi, with note"]);
    }

    #[test]
    fn test_parse_projects_with_continuation() {
        let body = "\
1. Fraud detection pipeline
built on streaming data
2. Search relevance tuning
- Internal dashboard
orphan continuation is kept with the previous entry
";
        let projects = parse_projects(body);
        assert_eq!(projects.len(), 3);
        assert_eq!(projects[0], "Fraud detection pipeline built on streaming data");
        assert_eq!(projects[1], "Search relevance tuning");
        assert!(projects[2].starts_with("Internal dashboard orphan"));
    }

    #[test]
    fn test_parse_suitable_roles_comma_vs_newline() {
        let comma = parse_suitable_roles("Backend Engineer, Platform Engineer");
        assert_eq!(comma, vec!["Backend Engineer", "Platform Engineer"]);

        let newline = parse_suitable_roles("Backend Engineer\nPlatform Engineer");
        assert_eq!(newline, vec!["Backend Engineer", "Platform Engineer"]);
    }

    #[test]
    fn test_parse_links_patterns() {
        let body = "\
[LinkedIn]: https://linkedin.com/in/jane
- GitHub: https://github.com/jane
jane@example.com
https://github.com/jane/project
some random words
";
        let links = parse_links(body);
        assert_eq!(links.len(), 4);
        assert_eq!(links[0].link_type, "LinkedIn");
        assert_eq!(links[0].url, "https://linkedin.com/in/jane");
        assert_eq!(links[1].link_type, "GitHub");
        assert_eq!(links[2].link_type, "Email");
        assert_eq!(links[2].url, "jane@example.com");
        assert_eq!(links[3].link_type, "GitHub");
        // "some random words" is silently dropped
    }

    #[test]
    fn test_parse_report_never_fails_on_garbage() {
        let report = parse_report("no sections at all");
        assert!(report.profile.name.is_absent());
        assert!(report.skills.is_empty());

        let report = parse_report("");
        assert_eq!(report.profile.years_of_experience, 0.0);
    }

    #[test]
    fn test_full_report_parse() {
        let text = "\
=== CANDIDATE PROFILE ===
Name: Jane Doe
Years of Experience: 4.5
Current/Last Designation: Senior Software Engineer
Current/Last Employer: Acme Corp

=== EDUCATION ===
Institution: IIT Bombay
- Degree/Program: B.Tech

=== SKILLS ===
Programming Languages:
Python
Go

=== LANGUAGES ===
English, Hindi

=== SUITABLE ROLES ===
Backend Engineer, Staff Engineer

=== LINKS ===
[GitHub]: https://github.com/jane
";
        let report = parse_report(text);
        assert_eq!(report.profile.name.value(), Some("Jane Doe"));
        assert_eq!(report.education.len(), 1);
        assert_eq!(report.skills.len(), 2);
        assert_eq!(report.languages, vec!["English", "Hindi"]);
        assert_eq!(report.suitable_roles.len(), 2);
        assert_eq!(report.links.len(), 1);
    }
}
