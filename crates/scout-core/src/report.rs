//! Report rendering — pure transformations of a finished lead sequence.
//!
//! Two export forms:
//!
//! - [`render_markdown`]: human-readable section per lead, followed by an
//!   embedded machine-readable JSON dump of the full sequence.
//! - [`render_json`]: the structured dump directly.
//!
//! [`extract_embedded_json`] recovers the lead sequence from a rendered
//! markdown report, field-for-field.

use std::fmt::Write as _;

use crate::lead::LeadRecord;

const REPORT_TITLE: &str = "# Lead Generation Report";
const JSON_SECTION: &str = "## Raw JSON Data";

/// Render a markdown report for a lead sequence.
///
/// Missing fields render as `N/A`. The embedded JSON dump at the end is the
/// machine-readable form of the same data; [`extract_embedded_json`]
/// round-trips it exactly.
pub fn render_markdown(leads: &[LeadRecord]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    let _ = writeln!(out, "{REPORT_TITLE}\n");

    for lead in leads {
        let _ = writeln!(out, "## {}\n", field(lead.company_name.as_deref()));
        let _ = writeln!(out, "- **Annual Revenue:** {}", field(lead.annual_revenue.as_deref()));
        let _ = writeln!(out, "- **Location:** {}", location_line(lead));
        let _ = writeln!(out, "- **Website:** {}", field(lead.website_url.as_deref()));
        let _ = writeln!(out, "- **Review:** {}", field(lead.review.as_deref()));
        let _ = writeln!(
            out,
            "- **Number of Employees:** {}",
            lead.num_employees.map_or_else(|| "N/A".to_string(), |n| n.to_string())
        );
        let _ = writeln!(
            out,
            "- **Score:** {}/10\n",
            lead.score.map_or_else(|| "N/A".to_string(), |s| s.to_string())
        );

        if let Some(people) = lead.key_decision_makers.as_deref()
            && !people.is_empty()
        {
            let _ = writeln!(out, "### Key Decision Makers");
            for person in people {
                let _ = writeln!(
                    out,
                    "- {} ({}): {}",
                    field(person.name.as_deref()),
                    field(person.role.as_deref()),
                    field(person.linkedin.as_deref())
                );
            }
            out.push('\n');
        }

        out.push_str("---\n\n");
    }

    let _ = writeln!(out, "{JSON_SECTION}\n");
    let _ = writeln!(out, "```json\n{}\n```", render_json(leads)?);
    Ok(out)
}

/// Render the structured dump: a pretty-printed JSON array of leads.
pub fn render_json(leads: &[LeadRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(leads)
}

/// Extract the embedded JSON dump from a rendered markdown report.
///
/// Returns `None` when the report has no parseable embedded dump. The last
/// ```` ```json ```` block in the document is taken, so lead reviews that
/// themselves contain fenced JSON do not confuse extraction.
pub fn extract_embedded_json(report: &str) -> Option<Vec<LeadRecord>> {
    let start = report.rfind("```json\n")?;
    let body = &report[start + "```json\n".len()..];
    let end = body.find("\n```")?;
    serde_json::from_str(&body[..end]).ok()
}

fn field(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn location_line(lead: &LeadRecord) -> String {
    match &lead.location {
        Some(loc) => format!(
            "{}, {}",
            loc.city.as_deref().unwrap_or("N/A"),
            loc.country.as_deref().unwrap_or("N/A")
        ),
        None => "N/A".to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::{DecisionMaker, Location};

    fn sample_leads() -> Vec<LeadRecord> {
        vec![
            LeadRecord {
                company_name: Some("Acme Robotics".into()),
                annual_revenue: Some("$12M".into()),
                location: Some(Location {
                    city: Some("Austin".into()),
                    country: Some("United States".into()),
                }),
                website_url: Some("https://acme.example".into()),
                review: Some("Industrial automation platform".into()),
                num_employees: Some(85),
                key_decision_makers: Some(vec![DecisionMaker {
                    name: Some("Dana Reyes".into()),
                    role: Some("CEO".into()),
                    linkedin: Some("https://linkedin.com/in/dr".into()),
                }]),
                score: Some(8),
            },
            LeadRecord::default(),
        ]
    }

    #[test]
    fn markdown_contains_lead_sections() {
        let report = render_markdown(&sample_leads()).unwrap();
        assert!(report.starts_with("# Lead Generation Report"));
        assert!(report.contains("## Acme Robotics"));
        assert!(report.contains("- **Annual Revenue:** $12M"));
        assert!(report.contains("- **Location:** Austin, United States"));
        assert!(report.contains("- **Score:** 8/10"));
        assert!(report.contains("- Dana Reyes (CEO): https://linkedin.com/in/dr"));
    }

    #[test]
    fn missing_fields_render_as_na() {
        let report = render_markdown(&[LeadRecord::default()]).unwrap();
        assert!(report.contains("## N/A"));
        assert!(report.contains("- **Annual Revenue:** N/A"));
        assert!(report.contains("- **Number of Employees:** N/A"));
        assert!(report.contains("- **Score:** N/A/10"));
        assert!(!report.contains("### Key Decision Makers"));
    }

    #[test]
    fn report_roundtrips_through_embedded_json() {
        let leads = sample_leads();
        let report = render_markdown(&leads).unwrap();
        let extracted = extract_embedded_json(&report).unwrap();
        assert_eq!(extracted, leads);
    }

    #[test]
    fn empty_sequence_roundtrips() {
        let report = render_markdown(&[]).unwrap();
        let extracted = extract_embedded_json(&report).unwrap();
        assert!(extracted.is_empty());
    }

    #[test]
    fn review_containing_fenced_json_does_not_break_extraction() {
        let leads = vec![LeadRecord {
            company_name: Some("Fency".into()),
            review: Some("Their docs say:\n```json\n{\"not\": \"the dump\"}\n```\ndone".into()),
            ..Default::default()
        }];
        let report = render_markdown(&leads).unwrap();
        let extracted = extract_embedded_json(&report).unwrap();
        assert_eq!(extracted, leads);
    }

    #[test]
    fn extraction_fails_gracefully_without_dump() {
        assert!(extract_embedded_json("# Report\nno json here").is_none());
        assert!(extract_embedded_json("```json\nnot valid json\n```").is_none());
    }

    #[test]
    fn render_json_is_a_pretty_array() {
        let json = render_json(&sample_leads()).unwrap();
        let parsed: Vec<LeadRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_leads());
        assert!(json.starts_with("[\n"));
    }
}
