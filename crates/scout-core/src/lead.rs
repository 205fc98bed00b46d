//! Lead record schema and lenient field coercion.
//!
//! A [`LeadRecord`] describes one prospective company. Every field is
//! optional: absence means "unknown", never an error. Serialization always
//! writes every key (`null` for absent values) so downstream consumers can
//! rely on a fixed shape.
//!
//! Coercion is per-field: a field that fails to coerce is nulled and the
//! record is kept. One malformed field must not discard an otherwise-valid
//! lead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Fit score range accepted after coercion. Out-of-range values are clamped.
pub const SCORE_MIN: i64 = 1;
/// Upper bound of the fit score range.
pub const SCORE_MAX: i64 = 10;

/// City/country pair for a company's location.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// City name.
    pub city: Option<String>,
    /// Country name.
    pub country: Option<String>,
}

/// One key decision maker at a company.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionMaker {
    /// Person's name.
    pub name: Option<String>,
    /// Role/title at the company.
    pub role: Option<String>,
    /// LinkedIn profile URL.
    pub linkedin: Option<String>,
}

/// One prospective company produced by the pipeline.
///
/// Field names are the external data contract — stage outputs are JSON
/// objects with these snake_case keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Company name.
    pub company_name: Option<String>,
    /// Annual revenue, unit/currency unnormalized (e.g. `"$4.5M"`).
    pub annual_revenue: Option<String>,
    /// Company location.
    pub location: Option<Location>,
    /// Company website URL.
    pub website_url: Option<String>,
    /// Free-text description of what the company does.
    pub review: Option<String>,
    /// Number of employees.
    pub num_employees: Option<u32>,
    /// Key people with their LinkedIn profiles, in source order.
    pub key_decision_makers: Option<Vec<DecisionMaker>>,
    /// Fit score, clamped to `1..=10` during coercion.
    pub score: Option<u8>,
}

impl LeadRecord {
    /// Coerce a JSON value into a `LeadRecord`.
    ///
    /// Returns `None` when `value` is not a mapping. Every field coerces
    /// independently; a field that fails coercion is nulled with a warning
    /// and the rest of the record survives.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            company_name: coerce_string(obj.get("company_name"), "company_name"),
            annual_revenue: coerce_string(obj.get("annual_revenue"), "annual_revenue"),
            location: coerce_location(obj.get("location")),
            website_url: coerce_string(obj.get("website_url"), "website_url"),
            review: coerce_string(obj.get("review"), "review"),
            num_employees: coerce_count(obj.get("num_employees"), "num_employees"),
            key_decision_makers: coerce_decision_makers(obj.get("key_decision_makers")),
            score: coerce_score(obj.get("score")),
        })
    }
}

/// Coerce a JSON value into a string field.
///
/// Accepts strings directly and numbers via their display form (models
/// regularly emit `"num_employees": 120` style bare numbers for text
/// fields like revenue). Anything else nulls the field.
fn coerce_string(value: Option<&Value>, field: &str) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => {
            warn!(field, value_type = json_type(other), "field failed string coercion, nulled");
            None
        }
    }
}

fn coerce_location(value: Option<&Value>) -> Option<Location> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(Location {
            city: coerce_string(map.get("city"), "location.city"),
            country: coerce_string(map.get("country"), "location.country"),
        }),
        Some(other) => {
            warn!(field = "location", value_type = json_type(other), "expected a mapping, nulled");
            None
        }
    }
}

fn coerce_count(value: Option<&Value>, field: &str) -> Option<u32> {
    let parsed = match value {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(n) if (0..=i64::from(u32::MAX)).contains(&n) => Some(n as u32),
        _ => {
            warn!(field, "field failed non-negative integer coercion, nulled");
            None
        }
    }
}

/// Coerce and clamp the fit score.
///
/// Accepts integers, floats (rounded), and numeric strings. Values outside
/// `1..=10` are clamped rather than rejected so a model that scores `0` or
/// `11` still yields a usable record.
fn coerce_score(value: Option<&Value>) -> Option<u8> {
    let parsed = match value {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().map(|f| f.round() as i64)),
        Some(_) => None,
    };
    match parsed {
        Some(n) => {
            let clamped = n.clamp(SCORE_MIN, SCORE_MAX);
            if clamped != n {
                warn!(score = n, clamped, "score outside 1..=10, clamped");
            }
            Some(clamped as u8)
        }
        None => {
            warn!(field = "score", "field failed score coercion, nulled");
            None
        }
    }
}

fn coerce_decision_makers(value: Option<&Value>) -> Option<Vec<DecisionMaker>> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let people = items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(DecisionMaker {
                        name: coerce_string(map.get("name"), "key_decision_makers.name"),
                        role: coerce_string(map.get("role"), "key_decision_makers.role"),
                        linkedin: coerce_string(
                            map.get("linkedin"),
                            "key_decision_makers.linkedin",
                        ),
                    }),
                    other => {
                        warn!(
                            value_type = json_type(other),
                            "non-mapping decision maker entry dropped"
                        );
                        None
                    }
                })
                .collect();
            Some(people)
        }
        Some(other) => {
            warn!(
                field = "key_decision_makers",
                value_type = json_type(other),
                "expected a sequence, nulled"
            );
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Sort leads by fit score, highest first.
///
/// Stable: leads with equal scores keep their original relative order.
/// Leads without a score sort last.
pub fn sort_by_score_desc(leads: &mut [LeadRecord]) {
    leads.sort_by_key(|lead| std::cmp::Reverse(lead.score.map_or(-1, i16::from)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record_coerces() {
        let value = json!({
            "company_name": "Acme Robotics",
            "annual_revenue": "$12M",
            "location": {"city": "Austin", "country": "United States"},
            "website_url": "https://acme.example",
            "review": "Industrial automation platform",
            "num_employees": 85,
            "key_decision_makers": [
                {"name": "Dana Reyes", "role": "CEO", "linkedin": "https://linkedin.com/in/dr"}
            ],
            "score": 8
        });
        let lead = LeadRecord::from_value(&value).unwrap();
        assert_eq!(lead.company_name.as_deref(), Some("Acme Robotics"));
        assert_eq!(lead.num_employees, Some(85));
        assert_eq!(lead.score, Some(8));
        let location = lead.location.unwrap();
        assert_eq!(location.city.as_deref(), Some("Austin"));
        let kdm = lead.key_decision_makers.unwrap();
        assert_eq!(kdm.len(), 1);
        assert_eq!(kdm[0].role.as_deref(), Some("CEO"));
    }

    #[test]
    fn non_mapping_is_rejected() {
        assert!(LeadRecord::from_value(&json!("just a string")).is_none());
        assert!(LeadRecord::from_value(&json!(42)).is_none());
        assert!(LeadRecord::from_value(&json!(["a", "b"])).is_none());
    }

    #[test]
    fn missing_fields_are_none_not_error() {
        let lead = LeadRecord::from_value(&json!({})).unwrap();
        assert_eq!(lead, LeadRecord::default());
    }

    #[test]
    fn malformed_field_is_nulled_record_kept() {
        let value = json!({
            "company_name": "Acme",
            "num_employees": "not a number",
            "location": "Austin, TX",
            "key_decision_makers": "nobody"
        });
        let lead = LeadRecord::from_value(&value).unwrap();
        assert_eq!(lead.company_name.as_deref(), Some("Acme"));
        assert_eq!(lead.num_employees, None);
        assert_eq!(lead.location, None);
        assert_eq!(lead.key_decision_makers, None);
    }

    #[test]
    fn numbers_coerce_to_text_fields() {
        let lead = LeadRecord::from_value(&json!({"annual_revenue": 4500000})).unwrap();
        assert_eq!(lead.annual_revenue.as_deref(), Some("4500000"));
    }

    #[test]
    fn negative_employee_count_is_nulled() {
        let lead = LeadRecord::from_value(&json!({"num_employees": -5})).unwrap();
        assert_eq!(lead.num_employees, None);
    }

    #[test]
    fn employee_count_parses_from_string() {
        let lead = LeadRecord::from_value(&json!({"num_employees": "120"})).unwrap();
        assert_eq!(lead.num_employees, Some(120));
    }

    // ── Score handling ──

    #[test]
    fn score_in_range_passes_through() {
        for n in 1..=10 {
            let lead = LeadRecord::from_value(&json!({ "score": n })).unwrap();
            assert_eq!(lead.score, Some(n as u8));
        }
    }

    #[test]
    fn score_out_of_range_is_clamped() {
        let low = LeadRecord::from_value(&json!({"score": 0})).unwrap();
        assert_eq!(low.score, Some(1));
        let high = LeadRecord::from_value(&json!({"score": 15})).unwrap();
        assert_eq!(high.score, Some(10));
        let negative = LeadRecord::from_value(&json!({"score": -3})).unwrap();
        assert_eq!(negative.score, Some(1));
    }

    #[test]
    fn score_accepts_float_and_string() {
        let float = LeadRecord::from_value(&json!({"score": 7.6})).unwrap();
        assert_eq!(float.score, Some(8));
        let string = LeadRecord::from_value(&json!({"score": "9"})).unwrap();
        assert_eq!(string.score, Some(9));
    }

    #[test]
    fn unparseable_score_is_nulled() {
        let lead = LeadRecord::from_value(&json!({"score": "excellent"})).unwrap();
        assert_eq!(lead.score, None);
    }

    #[test]
    fn non_mapping_decision_makers_are_dropped() {
        let value = json!({
            "key_decision_makers": [
                {"name": "Ana", "role": "CTO", "linkedin": null},
                "Bob (CFO)",
                {"name": "Cleo"}
            ]
        });
        let lead = LeadRecord::from_value(&value).unwrap();
        let kdm = lead.key_decision_makers.unwrap();
        assert_eq!(kdm.len(), 2);
        assert_eq!(kdm[0].name.as_deref(), Some("Ana"));
        assert_eq!(kdm[1].name.as_deref(), Some("Cleo"));
        assert_eq!(kdm[1].role, None);
    }

    // ── Fixed serialized shape ──

    #[test]
    fn serialization_always_writes_every_key() {
        let json = serde_json::to_value(LeadRecord::default()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "company_name",
            "annual_revenue",
            "location",
            "website_url",
            "review",
            "num_employees",
            "key_decision_makers",
            "score",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
            assert!(obj[key].is_null());
        }
    }

    #[test]
    fn serde_roundtrip_preserves_record() {
        let value = json!({
            "company_name": "Volt",
            "annual_revenue": null,
            "location": {"city": null, "country": "Canada"},
            "website_url": "https://volt.example",
            "review": null,
            "num_employees": 40,
            "key_decision_makers": [],
            "score": 6
        });
        let lead = LeadRecord::from_value(&value).unwrap();
        let json = serde_json::to_string(&lead).unwrap();
        let back: LeadRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lead);
    }

    // ── Sorting ──

    fn scored(name: &str, score: Option<u8>) -> LeadRecord {
        LeadRecord {
            company_name: Some(name.to_string()),
            score,
            ..Default::default()
        }
    }

    #[test]
    fn sort_orders_by_score_descending() {
        let mut leads = vec![scored("low", Some(3)), scored("high", Some(9)), scored("mid", Some(5))];
        sort_by_score_desc(&mut leads);
        let names: Vec<_> = leads.iter().map(|l| l.company_name.as_deref().unwrap()).collect();
        assert_eq!(names, ["high", "mid", "low"]);
    }

    #[test]
    fn sort_is_stable_for_equal_scores() {
        let mut leads = vec![
            scored("first", Some(7)),
            scored("second", Some(7)),
            scored("third", Some(7)),
        ];
        sort_by_score_desc(&mut leads);
        let names: Vec<_> = leads.iter().map(|l| l.company_name.as_deref().unwrap()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn unscored_leads_sort_last() {
        let mut leads = vec![scored("none", None), scored("one", Some(1)), scored("ten", Some(10))];
        sort_by_score_desc(&mut leads);
        let names: Vec<_> = leads.iter().map(|l| l.company_name.as_deref().unwrap()).collect();
        assert_eq!(names, ["ten", "one", "none"]);
    }

    // ── Coercion never panics ──

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_json() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(|n| json!(n)),
                any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(|f| json!(f)),
                ".*".prop_map(Value::String),
            ];
            leaf.prop_recursive(3, 24, 6, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                    prop::collection::hash_map("[a-z_]{1,20}", inner, 0..6)
                        .prop_map(|m| Value::Object(m.into_iter().collect())),
                ]
            })
        }

        proptest! {
            #[test]
            fn from_value_never_panics(value in arbitrary_json()) {
                let _ = LeadRecord::from_value(&value);
            }

            #[test]
            fn coerced_score_is_always_in_range(value in arbitrary_json()) {
                if let Some(lead) = LeadRecord::from_value(&json!({ "score": value })) {
                    if let Some(score) = lead.score {
                        prop_assert!((1..=10).contains(&score));
                    }
                }
            }
        }
    }
}
