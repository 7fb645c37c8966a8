use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Column names the scorer understands, in export order.
pub const LEAD_FIELDS: [&str; 6] = [
    "name",
    "role",
    "company",
    "industry",
    "location",
    "linkedin_bio",
];

/// Fields a scored result adds on top of the lead columns, in export order.
pub const RESULT_FIELDS: [&str; 5] = ["intent", "score", "reasoning", "rule_points", "ai_points"];

/// Product or offer that leads are scored against.
///
/// Unrecognized keys are kept in `extra` so the stored offer echoes back exactly what was
/// submitted. Recognized keys never reject a submission: scalars are read as text, a lone
/// string counts as a one-item list and anything else is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub value_props: Vec<String>,
    /// Ideal customer profile: target industry descriptors.
    #[serde(default, deserialize_with = "lenient_list")]
    pub ideal_use_cases: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Offer {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        Value::String(text) => vec![text],
        _ => Vec::new(),
    })
}

/// One uploaded lead row. Every recognized field is optional; columns the scorer does not
/// know are carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_bio: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Lead {
    /// Build a lead from header/value pairs, routing recognized columns to typed fields.
    pub fn from_columns<I, K, V>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut lead = Lead::default();
        for (key, value) in columns {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                "name" => lead.name = Some(value),
                "role" => lead.role = Some(value),
                "company" => lead.company = Some(value),
                "industry" => lead.industry = Some(value),
                "location" => lead.location = Some(value),
                "linkedin_bio" => lead.linkedin_bio = Some(value),
                _ => {
                    lead.extra.insert(key, value);
                }
            }
        }
        lead
    }

    /// Value of a recognized field or extra column, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "name" => self.name.as_deref(),
            "role" => self.role.as_deref(),
            "company" => self.company.as_deref(),
            "industry" => self.industry.as_deref(),
            "location" => self.location.as_deref(),
            "linkedin_bio" => self.linkedin_bio.as_deref(),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// Recognized field value with absence treated as the empty string.
    pub fn text(&self, key: &str) -> &str {
        self.field(key).unwrap_or("")
    }
}

/// A lead merged with its rule score and AI intent assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub lead: Lead,
    pub intent: String,
    pub score: u16,
    pub reasoning: String,
    pub rule_points: u8,
    pub ai_points: u8,
}

impl ScoredResult {
    /// Uploaded columns named like a result field are dropped; the computed values win.
    pub fn new(
        mut lead: Lead,
        rule_points: u8,
        intent: String,
        ai_points: u8,
        reasoning: String,
    ) -> Self {
        for field in RESULT_FIELDS {
            lead.extra.remove(field);
        }

        Self {
            lead,
            intent,
            score: u16::from(rule_points) + u16::from(ai_points),
            reasoning,
            rule_points,
            ai_points,
        }
    }
}
