use serde::{Deserialize, Serialize};

use super::domain::{Lead, Offer};

pub const DEFAULT_INTENT: &str = "Low";
pub const DEFAULT_REASONING: &str = "No reasoning provided.";

/// Intent label and rationale produced for a single lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentAssessment {
    pub intent: String,
    pub reasoning: String,
}

impl IntentAssessment {
    /// Degraded assessment used when the classifier could not produce one. The label reads
    /// `Low`, but callers award no AI points for it.
    pub fn fallback(error: &dyn std::fmt::Display) -> Self {
        Self {
            intent: DEFAULT_INTENT.to_string(),
            reasoning: format!("AI error: {error}"),
        }
    }

    pub fn points(&self) -> u8 {
        intent_points(&self.intent)
    }
}

/// Map an intent label to AI points. Unknown labels score nothing.
pub fn intent_points(intent: &str) -> u8 {
    match intent.to_lowercase().as_str() {
        "high" => 50,
        "medium" => 30,
        "low" => 10,
        _ => 0,
    }
}

#[derive(Debug, Deserialize)]
struct IntentReply {
    #[serde(default = "default_intent")]
    intent: String,
    #[serde(default = "default_reasoning")]
    reasoning: String,
}

fn default_intent() -> String {
    DEFAULT_INTENT.to_string()
}

fn default_reasoning() -> String {
    DEFAULT_REASONING.to_string()
}

/// Parse the model's JSON reply. Absent keys fall back to the defaults.
pub fn parse_reply(content: &str) -> Result<IntentAssessment, serde_json::Error> {
    let reply: IntentReply = serde_json::from_str(content.trim())?;
    Ok(IntentAssessment {
        intent: reply.intent,
        reasoning: reply.reasoning,
    })
}

pub fn build_prompt(lead: &Lead, offer: &Offer) -> String {
    format!(
        "You are an expert sales assistant. Given the following product/offer and lead details, \
classify the lead's buying intent as High, Medium, or Low, and explain your reasoning in 1-2 \
sentences.

Product/Offer:
Name: {offer_name}
Value Props: {value_props}
Ideal Use Cases: {use_cases}

Lead:
Name: {name}
Role: {role}
Company: {company}
Industry: {industry}
Location: {location}
LinkedIn Bio: {bio}

Respond in JSON with keys 'intent' and 'reasoning'.
",
        offer_name = offer.name(),
        value_props = offer.value_props.join(", "),
        use_cases = offer.ideal_use_cases.join(", "),
        name = lead.text("name"),
        role = lead.text("role"),
        company = lead.text("company"),
        industry = lead.text("industry"),
        location = lead.text("location"),
        bio = lead.text("linkedin_bio"),
    )
}
