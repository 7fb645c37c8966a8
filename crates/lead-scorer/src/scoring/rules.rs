//! Deterministic rule layer: role seniority, ICP industry fit and profile completeness.
//!
//! Matching is deliberately loose. Role vocabulary is matched as case-sensitive substrings, so
//! "VP of Sales" hits "VP" and "Team Leader" hits "Lead".

use serde::Serialize;

use super::domain::{Lead, Offer, LEAD_FIELDS};

pub const DECISION_MAKER_TITLES: [&str; 6] =
    ["Head", "Director", "VP", "Chief", "Founder", "Owner"];
pub const INFLUENCER_TITLES: [&str; 3] = ["Manager", "Lead", "Specialist"];

pub const DECISION_MAKER_POINTS: u8 = 20;
pub const INFLUENCER_POINTS: u8 = 10;
pub const EXACT_INDUSTRY_POINTS: u8 = 20;
pub const ADJACENT_INDUSTRY_POINTS: u8 = 10;
pub const COMPLETENESS_POINTS: u8 = 10;

/// Per-rule contribution so callers can explain a rule score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleBreakdown {
    pub role_relevance: u8,
    pub industry_match: u8,
    pub data_completeness: u8,
}

impl RuleBreakdown {
    pub fn evaluate(lead: &Lead, offer: &Offer) -> Self {
        Self {
            role_relevance: role_relevance(lead.text("role")),
            industry_match: industry_match(lead.text("industry"), &offer.ideal_use_cases),
            data_completeness: data_completeness(lead),
        }
    }

    pub fn total(&self) -> u8 {
        self.role_relevance + self.industry_match + self.data_completeness
    }
}

pub fn role_relevance(role: &str) -> u8 {
    if DECISION_MAKER_TITLES.iter().any(|title| role.contains(title)) {
        return DECISION_MAKER_POINTS;
    }
    if INFLUENCER_TITLES.iter().any(|title| role.contains(title)) {
        return INFLUENCER_POINTS;
    }
    0
}

/// Exact matches anywhere in the ICP list outrank partial matches, regardless of position.
pub fn industry_match<S: AsRef<str>>(lead_industry: &str, icp: &[S]) -> u8 {
    if icp.is_empty() {
        return 0;
    }

    let industry = lead_industry.to_lowercase();
    let entries: Vec<String> = icp.iter().map(|entry| entry.as_ref().to_lowercase()).collect();

    if entries.iter().any(|entry| *entry == industry) {
        return EXACT_INDUSTRY_POINTS;
    }

    if entries
        .iter()
        .any(|entry| entry.contains(industry.as_str()) || industry.contains(entry.as_str()))
    {
        return ADJACENT_INDUSTRY_POINTS;
    }

    0
}

pub fn data_completeness(lead: &Lead) -> u8 {
    let complete = LEAD_FIELDS
        .iter()
        .all(|field| lead.field(field).is_some_and(|value| !value.is_empty()));

    if complete {
        COMPLETENESS_POINTS
    } else {
        0
    }
}

pub fn rule_score(lead: &Lead, offer: &Offer) -> u8 {
    RuleBreakdown::evaluate(lead, offer).total()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_lead() -> Lead {
        Lead::from_columns([
            ("name", "Ava Patel"),
            ("role", "Head of Growth"),
            ("company", "FlowMetrics"),
            ("industry", "B2B SaaS mid-market"),
            ("location", "New York"),
            ("linkedin_bio", "Scaling pipeline for data products"),
        ])
    }

    fn saas_offer() -> Offer {
        Offer {
            ideal_use_cases: vec!["B2B SaaS mid-market".to_string()],
            ..Offer::default()
        }
    }

    #[test]
    fn role_relevance_ranks_decision_makers_first() {
        assert_eq!(role_relevance("Head of Growth"), 20);
        assert_eq!(role_relevance("VP of Sales"), 20);
        assert_eq!(role_relevance("Co-Founder & Lead Engineer"), 20);
        assert_eq!(role_relevance("Marketing Manager"), 10);
        assert_eq!(role_relevance("Intern"), 0);
        assert_eq!(role_relevance(""), 0);
    }

    #[test]
    fn role_relevance_matches_substrings_case_sensitively() {
        assert_eq!(role_relevance("Team Leader"), 10);
        assert_eq!(role_relevance("head of growth"), 0);
        assert_eq!(role_relevance("SVP Revenue"), 20);
    }

    #[test]
    fn industry_match_tiers() {
        let icp = ["B2B SaaS mid-market"];
        assert_eq!(industry_match("B2B SaaS mid-market", &icp), 20);
        assert_eq!(industry_match("b2b saas MID-MARKET", &icp), 20);
        assert_eq!(industry_match("SaaS", &icp), 10);
        assert_eq!(industry_match("Healthcare", &icp), 0);
    }

    #[test]
    fn industry_match_is_zero_for_empty_icp() {
        let icp: [&str; 0] = [];
        assert_eq!(industry_match("SaaS", &icp), 0);
        assert_eq!(industry_match("", &icp), 0);
    }

    #[test]
    fn later_exact_match_outranks_earlier_partial() {
        let icp = ["Enterprise SaaS", "SaaS"];
        assert_eq!(industry_match("saas", &icp), 20);
    }

    #[test]
    fn icp_entry_contained_in_lead_industry_is_partial() {
        let icp = ["Fintech"];
        assert_eq!(industry_match("Fintech Payments", &icp), 10);
    }

    #[test]
    fn empty_industry_is_contained_in_any_entry() {
        let icp = ["Healthcare"];
        assert_eq!(industry_match("", &icp), 10);
    }

    #[test]
    fn data_completeness_requires_every_field() {
        let lead = complete_lead();
        assert_eq!(data_completeness(&lead), 10);

        for field in LEAD_FIELDS {
            let mut missing = lead.clone();
            match field {
                "name" => missing.name = None,
                "role" => missing.role = None,
                "company" => missing.company = None,
                "industry" => missing.industry = None,
                "location" => missing.location = None,
                _ => missing.linkedin_bio = None,
            }
            assert_eq!(data_completeness(&missing), 0, "missing {field}");
        }

        let mut blank = lead;
        blank.location = Some(String::new());
        assert_eq!(data_completeness(&blank), 0);
    }

    #[test]
    fn rule_score_sums_components() {
        let lead = complete_lead();
        let offer = saas_offer();
        assert_eq!(rule_score(&lead, &offer), 50);

        let mut manager = lead;
        manager.role = Some("Marketing Manager".to_string());
        manager.industry = Some("SaaS".to_string());
        let breakdown = RuleBreakdown::evaluate(&manager, &offer);
        assert_eq!(breakdown.role_relevance, 10);
        assert_eq!(breakdown.industry_match, 10);
        assert_eq!(breakdown.data_completeness, 10);
        assert_eq!(rule_score(&manager, &offer), breakdown.total());
        assert_eq!(breakdown.total(), 30);
    }

    #[test]
    fn rule_score_treats_missing_fields_as_empty() {
        let lead = Lead::default();
        assert_eq!(rule_score(&lead, &Offer::default()), 0);
        assert_eq!(rule_score(&lead, &saas_offer()), 10);
    }
}
