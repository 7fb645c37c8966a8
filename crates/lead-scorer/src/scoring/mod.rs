//! Lead intake, rule and intent scoring, and result export.

pub mod classifier;
pub mod domain;
pub mod intent;
pub mod pipeline;
pub mod router;
pub mod rules;
pub mod service;
pub mod store;
pub mod tabular;

#[cfg(test)]
mod tests;

pub use classifier::{ClassifierError, IntentClassifier, OpenAiIntentClassifier};
pub use domain::{Lead, Offer, ScoredResult, LEAD_FIELDS, RESULT_FIELDS};
pub use intent::{intent_points, IntentAssessment};
pub use pipeline::ScoringPipeline;
pub use router::scoring_router;
pub use rules::{rule_score, RuleBreakdown};
pub use service::{LeadScoringError, LeadScoringService};
pub use store::{InMemorySessionStore, SessionStore, StoreError};
