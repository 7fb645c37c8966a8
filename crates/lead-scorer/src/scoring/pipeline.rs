use std::sync::Arc;

use tracing::{debug, warn};

use super::classifier::IntentClassifier;
use super::domain::{Lead, Offer, ScoredResult};
use super::intent::IntentAssessment;
use super::rules::rule_score;

/// Sequential scorer merging rule points with AI intent points.
///
/// Each lead gets exactly one classifier call, in input order. A failed call degrades that lead
/// to a `Low` label with zero AI points and the run continues.
pub struct ScoringPipeline<C> {
    classifier: Arc<C>,
}

impl<C> ScoringPipeline<C>
where
    C: IntentClassifier + 'static,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    pub async fn score_lead(&self, lead: Lead, offer: &Offer) -> ScoredResult {
        let rule_points = rule_score(&lead, offer);

        let (assessment, ai_points) = match self.classifier.classify(&lead, offer).await {
            Ok(assessment) => {
                let points = assessment.points();
                (assessment, points)
            }
            Err(error) => {
                warn!(
                    lead = lead.text("name"),
                    %error,
                    "intent classification failed, degrading lead"
                );
                (IntentAssessment::fallback(&error), 0)
            }
        };

        debug!(
            lead = lead.text("name"),
            rule_points,
            ai_points,
            intent = %assessment.intent,
            "lead scored"
        );

        ScoredResult::new(
            lead,
            rule_points,
            assessment.intent,
            ai_points,
            assessment.reasoning,
        )
    }

    pub async fn run(&self, offer: &Offer, leads: Vec<Lead>) -> Vec<ScoredResult> {
        let mut results = Vec::with_capacity(leads.len());
        for lead in leads {
            results.push(self.score_lead(lead, offer).await);
        }
        results
    }
}
