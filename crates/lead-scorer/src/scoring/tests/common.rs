use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::scoring::classifier::{ClassifierError, IntentClassifier};
use crate::scoring::domain::{Lead, Offer};
use crate::scoring::intent::{parse_reply, IntentAssessment};
use crate::scoring::service::LeadScoringService;
use crate::scoring::store::InMemorySessionStore;

pub(super) const LEADS_CSV: &str = "name,role,company,industry,location,linkedin_bio\n\
Ava Patel,Head of Growth,FlowMetrics,B2B SaaS mid-market,New York,Scaling pipeline for data teams\n\
Liam Chen,Marketing Manager,DataLoop,SaaS,Austin,Demand gen and lifecycle\n\
Noor Haddad,Intern,Bloomwell,Healthcare,Boston,\n";

pub(super) fn offer() -> Offer {
    Offer {
        name: Some("AI Outreach Automation".to_string()),
        value_props: vec![
            "24/7 outreach".to_string(),
            "6x more meetings".to_string(),
        ],
        ideal_use_cases: vec!["B2B SaaS mid-market".to_string()],
        ..Offer::default()
    }
}

/// Deterministic classifier keyed by lead name; unknown leads are `Medium`.
#[derive(Default)]
pub(super) struct ScriptedClassifier {
    replies: HashMap<String, IntentAssessment>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub(super) fn with_reply(mut self, lead_name: &str, intent: &str, reasoning: &str) -> Self {
        self.replies.insert(
            lead_name.to_string(),
            IntentAssessment {
                intent: intent.to_string(),
                reasoning: reasoning.to_string(),
            },
        );
        self
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        lead: &Lead,
        _offer: &Offer,
    ) -> Result<IntentAssessment, ClassifierError> {
        let name = lead.text("name").to_string();
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(name.clone());

        Ok(self
            .replies
            .get(&name)
            .cloned()
            .unwrap_or_else(|| IntentAssessment {
                intent: "Medium".to_string(),
                reasoning: format!("{name} fits part of the ICP."),
            }))
    }
}

/// Classifier whose replies are never valid intent JSON.
#[derive(Default)]
pub(super) struct MalformedReplyClassifier {
    calls: AtomicUsize,
}

impl MalformedReplyClassifier {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentClassifier for MalformedReplyClassifier {
    async fn classify(
        &self,
        _lead: &Lead,
        _offer: &Offer,
    ) -> Result<IntentAssessment, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(parse_reply("High intent, book a demo!")?)
    }
}

pub(super) fn build_service(
    classifier: ScriptedClassifier,
) -> (
    LeadScoringService<InMemorySessionStore, ScriptedClassifier>,
    InMemorySessionStore,
    Arc<ScriptedClassifier>,
) {
    let store = InMemorySessionStore::default();
    let classifier = Arc::new(classifier);
    let service = LeadScoringService::new(Arc::new(store.clone()), classifier.clone());
    (service, store, classifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
