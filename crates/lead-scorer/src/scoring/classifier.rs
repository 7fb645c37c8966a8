use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::domain::{Lead, Offer};
use super::intent::{build_prompt, parse_reply, IntentAssessment};
use crate::config::ClassifierConfig;

/// Seam for the external intent classification service.
///
/// Implementations report failures as [`ClassifierError`]; the scoring pipeline decides how to
/// degrade.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(
        &self,
        lead: &Lead,
        offer: &Offer,
    ) -> Result<IntentAssessment, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("reply contained no message content")]
    EmptyReply,
    #[error("reply was not valid intent JSON: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

/// Classifier backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiIntentClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl OpenAiIntentClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl IntentClassifier for OpenAiIntentClassifier {
    async fn classify(
        &self,
        lead: &Lead,
        offer: &Offer,
    ) -> Result<IntentAssessment, ClassifierError> {
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": build_prompt(lead, offer) }],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let url = self.config.completions_url();
        debug!(%url, model = %self.config.model, "requesting intent classification");

        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status { status, body });
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ClassifierError::EmptyReply)?;

        Ok(parse_reply(&content)?)
    }
}
