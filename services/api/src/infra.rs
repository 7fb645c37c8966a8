use axum::http::HeaderValue;
use lead_scorer::config::{ClassifierConfig, ConfigError, ServerConfig};
use lead_scorer::error::AppError;
use lead_scorer::scoring::{InMemorySessionStore, LeadScoringService, OpenAiIntentClassifier};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

pub(crate) type ScoringService = LeadScoringService<InMemorySessionStore, OpenAiIntentClassifier>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the in-memory session store to the OpenAI-backed classifier.
pub(crate) fn build_scoring_service(
    config: &ClassifierConfig,
) -> Result<ScoringService, AppError> {
    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; every lead will be scored with a degraded intent");
    }

    let classifier = OpenAiIntentClassifier::new(config.clone())?;
    Ok(LeadScoringService::new(
        Arc::new(InMemorySessionStore::default()),
        Arc::new(classifier),
    ))
}

pub(crate) fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let origin = config.cors_allow_origin.trim();
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        let value = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidCorsOrigin {
            value: origin.to_string(),
        })?;
        AllowOrigin::exact(value)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
