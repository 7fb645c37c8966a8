use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::classifier::IntentClassifier;
use super::domain::{Offer, ScoredResult};
use super::service::{LeadScoringError, LeadScoringService};
use super::store::SessionStore;

pub const EXPORT_FILENAME: &str = "results.csv";

/// Router builder exposing offer intake, lead upload, scoring and result export.
pub fn scoring_router<S, C>(service: Arc<LeadScoringService<S, C>>) -> Router
where
    S: SessionStore + 'static,
    C: IntentClassifier + 'static,
{
    Router::new()
        .route("/offer", post(offer_handler::<S, C>))
        .route("/leads/upload", post(upload_handler::<S, C>))
        .route("/score", post(score_handler::<S, C>))
        .route("/results", get(results_handler::<S, C>))
        .route("/results/csv", get(export_handler::<S, C>))
        .with_state(service)
}

impl IntoResponse for LeadScoringError {
    fn into_response(self) -> Response {
        let status = match &self {
            LeadScoringError::InvalidFileType { .. }
            | LeadScoringError::EmptyUpload
            | LeadScoringError::MissingFile
            | LeadScoringError::Multipart(_)
            | LeadScoringError::InvalidEncoding(_)
            | LeadScoringError::Csv(_) => StatusCode::BAD_REQUEST,
            LeadScoringError::NoResults => StatusCode::NOT_FOUND,
            LeadScoringError::Export(_) | LeadScoringError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub(crate) async fn offer_handler<S, C>(
    State(service): State<Arc<LeadScoringService<S, C>>>,
    Json(offer): Json<Offer>,
) -> Result<Json<Value>, LeadScoringError>
where
    S: SessionStore + 'static,
    C: IntentClassifier + 'static,
{
    let stored = service.submit_offer(offer)?;
    Ok(Json(json!({
        "message": "Offer received",
        "offer": stored,
    })))
}

/// Accepts the first multipart field that carries a filename.
pub(crate) async fn upload_handler<S, C>(
    State(service): State<Arc<LeadScoringService<S, C>>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, LeadScoringError>
where
    S: SessionStore + 'static,
    C: IntentClassifier + 'static,
{
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| LeadScoringError::Multipart(err.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let contents = field
            .bytes()
            .await
            .map_err(|err| LeadScoringError::Multipart(err.to_string()))?;
        let count = service.upload_leads(&filename, &contents)?;

        return Ok(Json(json!({
            "message": format!("{count} leads uploaded."),
            "count": count,
        })));
    }

    Err(LeadScoringError::MissingFile)
}

pub(crate) async fn score_handler<S, C>(
    State(service): State<Arc<LeadScoringService<S, C>>>,
) -> Result<Json<Value>, LeadScoringError>
where
    S: SessionStore + 'static,
    C: IntentClassifier + 'static,
{
    let count = service.score().await?;
    Ok(Json(json!({
        "message": format!("{count} leads scored."),
        "count": count,
    })))
}

pub(crate) async fn results_handler<S, C>(
    State(service): State<Arc<LeadScoringService<S, C>>>,
) -> Result<Json<Vec<ScoredResult>>, LeadScoringError>
where
    S: SessionStore + 'static,
    C: IntentClassifier + 'static,
{
    Ok(Json(service.results()?))
}

pub(crate) async fn export_handler<S, C>(
    State(service): State<Arc<LeadScoringService<S, C>>>,
) -> Result<Response, LeadScoringError>
where
    S: SessionStore + 'static,
    C: IntentClassifier + 'static,
{
    let csv = service.export_csv()?;
    let headers = [
        (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={EXPORT_FILENAME}"),
        ),
    ];
    Ok((StatusCode::OK, headers, csv).into_response())
}
