use std::io::Cursor;
use std::sync::Arc;

use tracing::{info, warn};

use super::classifier::IntentClassifier;
use super::domain::{Offer, ScoredResult};
use super::pipeline::ScoringPipeline;
use super::store::{SessionStore, StoreError};
use super::tabular::{export_results, parse_leads};

/// Service composing the session store and the scoring pipeline.
pub struct LeadScoringService<S, C> {
    store: Arc<S>,
    pipeline: ScoringPipeline<C>,
}

impl<S, C> LeadScoringService<S, C>
where
    S: SessionStore + 'static,
    C: IntentClassifier + 'static,
{
    pub fn new(store: Arc<S>, classifier: Arc<C>) -> Self {
        Self {
            store,
            pipeline: ScoringPipeline::new(classifier),
        }
    }

    /// Replace the current offer and return it as stored.
    pub fn submit_offer(&self, offer: Offer) -> Result<Offer, LeadScoringError> {
        self.store.replace_offer(offer.clone())?;
        info!(
            offer = offer.name(),
            icp_entries = offer.ideal_use_cases.len(),
            "offer received"
        );
        Ok(offer)
    }

    pub fn offer(&self) -> Result<Offer, LeadScoringError> {
        Ok(self.store.offer()?)
    }

    /// Parse an uploaded CSV and replace the lead batch, returning the number of leads.
    pub fn upload_leads(
        &self,
        filename: &str,
        contents: &[u8],
    ) -> Result<usize, LeadScoringError> {
        if !filename.ends_with(".csv") {
            warn!(filename, "rejected lead upload with non-CSV filename");
            return Err(LeadScoringError::InvalidFileType {
                filename: filename.to_string(),
            });
        }

        let text = std::str::from_utf8(contents)?;
        let leads = parse_leads(Cursor::new(text))?;
        if leads.is_empty() {
            warn!(filename, "rejected lead upload without data rows");
            return Err(LeadScoringError::EmptyUpload);
        }

        let count = leads.len();
        self.store.replace_leads(leads)?;
        info!(filename, count, "leads uploaded");
        Ok(count)
    }

    /// Run the pipeline over the current offer and leads, replacing the result batch.
    pub async fn score(&self) -> Result<usize, LeadScoringError> {
        self.store.replace_results(Vec::new())?;

        let offer = self.store.offer()?;
        let leads = self.store.leads()?;
        info!(leads = leads.len(), offer = offer.name(), "scoring run started");

        let results = self.pipeline.run(&offer, leads).await;
        let count = results.len();
        self.store.replace_results(results)?;

        info!(scored = count, "scoring run finished");
        Ok(count)
    }

    pub fn results(&self) -> Result<Vec<ScoredResult>, LeadScoringError> {
        Ok(self.store.results()?)
    }

    /// Serialize the current results as CSV. Fails when nothing has been scored.
    pub fn export_csv(&self) -> Result<Vec<u8>, LeadScoringError> {
        let results = self.store.results()?;
        if results.is_empty() {
            return Err(LeadScoringError::NoResults);
        }
        export_results(&results).map_err(LeadScoringError::Export)
    }
}

/// Error raised by the lead scoring service.
#[derive(Debug, thiserror::Error)]
pub enum LeadScoringError {
    #[error("File must be a CSV.")]
    InvalidFileType { filename: String },
    #[error("No leads found in CSV.")]
    EmptyUpload,
    #[error("No file provided in upload.")]
    MissingFile,
    #[error("invalid multipart upload: {0}")]
    Multipart(String),
    #[error("CSV upload is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("No results to export.")]
    NoResults,
    #[error("failed to export results: {0}")]
    Export(#[source] csv::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}
