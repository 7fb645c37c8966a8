use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Lead, Offer, ScoredResult};

/// Holder for the current offer, lead batch and result batch.
///
/// Every write replaces the whole value. Readers receive owned snapshots, so a scoring run
/// works on the offer and leads as they were when it started.
pub trait SessionStore: Send + Sync {
    fn offer(&self) -> Result<Offer, StoreError>;
    fn replace_offer(&self, offer: Offer) -> Result<(), StoreError>;
    fn leads(&self) -> Result<Vec<Lead>, StoreError>;
    fn replace_leads(&self, leads: Vec<Lead>) -> Result<(), StoreError>;
    fn results(&self) -> Result<Vec<ScoredResult>, StoreError>;
    fn replace_results(&self, results: Vec<ScoredResult>) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Process-memory session store. Clones share the same state.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    offer: Arc<Mutex<Offer>>,
    leads: Arc<Mutex<Vec<Lead>>>,
    results: Arc<Mutex<Vec<ScoredResult>>>,
}

fn lock<'a, T>(slot: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, StoreError> {
    slot.lock()
        .map_err(|_| StoreError::Unavailable(format!("{name} mutex poisoned")))
}

impl SessionStore for InMemorySessionStore {
    fn offer(&self) -> Result<Offer, StoreError> {
        Ok(lock(&self.offer, "offer")?.clone())
    }

    fn replace_offer(&self, offer: Offer) -> Result<(), StoreError> {
        *lock(&self.offer, "offer")? = offer;
        Ok(())
    }

    fn leads(&self) -> Result<Vec<Lead>, StoreError> {
        Ok(lock(&self.leads, "leads")?.clone())
    }

    fn replace_leads(&self, leads: Vec<Lead>) -> Result<(), StoreError> {
        *lock(&self.leads, "leads")? = leads;
        Ok(())
    }

    fn results(&self) -> Result<Vec<ScoredResult>, StoreError> {
        Ok(lock(&self.results, "results")?.clone())
    }

    fn replace_results(&self, results: Vec<ScoredResult>) -> Result<(), StoreError> {
        *lock(&self.results, "results")? = results;
        Ok(())
    }
}
