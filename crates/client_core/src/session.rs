use std::sync::Arc;

use shared::{
    domain::FileRef,
    error::ContractError,
    protocol::{QueryOutcome, UploadOutcome},
};
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::{
    backend::{BackendError, HttpBackend, IngestionBackend},
    config::ClientSettings,
    query::QueryCoordinator,
    state::{transition, SessionSnapshot, SessionState, Transition},
    upload::UploadCoordinator,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged(SessionSnapshot),
    /// Raised once per failed upload attempt, for an immediate notification.
    UploadFailed(String),
    AnswerUpdated(String),
}

/// Sole holder of the session state. Transitions are applied under the lock,
/// and the lock is never held while a request is outstanding.
pub struct SessionStore {
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            state: Mutex::new(SessionState::new()),
            events,
        }
    }

    pub async fn apply(&self, step: Transition) -> Result<SessionState, ContractError> {
        let name = step.name();
        let next = {
            let mut guard = self.state.lock().await;
            let next = transition(&guard, step).inspect_err(|err| {
                debug!(transition = name, %err, "session: transition rejected");
            })?;
            *guard = next.clone();
            next
        };
        debug!(
            transition = name,
            phase = ?next.effective_phase(),
            busy = next.busy(),
            "session: transition applied"
        );
        self.publish(SessionEvent::StateChanged(SessionSnapshot::from(&next)));
        Ok(next)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let guard = self.state.lock().await;
        SessionSnapshot::from(&*guard)
    }

    pub fn publish(&self, event: SessionEvent) {
        // No subscribers is fine; the frontend may only poll snapshots.
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Session controller: takes presentation intents, routes them to the file
/// collection or one of the coordinators, and reports the resulting state.
pub struct SessionController {
    store: Arc<SessionStore>,
    uploads: UploadCoordinator,
    queries: QueryCoordinator,
}

impl SessionController {
    pub fn new(backend: Arc<dyn IngestionBackend>) -> Arc<Self> {
        Arc::new(Self {
            store: Arc::new(SessionStore::new()),
            uploads: UploadCoordinator::new(Arc::clone(&backend)),
            queries: QueryCoordinator::new(backend),
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Arc<Self>, BackendError> {
        Ok(Self::new(Arc::new(HttpBackend::new(settings)?)))
    }

    pub async fn add_files(&self, files: Vec<FileRef>) -> Result<SessionSnapshot, ContractError> {
        let state = self.store.apply(Transition::AddFiles(files)).await?;
        Ok(SessionSnapshot::from(&state))
    }

    pub async fn remove_file(&self, index: usize) -> Result<SessionSnapshot, ContractError> {
        let state = self.store.apply(Transition::RemoveFile(index)).await?;
        Ok(SessionSnapshot::from(&state))
    }

    pub async fn submit_upload(&self) -> Result<UploadOutcome, ContractError> {
        self.uploads.submit(&self.store).await
    }

    pub async fn ask(&self, question: &str) -> Result<QueryOutcome, ContractError> {
        self.queries.ask(&self.store, question).await
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot().await
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.store.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
