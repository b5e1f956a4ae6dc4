use std::sync::Arc;

use shared::{error::ContractError, protocol::UploadOutcome};
use tracing::{info, warn};

use crate::{
    backend::IngestionBackend,
    collection::FileCollection,
    session::{SessionEvent, SessionStore},
    state::Transition,
};

/// Sends the collected files for ingestion and moves the session to `Ready`
/// once the service reports the corpus is queryable.
pub struct UploadCoordinator {
    backend: Arc<dyn IngestionBackend>,
}

impl UploadCoordinator {
    pub fn new(backend: Arc<dyn IngestionBackend>) -> Self {
        Self { backend }
    }

    /// The request runs on its own task once Busy is claimed, so dropping the
    /// returned future does not leave the session stuck in `Uploading`.
    pub async fn submit(&self, store: &Arc<SessionStore>) -> Result<UploadOutcome, ContractError> {
        let started = store.apply(Transition::BeginUpload).await?;
        let files = started.files().clone();
        info!(
            file_count = files.len(),
            total_bytes = files.total_bytes(),
            "upload: submitting files for ingestion"
        );

        let request = tokio::spawn(run_upload(
            Arc::clone(&self.backend),
            Arc::clone(store),
            files,
        ));
        match request.await {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "upload: request task aborted");
                finish_upload(store, UploadOutcome::transport_failure(&err)).await
            }
        }
    }
}

async fn run_upload(
    backend: Arc<dyn IngestionBackend>,
    store: Arc<SessionStore>,
    files: FileCollection,
) -> Result<UploadOutcome, ContractError> {
    let outcome = match backend.ingest(files.as_slice()).await {
        Ok(response) => UploadOutcome::from_response(&response),
        Err(err) => {
            warn!(%err, "upload: request did not complete");
            UploadOutcome::transport_failure(&err)
        }
    };
    finish_upload(&store, outcome).await
}

async fn finish_upload(
    store: &SessionStore,
    outcome: UploadOutcome,
) -> Result<UploadOutcome, ContractError> {
    store
        .apply(Transition::FinishUpload(outcome.clone()))
        .await?;

    match &outcome {
        UploadOutcome::Ready => info!("upload: corpus ready for questions"),
        UploadOutcome::Failed { message } => {
            warn!(%message, "upload: ingestion failed");
            store.publish(SessionEvent::UploadFailed(message.clone()));
        }
    }
    Ok(outcome)
}
