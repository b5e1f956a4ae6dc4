use std::sync::Arc;

use shared::{error::ContractError, protocol::QueryOutcome};
use tracing::{info, warn};

use crate::{
    backend::IngestionBackend,
    session::{SessionEvent, SessionStore},
    state::Transition,
};

/// Asks one question against the ingested corpus. Every response, including a
/// failed one, ends up as the session's answer text.
pub struct QueryCoordinator {
    backend: Arc<dyn IngestionBackend>,
}

impl QueryCoordinator {
    pub fn new(backend: Arc<dyn IngestionBackend>) -> Self {
        Self { backend }
    }

    /// Like uploads, the request outlives a dropped caller and still releases
    /// Busy when it completes.
    pub async fn ask(
        &self,
        store: &Arc<SessionStore>,
        question: &str,
    ) -> Result<QueryOutcome, ContractError> {
        store
            .apply(Transition::BeginQuery {
                question: question.to_string(),
            })
            .await?;
        info!(question_len = question.len(), "query: asking question");

        let request = tokio::spawn(run_query(
            Arc::clone(&self.backend),
            Arc::clone(store),
            question.to_string(),
        ));
        match request.await {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "query: request task aborted");
                finish_query(store, QueryOutcome::transport_failure(&err)).await
            }
        }
    }
}

async fn run_query(
    backend: Arc<dyn IngestionBackend>,
    store: Arc<SessionStore>,
    question: String,
) -> Result<QueryOutcome, ContractError> {
    let outcome = match backend.ask(&question).await {
        Ok(response) => QueryOutcome::from_response(response),
        Err(err) => {
            warn!(%err, "query: request did not complete");
            QueryOutcome::transport_failure(&err)
        }
    };
    finish_query(&store, outcome).await
}

async fn finish_query(
    store: &SessionStore,
    outcome: QueryOutcome,
) -> Result<QueryOutcome, ContractError> {
    store
        .apply(Transition::FinishQuery(outcome.clone()))
        .await?;

    if let QueryOutcome::Failed { message } = &outcome {
        warn!(%message, "query: no answer returned");
    }
    store.publish(SessionEvent::AnswerUpdated(
        outcome.display_text().to_string(),
    ));
    Ok(outcome)
}
