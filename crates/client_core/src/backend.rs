use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::FileRef,
    protocol::{AskRequest, AskResponse, IngestResponse, INGEST_FILES_FIELD},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ClientSettings;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid {endpoint} endpoint: {source}")]
    InvalidEndpoint {
        endpoint: &'static str,
        source: url::ParseError,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("unreadable response (HTTP {status}): {source}")]
    InvalidBody {
        status: u16,
        source: serde_json::Error,
    },
    #[error("ingestion backend unavailable")]
    Unavailable,
}

/// The ingestion/retrieval service as seen from the session.
///
/// Implementations return the parsed response body whatever the HTTP status;
/// only transport failures and unparseable bodies are errors.
#[async_trait]
pub trait IngestionBackend: Send + Sync {
    async fn ingest(&self, files: &[FileRef]) -> Result<IngestResponse, BackendError>;
    async fn ask(&self, question: &str) -> Result<AskResponse, BackendError>;
}

pub struct MissingBackend;

#[async_trait]
impl IngestionBackend for MissingBackend {
    async fn ingest(&self, _files: &[FileRef]) -> Result<IngestResponse, BackendError> {
        Err(BackendError::Unavailable)
    }

    async fn ask(&self, _question: &str) -> Result<AskResponse, BackendError> {
        Err(BackendError::Unavailable)
    }
}

pub struct HttpBackend {
    http: Client,
    upload_url: Url,
    ask_url: Url,
}

impl HttpBackend {
    pub fn new(settings: &ClientSettings) -> Result<Self, BackendError> {
        let upload_url = settings
            .upload_url()
            .map_err(|source| BackendError::InvalidEndpoint {
                endpoint: "upload",
                source,
            })?;
        let ask_url = settings
            .ask_url()
            .map_err(|source| BackendError::InvalidEndpoint {
                endpoint: "ask",
                source,
            })?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            upload_url,
            ask_url,
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    pub fn ask_url(&self) -> &Url {
        &self.ask_url
    }
}

fn file_part(file: &FileRef) -> Result<Part, BackendError> {
    Ok(Part::bytes(file.payload.to_vec())
        .file_name(file.name.clone())
        .mime_str(&file.content_type)?)
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;
    debug!(%status, body_len = body.len(), "backend: response received");
    serde_json::from_str(&body).map_err(|source| BackendError::InvalidBody {
        status: status.as_u16(),
        source,
    })
}

#[async_trait]
impl IngestionBackend for HttpBackend {
    async fn ingest(&self, files: &[FileRef]) -> Result<IngestResponse, BackendError> {
        let mut form = Form::new();
        for file in files {
            form = form.part(INGEST_FILES_FIELD, file_part(file)?);
        }

        debug!(url = %self.upload_url, parts = files.len(), "backend: posting ingestion request");
        let response = self
            .http
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn ask(&self, question: &str) -> Result<AskResponse, BackendError> {
        debug!(url = %self.ask_url, "backend: posting question");
        let response = self
            .http
            .post(self.ask_url.clone())
            .json(&AskRequest {
                question: question.to_string(),
            })
            .send()
            .await?;
        read_json(response).await
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
