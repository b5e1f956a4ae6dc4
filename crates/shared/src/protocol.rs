use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Multipart field name carrying each uploaded file.
pub const INGEST_FILES_FIELD: &str = "files";
pub const INGEST_READY_STATUS: &str = "ready";

const UNKNOWN_UPLOAD_ERROR: &str = "Unknown error";
const UNKNOWN_QUERY_ERROR: &str = "Unknown issue";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestResponse {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskResponse {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Validated result of an ingestion round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Ready,
    Failed { message: String },
}

impl UploadOutcome {
    pub fn from_response(response: &IngestResponse) -> Self {
        if response.status.as_deref() == Some(INGEST_READY_STATUS) {
            return Self::Ready;
        }
        let reason = response
            .error
            .as_deref()
            .filter(|error| !error.is_empty())
            .unwrap_or(UNKNOWN_UPLOAD_ERROR);
        Self::Failed {
            message: format!("Upload failed: {reason}"),
        }
    }

    /// The request never produced a usable response body.
    pub fn transport_failure(description: impl Display) -> Self {
        Self::Failed {
            message: format!("Upload error: {description}"),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Ready => None,
            Self::Failed { message } => Some(message),
        }
    }
}

/// Validated result of a question round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Answered { answer: String },
    Failed { message: String },
}

impl QueryOutcome {
    pub fn from_response(response: AskResponse) -> Self {
        match response.answer {
            Some(answer) if !answer.is_empty() => Self::Answered { answer },
            _ => {
                let reason = response
                    .error
                    .filter(|error| !error.is_empty())
                    .unwrap_or_else(|| UNKNOWN_QUERY_ERROR.to_string());
                Self::Failed {
                    message: format!("Error: {reason}"),
                }
            }
        }
    }

    pub fn transport_failure(description: impl Display) -> Self {
        Self::Failed {
            message: format!("Error: {description}"),
        }
    }

    /// Text shown in the answer panel, whichever way the query went.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Answered { answer } => answer,
            Self::Failed { message } => message,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered { .. })
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
