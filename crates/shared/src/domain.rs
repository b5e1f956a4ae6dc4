use std::{path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

/// Extensions the ingestion service knows how to extract text from.
pub const SUPPORTED_DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file queued for ingestion. Two refs with the same `name` are the same file
/// as far as the session is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub payload: Arc<[u8]>,
    pub content_type: String,
}

impl FileRef {
    pub fn new(
        name: impl Into<String>,
        payload: impl Into<Arc<[u8]>>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
            content_type: content_type.into(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }
}

/// Stage of a document Q&A session.
///
/// A session only ever *stores* `Collecting` or `Ready`. `Uploading` and
/// `Querying` are what [`SessionPhase::effective`] reports while a request is
/// in flight on top of those two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Collecting,
    Uploading,
    Ready,
    Querying,
}

impl SessionPhase {
    pub fn effective(self, busy: bool) -> Self {
        match (self, busy) {
            (Self::Collecting, true) => Self::Uploading,
            (Self::Ready, true) => Self::Querying,
            (phase, _) => phase,
        }
    }

    /// True once the corpus has been ingested and questions may be asked.
    pub fn is_ingested(self) -> bool {
        matches!(self, Self::Ready | Self::Querying)
    }
}

pub fn is_supported_document(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_DOCUMENT_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
