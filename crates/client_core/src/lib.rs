//! Client-side core of a document Q&A session: collect files, submit them for
//! ingestion, then ask questions against the ingested corpus.

pub mod backend;
pub mod collection;
pub mod config;
pub mod files;
pub mod query;
pub mod session;
pub mod state;
pub mod upload;

pub use backend::{BackendError, HttpBackend, IngestionBackend, MissingBackend};
pub use collection::FileCollection;
pub use config::{load_settings, ClientSettings};
pub use files::load_file_ref;
pub use query::QueryCoordinator;
pub use session::{SessionController, SessionEvent, SessionStore};
pub use state::{SessionSnapshot, SessionState, Transition};
pub use upload::UploadCoordinator;
