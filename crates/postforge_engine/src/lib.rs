//! Postforge engine: API transport and effect execution.
mod client;
mod engine;
mod filename;
mod save;
mod types;

pub use client::{ApiSettings, HttpTransport, Transport};
pub use engine::{EngineConfig, EngineHandle};
pub use filename::{export_filename, filename_from_content_disposition};
pub use save::{ensure_download_dir, AtomicFileWriter, PersistError};
pub use types::{
    ApiBody, ApiError, BinaryResponse, EngineEvent, ExportError, ExportFormat, ExportSaved,
    FailureKind, GenerateRequest, RequestSeq,
};
