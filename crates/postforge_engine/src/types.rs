use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::save::PersistError;

/// Token identifying one history page request; echoed back with the
/// response so stale replies can be recognized.
pub type RequestSeq = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, FailureKind::HttpStatus(404))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed server response"),
        }
    }
}

/// Successful transport result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBody {
    /// 204 response; distinct from any JSON value, no body parse attempted.
    NoContent,
    Json(Value),
}

/// Raw export download plus the filename suggested by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryResponse {
    pub bytes: Vec<u8>,
    pub suggested_filename: Option<String>,
}

/// A completed local save of an export download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSaved {
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
}

impl ExportFormat {
    /// Value used in the export query string.
    pub fn query_value(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
        }
    }

    /// Extension used for the fallback download filename.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }
}

/// Wire form of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub platforms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

#[derive(Debug)]
pub enum EngineEvent {
    GenerationCompleted {
        result: Result<Value, ApiError>,
    },
    HistoryLoaded {
        seq: RequestSeq,
        page: u32,
        result: Result<Value, ApiError>,
    },
    ContentFetched {
        id: String,
        result: Result<Value, ApiError>,
    },
    ContentDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
    ExportCompleted {
        format: ExportFormat,
        result: Result<ExportSaved, ExportError>,
    },
    HealthChecked {
        result: Result<Value, ApiError>,
    },
}
