use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::engine_error;
use reqwest::Method;
use serde_json::Value;

use crate::client::{ApiSettings, HttpTransport, Transport};
use crate::filename::export_filename;
use crate::save::AtomicFileWriter;
use crate::{
    ApiBody, ApiError, EngineEvent, ExportError, ExportFormat, ExportSaved, FailureKind,
    GenerateRequest, RequestSeq,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    /// Directory export downloads are saved into.
    pub download_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_download_dir(download_dir: PathBuf) -> Self {
        Self {
            api: ApiSettings::default(),
            download_dir,
        }
    }
}

enum EngineCommand {
    Generate {
        request: GenerateRequest,
    },
    LoadHistory {
        seq: RequestSeq,
        page: u32,
        limit: u32,
        offset: u64,
    },
    FetchContent {
        id: String,
    },
    Delete {
        id: String,
    },
    Export {
        id: String,
        format: ExportFormat,
    },
    Health,
}

/// Handle to the IO thread: commands in, events out. All requests run on
/// a tokio runtime owned by that thread; callers never block.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new(config.api)?);
        let download_dir = config.download_dir;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("failed to start engine runtime: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                let download_dir = download_dir.clone();
                runtime.spawn(async move {
                    let event = handle_command(transport.as_ref(), &download_dir, command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn generate(&self, request: GenerateRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Generate { request });
    }

    pub fn load_history(&self, seq: RequestSeq, page: u32, limit: u32, offset: u64) {
        let _ = self.cmd_tx.send(EngineCommand::LoadHistory {
            seq,
            page,
            limit,
            offset,
        });
    }

    pub fn fetch_content(&self, id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchContent { id: id.into() });
    }

    pub fn delete(&self, id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Delete { id: id.into() });
    }

    pub fn export(&self, id: impl Into<String>, format: ExportFormat) {
        let _ = self.cmd_tx.send(EngineCommand::Export {
            id: id.into(),
            format,
        });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Health);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    transport: &dyn Transport,
    download_dir: &Path,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Generate { request } => {
            let result = match serde_json::to_value(&request) {
                Ok(body) => {
                    expect_json(transport, Method::POST, "/content/generate", Some(&body)).await
                }
                Err(err) => Err(ApiError::new(
                    FailureKind::MalformedResponse,
                    err.to_string(),
                )),
            };
            EngineEvent::GenerationCompleted { result }
        }
        EngineCommand::LoadHistory {
            seq,
            page,
            limit,
            offset,
        } => {
            let path = format!("/content/history?limit={limit}&offset={offset}");
            EngineEvent::HistoryLoaded {
                seq,
                page,
                result: expect_json(transport, Method::GET, &path, None).await,
            }
        }
        EngineCommand::FetchContent { id } => {
            let path = format!("/content/{id}");
            let result = expect_json(transport, Method::GET, &path, None).await;
            EngineEvent::ContentFetched { id, result }
        }
        EngineCommand::Delete { id } => {
            // 204 arrives as ApiBody::NoContent and is plain success here.
            let path = format!("/content/{id}");
            let result = transport
                .send(Method::DELETE, &path, None)
                .await
                .map(|_| ());
            EngineEvent::ContentDeleted { id, result }
        }
        EngineCommand::Export { id, format } => {
            let path = format!(
                "/content/{id}/export?format={}&platform=all",
                format.query_value()
            );
            let result = run_export(transport, download_dir, &path, format).await;
            EngineEvent::ExportCompleted { format, result }
        }
        EngineCommand::Health => EngineEvent::HealthChecked {
            result: expect_json(transport, Method::GET, "/health", None).await,
        },
    }
}

async fn run_export(
    transport: &dyn Transport,
    download_dir: &Path,
    path: &str,
    format: ExportFormat,
) -> Result<ExportSaved, ExportError> {
    let binary = transport.fetch_binary(path).await?;
    let filename = export_filename(binary.suggested_filename.as_deref(), format);
    let saved_path =
        AtomicFileWriter::new(download_dir.to_path_buf()).write(&filename, &binary.bytes)?;
    Ok(ExportSaved {
        filename,
        path: saved_path,
    })
}

async fn expect_json(
    transport: &dyn Transport,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> Result<Value, ApiError> {
    match transport.send(method, path, body).await? {
        ApiBody::Json(value) => Ok(value),
        // a bodyless reply where JSON was promised
        ApiBody::NoContent => Err(ApiError::new(
            FailureKind::MalformedResponse,
            "missing response body",
        )),
    }
}
