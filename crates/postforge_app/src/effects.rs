use engine_logging::{engine_debug, engine_info, engine_warn};
use postforge_core::{Effect, Msg};
use postforge_engine::{ApiError, EngineConfig, EngineEvent, EngineHandle};

/// Executes core effects against the engine and feeds engine events back
/// as core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> Result<Self, ApiError> {
        Ok(Self {
            engine: EngineHandle::new(config)?,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitGeneration { request } => {
                    engine_info!(
                        "SubmitGeneration topic_len={} platforms={:?}",
                        request.topic.len(),
                        request.platforms
                    );
                    self.engine.generate(map_request(request));
                }
                Effect::LoadHistory {
                    seq,
                    page,
                    limit,
                    offset,
                } => {
                    engine_info!("LoadHistory seq={} page={} offset={}", seq, page, offset);
                    self.engine.load_history(seq, page, limit, offset);
                }
                Effect::FetchContent { id } => {
                    engine_info!("FetchContent id={}", id);
                    self.engine.fetch_content(id);
                }
                Effect::DeleteContent { id } => {
                    engine_info!("DeleteContent id={}", id);
                    self.engine.delete(id);
                }
                Effect::ExportContent { id, format } => {
                    engine_info!("ExportContent id={} format={}", id, format.as_str());
                    self.engine.export(id, map_format(format));
                }
            }
        }
    }

    /// Drains pending engine events into core messages.
    pub fn pump(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }
}

fn map_request(request: postforge_core::GenerationRequest) -> postforge_engine::GenerateRequest {
    postforge_engine::GenerateRequest {
        topic: request.topic,
        platforms: request.platforms,
        audience: request.audience,
        additional_context: request.additional_context,
    }
}

fn map_format(format: postforge_core::ExportFormat) -> postforge_engine::ExportFormat {
    match format {
        postforge_core::ExportFormat::Markdown => postforge_engine::ExportFormat::Markdown,
        postforge_core::ExportFormat::Json => postforge_engine::ExportFormat::Json,
    }
}

fn map_format_to_core(format: postforge_engine::ExportFormat) -> postforge_core::ExportFormat {
    match format {
        postforge_engine::ExportFormat::Markdown => postforge_core::ExportFormat::Markdown,
        postforge_engine::ExportFormat::Json => postforge_core::ExportFormat::Json,
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::GenerationCompleted { result } => Some(Msg::GenerationCompleted {
            result: result.map_err(|err| {
                engine_warn!("generation failed: {}", err);
                err.message
            }),
        }),
        EngineEvent::HistoryLoaded { seq, page, result } => Some(Msg::HistoryLoaded {
            seq,
            page,
            result: result.map_err(|err| {
                engine_warn!("history page {} failed: {}", page, err);
                err.message
            }),
        }),
        EngineEvent::ContentFetched { id, result } => Some(Msg::HistoryItemLoaded {
            result: result.map_err(|err| {
                engine_warn!("content fetch {} failed: {}", id, err);
                err.message
            }),
            id,
        }),
        EngineEvent::ContentDeleted { id, result } => Some(Msg::DeleteCompleted {
            result: result.map_err(|err| {
                engine_warn!("delete {} failed: {}", id, err);
                err.message
            }),
            id,
        }),
        EngineEvent::ExportCompleted { format, result } => Some(Msg::ExportCompleted {
            format: map_format_to_core(format),
            result: result.map(|saved| saved.filename).map_err(|err| {
                // the full error is for the log; the flow shows a generic
                // export-failure notice
                engine_warn!("export failed: {}", err);
                err.to_string()
            }),
        }),
        EngineEvent::HealthChecked { result } => {
            engine_debug!("health check outside doctor run: {:?}", result.is_ok());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{map_event, map_format, map_format_to_core, map_request};
    use postforge_core::Msg;
    use postforge_engine::{ApiError, EngineEvent, ExportFormat, ExportSaved, FailureKind};

    #[test]
    fn formats_map_both_ways() {
        for format in [
            postforge_core::ExportFormat::Markdown,
            postforge_core::ExportFormat::Json,
        ] {
            assert_eq!(map_format_to_core(map_format(format)), format);
        }
    }

    #[test]
    fn request_maps_field_for_field() {
        let mapped = map_request(postforge_core::GenerationRequest {
            topic: "AI safety".to_string(),
            platforms: vec!["twitter".to_string()],
            audience: Some("engineers".to_string()),
            additional_context: None,
        });
        assert_eq!(mapped.topic, "AI safety");
        assert_eq!(mapped.platforms, vec!["twitter".to_string()]);
        assert_eq!(mapped.audience.as_deref(), Some("engineers"));
        assert_eq!(mapped.additional_context, None);
    }

    #[test]
    fn generation_error_carries_transport_message() {
        let event = EngineEvent::GenerationCompleted {
            result: Err(ApiError {
                kind: FailureKind::HttpStatus(502),
                message: "Agent service temporarily unavailable. Please try again.".to_string(),
            }),
        };
        match map_event(event) {
            Some(Msg::GenerationCompleted { result: Err(message) }) => {
                assert_eq!(
                    message,
                    "Agent service temporarily unavailable. Please try again."
                );
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn export_success_maps_to_saved_filename() {
        let event = EngineEvent::ExportCompleted {
            format: ExportFormat::Json,
            result: Ok(ExportSaved {
                filename: "postforge-export.json".to_string(),
                path: std::path::PathBuf::from("downloads/postforge-export.json"),
            }),
        };
        match map_event(event) {
            Some(Msg::ExportCompleted {
                format: postforge_core::ExportFormat::Json,
                result: Ok(filename),
            }) => assert_eq!(filename, "postforge-export.json"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn health_events_do_not_reach_the_flows() {
        let event = EngineEvent::HealthChecked {
            result: Err(ApiError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            }),
        };
        assert!(map_event(event).is_none());
    }
}
