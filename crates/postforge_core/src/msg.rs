#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the topic input box (debounced text).
    TopicChanged(String),
    /// User edited the audience input box.
    AudienceChanged(String),
    /// User edited the additional-context input box.
    ContextChanged(String),
    /// User checked or unchecked a platform.
    PlatformToggled { platform: String, selected: bool },
    /// User submitted the generation form.
    GenerateClicked,
    /// Engine completion for a generation request.
    GenerationCompleted {
        result: Result<serde_json::Value, String>,
    },
    /// User switched to the history view.
    HistoryOpened,
    /// User clicked the history refresh control.
    RefreshHistoryClicked,
    /// User clicked a page control (0-indexed).
    PageClicked(u32),
    /// Engine completion for a history page request.
    HistoryLoaded {
        seq: crate::RequestSeq,
        page: u32,
        result: Result<serde_json::Value, String>,
    },
    /// User selected a history item.
    HistoryItemClicked { id: String },
    /// Engine completion for a single-item fetch.
    HistoryItemLoaded {
        id: String,
        result: Result<serde_json::Value, String>,
    },
    /// User asked to delete a history item.
    DeleteClicked { id: String },
    /// Engine completion for a delete request.
    DeleteCompleted {
        id: String,
        result: Result<(), String>,
    },
    /// User asked to export the current content.
    ExportClicked { format: crate::ExportFormat },
    /// Engine completion for an export; `Ok` carries the saved filename.
    ExportCompleted {
        format: crate::ExportFormat,
        result: Result<String, String>,
    },
    /// UI clock tick; drives toast expiry.
    Tick { now_ms: u64 },
    /// Fallback for placeholder wiring.
    NoOp,
}
