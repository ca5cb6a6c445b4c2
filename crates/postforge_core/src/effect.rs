#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitGeneration {
        request: crate::GenerationRequest,
    },
    LoadHistory {
        seq: crate::RequestSeq,
        page: u32,
        limit: u32,
        offset: u64,
    },
    FetchContent {
        id: String,
    },
    DeleteContent {
        id: String,
    },
    ExportContent {
        id: String,
        format: ExportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
}

impl ExportFormat {
    /// Wire value used in the export query string and in notifications.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
        }
    }
}
