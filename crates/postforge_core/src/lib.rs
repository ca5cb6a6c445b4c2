//! Postforge core: pure state machine and view-model helpers.
mod content;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use content::{
    normalize, normalize_history_page, ContentPlan, GeneratedContent, HistoryItem, HistoryPage,
    PlatformOutput, PlatformSection, Tweet, NOT_AVAILABLE,
};
pub use effect::{Effect, ExportFormat};
pub use msg::Msg;
pub use state::{
    AppState, GenerationForm, GenerationRequest, RequestSeq, Severity, SubmissionState,
    ToastMessage, PAGE_SIZE, TOAST_TTL_MS,
};
pub use update::update;
pub use view_model::{total_pages, AppViewModel, HistoryView, PageButton};
