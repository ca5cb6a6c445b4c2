use crate::content::{GeneratedContent, HistoryItem, HistoryPage};
use crate::view_model::{page_buttons, total_pages, AppViewModel, HistoryView};

/// Items requested per history page.
pub const PAGE_SIZE: u32 = 10;

/// Toast display duration in milliseconds.
pub const TOAST_TTL_MS: u64 = 5_000;

/// Monotonically increasing token identifying one history page request.
pub type RequestSeq = u64;

/// Lifecycle of the single-flight generation request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Ephemeral user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub text: String,
    pub severity: Severity,
    pub created_at_ms: u64,
}

/// Mirror of the generation form inputs, kept for pre-flight validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationForm {
    pub topic: String,
    pub audience: String,
    pub additional_context: String,
    /// Selected platforms in toggle order.
    pub platforms: Vec<String>,
}

/// Validated request payload; immutable once sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub platforms: Vec<String>,
    pub audience: Option<String>,
    pub additional_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct HistoryPane {
    current_page: u32,
    total_items: u64,
    has_more: bool,
    items: Vec<HistoryItem>,
    latest_seq: RequestSeq,
    loading: bool,
    loaded_once: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: GenerationForm,
    submission: SubmissionState,
    current_content: Option<GeneratedContent>,
    current_content_id: Option<String>,
    history: HistoryPane,
    toasts: Vec<ToastMessage>,
    clock_ms: u64,
    next_seq: RequestSeq,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let pages = total_pages(self.history.total_items);
        AppViewModel {
            submission: self.submission.clone(),
            form_enabled: !matches!(self.submission, SubmissionState::Submitting),
            form: self.form.clone(),
            content: self.current_content.clone(),
            current_content_id: self.current_content_id.clone(),
            history: HistoryView {
                items: self.history.items.clone(),
                loading: self.history.loading,
                empty: self.history.loaded_once && self.history.items.is_empty(),
                current_page: self.history.current_page,
                total_pages: pages,
                page_buttons: page_buttons(self.history.current_page, pages),
                prev_enabled: self.history.current_page > 0,
                // The server's has_more flag is authoritative over the
                // derived page count.
                next_enabled: self.history.has_more,
            },
            toasts: self.toasts.clone(),
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn current_content(&self) -> Option<&GeneratedContent> {
        self.current_content.as_ref()
    }

    pub fn current_content_id(&self) -> Option<&str> {
        self.current_content_id.as_deref()
    }

    pub fn toasts(&self) -> &[ToastMessage] {
        &self.toasts
    }

    pub(crate) fn form(&self) -> &GenerationForm {
        &self.form
    }

    pub(crate) fn set_topic(&mut self, topic: String) {
        self.form.topic = topic;
        self.dirty = true;
    }

    pub(crate) fn set_audience(&mut self, audience: String) {
        self.form.audience = audience;
        self.dirty = true;
    }

    pub(crate) fn set_additional_context(&mut self, additional_context: String) {
        self.form.additional_context = additional_context;
        self.dirty = true;
    }

    pub(crate) fn toggle_platform(&mut self, platform: String, selected: bool) {
        let present = self.form.platforms.iter().any(|p| *p == platform);
        if selected && !present {
            self.form.platforms.push(platform);
        } else if !selected && present {
            self.form.platforms.retain(|p| *p != platform);
        } else {
            return;
        }
        self.dirty = true;
    }

    pub(crate) fn begin_submission(&mut self) {
        self.submission = SubmissionState::Submitting;
        self.dirty = true;
    }

    /// A fresh generation supersedes the current content wholesale.
    pub(crate) fn complete_submission(&mut self, content: GeneratedContent) {
        self.submission = SubmissionState::Succeeded;
        self.current_content_id = content.id.clone();
        self.current_content = Some(content);
        self.dirty = true;
    }

    /// Failure releases the single-flight lock; previously rendered
    /// content stays untouched.
    pub(crate) fn fail_submission(&mut self, message: String) {
        self.submission = SubmissionState::Failed(message);
        self.dirty = true;
    }

    /// A history item becomes the current content without touching the
    /// generation lifecycle.
    pub(crate) fn adopt_content(&mut self, id: String, content: GeneratedContent) {
        self.current_content_id = Some(id);
        self.current_content = Some(content);
        self.dirty = true;
    }

    pub(crate) fn clear_current_content(&mut self) {
        self.current_content = None;
        self.current_content_id = None;
        self.dirty = true;
    }

    pub(crate) fn history_page(&self) -> u32 {
        self.history.current_page
    }

    /// Allocates the seq token for a new page request and marks it as the
    /// only one whose response may be applied.
    pub(crate) fn begin_history_load(&mut self) -> RequestSeq {
        self.next_seq += 1;
        self.history.latest_seq = self.next_seq;
        self.history.loading = true;
        self.dirty = true;
        self.next_seq
    }

    pub(crate) fn history_is_latest(&self, seq: RequestSeq) -> bool {
        self.history.latest_seq == seq
    }

    pub(crate) fn finish_history_load(&mut self) {
        self.history.loading = false;
        self.dirty = true;
    }

    /// Applies a page response; current_page advances only here, so a
    /// failed load leaves the displayed page intact.
    pub(crate) fn apply_history_page(&mut self, page: u32, loaded: HistoryPage) {
        self.history.current_page = page;
        self.history.items = loaded.items;
        self.history.total_items = loaded.total_items;
        self.history.has_more = loaded.has_more;
        self.history.loaded_once = true;
        self.dirty = true;
    }

    pub(crate) fn push_toast(&mut self, text: impl Into<String>, severity: Severity) {
        self.toasts.push(ToastMessage {
            text: text.into(),
            severity,
            created_at_ms: self.clock_ms,
        });
        self.dirty = true;
    }

    /// Advances the tick clock and drops toasts past their display time.
    pub(crate) fn advance_clock(&mut self, now_ms: u64) {
        self.clock_ms = now_ms;
        let before = self.toasts.len();
        self.toasts
            .retain(|toast| now_ms.saturating_sub(toast.created_at_ms) < TOAST_TTL_MS);
        if self.toasts.len() != before {
            self.dirty = true;
        }
    }
}
