use crate::content::{GeneratedContent, HistoryItem};
use crate::state::{GenerationForm, SubmissionState, ToastMessage, PAGE_SIZE};

/// Maximum number of page buttons shown at once.
const PAGE_WINDOW: u32 = 5;

/// Derived page count; `total_items` may itself be approximate.
pub fn total_pages(total_items: u64) -> u32 {
    total_items.div_ceil(u64::from(PAGE_SIZE)) as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub submission: SubmissionState,
    /// False exactly while a generation request is outstanding.
    pub form_enabled: bool,
    pub form: GenerationForm,
    pub content: Option<GeneratedContent>,
    pub current_content_id: Option<String>,
    pub history: HistoryView,
    /// Notification stream in emission order.
    pub toasts: Vec<ToastMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryView {
    pub items: Vec<HistoryItem>,
    pub loading: bool,
    /// History has loaded at least once and contains nothing.
    pub empty: bool,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_buttons: Vec<PageButton>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    /// 0-indexed page this button navigates to.
    pub page: u32,
    /// 1-indexed label shown to the user.
    pub label: String,
    pub active: bool,
}

/// Window of page buttons around the current page:
/// `[max(0, current - 2), min(total, start + 5))`.
pub(crate) fn page_buttons(current_page: u32, total: u32) -> Vec<PageButton> {
    let start = current_page.saturating_sub(2);
    let end = total.min(start + PAGE_WINDOW);
    (start..end)
        .map(|page| PageButton {
            page,
            label: (page + 1).to_string(),
            active: page == current_page,
        })
        .collect()
}
