use crate::content::{normalize, normalize_history_page};
use crate::state::{AppState, GenerationRequest, Severity, SubmissionState, PAGE_SIZE};
use crate::view_model::total_pages;
use crate::{Effect, ExportFormat, Msg, RequestSeq};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicChanged(topic) => {
            state.set_topic(topic);
            Vec::new()
        }
        Msg::AudienceChanged(audience) => {
            state.set_audience(audience);
            Vec::new()
        }
        Msg::ContextChanged(additional_context) => {
            state.set_additional_context(additional_context);
            Vec::new()
        }
        Msg::PlatformToggled { platform, selected } => {
            state.toggle_platform(platform, selected);
            Vec::new()
        }
        Msg::GenerateClicked => generate_clicked(&mut state),
        Msg::GenerationCompleted { result } => generation_completed(&mut state, result),
        Msg::HistoryOpened => {
            let page = state.history_page();
            request_history_page(&mut state, page)
        }
        Msg::RefreshHistoryClicked => request_history_page(&mut state, 0),
        Msg::PageClicked(page) => request_history_page(&mut state, page),
        Msg::HistoryLoaded { seq, page, result } => {
            history_loaded(&mut state, seq, page, result)
        }
        Msg::HistoryItemClicked { id } => vec![Effect::FetchContent { id }],
        Msg::HistoryItemLoaded { id, result } => history_item_loaded(&mut state, id, result),
        Msg::DeleteClicked { id } => vec![Effect::DeleteContent { id }],
        Msg::DeleteCompleted { id, result } => delete_completed(&mut state, id, result),
        Msg::ExportClicked { format } => export_clicked(&mut state, format),
        Msg::ExportCompleted { format, result } => export_completed(&mut state, format, result),
        Msg::Tick { now_ms } => {
            state.advance_clock(now_ms);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn generate_clicked(state: &mut AppState) -> Vec<Effect> {
    // Single-flight: a second submit while one is outstanding is ignored,
    // not queued. No toast either, matching the disabled submit control.
    if matches!(state.submission(), SubmissionState::Submitting) {
        return Vec::new();
    }

    let form = state.form().clone();
    let topic = form.topic.trim();
    if topic.chars().count() < 3 {
        state.push_toast(
            "Please enter a valid topic (at least 3 characters)",
            Severity::Error,
        );
        return Vec::new();
    }
    if form.platforms.is_empty() {
        state.push_toast("Please select at least one platform", Severity::Error);
        return Vec::new();
    }

    let request = GenerationRequest {
        topic: topic.to_string(),
        platforms: form.platforms.clone(),
        audience: non_empty(&form.audience),
        additional_context: non_empty(&form.additional_context),
    };
    state.begin_submission();
    vec![Effect::SubmitGeneration { request }]
}

fn generation_completed(
    state: &mut AppState,
    result: Result<serde_json::Value, String>,
) -> Vec<Effect> {
    match result {
        Ok(payload) => {
            let content = normalize(&payload);
            state.complete_submission(content);
            state.push_toast("Content generated successfully!", Severity::Success);
        }
        Err(message) => {
            let text = if message.is_empty() {
                "Failed to generate content. Please try again.".to_string()
            } else {
                message
            };
            state.fail_submission(text.clone());
            state.push_toast(text, Severity::Error);
        }
    }
    Vec::new()
}

fn request_history_page(state: &mut AppState, page: u32) -> Vec<Effect> {
    let seq = state.begin_history_load();
    vec![Effect::LoadHistory {
        seq,
        page,
        limit: PAGE_SIZE,
        offset: u64::from(page) * u64::from(PAGE_SIZE),
    }]
}

fn history_loaded(
    state: &mut AppState,
    seq: RequestSeq,
    page: u32,
    result: Result<serde_json::Value, String>,
) -> Vec<Effect> {
    // A reply for a page the user has already navigated away from must
    // never be rendered.
    if !state.history_is_latest(seq) {
        return Vec::new();
    }
    state.finish_history_load();

    match result {
        Ok(payload) => {
            let loaded = normalize_history_page(&payload);
            if loaded.items.is_empty() && page > 0 && loaded.total_items > 0 {
                // total_pages shrank below the requested page; clamp to
                // the last valid page and reload it.
                let last = total_pages(loaded.total_items).saturating_sub(1);
                if last < page {
                    return request_history_page(state, last);
                }
            }
            state.apply_history_page(page, loaded);
            Vec::new()
        }
        Err(_message) => {
            state.push_toast("Failed to load history", Severity::Error);
            Vec::new()
        }
    }
}

fn history_item_loaded(
    state: &mut AppState,
    id: String,
    result: Result<serde_json::Value, String>,
) -> Vec<Effect> {
    match result {
        Ok(payload) => {
            let content = normalize(&payload);
            state.adopt_content(id, content);
            state.push_toast("Content loaded from history", Severity::Success);
        }
        Err(_message) => {
            // Deleted or missing id; prior view state stays intact.
            state.push_toast("Failed to load content", Severity::Error);
        }
    }
    Vec::new()
}

fn delete_completed(
    state: &mut AppState,
    id: String,
    result: Result<(), String>,
) -> Vec<Effect> {
    match result {
        Ok(()) => {
            if state.current_content_id() == Some(id.as_str()) {
                state.clear_current_content();
            }
            state.push_toast("Content deleted", Severity::Success);
            let page = state.history_page();
            request_history_page(state, page)
        }
        Err(_message) => {
            state.push_toast("Failed to delete content", Severity::Error);
            Vec::new()
        }
    }
}

fn export_clicked(state: &mut AppState, format: ExportFormat) -> Vec<Effect> {
    let Some(id) = state.current_content_id().map(str::to_string) else {
        state.push_toast("No content to export", Severity::Info);
        return Vec::new();
    };
    vec![Effect::ExportContent { id, format }]
}

fn export_completed(
    state: &mut AppState,
    format: ExportFormat,
    result: Result<String, String>,
) -> Vec<Effect> {
    match result {
        Ok(_filename) => {
            state.push_toast(
                format!("Content exported as {}", format.as_str()),
                Severity::Success,
            );
        }
        Err(_message) => {
            // The transport message is logged by the effect runner, not
            // shown verbatim to the user.
            state.push_toast("Failed to export content", Severity::Error);
        }
    }
    Vec::new()
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
