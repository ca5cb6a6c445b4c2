use postforge_core::{update, AppState, Effect, Msg, RequestSeq, Severity, SubmissionState};
use serde_json::{json, Value};

fn history_payload(ids: &[&str], total: u64, has_more: bool) -> Value {
    json!({
        "items": ids.iter().map(|id| json!({
            "id": id,
            "topic": format!("Topic {id}"),
            "platforms": ["twitter"],
            "generated_at": "2026-02-11T14:30:45Z",
            "summary": "A short summary",
        })).collect::<Vec<_>>(),
        "pagination": {"total": total, "limit": 10, "has_more": has_more},
    })
}

fn issued_seq(effects: &[Effect]) -> RequestSeq {
    match effects {
        [Effect::LoadHistory { seq, .. }] => *seq,
        other => panic!("expected a single LoadHistory effect, got {other:?}"),
    }
}

#[test]
fn opening_history_requests_first_page() {
    let (state, effects) = update(AppState::new(), Msg::HistoryOpened);

    assert_eq!(
        effects,
        vec![Effect::LoadHistory {
            seq: 1,
            page: 0,
            limit: 10,
            offset: 0,
        }]
    );
    assert!(state.view().history.loading);
}

#[test]
fn page_click_requests_matching_offset() {
    let (_state, effects) = update(AppState::new(), Msg::PageClicked(3));

    assert_eq!(
        effects,
        vec![Effect::LoadHistory {
            seq: 1,
            page: 3,
            limit: 10,
            offset: 30,
        }]
    );
}

#[test]
fn applied_page_drives_pagination_view() {
    let (state, effects) = update(AppState::new(), Msg::PageClicked(3));
    let seq = issued_seq(&effects);

    let (state, effects) = update(
        state,
        Msg::HistoryLoaded {
            seq,
            page: 3,
            result: Ok(history_payload(
                &["a", "b", "c", "d", "e", "f", "g"],
                47,
                true,
            )),
        },
    );

    assert!(effects.is_empty());
    let history = state.view().history;
    assert!(!history.loading);
    assert_eq!(history.current_page, 3);
    assert_eq!(history.total_pages, 5);
    assert_eq!(history.items.len(), 7);
    // Window [1, 5): pages 2..5 in 1-indexed display, page 4 active.
    assert_eq!(
        history.page_buttons.iter().map(|b| b.page).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(
        history
            .page_buttons
            .iter()
            .map(|b| b.label.as_str())
            .collect::<Vec<_>>(),
        vec!["2", "3", "4", "5"]
    );
    assert!(history.page_buttons[2].active);
    assert!(history.prev_enabled);
    assert!(history.next_enabled);
}

#[test]
fn next_follows_server_has_more_flag() {
    let (state, effects) = update(AppState::new(), Msg::HistoryOpened);
    let seq = issued_seq(&effects);

    // total claims five pages but the server says there is nothing more;
    // the flag wins.
    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            seq,
            page: 0,
            result: Ok(history_payload(&["a"], 47, false)),
        },
    );

    let history = state.view().history;
    assert!(!history.prev_enabled);
    assert!(!history.next_enabled);
}

#[test]
fn stale_response_is_never_rendered() {
    let (state, effects) = update(AppState::new(), Msg::PageClicked(1));
    let first_seq = issued_seq(&effects);
    let (state, effects) = update(state, Msg::PageClicked(2));
    let second_seq = issued_seq(&effects);

    // Page 2's reply lands first; page 1's arrives late and must be dropped.
    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            seq: second_seq,
            page: 2,
            result: Ok(history_payload(&["page-two"], 47, true)),
        },
    );
    let (state, effects) = update(
        state,
        Msg::HistoryLoaded {
            seq: first_seq,
            page: 1,
            result: Ok(history_payload(&["page-one"], 47, true)),
        },
    );

    assert!(effects.is_empty());
    let history = state.view().history;
    assert_eq!(history.current_page, 2);
    assert_eq!(history.items.len(), 1);
    assert_eq!(history.items[0].id, "page-two");
}

#[test]
fn stale_response_arriving_first_is_also_dropped() {
    let (state, effects) = update(AppState::new(), Msg::PageClicked(1));
    let first_seq = issued_seq(&effects);
    let (state, _) = update(state, Msg::PageClicked(2));

    let (state, effects) = update(
        state,
        Msg::HistoryLoaded {
            seq: first_seq,
            page: 1,
            result: Ok(history_payload(&["page-one"], 47, true)),
        },
    );

    assert!(effects.is_empty());
    let history = state.view().history;
    assert!(history.items.is_empty());
    // The newest request is still outstanding.
    assert!(history.loading);
}

#[test]
fn empty_first_page_is_no_history_yet() {
    let (state, effects) = update(AppState::new(), Msg::HistoryOpened);
    let seq = issued_seq(&effects);

    let (state, effects) = update(
        state,
        Msg::HistoryLoaded {
            seq,
            page: 0,
            result: Ok(history_payload(&[], 0, false)),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.history.empty);
    assert!(view.history.items.is_empty());
    // A valid outcome, not an error.
    assert!(view.toasts.is_empty());
}

#[test]
fn failed_load_keeps_previous_page() {
    let (state, effects) = update(AppState::new(), Msg::HistoryOpened);
    let seq = issued_seq(&effects);
    let (state, _) = update(
        state,
        Msg::HistoryLoaded {
            seq,
            page: 0,
            result: Ok(history_payload(&["a"], 11, true)),
        },
    );

    let (state, effects) = update(state, Msg::PageClicked(1));
    let seq = issued_seq(&effects);
    let (state, effects) = update(
        state,
        Msg::HistoryLoaded {
            seq,
            page: 1,
            result: Err("http status 503".to_string()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(
        view.toasts.last().map(|t| t.text.as_str()),
        Some("Failed to load history")
    );
    assert_eq!(view.toasts.last().map(|t| t.severity), Some(Severity::Error));
    let history = view.history;
    assert!(!history.loading);
    assert_eq!(history.current_page, 0);
    assert_eq!(history.items.len(), 1);
    assert_eq!(history.items[0].id, "a");
}

#[test]
fn shrunken_total_clamps_to_last_valid_page() {
    let (state, effects) = update(AppState::new(), Msg::PageClicked(3));
    let seq = issued_seq(&effects);

    // The server now only has 20 items; page 3 no longer exists.
    let (state, effects) = update(
        state,
        Msg::HistoryLoaded {
            seq,
            page: 3,
            result: Ok(history_payload(&[], 20, false)),
        },
    );

    let reload_seq = issued_seq(&effects);
    assert_eq!(
        effects,
        vec![Effect::LoadHistory {
            seq: reload_seq,
            page: 1,
            limit: 10,
            offset: 10,
        }]
    );

    let (state, effects) = update(
        state,
        Msg::HistoryLoaded {
            seq: reload_seq,
            page: 1,
            result: Ok(history_payload(&["tail"], 20, false)),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().history.current_page, 1);
    assert_eq!(state.view().history.items[0].id, "tail");
}

#[test]
fn selecting_item_fetches_and_adopts_content() {
    let (state, effects) = update(
        AppState::new(),
        Msg::HistoryItemClicked {
            id: "xyz".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::FetchContent {
            id: "xyz".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::HistoryItemLoaded {
            id: "xyz".to_string(),
            result: Ok(json!({"id": "xyz", "content": {"notes": "from history"}})),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.current_content_id.as_deref(), Some("xyz"));
    assert_eq!(
        view.content.and_then(|c| c.notes),
        Some("from history".to_string())
    );
    assert_eq!(
        view.toasts.last().map(|t| t.text.as_str()),
        Some("Content loaded from history")
    );
    // Loading a history item is not a generation.
    assert_eq!(view.submission, SubmissionState::Idle);
}

#[test]
fn failed_item_fetch_leaves_view_intact() {
    let (state, _) = update(AppState::new(), Msg::TopicChanged("AI safety".to_string()));
    let (state, _) = update(
        state,
        Msg::PlatformToggled {
            platform: "twitter".to_string(),
            selected: true,
        },
    );
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(
        state,
        Msg::GenerationCompleted {
            result: Ok(json!({"id": "abc", "content": {"notes": "mine"}})),
        },
    );

    let (state, effects) = update(
        state,
        Msg::HistoryItemLoaded {
            id: "gone".to_string(),
            result: Err("Content gone not found".to_string()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(
        view.toasts.last().map(|t| t.text.as_str()),
        Some("Failed to load content")
    );
    assert_eq!(view.current_content_id.as_deref(), Some("abc"));
    assert_eq!(view.content.and_then(|c| c.notes), Some("mine".to_string()));
}

#[test]
fn delete_reloads_current_page_and_clears_selection() {
    let (state, _) = update(
        AppState::new(),
        Msg::HistoryItemLoaded {
            id: "abc".to_string(),
            result: Ok(json!({"id": "abc", "content": {"notes": "n"}})),
        },
    );

    let (state, effects) = update(
        state,
        Msg::DeleteClicked {
            id: "abc".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::DeleteContent {
            id: "abc".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::DeleteCompleted {
            id: "abc".to_string(),
            result: Ok(()),
        },
    );

    assert!(matches!(
        effects[..],
        [Effect::LoadHistory { page: 0, .. }]
    ));
    let view = state.view();
    assert_eq!(view.current_content_id, None);
    assert!(view.content.is_none());
    assert!(view
        .toasts
        .iter()
        .any(|t| t.text == "Content deleted" && t.severity == Severity::Success));
}

#[test]
fn failed_delete_keeps_state() {
    let (state, effects) = update(
        AppState::new(),
        Msg::DeleteCompleted {
            id: "abc".to_string(),
            result: Err("http status 404".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().toasts.last().map(|t| t.text.as_str()),
        Some("Failed to delete content")
    );
}
