use std::sync::Once;

use postforge_core::{
    update, AppState, Effect, GenerationRequest, Msg, PlatformOutput, Severity, SubmissionState,
    Tweet,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn filled_form(state: AppState) -> AppState {
    let (state, _) = update(state, Msg::TopicChanged("AI safety".to_string()));
    let (state, _) = update(
        state,
        Msg::PlatformToggled {
            platform: "twitter".to_string(),
            selected: true,
        },
    );
    state
}

fn submitted() -> AppState {
    let (state, effects) = update(filled_form(AppState::new()), Msg::GenerateClicked);
    assert_eq!(effects.len(), 1);
    state
}

#[test]
fn short_topic_never_reaches_transport() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TopicChanged("ai".to_string()));
    let (state, _) = update(
        state,
        Msg::PlatformToggled {
            platform: "twitter".to_string(),
            selected: true,
        },
    );

    let (state, effects) = update(state, Msg::GenerateClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.submission, SubmissionState::Idle);
    assert_eq!(view.toasts.len(), 1);
    assert_eq!(
        view.toasts[0].text,
        "Please enter a valid topic (at least 3 characters)"
    );
    assert_eq!(view.toasts[0].severity, Severity::Error);
}

#[test]
fn whitespace_padding_does_not_satisfy_topic_minimum() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TopicChanged("  ab  ".to_string()));
    let (state, _) = update(
        state,
        Msg::PlatformToggled {
            platform: "blog".to_string(),
            selected: true,
        },
    );

    let (state, effects) = update(state, Msg::GenerateClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view().submission, SubmissionState::Idle);
}

#[test]
fn missing_platforms_never_reaches_transport() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TopicChanged("AI safety".to_string()));

    let (state, effects) = update(state, Msg::GenerateClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.submission, SubmissionState::Idle);
    assert_eq!(view.toasts.len(), 1);
    assert_eq!(view.toasts[0].text, "Please select at least one platform");
}

#[test]
fn valid_submission_emits_single_request() {
    init_logging();
    let state = filled_form(AppState::new());
    let (state, _) = update(state, Msg::AudienceChanged("  engineers  ".to_string()));
    let (state, _) = update(state, Msg::ContextChanged("   ".to_string()));

    let (state, effects) = update(state, Msg::GenerateClicked);

    assert_eq!(
        effects,
        vec![Effect::SubmitGeneration {
            request: GenerationRequest {
                topic: "AI safety".to_string(),
                platforms: vec!["twitter".to_string()],
                audience: Some("engineers".to_string()),
                additional_context: None,
            },
        }]
    );
    let view = state.view();
    assert_eq!(view.submission, SubmissionState::Submitting);
    assert!(!view.form_enabled);
}

#[test]
fn resubmit_while_submitting_is_ignored() {
    init_logging();
    let state = submitted();

    let (state, effects) = update(state, Msg::GenerateClicked);

    // No duplicate request and no error toast; the control is disabled.
    assert!(effects.is_empty());
    assert_eq!(state.view().submission, SubmissionState::Submitting);
    assert!(state.view().toasts.is_empty());
}

#[test]
fn generation_success_renders_normalized_thread() {
    init_logging();
    let state = submitted();
    let payload = json!({
        "id": "abc",
        "content": {
            "outputs": {
                "twitter": {
                    "tweets": [
                        {"order": 1, "content": "Hi", "character_count": 2}
                    ]
                }
            }
        }
    });

    let (mut state, effects) = update(
        state,
        Msg::GenerationCompleted {
            result: Ok(payload),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.submission, SubmissionState::Succeeded);
    assert!(view.form_enabled);
    assert_eq!(view.current_content_id.as_deref(), Some("abc"));

    let content = view.content.expect("current content");
    assert_eq!(content.outputs.len(), 1);
    assert_eq!(content.outputs[0].platform, "twitter");
    match &content.outputs[0].output {
        PlatformOutput::Thread { tweets, .. } => {
            assert_eq!(
                tweets,
                &vec![Tweet {
                    order: 1,
                    content: "Hi".to_string(),
                    character_count: 2,
                }]
            );
        }
        other => panic!("expected a thread, got {other:?}"),
    }

    assert_eq!(view.toasts.len(), 1);
    assert_eq!(view.toasts[0].text, "Content generated successfully!");
    assert_eq!(view.toasts[0].severity, Severity::Success);
    assert!(state.consume_dirty());
}

#[test]
fn generation_failure_shows_transport_message_and_recovers() {
    init_logging();
    let (state, _) = update(
        submitted(),
        Msg::GenerationCompleted {
            result: Ok(json!({"id": "abc", "content": {"notes": "first run"}})),
        },
    );

    // Second attempt fails at the transport.
    let (state, _) = update(state, Msg::GenerateClicked);
    let message = "Agent service temporarily unavailable. Please try again.";
    let (state, effects) = update(
        state,
        Msg::GenerationCompleted {
            result: Err(message.to_string()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.submission, SubmissionState::Failed(message.to_string()));
    assert!(view.form_enabled);
    assert_eq!(view.toasts.last().map(|t| t.text.as_str()), Some(message));
    // The previously rendered content and export selection survive.
    assert_eq!(view.current_content_id.as_deref(), Some("abc"));
    assert_eq!(
        view.content.and_then(|c| c.notes),
        Some("first run".to_string())
    );

    // The flow is not stuck: a new submission goes out immediately.
    let (_state, effects) = update(state, Msg::GenerateClicked);
    assert_eq!(effects.len(), 1);
}

#[test]
fn empty_failure_message_falls_back_to_generic() {
    init_logging();
    let (state, _) = update(
        submitted(),
        Msg::GenerationCompleted {
            result: Err(String::new()),
        },
    );

    let view = state.view();
    assert_eq!(
        view.toasts.last().map(|t| t.text.as_str()),
        Some("Failed to generate content. Please try again.")
    );
    assert_eq!(
        view.submission,
        SubmissionState::Failed("Failed to generate content. Please try again.".to_string())
    );
}
