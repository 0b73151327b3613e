use std::sync::Once;

use chat_core::{update, AppState, Effect, Msg, Source};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn submit(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(text.to_string()));
    update(state, Msg::QuestionSubmitted)
}

fn submitted_request_id(effects: &[Effect]) -> u64 {
    match &effects[0] {
        Effect::SubmitQuery { request_id, .. } => *request_id,
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn answer_completion_fills_the_pending_turn_in_place() {
    init_logging();
    // Scope set {Better Auth} only.
    let (state, _) = update(
        AppState::new(),
        Msg::ScopeToggled("Supabase".to_string()),
    );
    let (state, effects) = submit(state, "How do I configure sessions?");
    let request_id = submitted_request_id(&effects);
    assert_eq!(state.view().turns.len(), 1);
    assert_eq!(state.view().turns[0].answer, None);

    let (next, effects) = update(
        state,
        Msg::AnswerCompleted {
            request_id,
            answer_id: "qa-42".to_string(),
            answer: "Use the session plugin.".to_string(),
            sources: vec![Source {
                title: "Sessions".to_string(),
                url: "https://x/sessions".to_string(),
            }],
        },
    );

    let view = next.view();
    assert_eq!(view.turns.len(), 1);
    let turn = &view.turns[0];
    assert_eq!(turn.question, "How do I configure sessions?");
    assert_eq!(turn.answer.as_deref(), Some("Use the session plugin."));
    assert_eq!(
        turn.sources,
        vec![Source {
            title: "Sessions".to_string(),
            url: "https://x/sessions".to_string(),
        }]
    );
    assert!(!turn.pending);
    assert!(!view.generating);
    assert!(effects.is_empty());
}

#[test]
fn streamed_deltas_accumulate_on_the_pending_turn() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "What is a scope?");
    let request_id = submitted_request_id(&effects);

    let (state, _) = update(
        state,
        Msg::AnswerDelta {
            request_id,
            text: "A scope is ".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::AnswerDelta {
            request_id,
            text: "a documentation set.".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(
        view.turns[0].answer.as_deref(),
        Some("A scope is a documentation set.")
    );
    // Still pending until the final record arrives.
    assert!(view.turns[0].pending);
    assert!(view.generating);
}

#[test]
fn delta_for_a_stale_request_is_discarded() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "first question");
    let stale_id = submitted_request_id(&effects);
    let (state, _) = update(state, Msg::NewChatClicked);

    // New conversation, new request.
    let (state, effects) = submit(state, "second question");
    let live_id = submitted_request_id(&effects);
    assert_ne!(stale_id, live_id);

    let (state, _) = update(
        state,
        Msg::AnswerDelta {
            request_id: stale_id,
            text: "ghost".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.turns.len(), 1);
    assert_eq!(view.turns[0].question, "second question");
    assert_eq!(view.turns[0].answer, None);
}

#[test]
fn failure_marks_the_turn_and_allows_resubmission() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "first question");
    let request_id = submitted_request_id(&effects);

    let (state, _) = update(
        state,
        Msg::AnswerFailed {
            request_id,
            message: "http status 503".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.turns[0].failure.as_deref(), Some("http status 503"));
    assert!(!view.generating);

    // The slot is free again.
    let (state, effects) = submit(state, "second question");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().turns.len(), 2);
}
