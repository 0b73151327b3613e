use std::sync::Once;

use chat_core::{update, AppState, Effect, Msg, RejectReason, SubmitOutcome};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn submit(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(text.to_string()));
    update(state, Msg::QuestionSubmitted)
}

fn clear_all_scopes(mut state: AppState) -> AppState {
    // Initial selection is Better Auth + Supabase.
    for name in ["Better Auth", "Supabase"] {
        let (next, _) = update(state, Msg::ScopeToggled(name.to_string()));
        state = next;
    }
    state
}

#[test]
fn submit_trims_question_and_emits_query_effect() {
    init_logging();
    let state = AppState::new();

    let (mut next, effects) = submit(state, "  How do I configure sessions?  ");
    let view = next.view();

    assert_eq!(view.turns.len(), 1);
    assert_eq!(view.turns[0].question, "How do I configure sessions?");
    assert_eq!(view.turns[0].answer, None);
    assert!(view.turns[0].pending);
    assert!(view.generating);
    assert_eq!(view.last_submit, Some(SubmitOutcome::Accepted));
    assert!(next.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::SubmitQuery {
            request_id: 1,
            question: "How do I configure sessions?".to_string(),
            scopes: vec!["Better Auth".to_string(), "Supabase".to_string()],
        }]
    );
}

#[test]
fn empty_question_is_rejected_without_a_turn() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "   \n ");

    let view = next.view();
    assert!(view.turns.is_empty());
    assert!(effects.is_empty());
    assert_eq!(
        view.last_submit,
        Some(SubmitOutcome::Rejected(RejectReason::EmptyQuestion))
    );
}

#[test]
fn submit_with_empty_scope_set_leaves_conversation_unchanged() {
    init_logging();
    let state = clear_all_scopes(AppState::new());

    let (next, effects) = submit(state, "How do I configure sessions?");

    let view = next.view();
    assert!(view.turns.is_empty());
    assert!(!view.can_submit);
    assert!(effects.is_empty());
    assert_eq!(
        view.last_submit,
        Some(SubmitOutcome::Rejected(RejectReason::NoScopes))
    );
}

#[test]
fn second_submission_while_generating_is_rejected() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "first question");
    assert_eq!(effects.len(), 1);

    let (next, effects) = submit(state, "second question");

    let view = next.view();
    assert_eq!(view.turns.len(), 1);
    assert!(effects.is_empty());
    assert_eq!(
        view.last_submit,
        Some(SubmitOutcome::Rejected(RejectReason::Busy))
    );
}

#[test]
fn new_chat_empties_the_conversation() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = submit(state, "first question");

    let (next, effects) = update(state, Msg::NewChatClicked);

    assert!(next.view().turns.is_empty());
    assert!(!next.view().generating);
    assert!(effects.is_empty());
}

#[test]
fn new_chat_on_empty_conversation_is_a_noop() {
    init_logging();
    let mut state = AppState::new();
    assert!(!state.consume_dirty());
    let before = state.clone();

    let (next, effects) = update(state, Msg::NewChatClicked);

    assert_eq!(next, before);
    assert!(effects.is_empty());
}

#[test]
fn late_answer_after_new_chat_is_discarded() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = submit(state, "first question");
    let request_id = match &effects[0] {
        Effect::SubmitQuery { request_id, .. } => *request_id,
        other => panic!("unexpected effect {other:?}"),
    };

    let (state, _effects) = update(state, Msg::NewChatClicked);
    assert!(state.view().turns.is_empty());

    // The pre-reset answer arrives late and must not resurrect its turn.
    let (next, effects) = update(
        state,
        Msg::AnswerCompleted {
            request_id,
            answer_id: "ans-1".to_string(),
            answer: "stale".to_string(),
            sources: Vec::new(),
        },
    );

    assert!(next.view().turns.is_empty());
    assert!(!next.view().generating);
    assert!(effects.is_empty());
}
