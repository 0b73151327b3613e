use crate::{AppState, Effect, Msg, RejectReason, SubmitOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_draft(text);
            Vec::new()
        }
        Msg::QuestionSubmitted => {
            let question = state.draft().trim().to_string();
            if question.is_empty() {
                state.set_last_submit(SubmitOutcome::Rejected(RejectReason::EmptyQuestion));
                return (state, Vec::new());
            }
            if state.scopes().is_empty() {
                state.set_last_submit(SubmitOutcome::Rejected(RejectReason::NoScopes));
                return (state, Vec::new());
            }
            // One request in flight at a time; a second attempt is rejected
            // explicitly instead of leaning on input disablement.
            if state.in_flight_request().is_some() {
                state.set_last_submit(SubmitOutcome::Rejected(RejectReason::Busy));
                return (state, Vec::new());
            }

            let scopes = state.selected_scopes();
            state.set_draft(String::new());
            let request_id = state.begin_request(question.clone());
            state.set_last_submit(SubmitOutcome::Accepted);
            vec![Effect::SubmitQuery {
                request_id,
                question,
                scopes,
            }]
        }
        Msg::ScopeToggled(name) => {
            if state.toggle_scope(&name) {
                // Scope changes invalidate the conversation: no cross-scope
                // answer caching or merging.
                if state.has_turns() {
                    state.clear_conversation();
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NewChatClicked => {
            if state.has_turns() {
                state.clear_conversation();
            }
            Vec::new()
        }
        Msg::AnswerDelta { request_id, text } => {
            if state.in_flight_request() == Some(request_id) {
                state.apply_answer_delta(&text);
            }
            Vec::new()
        }
        Msg::AnswerCompleted {
            request_id,
            answer_id,
            answer,
            sources,
        } => {
            // A completion for anything but the current request is stale
            // (conversation was reset underneath it) and must be discarded.
            if state.in_flight_request() == Some(request_id) {
                state.apply_answer_completed(answer_id, answer, sources);
            }
            Vec::new()
        }
        Msg::AnswerFailed {
            request_id,
            message,
        } => {
            if state.in_flight_request() == Some(request_id) {
                state.apply_answer_failed(message);
            }
            Vec::new()
        }
        Msg::FeedbackClicked { turn, kind } => {
            match state.record_feedback(turn, kind) {
                Some(answer_id) => vec![Effect::SendFeedback { answer_id, kind }],
                // Pending turn, repeat vote, or unknown key: nothing to do.
                None => Vec::new(),
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
