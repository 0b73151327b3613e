use crate::{AppState, FeedbackKind, Source, SubmitOutcome, TurnKey, SCOPE_CHOICES};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub scope_choices: Vec<ScopeChoiceView>,
    pub selected_scopes: Vec<String>,
    pub turns: Vec<TurnView>,
    pub generating: bool,
    pub can_submit: bool,
    pub last_submit: Option<SubmitOutcome>,
    pub dirty: bool,
}

/// One entry of the fixed scope display list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeChoiceView {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub key: TurnKey,
    pub question: String,
    pub answer: Option<String>,
    pub sources: Vec<Source>,
    pub feedback: Option<FeedbackKind>,
    pub failure: Option<String>,
    /// True while this turn's answer request is still outstanding.
    pub pending: bool,
}

impl AppViewModel {
    pub(crate) fn project(state: &AppState) -> Self {
        let pending_turn = state.pending_turn();
        let turns = state
            .turns()
            .iter()
            .map(|turn| TurnView {
                key: turn.key,
                question: turn.question.clone(),
                answer: turn.answer.clone(),
                sources: turn.sources.clone(),
                feedback: turn.feedback,
                failure: turn.failure.clone(),
                pending: pending_turn == Some(turn.key),
            })
            .collect();

        let generating = state.in_flight_request().is_some();
        Self {
            scope_choices: SCOPE_CHOICES
                .iter()
                .map(|name| ScopeChoiceView {
                    name: name.to_string(),
                    selected: state.scopes().contains(*name),
                })
                .collect(),
            selected_scopes: state.selected_scopes(),
            turns,
            generating,
            can_submit: !generating && !state.scopes().is_empty(),
            last_submit: state.last_submit(),
            dirty: state.is_dirty(),
        }
    }
}
