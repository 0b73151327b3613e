use std::collections::BTreeSet;

use crate::view_model::AppViewModel;

pub type TurnKey = u64;
pub type RequestId = u64;

/// Fixed display list of documentation scopes the user can toggle.
pub const SCOPE_CHOICES: &[&str] = &[
    "Better Auth",
    "Supabase",
    "Tailwind CSS",
    "TanStack Query",
    "Next.js",
    "Redux",
    "Chakra UI",
];

/// Scopes selected when the application starts.
const INITIAL_SCOPES: &[&str] = &["Better Auth", "Supabase"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Upvote,
    Downvote,
}

/// A cited source attached to an answered turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// One question/answer exchange in the conversation.
///
/// `answer` is absent while the turn is pending and accumulates streamed
/// text once deltas arrive. `answer_id` is the service-assigned identifier,
/// set when the answer is finalized; feedback requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub key: TurnKey,
    pub question: String,
    pub answer: Option<String>,
    pub answer_id: Option<String>,
    pub sources: Vec<Source>,
    pub feedback: Option<FeedbackKind>,
    pub failure: Option<String>,
}

/// Result of the most recent submission attempt, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyQuestion,
    NoScopes,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    turn: TurnKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    draft: String,
    scopes: BTreeSet<String>,
    turns: Vec<Turn>,
    next_turn_key: TurnKey,
    next_request_id: RequestId,
    in_flight: Option<InFlight>,
    last_submit: Option<SubmitOutcome>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            draft: String::new(),
            scopes: INITIAL_SCOPES.iter().map(|s| s.to_string()).collect(),
            turns: Vec::new(),
            next_turn_key: 1,
            next_request_id: 1,
            in_flight: None,
            last_submit: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::project(self)
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn draft(&self) -> &str {
        &self.draft
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub(crate) fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    /// Selected scopes in fixed display-list order.
    pub(crate) fn selected_scopes(&self) -> Vec<String> {
        SCOPE_CHOICES
            .iter()
            .filter(|name| self.scopes.contains(**name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Toggles membership of a known scope; unknown names are ignored.
    /// Returns true when the set changed.
    pub(crate) fn toggle_scope(&mut self, name: &str) -> bool {
        if !SCOPE_CHOICES.contains(&name) {
            return false;
        }
        if !self.scopes.remove(name) {
            self.scopes.insert(name.to_string());
        }
        true
    }

    pub(crate) fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub(crate) fn has_turns(&self) -> bool {
        !self.turns.is_empty()
    }

    pub(crate) fn in_flight_request(&self) -> Option<RequestId> {
        self.in_flight.map(|f| f.request_id)
    }

    pub(crate) fn pending_turn(&self) -> Option<TurnKey> {
        self.in_flight.map(|f| f.turn)
    }

    pub(crate) fn set_last_submit(&mut self, outcome: SubmitOutcome) {
        self.last_submit = Some(outcome);
        self.mark_dirty();
    }

    pub(crate) fn last_submit(&self) -> Option<SubmitOutcome> {
        self.last_submit
    }

    /// Appends a pending turn and marks its request in flight.
    /// Returns the request identifier stamped into the submit effect.
    pub(crate) fn begin_request(&mut self, question: String) -> RequestId {
        let key = self.next_turn_key;
        self.next_turn_key += 1;
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.turns.push(Turn {
            key,
            question,
            answer: None,
            answer_id: None,
            sources: Vec::new(),
            feedback: None,
            failure: None,
        });
        self.in_flight = Some(InFlight {
            request_id,
            turn: key,
        });
        self.mark_dirty();
        request_id
    }

    /// Appends streamed answer text to the in-flight turn.
    pub(crate) fn apply_answer_delta(&mut self, text: &str) {
        let Some(flight) = self.in_flight else { return };
        if let Some(turn) = self.turn_mut(flight.turn) {
            turn.answer.get_or_insert_with(String::new).push_str(text);
            self.mark_dirty();
        }
    }

    /// Finalizes the in-flight turn with the service answer and sources.
    pub(crate) fn apply_answer_completed(
        &mut self,
        answer_id: String,
        answer: String,
        sources: Vec<Source>,
    ) {
        let Some(flight) = self.in_flight.take() else { return };
        if let Some(turn) = self.turn_mut(flight.turn) {
            turn.answer = Some(answer);
            turn.answer_id = Some(answer_id);
            turn.sources = sources;
            self.mark_dirty();
        }
    }

    /// Marks the in-flight turn failed and releases the request slot.
    pub(crate) fn apply_answer_failed(&mut self, message: String) {
        let Some(flight) = self.in_flight.take() else { return };
        if let Some(turn) = self.turn_mut(flight.turn) {
            turn.failure = Some(message);
            self.mark_dirty();
        }
    }

    /// Records a first vote on an answered turn.
    /// Returns the service answer identifier when the vote took effect.
    pub(crate) fn record_feedback(
        &mut self,
        key: TurnKey,
        kind: FeedbackKind,
    ) -> Option<String> {
        let turn = self.turn_mut(key)?;
        if turn.feedback.is_some() {
            return None;
        }
        let answer_id = turn.answer_id.clone()?;
        turn.feedback = Some(kind);
        self.mark_dirty();
        Some(answer_id)
    }

    /// Empties the conversation and abandons any in-flight request.
    /// Late events for the abandoned request no longer match and are dropped.
    pub(crate) fn clear_conversation(&mut self) {
        self.turns.clear();
        self.in_flight = None;
        self.last_submit = None;
        self.mark_dirty();
    }

    fn turn_mut(&mut self, key: TurnKey) -> Option<&mut Turn> {
        self.turns.iter_mut().find(|turn| turn.key == key)
    }
}
