#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question input box.
    InputChanged(String),
    /// User submitted the current question draft.
    QuestionSubmitted,
    /// User toggled a documentation scope on or off.
    ScopeToggled(String),
    /// User started a new chat.
    NewChatClicked,
    /// Streamed partial answer text for an outstanding request.
    AnswerDelta {
        request_id: crate::RequestId,
        text: String,
    },
    /// Final answer for an outstanding request.
    AnswerCompleted {
        request_id: crate::RequestId,
        answer_id: String,
        answer: String,
        sources: Vec<crate::Source>,
    },
    /// The answering request failed.
    AnswerFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// User voted on an answered turn.
    FeedbackClicked {
        turn: crate::TurnKey,
        kind: crate::FeedbackKind,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
