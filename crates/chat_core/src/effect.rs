#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitQuery {
        request_id: crate::RequestId,
        question: String,
        scopes: Vec<String>,
    },
    SendFeedback {
        answer_id: String,
        kind: crate::FeedbackKind,
    },
}
