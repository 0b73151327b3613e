use std::fmt;

pub type RequestId = u64;

/// A user vote forwarded to the answering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Upvote,
    Downvote,
}

impl FeedbackKind {
    /// Wire value for the feedback endpoint.
    pub fn reaction(self) -> &'static str {
        match self {
            FeedbackKind::Upvote => "upvote",
            FeedbackKind::Downvote => "downvote",
        }
    }
}

/// A cited source returned with an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

/// Final result of a query: the service-assigned answer id, the full
/// answer text, and any cited sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub answer_id: String,
    pub answer: String,
    pub sources: Vec<SourceLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Streamed partial answer text for an outstanding query.
    AnswerDelta {
        request_id: RequestId,
        text: String,
    },
    QueryCompleted {
        request_id: RequestId,
        result: Result<AnswerOutcome, QueryError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub kind: FailureKind,
    pub message: String,
}

impl QueryError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for QueryError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedStream,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedStream => write!(f, "malformed answer stream"),
        }
    }
}
