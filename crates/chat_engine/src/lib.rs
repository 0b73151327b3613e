//! Chat engine: answering-service client and effect execution.
mod engine;
mod service;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use service::{
    AnswerService, AnswerSink, ChannelAnswerSink, HttpAnswerService, ServiceSettings,
};
pub use types::{
    AnswerOutcome, EngineEvent, FailureKind, FeedbackKind, QueryError, RequestId, SourceLink,
};
pub use wire::WireError;
