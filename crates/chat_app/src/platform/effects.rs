use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chat_core::{Effect, FeedbackKind, Msg, Source};
use chat_engine::{EngineEvent, EngineHandle, QueryError, ServiceSettings};
use chat_logging::{chat_info, chat_warn};

/// Executes core effects against the engine and pumps engine events back
/// into the message channel.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(settings: ServiceSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, QueryError> {
        let engine = Arc::new(EngineHandle::new(settings)?);
        let runner = Self { engine };
        runner.spawn_event_pump(msg_tx);
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitQuery {
                    request_id,
                    question,
                    scopes,
                } => {
                    chat_info!(
                        "SubmitQuery request_id={} scopes={:?} question_len={}",
                        request_id,
                        scopes,
                        question.len()
                    );
                    self.engine.submit_query(request_id, question, scopes);
                }
                Effect::SendFeedback { answer_id, kind } => {
                    chat_info!("SendFeedback answer_id={}", answer_id);
                    self.engine.add_feedback(answer_id, map_feedback(kind));
                }
            }
        }
    }

    fn spawn_event_pump(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_feedback(kind: FeedbackKind) -> chat_engine::FeedbackKind {
    match kind {
        FeedbackKind::Upvote => chat_engine::FeedbackKind::Upvote,
        FeedbackKind::Downvote => chat_engine::FeedbackKind::Downvote,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnswerDelta { request_id, text } => Msg::AnswerDelta { request_id, text },
        EngineEvent::QueryCompleted { request_id, result } => match result {
            Ok(outcome) => Msg::AnswerCompleted {
                request_id,
                answer_id: outcome.answer_id,
                answer: outcome.answer,
                sources: outcome
                    .sources
                    .into_iter()
                    .map(|source| Source {
                        title: source.title,
                        url: source.url,
                    })
                    .collect(),
            },
            Err(err) => {
                chat_warn!("query {} failed: {}", request_id, err);
                Msg::AnswerFailed {
                    request_id,
                    message: err.to_string(),
                }
            }
        },
    }
}
