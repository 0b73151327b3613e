use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use chat_logging::chat_warn;

use crate::service::{AnswerService, ChannelAnswerSink, HttpAnswerService, ServiceSettings};
use crate::types::{EngineEvent, FeedbackKind, QueryError, RequestId};

enum EngineCommand {
    SubmitQuery {
        request_id: RequestId,
        question: String,
        scopes: Vec<String>,
    },
    AddFeedback {
        answer_id: String,
        kind: FeedbackKind,
    },
}

/// Synchronous handle over the background answering runtime: commands go in
/// on a channel, engine events come back out via `try_recv`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, QueryError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let service = Arc::new(HttpAnswerService::new(settings)?);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn submit_query(
        &self,
        request_id: RequestId,
        question: impl Into<String>,
        scopes: Vec<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitQuery {
            request_id,
            question: question.into(),
            scopes,
        });
    }

    pub fn add_feedback(&self, answer_id: impl Into<String>, kind: FeedbackKind) {
        let _ = self.cmd_tx.send(EngineCommand::AddFeedback {
            answer_id: answer_id.into(),
            kind,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    service: &dyn AnswerService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::SubmitQuery {
            request_id,
            question,
            scopes,
        } => {
            let sink = ChannelAnswerSink::new(event_tx.clone());
            let result = service
                .submit_query(request_id, &question, &scopes, &sink)
                .await;
            let _ = event_tx.send(EngineEvent::QueryCompleted { request_id, result });
        }
        EngineCommand::AddFeedback { answer_id, kind } => {
            // Fire-and-forget: a failed vote forward is logged, not surfaced.
            if let Err(err) = service.add_feedback(&answer_id, kind).await {
                chat_warn!("feedback forward failed for {}: {}", answer_id, err);
            }
        }
    }
}
