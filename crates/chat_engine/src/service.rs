use std::time::Duration;

use futures_util::StreamExt;

use crate::types::{AnswerOutcome, EngineEvent, FailureKind, FeedbackKind, QueryError, RequestId};
use crate::wire::{self, FeedbackRequest, QueryRequest, StreamRecord};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub integration_id: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            integration_id: "dev".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Receives streamed events while a query is in progress.
pub trait AnswerSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelAnswerSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelAnswerSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl AnswerSink for ChannelAnswerSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// The external answering service, seen as an opaque collaborator.
#[async_trait::async_trait]
pub trait AnswerService: Send + Sync {
    /// Submits a question against the given scopes. Partial answer text is
    /// emitted through `sink` as it arrives; the final outcome is returned.
    async fn submit_query(
        &self,
        request_id: RequestId,
        question: &str,
        scopes: &[String],
        sink: &dyn AnswerSink,
    ) -> Result<AnswerOutcome, QueryError>;

    /// Forwards a vote for an answered turn. The response body is ignored.
    async fn add_feedback(
        &self,
        answer_id: &str,
        kind: FeedbackKind,
    ) -> Result<(), QueryError>;
}

#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl HttpAnswerService {
    pub fn new(settings: ServiceSettings) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| QueryError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl AnswerService for HttpAnswerService {
    async fn submit_query(
        &self,
        request_id: RequestId,
        question: &str,
        scopes: &[String],
        sink: &dyn AnswerSink,
    ) -> Result<AnswerOutcome, QueryError> {
        let body = QueryRequest {
            integration_id: &self.settings.integration_id,
            query: question,
            scopes,
        };
        let response = self
            .client
            .post(self.endpoint("query"))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let mut outcome: Option<AnswerOutcome> = None;
        let mut buf: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            buf.extend_from_slice(&chunk);
            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                process_line(request_id, &line, sink, &mut outcome)?;
            }
        }
        // A final record without a trailing newline is still valid.
        process_line(request_id, &buf, sink, &mut outcome)?;

        outcome.ok_or_else(|| {
            QueryError::new(
                FailureKind::MalformedStream,
                "stream ended without a final record",
            )
        })
    }

    async fn add_feedback(
        &self,
        answer_id: &str,
        kind: FeedbackKind,
    ) -> Result<(), QueryError> {
        let body = FeedbackRequest {
            integration_id: &self.settings.integration_id,
            answer_id,
            reaction: kind.reaction(),
        };
        let response = self
            .client
            .post(self.endpoint("feedback"))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(())
    }
}

fn process_line(
    request_id: RequestId,
    raw: &[u8],
    sink: &dyn AnswerSink,
    outcome: &mut Option<AnswerOutcome>,
) -> Result<(), QueryError> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim();
    if line.is_empty() {
        return Ok(());
    }
    match wire::parse_record(line)
        .map_err(|err| QueryError::new(FailureKind::MalformedStream, err.to_string()))?
    {
        StreamRecord::Delta { text } => {
            // Deltas after the final record would double-report; drop them.
            if outcome.is_none() {
                sink.emit(EngineEvent::AnswerDelta { request_id, text });
            }
        }
        StreamRecord::Final {
            answer_id,
            answer,
            sources,
        } => {
            *outcome = Some(AnswerOutcome {
                answer_id,
                answer,
                sources: sources.into_iter().map(|s| s.into_link()).collect(),
            });
        }
    }
    Ok(())
}

fn map_reqwest_error(err: reqwest::Error) -> QueryError {
    if err.is_timeout() {
        return QueryError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return QueryError::new(FailureKind::InvalidRequest, err.to_string());
    }
    QueryError::new(FailureKind::Network, err.to_string())
}
