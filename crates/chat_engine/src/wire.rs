//! Wire format for the answering service.
//!
//! A query response is a newline-delimited JSON stream of `delta` records
//! followed by exactly one `final` record carrying the answer id, the full
//! answer text, and the cited sources.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SourceLink;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed stream record: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub integration_id: &'a str,
    pub query: &'a str,
    pub scopes: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct FeedbackRequest<'a> {
    pub integration_id: &'a str,
    pub answer_id: &'a str,
    pub reaction: &'a str,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum StreamRecord {
    Delta {
        text: String,
    },
    Final {
        answer_id: String,
        answer: String,
        #[serde(default)]
        sources: Vec<WireSource>,
    },
}

#[derive(Debug, Deserialize, PartialEq)]
pub(crate) struct WireSource {
    pub title: String,
    pub source_url: String,
}

impl WireSource {
    pub(crate) fn into_link(self) -> SourceLink {
        SourceLink {
            title: self.title,
            url: self.source_url,
        }
    }
}

pub(crate) fn parse_record(line: &str) -> Result<StreamRecord, WireError> {
    Ok(serde_json::from_str(line)?)
}

#[cfg(test)]
mod tests {
    use super::{parse_record, StreamRecord, WireSource};

    #[test]
    fn parses_delta_record() {
        let record = parse_record(r#"{"type":"delta","text":"partial"}"#).unwrap();
        assert_eq!(
            record,
            StreamRecord::Delta {
                text: "partial".to_string()
            }
        );
    }

    #[test]
    fn parses_final_record_with_sources() {
        let line = r#"{"type":"final","answer_id":"qa-1","answer":"done","sources":[{"title":"Sessions","source_url":"https://x/sessions"}]}"#;
        let record = parse_record(line).unwrap();
        assert_eq!(
            record,
            StreamRecord::Final {
                answer_id: "qa-1".to_string(),
                answer: "done".to_string(),
                sources: vec![WireSource {
                    title: "Sessions".to_string(),
                    source_url: "https://x/sessions".to_string(),
                }],
            }
        );
    }

    #[test]
    fn final_record_sources_default_to_empty() {
        let line = r#"{"type":"final","answer_id":"qa-2","answer":"done"}"#;
        match parse_record(line).unwrap() {
            StreamRecord::Final { sources, .. } => assert!(sources.is_empty()),
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn unknown_record_type_is_an_error() {
        assert!(parse_record(r#"{"type":"ping"}"#).is_err());
        assert!(parse_record("not json").is_err());
    }
}
