//! Asynchronous job handles and the status envelope returned while polling.
//!
//! An `*/async` endpoint answers with a bare identifier (a JSON number or
//! string). The status endpoint answers with
//! `{"status": "IN_PROGRESS"}` until the job finishes, then
//! `{"status": "COMPLETED", "result": <payload>}` where the payload has the
//! same shape the synchronous endpoint would have returned.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a server-side asynchronous job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobHandle {
    Id(i64),
    Token(String),
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Token(token) => f.write_str(token),
        }
    }
}

impl From<i64> for JobHandle {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

/// Status of a job as reported by the status endpoint.
///
/// Any other `status` value, or a `COMPLETED` envelope without a `result`,
/// fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum JobStatus<R> {
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "COMPLETED")]
    Completed { result: R },
}
