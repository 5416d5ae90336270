//! The generic `resultCode` response shape of the groupings API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application-level outcome reported by the API.
///
/// Unrecognised codes are kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResultCode {
    Success,
    Failure,
    Other(String),
}

impl ResultCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for ResultCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "SUCCESS" => Self::Success,
            "FAILURE" => Self::Failure,
            _ => Self::Other(code),
        }
    }
}

impl From<ResultCode> for String {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

/// Response body of most groupings endpoints.
///
/// An application-level failure (`resultCode: "FAILURE"`) is a normal
/// value of this type, not an error; callers decide how to present it.
/// Fields other than `resultCode` are preserved untouched in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(
        rename = "resultCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub result_code: Option<ResultCode>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.result_code == Some(ResultCode::Success)
    }

    pub fn is_failure(&self) -> bool {
        self.result_code == Some(ResultCode::Failure)
    }

    /// Look up a field other than `resultCode`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}
