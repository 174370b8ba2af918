/*
[INPUT]:  Parsed JSON response bodies
[OUTPUT]: Typed view of the rsp envelope and its slim payload
[POS]:    Data layer - response envelope shape
[UPDATE]: When the API changes its envelope nesting or failure format
*/

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::http::{IssuuError, Result};

const STAT_FAIL: &str = "fail";

/// Outer wrapper of every API response: `{"rsp": {...}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    pub rsp: ResponseBody,
}

/// Body of `rsp`.
///
/// The payload key may be spelled `_content` (what the API sends) or
/// `content`. An object carrying both spellings is rejected as a duplicate
/// field and surfaces as a malformed response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub stat: Option<String>,
    #[serde(rename = "_content", alias = "content")]
    pub content: EnvelopeContent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnvelopeContent {
    #[serde(default)]
    pub result: Option<ResultBody>,
    #[serde(default)]
    pub error: Option<ApiFailure>,
}

/// `result` wrapper; same `_content` / `content` spelling rules as [`ResponseBody`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultBody {
    #[serde(rename = "_content", alias = "content")]
    pub content: Value,
}

/// Failure details carried by envelopes with `stat = "fail"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub code: Value,
    #[serde(default)]
    pub message: String,
}

impl Envelope {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| IssuuError::MalformedResponse(format!("unexpected envelope shape: {e}")))
    }

    pub fn is_failure(&self) -> bool {
        self.rsp.stat.as_deref() == Some(STAT_FAIL)
    }

    /// The nested `result.content` payload.
    ///
    /// Failed envelopes carry no result, so they are malformed for unwrapping;
    /// the remote error code and message go into the error text.
    pub fn into_payload(self) -> Result<Value> {
        if let Some(result) = self.rsp.content.result {
            return Ok(result.content);
        }

        match self.rsp.content.error {
            Some(failure) if self.rsp.stat.as_deref() == Some(STAT_FAIL) => {
                let code = match failure.code {
                    Value::String(code) => code,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                warn!(%code, message = %failure.message, "issuu envelope reported failure");
                Err(IssuuError::MalformedResponse(format!(
                    "api failure {code}: {}",
                    failure.message
                )))
            }
            _ => Err(IssuuError::MalformedResponse("envelope has no result".to_string())),
        }
    }
}
