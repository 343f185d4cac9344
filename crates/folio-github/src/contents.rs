//! Decoding of GitHub API payloads.
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceError;

#[derive(Debug, Deserialize)]
struct ContentsResponse {
  content:  Option<String>,
  encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
  #[serde(default)]
  message: String,
  status:  Option<Value>,
}

/// Recognise a GitHub API error body such as
/// `{"message": "Not Found", "status": "404"}`.
///
/// Returns `None` for anything that does not carry a non-success status,
/// including ordinary response payloads.
#[must_use]
pub fn api_error(json: &str) -> Option<SourceError> {
  let body: ErrorResponse = serde_json::from_str(json).ok()?;
  let status: u16 = match body.status? {
    Value::Number(n) => u16::try_from(n.as_u64()?).ok()?,
    Value::String(s) => s.parse().ok()?,
    _ => return None,
  };
  if (200..300).contains(&status) {
    return None;
  }
  Some(SourceError::from_status(status, &body.message))
}

/// Decode the file body out of a contents API response.
///
/// The API wraps base64 output at 60 columns, so whitespace is ignored.
///
/// # Errors
///
/// Returns the mapped status error for an API error body (see [`api_error`]),
/// [`SourceError::Json`] if the payload is not a contents object,
/// [`SourceError::NotFound`] if it carries no content and
/// [`SourceError::Decode`] if the content is not base64 encoded UTF-8.
pub fn decode_contents_response(json: &str) -> Result<String, SourceError> {
  if let Some(err) = api_error(json) {
    return Err(err);
  }
  let response: ContentsResponse = serde_json::from_str(json)?;

  if let Some(encoding) = response.encoding.as_deref()
    && encoding != "base64"
  {
    return Err(SourceError::Decode(format!(
      "unsupported content encoding '{encoding}'"
    )));
  }

  let content = response
    .content
    .filter(|c| !c.trim().is_empty())
    .ok_or_else(|| SourceError::NotFound("README content".to_string()))?;

  let compact: String =
    content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
  let bytes = STANDARD
    .decode(compact)
    .map_err(|e| SourceError::Decode(e.to_string()))?;

  String::from_utf8(bytes).map_err(|e| SourceError::Decode(e.to_string()))
}
