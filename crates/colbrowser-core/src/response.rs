//! Response body interpretation.
//!
//! The server's `Content-Type` is treated as a hint only: JSON is detected by
//! sniffing the body for a leading `{` or `[`.

use serde_json::Value;

use crate::error::{ApiError, truncate_body};
use crate::remote::RawResponse;

/// Outcome of a mutating operation (delete, rename, copy, move).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OperationResult {
    pub status: Option<String>,
    pub message: Option<String>,
    pub raw: Value,
}

/// Outcome of a single file upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadResult {
    /// Names reported in `{files: [...]}`, empty for plain-text answers
    pub files: Vec<String>,
    /// Plain-text answer, if the server did not send JSON
    pub message: Option<String>,
}

/// Outcome of a login call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginResult {
    pub user: Option<String>,
    pub message: Option<String>,
}

/// Fail with [`ApiError::Http`] unless the status is 2xx.
pub fn ensure_success(response: &RawResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        Ok(())
    } else {
        Err(ApiError::http(response.status, &response.body))
    }
}

/// Whether the body looks like JSON, regardless of headers.
pub fn looks_like_json(body: &str) -> bool {
    matches!(body.trim_start().chars().next(), Some('{' | '['))
}

/// Parse a body that must be JSON.
pub fn sniff_json(response: &RawResponse) -> Result<Value, ApiError> {
    if !looks_like_json(&response.body) {
        let hint = response.content_type.as_deref().unwrap_or("no content type");
        return Err(ApiError::Parse(format!(
            "expected JSON ({}): {}",
            hint,
            truncate_body(&response.body)
        )));
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Parse JSON when possible, otherwise keep the text as a string value.
pub fn parse_tolerant(body: &str) -> Value {
    if looks_like_json(body)
        && let Ok(value) = serde_json::from_str(body)
    {
        return value;
    }
    Value::String(body.trim().to_string())
}

/// Interpret the body of a mutating operation.
///
/// `{status: "fail"}` is a failure even on HTTP 200.
pub fn operation_result(response: &RawResponse) -> Result<OperationResult, ApiError> {
    ensure_success(response)?;
    let raw = parse_tolerant(&response.body);
    let status = raw.get("status").and_then(Value::as_str).map(String::from);
    let message = raw
        .get("message")
        .and_then(Value::as_str)
        .map(String::from)
        .or_else(|| raw.as_str().filter(|s| !s.is_empty()).map(String::from));

    if status.as_deref() == Some("fail") {
        return Err(ApiError::Rejected(
            message.unwrap_or_else(|| "operation failed".to_string()),
        ));
    }

    Ok(OperationResult {
        status,
        message,
        raw,
    })
}

/// Interpret an upload answer: `{files: [...]}` or plain text.
pub fn upload_result(response: &RawResponse) -> Result<UploadResult, ApiError> {
    ensure_success(response)?;
    let value = parse_tolerant(&response.body);
    if let Some(text) = value.as_str() {
        return Ok(UploadResult {
            files: Vec::new(),
            message: Some(text.to_string()).filter(|s| !s.is_empty()),
        });
    }
    if value.get("status").and_then(Value::as_str) == Some("fail") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("upload failed");
        return Err(ApiError::Rejected(message.to_string()));
    }
    let files = value
        .get("files")
        .and_then(Value::as_array)
        .map(|files| {
            files
                .iter()
                .filter_map(|f| {
                    f.as_str()
                        .or_else(|| f.get("name").and_then(Value::as_str))
                        .map(String::from)
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(UploadResult {
        files,
        message: None,
    })
}

/// Interpret a login answer (JSON or plain text).
pub fn login_result(response: &RawResponse) -> Result<LoginResult, ApiError> {
    let result = operation_result(response)?;
    let user = result
        .raw
        .get("user")
        .and_then(Value::as_str)
        .map(String::from);
    Ok(LoginResult {
        user,
        message: result.message,
    })
}
