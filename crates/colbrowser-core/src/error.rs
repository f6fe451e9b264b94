//! Error types shared by the remote client and the controller.
//!
//! - [`ApiError`] - Every failure a browser operation can surface
//! - [`ValidationError`] - Fail-fast checks raised before any network call

use thiserror::Error;

/// Maximum number of characters of a response body kept in an error.
pub const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failures raised by remote operations and controller transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx HTTP response.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Request never produced a response (offline, CORS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Body was expected to be JSON but was not.
    #[error("invalid response: {0}")]
    Parse(String),

    /// Server answered 2xx but reported `status: "fail"`.
    #[error("server rejected request: {0}")]
    Rejected(String),

    /// Request was refused locally before reaching the network.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Build an HTTP error, truncating the body to [`MAX_ERROR_BODY_CHARS`].
    pub fn http(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            body: truncate_body(body),
        }
    }

    /// HTTP status, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Local precondition failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no items selected")]
    EmptySelection,

    #[error("clipboard is empty")]
    EmptyClipboard,

    #[error("'{path}' is outside of {root}")]
    OutsideRoot { path: String, root: String },

    #[error("select exactly one item to rename")]
    RenameNeedsSingle,

    #[error("invalid name '{0}'")]
    InvalidName(String),

    #[error("cannot move '{0}' into itself")]
    MoveIntoSelf(String),

    #[error("another dialog is already open")]
    DialogOpen,
}

/// Trim a body down for display, appending an ellipsis when cut.
pub fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push('…');
    cut
}
