//! Web-layer error types.
//!
//! Remote and controller failures are [`colbrowser_core::ApiError`]; this
//! module only covers problems with the page the widget is mounted into.

use std::fmt;

use wasm_bindgen::JsValue;

/// Failures while locating or configuring the host element.
#[derive(Debug, Clone)]
pub enum DomError {
    /// Browser window or document not available
    NoDocument,
    /// No element with the given id
    HostNotFound(String),
    /// Required attribute not set on the host
    MissingAttribute(String),
    /// Attribute present but not usable
    InvalidAttribute { name: String, value: String },
    /// Attribute watcher could not be attached
    ObserverFailed,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDocument => write!(f, "Browser document not available"),
            Self::HostNotFound(id) => write!(f, "Host element #{} not found", id),
            Self::MissingAttribute(name) => {
                write!(f, "Host element is missing the '{}' attribute", name)
            }
            Self::InvalidAttribute { name, value } => {
                write!(f, "Invalid value for attribute '{}': {}", name, value)
            }
            Self::ObserverFailed => write!(f, "Failed to watch host attributes"),
        }
    }
}

impl std::error::Error for DomError {}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
