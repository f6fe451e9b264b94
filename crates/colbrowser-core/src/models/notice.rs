use crate::config::BrowserConfig;
use crate::error::ApiError;

/// Severity of a notice, which selects its color and lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, auto-dismissing message shown in the widget footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// Error notice for a failed operation, e.g. "Delete failed: HTTP 500: ...".
    ///
    /// Local validation failures are reported as warnings.
    pub fn failure(action: &str, err: &ApiError) -> Self {
        let text = format!("{} failed: {}", action, err);
        match err {
            ApiError::Validation(_) => Self::warning(text),
            _ => Self::error(text),
        }
    }

    /// Milliseconds before the notice dismisses itself.
    pub fn duration_ms(&self, config: &BrowserConfig) -> u32 {
        match self.level {
            NoticeLevel::Error => config.error_notice_ms,
            _ => config.info_notice_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_durations() {
        let config = BrowserConfig::default();
        assert_eq!(Notice::error("x").duration_ms(&config), 10_000);
        assert_eq!(Notice::warning("x").duration_ms(&config), 5_000);
        assert_eq!(Notice::success("x").duration_ms(&config), 5_000);
    }

    #[test]
    fn test_failure_levels() {
        let http = Notice::failure("Delete", &ApiError::http(500, "boom"));
        assert_eq!(http.level, NoticeLevel::Error);
        assert_eq!(http.text, "Delete failed: HTTP 500: boom");

        let local = Notice::failure("Paste", &ValidationError::EmptyClipboard.into());
        assert_eq!(local.level, NoticeLevel::Warning);
    }
}
