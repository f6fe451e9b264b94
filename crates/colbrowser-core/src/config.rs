//! Widget configuration.

use crate::path::normalize_path;

/// Default number of entries requested per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Delay before reloading after an upload, in milliseconds.
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 1000;

/// How long error notices stay visible.
pub const ERROR_NOTICE_MS: u32 = 10_000;

/// How long every other notice stays visible.
pub const INFO_NOTICE_MS: u32 = 5_000;

/// Configuration for one widget instance.
///
/// `api_base` and `root` come from the host element's `api-base` and
/// `root` attributes; the rest have defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Server root, without a trailing slash.
    pub api_base: String,
    /// Topmost collection the widget may browse (normalized).
    pub root: String,
    /// Entries per listing page.
    pub page_size: usize,
    /// Pause between the last upload and the reload.
    pub settle_delay_ms: u32,
    pub error_notice_ms: u32,
    pub info_notice_ms: u32,
}

impl BrowserConfig {
    pub fn new(api_base: &str, root: &str) -> Self {
        Self {
            api_base: normalize_base(api_base),
            root: normalize_path(root),
            ..Self::default()
        }
    }

    /// Builder-style page size override. Zero falls back to the default.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self
    }

    pub fn with_settle_delay(mut self, ms: u32) -> Self {
        self.settle_delay_ms = ms;
        self
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            root: "/".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            error_notice_ms: ERROR_NOTICE_MS,
            info_notice_ms: INFO_NOTICE_MS,
        }
    }
}

/// Strip whitespace and trailing slashes from a server base URL.
pub fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
