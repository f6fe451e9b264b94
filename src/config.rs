//! Widget configuration.
//!
//! Centralizes the constants of the web layer. Per-instance settings
//! (`api-base`, `root`, `page-size`) are read from the host element into a
//! [`colbrowser_core::BrowserConfig`].

// =============================================================================
// Host Element
// =============================================================================

/// Element the standalone build mounts into.
pub const HOST_ELEMENT_ID: &str = "app";

/// Host attribute holding the REST API base URL.
pub const ATTR_API_BASE: &str = "api-base";

/// Host attribute holding the root collection path.
pub const ATTR_ROOT: &str = "root";

/// Optional host attribute overriding the page size.
pub const ATTR_PAGE_SIZE: &str = "page-size";

// =============================================================================
// Network Configuration
// =============================================================================

/// Request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u32 = 10_000;

/// MIME type used to carry dragged item paths between tiles.
pub const DRAG_MIME: &str = "application/x-colbrowser-paths";

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the widget.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
