//! UI components built with Leptos.
//!
//! - [`Browser`] - Widget layout, keyboard shortcuts and OS file drops
//! - [`toolbar`] - Navigation and action buttons
//! - [`breadcrumb`] - Root-relative path segments
//! - [`grid`] - Item tiles, thumbnails, tile drag and drop
//! - [`footer`] - Status line and notices
//! - [`dialog`] - Confirm/prompt modal
//! - [`context_menu`] - Right-click menu on tiles
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod breadcrumb;
pub mod browser;
pub mod context_menu;
pub mod dialog;
pub mod footer;
pub mod grid;
pub mod icons;
pub mod toolbar;

pub use browser::Browser;
