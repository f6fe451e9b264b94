//! Platform-agnostic core of the collection browser widget.
//!
//! Everything here is plain Rust so it can be exercised natively:
//! - [`models`] - [`Item`], [`Clipboard`], [`Notice`] and friends
//! - [`path`] - Root-relative path rules
//! - [`listing`] - Response shape matchers and listing normalization
//! - [`remote`] - Request descriptors, [`Transport`] and [`RemoteClient`]
//! - [`session`] - Per-instance [`SessionState`]
//! - [`controller`] - The interaction/state [`Controller`]
//! - [`view`] - Render models derived from state
//! - [`keymap`] - Keyboard shortcut mapping

pub mod config;
pub mod controller;
pub mod error;
pub mod keymap;
pub mod listing;
pub mod models;
pub mod path;
pub mod remote;
pub mod response;
pub mod session;
pub mod view;

pub use config::BrowserConfig;
pub use controller::{Controller, LoadOutcome, Modifiers, Prompt, Surface};
pub use error::{ApiError, ValidationError};
pub use keymap::{KeyAction, KeyInput};
pub use listing::RawEntry;
pub use models::{
    Clipboard, ClipboardEntry, ClipboardMode, FileCategory, Item, ItemKind, Notice, NoticeLevel,
};
pub use remote::{CollectionApi, HttpRequest, Method, RawResponse, RemoteClient, Transport, UploadFile};
pub use session::SessionState;
pub use view::{BrowserView, Crumb, Tile, TileIcon};
