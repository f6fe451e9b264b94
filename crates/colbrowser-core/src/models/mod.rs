//! Data models for the collection browser.
//!
//! Contains domain types for:
//! - [`Item`], [`ItemKind`], [`FileCategory`] - One entry in a listing
//! - [`Clipboard`], [`ClipboardEntry`], [`ClipboardMode`] - In-memory copy/cut buffer
//! - [`Notice`], [`NoticeLevel`] - Transient user-visible messages

mod clipboard;
mod item;
mod notice;

pub use clipboard::{Clipboard, ClipboardEntry, ClipboardMode};
pub use item::{FileCategory, Item, ItemKind, PARENT_NAME};
pub use notice::{Notice, NoticeLevel};
