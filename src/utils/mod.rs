//! Utility modules for web and DOM operations.
//!
//! Provides:
//! - [`dom`] - Host element lookup, attribute parsing, file lists
//! - [`log`] - Console logging gated on the browser target

pub mod dom;
pub mod log;
