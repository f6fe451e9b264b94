//! Console logging.
//!
//! No-ops outside the browser so native builds never touch JS imports.

use colbrowser_core::{Notice, NoticeLevel};

#[allow(unused_variables)]
pub fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
}

#[allow(unused_variables)]
pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
}

#[allow(unused_variables)]
pub fn error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&message.into());
}

/// Mirror a notice to the console at a matching level.
pub fn notice(notice: &Notice) {
    let line = format!("[colbrowser] {}", notice.text);
    match notice.level {
        NoticeLevel::Info | NoticeLevel::Success => log(&line),
        NoticeLevel::Warning => warn(&line),
        NoticeLevel::Error => error(&line),
    }
}
