//! Browser implementation of the controller's [`Surface`].
//!
//! Rendering is a revision counter that components subscribe to. Notices and
//! the pending dialog live in signals; a dialog's answer is delivered through
//! a JS promise resolved by the dialog component.

use std::cell::{Cell, RefCell};

use colbrowser_core::{BrowserConfig, Notice, Prompt, Surface};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Promise};
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::utils::{dom, log};

/// A notice on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeEntry {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Confirm,
    Prompt { default: String, masked: bool },
}

/// The modal currently shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub message: String,
}

pub struct WebSurface {
    pub revision: RwSignal<u64>,
    pub notices: RwSignal<Vec<NoticeEntry>>,
    pub dialog: RwSignal<Option<DialogRequest>>,
    config: BrowserConfig,
    next_notice: Cell<u64>,
    resolver: RefCell<Option<Function>>,
}

impl WebSurface {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            revision: RwSignal::new(0),
            notices: RwSignal::new(Vec::new()),
            dialog: RwSignal::new(None),
            config: config.clone(),
            next_notice: Cell::new(0),
            resolver: RefCell::new(None),
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|n| n.retain(|e| e.id != id));
    }

    /// Close the dialog with an answer. `None` cancels.
    pub fn answer(&self, value: Option<String>) {
        self.dialog.set(None);
        if let Some(resolve) = self.resolver.borrow_mut().take() {
            let value = value.map(JsValue::from).unwrap_or(JsValue::NULL);
            if let Err(err) = resolve.call1(&JsValue::NULL, &value) {
                log::warn(&format!("[colbrowser] failed to close dialog: {:?}", err));
            }
        }
    }

    async fn ask(&self, request: DialogRequest) -> Option<String> {
        let mut resolver = None;
        let promise = Promise::new(&mut |resolve, _reject| {
            resolver = Some(resolve);
        });
        *self.resolver.borrow_mut() = resolver;
        self.dialog.set(Some(request));
        JsFuture::from(promise).await.ok().and_then(|v| v.as_string())
    }
}

impl Surface for WebSurface {
    fn render(&self) {
        self.revision.update(|r| *r += 1);
    }

    fn notify(&self, notice: Notice) {
        log::notice(&notice);
        let id = self.next_notice.get();
        self.next_notice.set(id + 1);
        let ms = notice.duration_ms(&self.config);
        self.notices.update(|n| n.push(NoticeEntry { id, notice }));

        let notices = self.notices;
        Timeout::new(ms, move || {
            notices.try_update(|n| n.retain(|e| e.id != id));
        })
        .forget();
    }

    async fn confirm(&self, message: &str) -> bool {
        self.ask(DialogRequest {
            kind: DialogKind::Confirm,
            message: message.to_string(),
        })
        .await
        .is_some()
    }

    async fn prompt(&self, prompt: Prompt) -> Option<String> {
        self.ask(DialogRequest {
            kind: DialogKind::Prompt {
                default: prompt.default,
                masked: prompt.masked,
            },
            message: prompt.message,
        })
        .await
    }

    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn open_resource(&self, url: &str) {
        dom::open_in_new_tab(url);
    }
}
