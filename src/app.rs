//! Root application module.
//!
//! Contains the [`App`] component and [`BrowserContext`], the handle every
//! component uses to reach the controller.

use std::future::Future;
use std::rc::Rc;

use colbrowser_core::{ApiError, BrowserView, Controller};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::BrowserClient;
use crate::components::Browser;
use crate::surface::{DialogRequest, NoticeEntry, WebSurface};
use crate::utils::log;

pub type BrowserController = Controller<BrowserClient, WebSurface>;

/// Run a controller action in the background.
///
/// Failures were already shown as notices by the controller; they are only
/// logged here.
pub fn spawn_action<T, F, Fut>(controller: Rc<BrowserController>, action: F)
where
    F: FnOnce(Rc<BrowserController>) -> Fut,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let future = action(controller);
    spawn_local(async move {
        if let Err(err) = future.await {
            log::warn(&format!("[colbrowser] action failed: {}", err));
        }
    });
}

// ============================================================================
// BrowserContext
// ============================================================================

/// Open context menu: anchor position and the tile it was opened on.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuState {
    pub x: i32,
    pub y: i32,
    pub path: String,
    pub is_collection: bool,
}

/// Widget-wide reactive context.
///
/// The controller itself is not `Send`, so it is kept in local storage; the
/// signals mirror what the components need to subscribe to.
#[derive(Clone, Copy)]
pub struct BrowserContext {
    controller: StoredValue<Rc<BrowserController>, LocalStorage>,
    /// Render model, recomputed whenever the controller renders
    pub view: Memo<BrowserView>,
    pub notices: RwSignal<Vec<NoticeEntry>>,
    pub dialog: RwSignal<Option<DialogRequest>>,
    pub menu: RwSignal<Option<MenuState>>,
    /// Keyboard focus is inside the widget
    pub focused: RwSignal<bool>,
}

impl BrowserContext {
    pub fn new(controller: Rc<BrowserController>) -> Self {
        let surface = controller.surface();
        let revision = surface.revision;
        let notices = surface.notices;
        let dialog = surface.dialog;
        let controller = StoredValue::new_local(controller);

        let view = Memo::new(move |_| {
            revision.track();
            controller.with_value(|c| c.view())
        });

        Self {
            controller,
            view,
            notices,
            dialog,
            menu: RwSignal::new(None),
            focused: RwSignal::new(false),
        }
    }

    pub fn controller(&self) -> Rc<BrowserController> {
        self.controller.get_value()
    }

    /// Run an async controller action.
    pub fn run<T, F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<BrowserController>) -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        spawn_action(self.controller(), action);
    }

    pub fn close_menu(&self) {
        self.menu.set(None);
    }
}

// ============================================================================
// App Component
// ============================================================================

/// Root component of one widget instance.
#[component]
pub fn App(controller: Rc<BrowserController>) -> impl IntoView {
    let ctx = BrowserContext::new(controller);
    provide_context(ctx);

    view! { <Browser /> }
}
