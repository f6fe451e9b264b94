//! Embeddable collection browser widget.
//!
//! Mounts a file-manager style browser over a collection REST API into a host
//! element. The host's required `api-base` and `root` attributes and the
//! optional `page-size` configure the instance. Later changes to `api-base`
//! or `root` are picked up by an attribute observer; the returned
//! [`BrowserHandle`] offers the same operations to scripts.
//!
//! - [`app`] - Root component and shared context
//! - [`api`] - `gloo-net` transport
//! - [`surface`] - Browser implementation of the controller's UI seam
//! - [`components`] - Leptos components

mod api;
mod app;
mod components;
mod config;
mod error;
mod surface;
mod utils;

use std::rc::Rc;

use colbrowser_core::{BrowserConfig, Controller, RemoteClient};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::api::FetchTransport;
use crate::app::{App, BrowserController, spawn_action};
use crate::config::{ATTR_API_BASE, ATTR_ROOT};
use crate::surface::WebSurface;
use crate::utils::{dom, log};

pub use crate::config::HOST_ELEMENT_ID;
pub use crate::error::DomError;

/// Handle to a mounted widget.
#[wasm_bindgen]
pub struct BrowserHandle {
    controller: Rc<BrowserController>,
}

#[wasm_bindgen]
impl BrowserHandle {
    /// Switch to another root collection.
    pub fn set_root(&self, root: String) {
        spawn_action(self.controller.clone(), move |c| async move {
            c.set_root(&root).await
        });
    }

    /// Point the widget at another server.
    pub fn set_api_base(&self, api_base: String) {
        spawn_action(self.controller.clone(), move |c| async move {
            c.set_api_base(&api_base).await
        });
    }

    /// API base URL currently in use.
    pub fn api_base(&self) -> String {
        self.controller.config().api_base
    }

    /// Root collection currently in use.
    pub fn root(&self) -> String {
        self.controller.config().root
    }

    /// Reload the current collection.
    pub fn refresh(&self) {
        spawn_action(self.controller.clone(), |c| async move { c.refresh().await });
    }
}

/// Mount the widget into the element with id `host_id`.
#[wasm_bindgen]
pub fn mount(host_id: &str) -> Result<BrowserHandle, JsValue> {
    console_error_panic_hook::set_once();

    let host = dom::host_element(host_id)?;
    let config = dom::read_config(&host)?;
    log::log(&format!(
        "[colbrowser] mounting #{} at {} (root {})",
        host_id, config.api_base, config.root
    ));

    let controller = Rc::new(build_controller(config));
    watch_host(&host, controller.clone())?;
    let for_view = controller.clone();
    mount_to(host, move || view! { <App controller=for_view /> }).forget();

    spawn_action(controller.clone(), |c| async move { c.start().await });
    Ok(BrowserHandle { controller })
}

/// Forward `api-base` and `root` attribute changes to the controller.
fn watch_host(host: &web_sys::Element, controller: Rc<BrowserController>) -> Result<(), DomError> {
    dom::observe_attributes(host, &[ATTR_API_BASE, ATTR_ROOT], move |name, value| {
        let Some(value) = value else {
            log::warn(&format!("[colbrowser] '{}' attribute removed, keeping the old value", name));
            return;
        };
        if name == ATTR_ROOT {
            spawn_action(controller.clone(), move |c| async move { c.set_root(&value).await });
        } else if name == ATTR_API_BASE {
            spawn_action(controller.clone(), move |c| async move {
                c.set_api_base(&value).await
            });
        }
    })
}

fn build_controller(config: BrowserConfig) -> BrowserController {
    let client = RemoteClient::new(FetchTransport::new(config::FETCH_TIMEOUT_MS), &config.api_base);
    let surface = WebSurface::new(&config);
    Controller::new(client, surface, config)
}
