//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use colbrowser_core::BrowserConfig;
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, EventTarget, FileList, HtmlElement, MutationObserver, MutationObserverInit,
    MutationRecord, Window,
};

use crate::api::BrowserFile;
use crate::config::{ATTR_API_BASE, ATTR_PAGE_SIZE, ATTR_ROOT};
use crate::error::DomError;
use crate::utils::log;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Look up the element the widget mounts into.
pub fn host_element(id: &str) -> Result<HtmlElement, DomError> {
    let document = document().ok_or(DomError::NoDocument)?;
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| DomError::HostNotFound(id.to_string()))
}

/// Parse the optional `page-size` attribute. Empty means default.
pub fn parse_page_size(value: Option<&str>) -> Result<Option<usize>, DomError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(Some)
            .ok_or_else(|| DomError::InvalidAttribute {
                name: ATTR_PAGE_SIZE.to_string(),
                value: raw.to_string(),
            }),
    }
}

/// Value of an attribute the widget cannot run without.
pub fn required_attribute(host: &Element, name: &str) -> Result<String, DomError> {
    host.get_attribute(name)
        .ok_or_else(|| DomError::MissingAttribute(name.to_string()))
}

/// Build the widget configuration from the host element's attributes.
pub fn read_config(host: &Element) -> Result<BrowserConfig, DomError> {
    let api_base = required_attribute(host, ATTR_API_BASE)?;
    let root = required_attribute(host, ATTR_ROOT)?;
    let config = BrowserConfig::new(&api_base, &root);
    match parse_page_size(host.get_attribute(ATTR_PAGE_SIZE).as_deref())? {
        Some(size) => Ok(config.with_page_size(size)),
        None => Ok(config),
    }
}

/// Call `callback` with the attribute name and its new value whenever one
/// of `names` changes on `host`.
///
/// The observer lives as long as the page; its closure is leaked.
pub fn observe_attributes(
    host: &Element,
    names: &[&str],
    callback: impl Fn(String, Option<String>) + 'static,
) -> Result<(), DomError> {
    let target = host.clone();
    let closure = Closure::wrap(Box::new(move |records: Array, _observer: JsValue| {
        for record in records.iter() {
            let Some(name) = record
                .dyn_into::<MutationRecord>()
                .ok()
                .and_then(|r| r.attribute_name())
            else {
                continue;
            };
            let value = target.get_attribute(&name);
            callback(name, value);
        }
    }) as Box<dyn Fn(Array, JsValue)>);

    let observer = MutationObserver::new(closure.as_ref().unchecked_ref())
        .map_err(|_| DomError::ObserverFailed)?;
    let filter: Array = names.iter().map(|n| JsValue::from_str(n)).collect();
    let options = MutationObserverInit::new();
    options.set_attributes(true);
    options.set_attribute_filter(&filter);
    observer
        .observe_with_options(host, &options)
        .map_err(|_| DomError::ObserverFailed)?;

    closure.forget();
    Ok(())
}

/// Whether an event originated in a text field, where shortcuts must not fire.
pub fn is_text_input(target: Option<EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"))
}

/// Collect the files of a file input or drop.
pub fn files_from_list(list: Option<FileList>) -> Vec<BrowserFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .map(BrowserFile::new)
        .collect()
}

/// Open a URL in a new tab.
pub fn open_in_new_tab(url: &str) {
    let Some(window) = window() else {
        log::warn("[colbrowser] no window to open a tab in");
        return;
    };
    match window.open_with_url_and_target(url, "_blank") {
        Ok(Some(_)) => {}
        Ok(None) => log::warn(&format!("[colbrowser] popup blocked for {}", url)),
        Err(err) => log::warn(&format!("[colbrowser] failed to open {}: {:?}", url, err)),
    }
}
