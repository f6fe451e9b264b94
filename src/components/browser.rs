//! Main browser component.
//!
//! Toolbar and breadcrumb on top, the item grid in the middle and the status
//! footer at the bottom. Also owns the widget-level input handling:
//!
//! - keyboard shortcuts (active while focused or while a selection exists)
//! - OS files dropped anywhere on the widget are uploaded to the current path

use colbrowser_core::KeyInput;
use colbrowser_core::keymap::action_for;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::breadcrumb::Breadcrumb;
use super::context_menu::ContextMenu;
use super::dialog::Dialog;
use super::footer::Footer;
use super::grid::Grid;
use super::toolbar::Toolbar;
use crate::app::BrowserContext;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/browser.module.css");

/// Whether a drag carries files from the OS.
fn carries_files(event: &web_sys::DragEvent) -> bool {
    event
        .data_transfer()
        .map(|dt| dt.types().includes(&"Files".into(), 0))
        .unwrap_or(false)
}

#[component]
pub fn Browser() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");
    let (drop_active, set_drop_active) = signal(false);

    let _keys = window_event_listener(leptos::ev::keydown, move |event| {
        let input = KeyInput {
            key: event.key(),
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
            shift: event.shift_key(),
        };
        let Some(action) = action_for(&input) else {
            return;
        };
        if ctx.dialog.get_untracked().is_some() || dom::is_text_input(event.target()) {
            return;
        }
        if !ctx.controller().shortcuts_active(ctx.focused.get_untracked()) {
            return;
        }
        event.prevent_default();
        ctx.close_menu();
        ctx.run(move |c| async move { c.dispatch(action).await });
    });

    let on_focusout = move |event: web_sys::FocusEvent| {
        let inside = match (event.current_target(), event.related_target()) {
            (Some(current), Some(related)) => {
                match (
                    current.dyn_ref::<web_sys::Node>(),
                    related.dyn_ref::<web_sys::Node>(),
                ) {
                    (Some(wrapper), Some(target)) => wrapper.contains(Some(target)),
                    _ => false,
                }
            }
            _ => false,
        };
        if !inside {
            ctx.focused.set(false);
        }
    };

    let on_dragover = move |event: web_sys::DragEvent| {
        if carries_files(&event) {
            event.prevent_default();
            set_drop_active.set(true);
        }
    };

    let on_drop = move |event: web_sys::DragEvent| {
        set_drop_active.set(false);
        if !carries_files(&event) {
            return;
        }
        event.prevent_default();
        let files = dom::files_from_list(event.data_transfer().and_then(|dt| dt.files()));
        if !files.is_empty() {
            ctx.run(move |c| async move { c.upload_files(files).await });
        }
    };

    let class = move || {
        if drop_active.get() {
            format!("{} {}", css::browser, css::drop_active)
        } else {
            css::browser.to_string()
        }
    };

    view! {
        <div
            class=class
            tabindex="0"
            on:focusin=move |_| ctx.focused.set(true)
            on:focusout=on_focusout
            on:dragover=on_dragover
            on:dragleave=move |_| set_drop_active.set(false)
            on:drop=on_drop
            on:click=move |_| ctx.close_menu()
        >
            <Toolbar />
            <Breadcrumb />

            <div class=css::body>
                <Grid />
            </div>

            <Footer />
            <ContextMenu />
            <Dialog />
        </div>
    }
}
