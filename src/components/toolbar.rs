//! Toolbar component.
//!
//! Navigation (parent, refresh), file actions (upload, copy, cut, paste,
//! rename, delete) and login.

use leptos::html;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::BrowserContext;
use crate::components::icons as ic;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/toolbar.module.css");

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");
    let file_input = NodeRef::<html::Input>::new();

    let at_root = Signal::derive(move || ctx.view.with(|v| v.crumbs.len() <= 1));
    let busy = Signal::derive(move || ctx.view.with(|v| v.loading));
    let selection = Signal::derive(move || ctx.view.with(|v| v.selection_count));
    let can_paste = Signal::derive(move || ctx.view.with(|v| v.can_paste));

    let on_upload_chosen = move |_: leptos::ev::Event| {
        let Some(input) = file_input.get_untracked() else {
            return;
        };
        let files = dom::files_from_list(input.files());
        // allow picking the same file again
        input.set_value("");
        if !files.is_empty() {
            ctx.run(move |c| async move { c.upload_files(files).await });
        }
    };

    view! {
        <header class=css::toolbar>
            <div class=css::group>
                <ToolButton
                    icon=ic::UP
                    title="Parent collection"
                    disabled=Signal::derive(move || at_root.get() || busy.get())
                    on_click=move || ctx.run(|c| async move { c.navigate_up().await })
                />
                <ToolButton
                    icon=ic::REFRESH
                    title="Refresh"
                    disabled=busy
                    on_click=move || ctx.run(|c| async move { c.refresh().await })
                />
            </div>

            <div class=css::group>
                <ToolButton
                    icon=ic::UPLOAD
                    title="Upload files"
                    disabled=Signal::derive(|| false)
                    on_click=move || {
                        if let Some(input) = file_input.get_untracked() {
                            input.click();
                        }
                    }
                />
                <input
                    node_ref=file_input
                    class=css::hidden_input
                    type="file"
                    multiple=true
                    on:change=on_upload_chosen
                />
                <ToolButton
                    icon=ic::COPY
                    title="Copy (Ctrl+C)"
                    disabled=Signal::derive(move || selection.get() == 0)
                    on_click=move || {
                        ctx.controller().perform_copy();
                    }
                />
                <ToolButton
                    icon=ic::CUT
                    title="Cut (Ctrl+X)"
                    disabled=Signal::derive(move || selection.get() == 0)
                    on_click=move || {
                        ctx.controller().perform_cut();
                    }
                />
                <ToolButton
                    icon=ic::PASTE
                    title="Paste (Ctrl+V)"
                    disabled=Signal::derive(move || !can_paste.get())
                    on_click=move || ctx.run(|c| async move { c.perform_paste().await })
                />
                <ToolButton
                    icon=ic::EDIT
                    title="Rename (F2)"
                    disabled=Signal::derive(move || selection.get() != 1)
                    on_click=move || ctx.run(|c| async move { c.perform_rename().await })
                />
                <ToolButton
                    icon=ic::DELETE
                    title="Delete (Del)"
                    disabled=Signal::derive(move || selection.get() == 0)
                    on_click=move || ctx.run(|c| async move { c.perform_delete().await })
                />
            </div>

            <div class=css::group>
                <ToolButton
                    icon=ic::LOGIN
                    title="Login"
                    disabled=Signal::derive(|| false)
                    on_click=move || ctx.run(|c| async move { c.perform_login().await })
                />
            </div>
        </header>
    }
}

#[component]
fn ToolButton<F>(
    icon: icondata::Icon,
    title: &'static str,
    disabled: Signal<bool>,
    on_click: F,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button
            class=move || {
                if disabled.get() {
                    format!("{} {}", css::button, css::button_disabled)
                } else {
                    css::button.to_string()
                }
            }
            disabled=move || disabled.get()
            title=title
            on:click=move |_| on_click()
        >
            <Icon icon=icon />
        </button>
    }
}
