//! Tile context menu.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{BrowserContext, MenuState};
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/context_menu.module.css");

#[component]
pub fn ContextMenu() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    view! {
        {move || ctx.menu.get().map(|state| view! { <Menu state=state /> })}
    }
}

#[component]
fn Menu(state: MenuState) -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");
    let selection = Signal::derive(move || ctx.view.with(|v| v.selection_count));
    let can_paste = Signal::derive(move || ctx.view.with(|v| v.can_paste));

    let path = StoredValue::new(state.path.clone());
    let open_label = if state.is_collection { "Open" } else { "Open in new tab" };

    view! {
        <div
            class=css::menu
            role="menu"
            style=format!("left: {}px; top: {}px;", state.x, state.y)
            on:contextmenu=move |e| e.prevent_default()
        >
            <MenuItem
                icon=if state.is_collection { ic::FOLDER } else { ic::FILE }
                label=open_label
                disabled=Signal::derive(|| false)
                on_select=move || {
                    let path = path.get_value();
                    ctx.run(move |c| async move { c.open(&path).await });
                }
            />
            <div class=css::divider></div>
            <MenuItem
                icon=ic::COPY
                label="Copy"
                disabled=Signal::derive(move || selection.get() == 0)
                on_select=move || {
                    ctx.controller().perform_copy();
                }
            />
            <MenuItem
                icon=ic::CUT
                label="Cut"
                disabled=Signal::derive(move || selection.get() == 0)
                on_select=move || {
                    ctx.controller().perform_cut();
                }
            />
            <MenuItem
                icon=ic::PASTE
                label="Paste"
                disabled=Signal::derive(move || !can_paste.get())
                on_select=move || ctx.run(|c| async move { c.perform_paste().await })
            />
            <div class=css::divider></div>
            <MenuItem
                icon=ic::EDIT
                label="Rename"
                disabled=Signal::derive(move || selection.get() != 1)
                on_select=move || ctx.run(|c| async move { c.perform_rename().await })
            />
            <MenuItem
                icon=ic::DELETE
                label="Delete"
                disabled=Signal::derive(move || selection.get() == 0)
                on_select=move || ctx.run(|c| async move { c.perform_delete().await })
            />
        </div>
    }
}

#[component]
fn MenuItem<F>(
    icon: icondata::Icon,
    label: &'static str,
    disabled: Signal<bool>,
    on_select: F,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    view! {
        <button
            class=css::item
            role="menuitem"
            disabled=move || disabled.get()
            on:click=move |event| {
                event.stop_propagation();
                ctx.close_menu();
                on_select();
            }
        >
            <span class=css::icon><Icon icon=icon /></span>
            {label}
        </button>
    }
}
