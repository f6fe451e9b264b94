//! Item grid.
//!
//! One tile per listed item. Tiles handle selection clicks, opening, the
//! context menu, and dragging items onto collection tiles to move them.
//! Image tiles show a thumbnail and fall back to the generic file icon if it
//! fails to load.

use colbrowser_core::{ItemKind, Modifiers, Tile, TileIcon};
use leptos::prelude::*;
use leptos_icons::Icon;
use serde::{Deserialize, Serialize};

use crate::app::{BrowserContext, MenuState};
use crate::components::icons as ic;
use crate::config::DRAG_MIME;
use crate::utils::log;

stylance::import_crate_style!(css, "src/components/grid.module.css");

fn modifiers(event: &web_sys::MouseEvent) -> Modifiers {
    Modifiers {
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        shift: event.shift_key(),
    }
}

/// Data carried by a tile drag.
#[derive(Serialize, Deserialize)]
struct DragPayload {
    paths: Vec<String>,
}

/// Paths carried by a tile drag, if the drag came from a tile.
fn dragged_paths(event: &web_sys::DragEvent) -> Option<Vec<String>> {
    let raw = event.data_transfer()?.get_data(DRAG_MIME).ok()?;
    let payload: DragPayload = serde_json::from_str(&raw).ok()?;
    (!payload.paths.is_empty()).then_some(payload.paths)
}

#[component]
pub fn Grid() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    let tiles = Signal::derive(move || ctx.view.with(|v| v.tiles.clone()));
    let loading = Signal::derive(move || ctx.view.with(|v| v.loading));
    let error = Signal::derive(move || ctx.view.with(|v| v.error.clone()));
    let show_more = Signal::derive(move || ctx.view.with(|v| v.show_load_more));

    let on_background_click = move |event: web_sys::MouseEvent| {
        if event.target() == event.current_target() {
            ctx.controller().clear_selection();
        }
    };

    view! {
        <div class=css::container on:click=on_background_click>
            {move || error.get().map(|message| view! {
                <div class=css::error role="alert">{message}</div>
            })}

            <div class=css::grid role="grid" aria-label="Collection items">
                <For
                    each=move || tiles.get()
                    key=|tile| (tile.path.clone(), tile.selected, tile.cut)
                    children=move |tile| view! { <TileView tile=tile /> }
                />
            </div>

            <Show when=move || loading.get()>
                <div class=css::loading>"Loading…"</div>
            </Show>

            <Show when=move || show_more.get()>
                <button
                    class=css::load_more
                    on:click=move |_| ctx.run(|c| async move { c.load_more().await })
                >
                    "Load more"
                </button>
            </Show>
        </div>
    }
}

#[component]
fn TileView(tile: Tile) -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");
    let (thumb_failed, set_thumb_failed) = signal(false);
    let (drop_target, set_drop_target) = signal(false);

    let is_parent = tile.icon == TileIcon::Parent;
    let is_collection = tile.kind == ItemKind::Collection;
    let path = StoredValue::new(tile.path.clone());

    let on_click = move |event: web_sys::MouseEvent| {
        event.stop_propagation();
        ctx.close_menu();
        ctx.controller()
            .toggle_selection(&path.get_value(), modifiers(&event));
    };

    let on_dblclick = move |_: web_sys::MouseEvent| {
        let path = path.get_value();
        ctx.run(move |c| async move { c.open(&path).await });
    };

    let on_contextmenu = move |event: web_sys::MouseEvent| {
        event.prevent_default();
        event.stop_propagation();
        if is_parent {
            return;
        }
        let path = path.get_value();
        ctx.controller().select_for_context(&path);
        ctx.menu.set(Some(MenuState {
            x: event.client_x(),
            y: event.client_y(),
            path,
            is_collection,
        }));
    };

    let on_dragstart = move |event: web_sys::DragEvent| {
        let payload = DragPayload {
            paths: ctx.controller().drag_payload(&path.get_value()),
        };
        let Some(dt) = event.data_transfer() else {
            return;
        };
        let stored = serde_json::to_string(&payload)
            .map_err(|err| err.to_string())
            .and_then(|json| dt.set_data(DRAG_MIME, &json).map_err(|err| format!("{:?}", err)));
        match stored {
            Ok(()) => dt.set_effect_allowed("move"),
            Err(err) => log::warn(&format!("[colbrowser] failed to start drag: {}", err)),
        }
    };

    let on_dragover = move |event: web_sys::DragEvent| {
        if !is_collection || is_parent {
            return;
        }
        let from_tile = event
            .data_transfer()
            .map(|dt| dt.types().includes(&DRAG_MIME.into(), 0))
            .unwrap_or(false);
        if from_tile {
            event.prevent_default();
            set_drop_target.set(true);
        }
    };

    let on_drop = move |event: web_sys::DragEvent| {
        set_drop_target.set(false);
        if !is_collection || is_parent {
            return;
        }
        let Some(sources) = dragged_paths(&event) else {
            return;
        };
        event.prevent_default();
        event.stop_propagation();
        let target = path.get_value();
        ctx.run(move |c| async move { c.move_into(&target, sources).await });
    };

    let class = {
        let mut class = css::tile.to_string();
        if tile.selected {
            class = format!("{} {}", class, css::selected);
        }
        if tile.cut {
            class = format!("{} {}", class, css::cut);
        }
        move || {
            if drop_target.get() {
                format!("{} {}", class, css::drop_target)
            } else {
                class.clone()
            }
        }
    };

    let icon = ic::tile_icon(tile.icon);
    let thumbnail = tile.thumbnail.clone();
    let name = tile.name.clone();

    view! {
        <div
            class=class
            role="gridcell"
            tabindex="-1"
            title=tile.path.clone()
            aria-selected=tile.selected
            draggable=if is_parent { "false" } else { "true" }
            on:click=on_click
            on:dblclick=on_dblclick
            on:contextmenu=on_contextmenu
            on:dragstart=on_dragstart
            on:dragover=on_dragover
            on:dragleave=move |_| set_drop_target.set(false)
            on:drop=on_drop
        >
            <div class=css::visual>
                {move || match thumbnail.clone() {
                    Some(url) if !thumb_failed.get() => view! {
                        <img
                            class=css::thumbnail
                            src=url
                            alt=""
                            loading="lazy"
                            on:error=move |_| set_thumb_failed.set(true)
                        />
                    }.into_any(),
                    Some(_) => view! {
                        <span class=css::icon><Icon icon=ic::FILE /></span>
                    }.into_any(),
                    None => view! {
                        <span class=css::icon><Icon icon=icon /></span>
                    }.into_any(),
                }}
            </div>
            <span class=css::name>{name}</span>
        </div>
    }
}
