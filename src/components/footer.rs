//! Status footer.
//!
//! Item, selection and clipboard counts, plus the stack of transient notices.
//! Notices dismiss themselves after their timeout or when clicked.

use colbrowser_core::{NoticeLevel, TileIcon};
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::BrowserContext;
use crate::components::icons as ic;
use crate::surface::NoticeEntry;

stylance::import_crate_style!(css, "src/components/footer.module.css");

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    let item_count = Signal::derive(move || {
        ctx.view.with(|v| {
            let count = v.tiles.iter().filter(|t| t.icon != TileIcon::Parent).count();
            plural(count, "item")
        })
    });
    let selection = Signal::derive(move || {
        ctx.view.with(|v| {
            (v.selection_count > 0).then(|| format!("{} selected", v.selection_count))
        })
    });
    let clipboard = Signal::derive(move || ctx.view.with(|v| v.clipboard_summary.clone()));

    view! {
        <footer class=css::footer>
            <div class=css::notices aria-live="polite">
                <For
                    each=move || ctx.notices.get()
                    key=|entry| entry.id
                    children=move |entry| view! { <NoticeView entry=entry /> }
                />
            </div>

            <div class=css::status>
                <span class=css::value>{item_count}</span>
                {move || selection.get().map(|s| view! {
                    <span class=css::value>{s}</span>
                })}
                {move || clipboard.get().map(|s| view! {
                    <span class=css::clipboard>{s}</span>
                })}
            </div>
        </footer>
    }
}

#[component]
fn NoticeView(entry: NoticeEntry) -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    let level_class = match entry.notice.level {
        NoticeLevel::Info => css::info,
        NoticeLevel::Success => css::success,
        NoticeLevel::Warning => css::warning,
        NoticeLevel::Error => css::error,
    };
    let id = entry.id;
    let on_click = move |_: leptos::ev::MouseEvent| {
        ctx.controller().surface().dismiss(id);
    };

    view! {
        <div
            class=format!("{} {}", css::notice, level_class)
            role=if entry.notice.level == NoticeLevel::Error { "alert" } else { "status" }
            on:click=on_click
            title="Dismiss"
        >
            <span class=css::notice_text>{entry.notice.text}</span>
            <span class=css::notice_close aria-hidden="true"><Icon icon=ic::CLOSE /></span>
        </div>
    }
}
