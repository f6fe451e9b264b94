//! Breadcrumb component.
//!
//! Root button followed by one segment per path component below the root;
//! every segment but the current one navigates.

use colbrowser_core::Crumb;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::BrowserContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/breadcrumb.module.css");

#[component]
pub fn Breadcrumb() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");
    let crumbs = Signal::derive(move || ctx.view.with(|v| v.crumbs.clone()));

    view! {
        <nav class=css::breadcrumb aria-label="Collection path">
            {move || {
                crumbs
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, crumb)| {
                        view! {
                            <>
                                {(idx > 0).then(|| view! {
                                    <span class=css::separator>
                                        <Icon icon=ic::CHEVRON_RIGHT />
                                    </span>
                                })}
                                <Segment crumb=crumb />
                            </>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

#[component]
fn Segment(crumb: Crumb) -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    let class = if crumb.clickable {
        css::segment.to_string()
    } else {
        format!("{} {}", css::segment, css::segment_current)
    };
    let path = crumb.path.clone();
    let on_click = move |_: leptos::ev::MouseEvent| {
        let path = path.clone();
        ctx.run(move |c| async move { c.navigate_to(&path).await });
    };

    view! {
        <button class=class disabled=!crumb.clickable on:click=on_click title=crumb.path>
            {crumb.is_root.then(|| view! { <span class=css::icon><Icon icon=ic::HOME /></span> })}
            <span class=css::label>{crumb.label}</span>
        </button>
    }
}
