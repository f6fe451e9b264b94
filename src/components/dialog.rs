//! Confirm/prompt modal.
//!
//! Shows the dialog requested through the surface and resolves it with the
//! user's answer. Enter accepts, Escape cancels.

use leptos::html;
use leptos::prelude::*;

use crate::app::BrowserContext;
use crate::surface::{DialogKind, DialogRequest};

stylance::import_crate_style!(css, "src/components/dialog.module.css");

#[component]
pub fn Dialog() -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");

    view! {
        {move || ctx.dialog.get().map(|request| view! { <DialogBox request=request /> })}
    }
}

#[component]
fn DialogBox(request: DialogRequest) -> impl IntoView {
    let ctx = use_context::<BrowserContext>().expect("BrowserContext must be provided");
    let input = NodeRef::<html::Input>::new();
    let ok_button = NodeRef::<html::Button>::new();

    let is_prompt = matches!(request.kind, DialogKind::Prompt { .. });
    let (default, masked) = match &request.kind {
        DialogKind::Prompt { default, masked } => (default.clone(), *masked),
        DialogKind::Confirm => (String::new(), false),
    };

    let accept = move || {
        let value = if is_prompt {
            input.get_untracked().map(|el| el.value()).unwrap_or_default()
        } else {
            String::new()
        };
        ctx.controller().surface().answer(Some(value));
    };
    let cancel = move || ctx.controller().surface().answer(None);

    // Focus the field (or OK button) once mounted
    Effect::new(move |_| {
        if let Some(el) = input.get() {
            let _ = el.focus();
            el.select();
        } else if let Some(button) = ok_button.get() {
            let _ = button.focus();
        }
    });

    let on_keydown = move |event: web_sys::KeyboardEvent| {
        event.stop_propagation();
        match event.key().as_str() {
            "Enter" => {
                event.prevent_default();
                accept();
            }
            "Escape" => {
                event.prevent_default();
                cancel();
            }
            _ => {}
        }
    };

    view! {
        <div class=css::backdrop on:click=move |e| e.stop_propagation()>
            <div class=css::dialog role="dialog" aria-modal="true" on:keydown=on_keydown>
                <p class=css::message>{request.message}</p>
                {is_prompt.then(|| view! {
                    <input
                        node_ref=input
                        class=css::input
                        type=if masked { "password" } else { "text" }
                        prop:value=default
                    />
                })}
                <div class=css::actions>
                    <button class=css::button on:click=move |_| cancel()>"Cancel"</button>
                    <button
                        node_ref=ok_button
                        class=format!("{} {}", css::button, css::primary)
                        on:click=move |_| accept()
                    >
                        "OK"
                    </button>
                </div>
            </div>
        </div>
    }
}
