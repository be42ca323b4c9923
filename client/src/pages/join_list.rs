//! Join a shared shopping list by code or invite link.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::state::shopping::ShoppingCtx;

/// Handles both `/join` (type a code) and `/join/:code` (invite link).
#[component]
pub fn JoinListPage() -> impl IntoView {
    let ctx = ShoppingCtx::from_context();
    let state = ctx.state;
    let params = use_params_map();
    let navigate = use_navigate();

    let code = RwSignal::new(String::new());
    let submitted = RwSignal::new(false);

    Effect::new(move || {
        let Some(from_link) = params.read().get("code") else { return };
        code.set(from_link.clone());
        submitted.set(true);
        ctx.join_list(&from_link);
    });

    Effect::new(move || {
        if let Some(list_id) = state.get().joined_list_id.clone() {
            state.update(|s| s.joined_list_id = None);
            navigate(&format!("/shopping-lists/{list_id}"), NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = code.get_untracked();
        if value.trim().is_empty() {
            return;
        }
        submitted.set(true);
        ctx.join_list(&value);
    };

    view! {
        <div class="page join-page">
            <a class="page__back" href="/shopping-lists">
                "\u{2190} Lists"
            </a>
            <header class="page__header">
                <h1 class="page__title">"Join a list"</h1>
            </header>
            <form class="inline-form" on:submit=on_submit>
                <input
                    class="inline-form__input"
                    type="text"
                    placeholder="Share code or invite link"
                    autocapitalize="characters"
                    prop:value=move || code.get()
                    on:input=move |ev| code.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit">
                    "Join"
                </button>
            </form>
            <Show when=move || submitted.get() && state.with(|s| s.error.is_some())>
                <p class="page__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
        </div>
    }
}
