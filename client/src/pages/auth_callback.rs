//! Landing route for the external sign-in flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sign-in happens outside this app. It redirects to
//! `/auth/callback?token=...`; the token is stored for the API client and
//! the user is sent home, where the tour picks up from the server's record.

#[cfg(test)]
#[path = "auth_callback_test.rs"]
mod auth_callback_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api;
use crate::state::session::SessionState;
use crate::state::tour::{TourState, bootstrap_tour};

/// The token from the callback query, if present and non-blank.
pub(crate) fn callback_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let tour = expect_context::<RwSignal<TourState>>();
    let query = use_query_map();
    let navigate = use_navigate();
    let failed = RwSignal::new(false);

    Effect::new(move || {
        let Some(token) = callback_token(query.read().get("token")) else {
            leptos::logging::warn!("auth callback without a token");
            failed.set(true);
            return;
        };
        api::set_auth_token(&token);
        session.update(SessionState::clear_expired);
        bootstrap_tour(tour, session);
        navigate("/", NavigateOptions { replace: true, ..NavigateOptions::default() });
    });

    view! {
        <div class="page auth-page">
            <Show
                when=move || failed.get()
                fallback=move || view! { <p class="page__loading">"Signing you in..."</p> }
            >
                <p class="page__error">"Sign-in didn't complete."</p>
                <a class="btn" href="/login" rel="external">
                    "Try again"
                </a>
            </Show>
        </div>
    }
}
