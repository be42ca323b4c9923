//! iOS Shortcut install page for sharing Instagram posts straight to the app.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::recipes::RecipesCtx;
use crate::state::tour::{TourState, TourStep};
use crate::state::tour_script;
use crate::util::platform::Platform;

#[component]
pub fn ShortcutSetupPage() -> impl IntoView {
    let ctx = RecipesCtx::from_context();
    let state = ctx.state;
    let tour = expect_context::<RwSignal<TourState>>();
    let platform = expect_context::<RwSignal<Platform>>();
    let navigate = use_navigate();

    Effect::new(move || ctx.load_shortcut_setup());

    let on_replay = move |_| {
        tour.update(|t| t.jump_to(TourStep::InstallShortcut));
        let route = tour_script::content(TourStep::InstallShortcut).map_or("/recipes", |c| c.page.route());
        navigate(route, NavigateOptions::default());
    };

    view! {
        <div class="page shortcut-page">
            <a class="page__back" href="/recipes">
                "\u{2190} Recipes"
            </a>
            <header class="page__header">
                <h1 class="page__title">"Instagram shortcut"</h1>
            </header>
            <ol class="shortcut-page__steps">
                <li>"Tap \u{201c}Add shortcut\u{201d} below and confirm in the Shortcuts app."</li>
                <li>"In Instagram, open a post or reel and tap Share."</li>
                <li>"Pick \u{201c}Save to Trackabite\u{201d}. The recipe shows up on your Recipes page."</li>
            </ol>
            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="page__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            {move || {
                state
                    .with(|s| s.shortcut.clone())
                    .map(|setup| {
                        view! {
                            <a class="btn btn--primary" href=setup.install_url rel="external">
                                "Add shortcut"
                            </a>
                            {setup
                                .expires_at
                                .map(|at| view! { <p class="card__hint">{format!("This link works until {at}.")}</p> })}
                        }
                    })
            }}
            <Show when=move || platform.get().is_ios()>
                <button class="btn btn--link" on:click=on_replay.clone()>
                    "Show me how again"
                </button>
            </Show>
        </div>
    }
}
