//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders every page with empty state. Anything read from
//! browser storage (platform, tour progress, auth token) is loaded in an
//! effect after hydration so the first client render matches the server's.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::session_notices::{SessionBanner, UpgradePrompt};
use crate::config::ClientConfig;
use crate::net::api;
use crate::pages::{
    auth_callback::AuthCallbackPage, home::HomePage, inventory::InventoryPage, join_list::JoinListPage,
    recipes::RecipesPage, settings::SettingsPage, shopping_list::ShoppingListPage,
    shopping_lists::ShoppingListsPage, shortcut_setup::ShortcutSetupPage,
};
use crate::state::drive::DriveState;
use crate::state::inventory::InventoryState;
use crate::state::recipes::RecipesState;
use crate::state::session::SessionState;
use crate::state::shopping::ShoppingListsState;
use crate::state::tour::{TourState, bootstrap_tour};
use crate::state::tour_script::MountedAnchors;
use crate::util::platform::{self, Platform};
use crate::util::storage::{self, StorageKey};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1, viewport-fit=cover"/>
                <meta name="apple-mobile-web-app-capable" content="yes"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let platform = RwSignal::new(Platform::default());
    let session = RwSignal::new(SessionState::default());
    let tour = RwSignal::new(TourState::new(Platform::default()));

    provide_context(ClientConfig::from_build_env());
    provide_context(platform);
    provide_context(session);
    provide_context(tour);
    provide_context(RwSignal::new(MountedAnchors::default()));
    provide_context(RwSignal::new(ShoppingListsState::default()));
    provide_context(RwSignal::new(InventoryState::default()));
    provide_context(RwSignal::new(DriveState::default()));
    provide_context(RwSignal::new(RecipesState::default()));

    Effect::new(move || {
        let detected = platform::detect();
        platform.set(detected);
        tour.set(TourState::load(detected));

        storage::with_store(|store| {
            store.subscribe(StorageKey::AuthToken, move |token| match token {
                Some(_) => session.update(SessionState::clear_expired),
                None => session.update(SessionState::signed_out),
            })
        });

        if api::auth_token().is_some() {
            bootstrap_tour(tour, session);
        } else {
            leptos::logging::log!("no auth token stored; waiting for sign-in");
            session.update(SessionState::signed_out);
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/trackabite.css"/>
        <Title text="Trackabite"/>

        <Router>
            <SessionBanner/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("inventory") view=InventoryPage/>
                    <Route path=StaticSegment("shopping-lists") view=ShoppingListsPage/>
                    <Route path=(StaticSegment("shopping-lists"), ParamSegment("id")) view=ShoppingListPage/>
                    <Route path=StaticSegment("join") view=JoinListPage/>
                    <Route path=(StaticSegment("join"), ParamSegment("code")) view=JoinListPage/>
                    <Route path=StaticSegment("recipes") view=RecipesPage/>
                    <Route path=StaticSegment("shortcut-setup") view=ShortcutSetupPage/>
                    <Route path=StaticSegment("settings") view=SettingsPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage/>
                </Routes>
            </main>
            <NavBar/>
            <UpgradePrompt/>
        </Router>
    }
}
