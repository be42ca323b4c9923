//! Settings page: Google Drive backup, tour replay and sign-out.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::tour_modal::{TourModal, TourResumeBanner, TourTooltip};
use crate::net::api;
use crate::net::types::{DriveSettings, SyncAllResponse, SyncStats};
use crate::state::drive::{DriveCtx, DriveState};
use crate::state::tour::{TourState, TourStep};
use crate::state::tour_script::TourPage;
use crate::util::platform::Platform;

pub(crate) fn stats_label(stats: &SyncStats) -> String {
    match stats.pending_recipes {
        0 => format!("All {} recipes backed up.", stats.synced_recipes),
        pending => format!("{} of {} backed up, {pending} waiting.", stats.synced_recipes, stats.total_recipes),
    }
}

pub(crate) fn sync_all_label(result: &SyncAllResponse) -> String {
    match result.failed {
        0 => format!("Synced {} recipes.", result.synced),
        failed => format!("Synced {} recipes, {failed} failed.", result.synced),
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let drive = DriveCtx::from_context();
    let tour = expect_context::<RwSignal<TourState>>();
    let platform = expect_context::<RwSignal<Platform>>();
    let navigate = use_navigate();

    Effect::new(move || drive.load());

    let replay = move |_| {
        tour.update(|t| t.jump_to(TourStep::WelcomeScreen));
        navigate("/", NavigateOptions::default());
    };

    view! {
        <div class="page settings-page">
            <TourModal page=TourPage::Settings/>
            <TourResumeBanner page=TourPage::Settings/>
            <header class="page__header">
                <h1 class="page__title">"Settings"</h1>
            </header>

            <DriveSection/>

            <section class="card">
                <h2 class="card__title">"Help"</h2>
                <TourTooltip step=TourStep::ReplayHint>
                    <button class="btn" on:click=replay>
                        "Replay the tour"
                    </button>
                </TourTooltip>
                <Show when=move || platform.get().is_ios()>
                    <a class="btn" href="/shortcut-setup">
                        "Set up the Instagram shortcut"
                    </a>
                </Show>
            </section>

            <section class="card">
                <h2 class="card__title">"Account"</h2>
                <a class="btn btn--danger" href="/login" rel="external" on:click=move |_| api::clear_auth_token()>
                    "Sign out"
                </a>
            </section>
        </div>
    }
}

#[component]
fn DriveSection() -> impl IntoView {
    let drive = DriveCtx::from_context();
    let state = drive.state;
    let connected = move || state.with(DriveState::is_connected);

    let toggle_auto_sync = move |_| {
        let Some(status) = state.get_untracked().status else { return };
        drive.update_settings(DriveSettings { auto_sync: !status.auto_sync, folder_name: status.folder_name });
    };

    view! {
        <section class="card settings-page__drive">
            <h2 class="card__title">"Google Drive backup"</h2>
            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="page__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show
                when=connected
                fallback=move || {
                    view! {
                        <p>"Keep a copy of every saved recipe in your Drive."</p>
                        <button
                            class="btn btn--primary"
                            disabled=move || state.with(|s| s.loading)
                            on:click=move |_| drive.connect()
                        >
                            "Connect Google Drive"
                        </button>
                    }
                }
            >
                <p>
                    "Connected as "
                    <strong>{move || state.with(|s| s.status.as_ref().and_then(|st| st.email.clone()).unwrap_or_default())}</strong>
                </p>
                {move || {
                    state
                        .with(|s| s.status.as_ref().and_then(|st| st.folder_name.clone()))
                        .map(|folder| view! { <p class="card__hint">{format!("Folder: {folder}")}</p> })
                }}
                {move || state.with(|s| s.stats.as_ref().map(stats_label)).map(|t| view! { <p>{t}</p> })}
                <label class="toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || state.with(|s| s.status.as_ref().is_some_and(|st| st.auto_sync))
                        on:change=toggle_auto_sync
                    />
                    " Back up new recipes automatically"
                </label>
                <div class="card__actions">
                    <button
                        class="btn"
                        disabled=move || state.with(|s| s.syncing_all)
                        on:click=move |_| drive.sync_all()
                    >
                        {move || if state.with(|s| s.syncing_all) { "Syncing..." } else { "Sync all now" }}
                    </button>
                    <button class="btn btn--danger" on:click=move |_| drive.disconnect()>
                        "Disconnect"
                    </button>
                </div>
                {move || state.with(|s| s.last_sync_all.as_ref().map(sync_all_label)).map(|t| view! { <p class="toast">{t}</p> })}
            </Show>
        </section>
    }
}
