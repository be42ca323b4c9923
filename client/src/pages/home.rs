//! Landing page: kitchen summary and the grocery entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! The first tour steps live here. The page loads the inventory once so the
//! summary can count what needs using up.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::install_prompt::InstallPrompt;
use crate::components::tour_modal::{TourModal, TourResumeBanner, TourTooltip};
use crate::state::inventory::{InventoryState, load_inventory};
use crate::state::session::SessionState;
use crate::state::tour::TourStep;
use crate::state::tour_script::TourPage;
use crate::util::clock;

/// One-line kitchen summary for the landing card.
pub(crate) fn summary_line(total: usize, urgent: usize) -> String {
    match (total, urgent) {
        (0, _) => "Your kitchen is empty. Add your first groceries to get started.".to_owned(),
        (1, 0) => "1 item on hand, nothing expiring soon.".to_owned(),
        (n, 0) => format!("{n} items on hand, nothing expiring soon."),
        (n, 1) => format!("{n} items on hand, 1 to use up soon."),
        (n, u) => format!("{n} items on hand, {u} to use up soon."),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let inventory = expect_context::<RwSignal<InventoryState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    Effect::new(move || {
        if !inventory.with_untracked(|s| s.loaded || s.loading) {
            load_inventory(inventory, session);
        }
    });

    let summary = move || {
        inventory.with(|s| {
            if s.loaded {
                summary_line(s.items.len(), s.urgent_count(clock::today_utc()))
            } else {
                "Checking your kitchen...".to_owned()
            }
        })
    };

    view! {
        <div class="page home-page">
            <TourModal page=TourPage::Home/>
            <TourResumeBanner page=TourPage::Home/>
            <header class="page__header">
                <h1 class="page__title">"Trackabite"</h1>
            </header>
            <section class="home-page__summary">
                <p>{summary}</p>
                <Show when=move || inventory.with(|s| s.error.is_some())>
                    <p class="page__error">{move || inventory.with(|s| s.error.clone().unwrap_or_default())}</p>
                </Show>
            </section>
            <section class="home-page__actions">
                <TourTooltip step=TourStep::AddGroceries>
                    <a class="btn btn--primary" href="/inventory">
                        "Add groceries"
                    </a>
                </TourTooltip>
                <TourTooltip step=TourStep::ScanReceipt>
                    <a class="btn" href="/inventory">
                        "Scan receipt"
                    </a>
                </TourTooltip>
                <a class="btn" href="/recipes">
                    "Find a recipe"
                </a>
            </section>
            <InstallPrompt/>
        </div>
    }
}
