//! Shopping list index with create and join actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists left on the device by older app versions are uploaded once on first
//! visit. Creating a list navigates straight into it.

#[cfg(test)]
#[path = "shopping_lists_test.rs"]
mod shopping_lists_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::tour_modal::{TourModal, TourResumeBanner, TourTooltip};
use crate::net::types::ShoppingList;
use crate::state::shopping::ShoppingCtx;
use crate::state::tour::{TourState, TourStep};
use crate::state::tour_script::{self, TourPage};

/// "2 of 5 done" style progress for a list card.
pub(crate) fn progress_label(list: &ShoppingList) -> String {
    match list.items.len() {
        0 => "Empty".to_owned(),
        total => format!("{} of {total} done", list.completed_count()),
    }
}

#[component]
pub fn ShoppingListsPage() -> impl IntoView {
    let ctx = ShoppingCtx::from_context();
    let state = ctx.state;
    let tour = expect_context::<RwSignal<TourState>>();
    let navigate = use_navigate();
    let new_name = RwSignal::new(String::new());

    Effect::new(move || {
        ctx.migrate_legacy_lists();
        ctx.load_lists();
    });

    let navigate_to_list = navigate.clone();
    Effect::new(move || {
        if let Some(list_id) = state.get().created_list_id.clone() {
            state.update(|s| s.created_list_id = None);
            navigate_to_list(&format!("/shopping-lists/{list_id}"), NavigateOptions::default());
        }
    });

    let submit = Callback::new(move |()| {
        let name = new_name.get_untracked();
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        ctx.create_list(name.to_owned());
        new_name.set(String::new());
    });

    // Steps for a single list can't anchor here; point into a list instead.
    let open_a_list_hint = move || {
        tour.with(|t| {
            t.is_active()
                && tour_script::content(t.current_step()).is_some_and(|c| c.page == TourPage::ShoppingList)
        })
    };

    view! {
        <div class="page shopping-lists-page">
            <TourModal page=TourPage::ShoppingLists/>
            <TourResumeBanner page=TourPage::ShoppingLists/>
            <header class="page__header">
                <h1 class="page__title">"Shopping lists"</h1>
                <a class="btn" href="/join">
                    "Join a list"
                </a>
            </header>
            <Show when=open_a_list_hint>
                <p class="tour-hint">"Open a list to continue the tour."</p>
            </Show>
            <TourTooltip step=TourStep::CreateShoppingList>
                <form
                    class="inline-form"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        submit.run(());
                    }
                >
                    <input
                        class="inline-form__input"
                        type="text"
                        placeholder="New list name"
                        prop:value=move || new_name.get()
                        on:input=move |ev| new_name.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit">
                        "Create"
                    </button>
                </form>
            </TourTooltip>
            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="page__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show
                when=move || !state.with(|s| s.loading && s.lists.is_empty())
                fallback=move || view! { <p class="page__loading">"Loading lists..."</p> }
            >
                <ul class="list-cards">
                    {move || {
                        state
                            .with(|s| {
                                s.lists
                                    .iter()
                                    .map(|list| (list.clone(), s.color(&list.id).map(str::to_owned)))
                                    .collect::<Vec<_>>()
                            })
                            .into_iter()
                            .map(|(list, color)| {
                                let style = color.map(|c| format!("background-color: {c}")).unwrap_or_default();
                                view! {
                                    <li class="list-card">
                                        <a class="list-card__link" href=format!("/shopping-lists/{}", list.id)>
                                            <span class="list-card__dot" style=style aria-hidden="true"></span>
                                            <span class="list-card__name">{list.name.clone()}</span>
                                            <span class="list-card__progress">{progress_label(&list)}</span>
                                            {list.is_shared.then(|| view! { <span class="list-card__shared">"Shared"</span> })}
                                        </a>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
