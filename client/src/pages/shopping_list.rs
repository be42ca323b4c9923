//! A single shopping list: add, check off, share and buy.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every mutation applies locally first through `ShoppingCtx`; the server's
//! reply replaces the optimistic copy. Opening a list that isn't cached yet
//! (a deep link, a fresh join) fetches it on its own.

#[cfg(test)]
#[path = "shopping_list_test.rs"]
mod shopping_list_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::shopping_item_row::ShoppingItemRow;
use crate::components::tour_modal::{TourModal, TourResumeBanner, TourTooltip};
use crate::net::types::{NewShoppingItem, Quantity};
use crate::state::shopping::ShoppingCtx;
use crate::state::tour::TourStep;
use crate::state::tour_script::TourPage;

/// Parse the quantity field: bare numbers stay numeric, anything else is
/// kept as typed.
pub(crate) fn parse_quantity(raw: &str) -> Option<Quantity> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(Quantity::Number(n)),
        _ => Some(Quantity::Text(trimmed.to_owned())),
    }
}

/// Build an item from the add form, or `None` when the name is blank.
pub(crate) fn new_item_from_input(name: &str, quantity: &str) -> Option<NewShoppingItem> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(NewShoppingItem {
        name: name.to_owned(),
        quantity: parse_quantity(quantity),
        category: None,
    })
}

#[component]
pub fn ShoppingListPage() -> impl IntoView {
    let ctx = ShoppingCtx::from_context();
    let state = ctx.state;
    let params = use_params_map();
    let navigate = use_navigate();

    let list_id = move || params.read().get("id").unwrap_or_default();
    let list = move || state.with(|s| s.list(&list_id()).cloned());

    Effect::new(move || {
        let id = list_id();
        if id.is_empty() {
            return;
        }
        if state.with_untracked(|s| s.list(&id).is_none()) {
            ctx.refetch(id);
        }
    });

    let new_name = RwSignal::new(String::new());
    let new_quantity = RwSignal::new(String::new());
    let renaming = RwSignal::new(None::<String>);
    let confirm_delete = RwSignal::new(false);

    let on_add = Callback::new(move |()| {
        let Some(item) = new_item_from_input(&new_name.get_untracked(), &new_quantity.get_untracked()) else {
            return;
        };
        ctx.add_item(list_id(), item);
        new_name.set(String::new());
        new_quantity.set(String::new());
    });

    let on_rename = Callback::new(move |()| {
        let Some(name) = renaming.get_untracked() else { return };
        let name = name.trim().to_owned();
        renaming.set(None);
        if !name.is_empty() {
            ctx.rename_list(list_id(), name);
        }
    });

    let navigate_back = navigate.clone();
    let on_delete = move |_| {
        confirm_delete.set(false);
        ctx.delete_list(list_id());
        navigate_back("/shopping-lists", NavigateOptions::default());
    };

    let completed = move || list().map_or(0, |l| l.completed_count());
    let purchase_toast = move || {
        state.with(|s| s.last_purchase_count).map(|n| match n {
            1 => "Moved 1 item to your inventory.".to_owned(),
            n => format!("Moved {n} items to your inventory."),
        })
    };

    view! {
        <div class="page shopping-list-page">
            <TourModal page=TourPage::ShoppingList/>
            <TourResumeBanner page=TourPage::ShoppingList/>
            <a class="page__back" href="/shopping-lists">
                "\u{2190} Lists"
            </a>
            <Show
                when=move || list().is_some()
                fallback=move || {
                    view! {
                        <p class="page__loading">
                            {move || {
                                if state.with(|s| s.error.is_some()) { "This list couldn't be loaded." } else { "Loading list..." }
                            }}
                        </p>
                    }
                }
            >
                <header class="page__header">
                    <Show
                        when=move || renaming.with(Option::is_some)
                        fallback=move || {
                            view! {
                                <h1
                                    class="page__title"
                                    title="Rename"
                                    on:click=move |_| renaming.set(list().map(|l| l.name))
                                >
                                    {move || list().map(|l| l.name).unwrap_or_default()}
                                </h1>
                            }
                        }
                    >
                        <input
                            class="page__title-input"
                            type="text"
                            prop:value=move || renaming.get().unwrap_or_default()
                            on:input=move |ev| renaming.set(Some(event_target_value(&ev)))
                            on:blur=move |_| on_rename.run(())
                            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    on_rename.run(());
                                }
                                if ev.key() == "Escape" {
                                    renaming.set(None);
                                }
                            }
                        />
                    </Show>
                    <TourTooltip step=TourStep::ShareList>
                        <button class="btn" on:click=move |_| ctx.share_list(list_id())>
                            "Share"
                        </button>
                    </TourTooltip>
                </header>

                {move || {
                    list()
                        .and_then(|l| l.share_code)
                        .map(|code| {
                            view! {
                                <p class="shopping-list-page__share">
                                    "Share code: " <strong class="shopping-list-page__code">{code.clone()}</strong>
                                    " \u{b7} invite link: "
                                    <a href=format!("/join/{code}")>{format!("/join/{code}")}</a>
                                </p>
                            }
                        })
                }}

                <Show when=move || state.with(|s| s.error.is_some())>
                    <p class="page__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
                </Show>

                <TourTooltip step=TourStep::AddListItem>
                    <form
                        class="inline-form"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            on_add.run(());
                        }
                    >
                        <input
                            class="inline-form__input"
                            type="text"
                            placeholder="Add an item"
                            prop:value=move || new_name.get()
                            on:input=move |ev| new_name.set(event_target_value(&ev))
                        />
                        <input
                            class="inline-form__input inline-form__input--short"
                            type="text"
                            placeholder="Qty"
                            prop:value=move || new_quantity.get()
                            on:input=move |ev| new_quantity.set(event_target_value(&ev))
                        />
                        <button class="btn btn--primary" type="submit">
                            "Add"
                        </button>
                    </form>
                </TourTooltip>

                <TourTooltip step=TourStep::CheckOffItem>
                    <ul class="shopping-items">
                        {move || {
                            let id = list_id();
                            list()
                                .map(|l| l.items)
                                .unwrap_or_default()
                                .into_iter()
                                .map(|item| view! { <ShoppingItemRow list_id=id.clone() item=item/> })
                                .collect_view()
                        }}
                    </ul>
                </TourTooltip>

                <footer class="shopping-list-page__footer">
                    <TourTooltip step=TourStep::PurchaseToInventory>
                        <button
                            class="btn btn--primary"
                            disabled=move || completed() == 0
                            on:click=move |_| ctx.purchase_to_inventory(list_id())
                        >
                            "Move checked to inventory"
                        </button>
                    </TourTooltip>
                    <button
                        class="btn"
                        disabled=move || completed() == 0
                        on:click=move |_| ctx.clear_completed(list_id())
                    >
                        "Clear checked"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| confirm_delete.set(true)>
                        "Delete list"
                    </button>
                </footer>
                {move || purchase_toast().map(|text| view! { <p class="toast">{text}</p> })}
            </Show>

            <Show when=move || confirm_delete.get()>
                <div class="dialog-backdrop" on:click=move |_| confirm_delete.set(false)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Delete list"</h2>
                        <p class="dialog__danger">"This deletes the list for everyone it's shared with."</p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| confirm_delete.set(false)>
                                "Cancel"
                            </button>
                            <button class="btn btn--danger" on:click=on_delete.clone()>
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
