//! Inventory page: everything on hand, most urgent first.

use leptos::prelude::*;

use crate::components::expiry_badge::ExpiryBadge;
use crate::components::install_prompt::InstallPrompt;
use crate::components::item_image::ItemImage;
use crate::components::tour_modal::{TourModal, TourResumeBanner, TourTooltip};
use crate::state::inventory::{InventoryRow, InventoryState, load_inventory};
use crate::state::session::SessionState;
use crate::state::tour::TourStep;
use crate::state::tour_script::TourPage;
use crate::util::clock;
use crate::util::format::{NOT_AVAILABLE, describe_days, format_quantity};

#[component]
pub fn InventoryPage() -> impl IntoView {
    let inventory = expect_context::<RwSignal<InventoryState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let selected = RwSignal::new(None::<String>);

    Effect::new(move || {
        if !inventory.with_untracked(|s| s.loading) {
            load_inventory(inventory, session);
        }
    });

    let rows = move || inventory.with(|s| s.rows(clock::today_utc()));
    let categories = move || inventory.with(InventoryState::categories);
    let has_items = move || inventory.with(|s| !s.items.is_empty());

    let set_filter = move |category: Option<String>| inventory.update(|s| s.category_filter = category);

    view! {
        <div class="page inventory-page">
            <TourModal page=TourPage::Inventory/>
            <TourResumeBanner page=TourPage::Inventory/>
            <header class="page__header">
                <h1 class="page__title">"Inventory"</h1>
            </header>
            <TourTooltip step=TourStep::FilterInventory>
                <div class="inventory-page__filters">
                    <input
                        class="inventory-page__search"
                        type="search"
                        placeholder="Search items"
                        prop:value=move || inventory.with(|s| s.search.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            inventory.update(|s| s.search = value);
                        }
                    />
                    <div class="chip-row">
                        <button
                            class="chip"
                            class:chip--active=move || inventory.with(|s| s.category_filter.is_none())
                            on:click=move |_| set_filter(None)
                        >
                            "All"
                        </button>
                        {move || {
                            categories()
                                .into_iter()
                                .map(|category| {
                                    let active = move || {
                                        inventory.with(|s| s.category_filter.as_deref() == Some(category))
                                    };
                                    view! {
                                        <button
                                            class="chip"
                                            class:chip--active=active
                                            on:click=move |_| set_filter(Some(category.to_owned()))
                                        >
                                            {category}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </TourTooltip>
            <Show when=move || inventory.with(|s| s.error.is_some())>
                <p class="page__error">{move || inventory.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show
                when=move || inventory.with(|s| s.loaded)
                fallback=move || view! { <p class="page__loading">"Loading inventory..."</p> }
            >
                <Show
                    when=move || !rows().is_empty()
                    fallback=move || view! { <p class="page__empty">"Nothing here yet."</p> }
                >
                    <ul class="inventory-list">
                        {move || {
                            rows()
                                .into_iter()
                                .enumerate()
                                .map(|(index, row)| {
                                    let row_view = view! { <InventoryRowView row=row selected=selected/> };
                                    if index == 0 {
                                        view! { <TourTooltip step=TourStep::ItemDetails>{row_view}</TourTooltip> }
                                            .into_any()
                                    } else {
                                        row_view.into_any()
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </Show>
            <Show when=has_items>
                <InstallPrompt first_batch=true/>
            </Show>
        </div>
    }
}

#[component]
fn InventoryRowView(row: InventoryRow, selected: RwSignal<Option<String>>) -> impl IntoView {
    let InventoryRow { item, days_left, .. } = row;
    let id = item.id.clone();
    let open_id = id.clone();
    let is_open = move || selected.with(|s| s.as_deref() == Some(open_id.as_str()));
    let on_click = move |_| {
        selected.update(|s| {
            *s = if s.as_deref() == Some(id.as_str()) { None } else { Some(id.clone()) };
        });
    };

    let quantity = format_quantity(item.quantity.as_ref());
    let category = item.category.clone().unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    let expiry = match (&item.expiry_date, days_left) {
        (Some(date), Some(days)) => format!("{date} ({})", describe_days(days)),
        (Some(date), None) => date.clone(),
        (None, _) => NOT_AVAILABLE.to_owned(),
    };
    let details_quantity = quantity.clone();
    let is_open_class = is_open.clone();

    view! {
        <li class="inventory-item" class:inventory-item--open=is_open_class on:click=on_click>
            <ItemImage url=item.image_url.clone() name=item.name.clone() category=item.category.clone()/>
            <span class="inventory-item__name">{item.name.clone()}</span>
            <span class="inventory-item__quantity">{quantity}</span>
            <ExpiryBadge expiry_date=item.expiry_date.clone()/>
            <Show when=is_open>
                <dl class="inventory-item__details">
                    <dt>"Quantity"</dt>
                    <dd>{details_quantity.clone()}</dd>
                    <dt>"Category"</dt>
                    <dd>{category.clone()}</dd>
                    <dt>"Expires"</dt>
                    <dd>{expiry.clone()}</dd>
                </dl>
            </Show>
        </li>
    }
}
