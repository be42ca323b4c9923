//! One row of a shopping list.

use leptos::prelude::*;

use crate::net::types::ShoppingListItem;
use crate::state::shopping::ShoppingCtx;
use crate::util::format::format_quantity;
use crate::util::icons;

#[component]
pub fn ShoppingItemRow(list_id: String, item: ShoppingListItem) -> impl IntoView {
    let ctx = ShoppingCtx::from_context();
    let icon = icons::resolve_item_icon(&item.name, item.category.as_deref());
    let quantity = format_quantity(item.quantity.as_ref());
    let pending = item.id.starts_with("pending-");

    let toggle_ids = (list_id.clone(), item.id.clone());
    let on_toggle = move |_| ctx.toggle_item(toggle_ids.0.clone(), toggle_ids.1.clone());
    let delete_ids = (list_id, item.id.clone());
    let on_delete = move |_| ctx.delete_item(delete_ids.0.clone(), delete_ids.1.clone());

    view! {
        <li class="shopping-item" class:shopping-item--done=item.completed class:shopping-item--pending=pending>
            <label class="shopping-item__check">
                <input type="checkbox" prop:checked=item.completed on:change=on_toggle disabled=pending/>
                <span class="shopping-item__icon" aria-hidden="true">{icon}</span>
                <span class="shopping-item__name">{item.name.clone()}</span>
            </label>
            <span class="shopping-item__quantity">{quantity}</span>
            {item.notes.clone().map(|n| view! { <span class="shopping-item__notes">{n}</span> })}
            <button class="shopping-item__delete" on:click=on_delete disabled=pending title="Remove item">
                "\u{2715}"
            </button>
        </li>
    }
}
