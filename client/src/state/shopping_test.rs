use super::*;
use crate::net::types::Quantity;
use crate::util::storage::{MemoryBackend, install_backend};

fn item(id: &str, name: &str, completed: bool) -> ShoppingListItem {
    ShoppingListItem {
        id: id.to_owned(),
        name: name.to_owned(),
        quantity: None,
        category: None,
        completed,
        notes: None,
    }
}

fn list(id: &str, items: Vec<ShoppingListItem>) -> ShoppingList {
    ShoppingList {
        id: id.to_owned(),
        name: format!("List {id}"),
        items,
        share_code: None,
        is_shared: false,
        updated_at: None,
    }
}

fn state_with_list() -> ShoppingListsState {
    install_backend(Box::new(MemoryBackend::new()));
    let mut state = ShoppingListsState::default();
    state.set_lists(vec![list("l1", vec![item("milk", "Milk", false), item("eggs", "Eggs", true)])]);
    state
}

fn milk(state: &ShoppingListsState) -> &ShoppingListItem {
    state.list("l1").unwrap().items.iter().find(|i| i.id == "milk").unwrap()
}

// =============================================================
// Sequencing
// =============================================================

#[test]
fn toggle_applies_locally_before_reply() {
    let mut state = state_with_list();
    let ticket = state.toggle_item("l1", "milk").unwrap();
    assert!(milk(&state).completed);
    assert!(state.is_latest(&ticket));
    assert_eq!(state.pending_count(), 1);
}

#[test]
fn stale_reply_does_not_clobber_newer_toggle() {
    let mut state = state_with_list();
    let first = state.toggle_item("l1", "milk").unwrap();
    let second = state.toggle_item("l1", "milk").unwrap();
    assert!(!milk(&state).completed);

    // Reply to the first toggle arrives late with completed=true.
    assert!(!state.confirm_item(&first, item("milk", "Milk", true)));
    assert!(!milk(&state).completed);

    assert!(state.confirm_item(&second, item("milk", "Milk", false)));
    assert!(!milk(&state).completed);
    assert_eq!(state.pending_count(), 0);
}

#[test]
fn tickets_are_per_entity() {
    let mut state = state_with_list();
    let milk_ticket = state.toggle_item("l1", "milk").unwrap();
    let eggs_ticket = state.toggle_item("l1", "eggs").unwrap();
    assert!(state.is_latest(&milk_ticket));
    assert!(state.is_latest(&eggs_ticket));
    assert!(eggs_ticket.seq > milk_ticket.seq);
}

#[test]
fn server_copy_wins_for_latest_ticket() {
    let mut state = state_with_list();
    let ticket = state.toggle_item("l1", "milk").unwrap();
    let mut server = item("milk", "Whole milk", true);
    server.quantity = Some(Quantity::Number(2.0));
    assert!(state.confirm_item(&ticket, server.clone()));
    assert_eq!(milk(&state), &server);
}

#[test]
fn failed_latest_mutation_asks_for_refetch() {
    let mut state = state_with_list();
    let ticket = state.toggle_item("l1", "milk").unwrap();
    assert!(state.reject(&ticket, Some("Something went wrong.".to_owned())));
    assert_eq!(state.error.as_deref(), Some("Something went wrong."));
    assert_eq!(state.pending_count(), 0);
}

#[test]
fn failed_superseded_mutation_is_ignored() {
    let mut state = state_with_list();
    let first = state.toggle_item("l1", "milk").unwrap();
    let _second = state.toggle_item("l1", "milk").unwrap();
    assert!(!state.reject(&first, Some("late failure".to_owned())));
    assert_eq!(state.error, None);
    assert_eq!(state.pending_count(), 1);
}

#[test]
fn unknown_targets_take_no_ticket() {
    let mut state = state_with_list();
    assert_eq!(state.toggle_item("l1", "bread"), None);
    assert_eq!(state.toggle_item("nope", "milk"), None);
    assert_eq!(state.remove_item("l1", "bread"), None);
    assert_eq!(state.remove_list("nope"), None);
    assert_eq!(state.pending_count(), 0);
}

// =============================================================
// Mutations
// =============================================================

#[test]
fn added_item_swaps_placeholder_for_server_id() {
    let mut state = state_with_list();
    let new = NewShoppingItem { name: "Bread".to_owned(), quantity: None, category: Some("Bakery".to_owned()) };
    let ticket = state.add_item("l1", &new).unwrap();
    let items = &state.list("l1").unwrap().items;
    assert!(items.iter().any(|i| i.id.starts_with("pending-") && i.name == "Bread"));

    assert!(state.confirm_item(&ticket, item("b-42", "Bread", false)));
    let items = &state.list("l1").unwrap().items;
    assert!(items.iter().any(|i| i.id == "b-42"));
    assert!(!items.iter().any(|i| i.id.starts_with("pending-")));
    assert_eq!(items.len(), 3);
}

#[test]
fn update_item_applies_patch() {
    let mut state = state_with_list();
    let patch = ShoppingItemPatch { name: Some("Oat milk".to_owned()), ..ShoppingItemPatch::default() };
    state.update_item("l1", "milk", &patch).unwrap();
    assert_eq!(milk(&state).name, "Oat milk");
}

#[test]
fn clear_completed_drops_checked_items() {
    let mut state = state_with_list();
    let ticket = state.clear_completed("l1").unwrap();
    assert_eq!(state.list("l1").unwrap().items.len(), 1);
    assert_eq!(ticket.entity, EntityKey::List("l1".to_owned()));
}

#[test]
fn rename_and_remove_list() {
    let mut state = state_with_list();
    state.rename_list("l1", "Weekly").unwrap();
    assert_eq!(state.list("l1").unwrap().name, "Weekly");
    let ticket = state.remove_list("l1").unwrap();
    assert!(state.list("l1").is_none());
    assert!(state.confirm_removal(&ticket));
}

#[test]
fn confirm_list_replaces_whole_list() {
    let mut state = state_with_list();
    let ticket = state.rename_list("l1", "Weekly").unwrap();
    let mut server = list("l1", vec![]);
    server.name = "Weekly shop".to_owned();
    assert!(state.confirm_list(&ticket, server));
    assert_eq!(state.list("l1").unwrap().name, "Weekly shop");
    assert!(state.list("l1").unwrap().items.is_empty());
}

// =============================================================
// Colors
// =============================================================

#[test]
fn every_list_gets_a_stable_color() {
    let mut state = state_with_list();
    let first = state.color("l1").map(str::to_owned);
    assert!(first.is_some());

    state.upsert_list(list("l2", vec![]));
    assert!(state.color("l2").is_some());
    assert_ne!(state.color("l2"), first.as_deref());

    assert_eq!(ListColors::load().get("l1"), first.as_deref());
}

#[test]
fn set_lists_forgets_colors_of_deleted_lists() {
    let mut state = state_with_list();
    state.set_lists(vec![list("l9", vec![])]);
    assert_eq!(state.color("l1"), None);
    assert!(state.color("l9").is_some());
}
