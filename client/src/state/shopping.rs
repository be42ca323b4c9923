//! Shopping list state with sequenced optimistic updates.
//!
//! DESIGN
//! ======
//! Every optimistic mutation takes a ticket: the next value of a local
//! counter, recorded as the latest sequence for the list or item it touches.
//! A server response is applied only while its ticket is still the latest for
//! that entity, so a slow reply to an earlier toggle can never clobber a newer
//! local change. When the latest mutation for an entity fails, the caller
//! refetches the list and server state wins.

#[cfg(test)]
#[path = "shopping_test.rs"]
mod shopping_test;

use std::collections::HashMap;

use leptos::prelude::*;

use super::session::{SessionState, report};
use crate::net::shopping;
use crate::net::types::{NewShoppingItem, ShoppingItemPatch, ShoppingList, ShoppingListItem, ShoppingListPatch};
use crate::util::list_colors::{self, ListColors};
use crate::util::storage::{self, StorageKey};

/// The thing a mutation targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKey {
    List(String),
    Item { list_id: String, item_id: String },
}

impl EntityKey {
    pub fn item(list_id: &str, item_id: &str) -> Self {
        Self::Item { list_id: list_id.to_owned(), item_id: item_id.to_owned() }
    }
}

/// Handle for one in-flight optimistic mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub entity: EntityKey,
    pub seq: u64,
}

#[derive(Clone, Debug, Default)]
pub struct ShoppingListsState {
    pub lists: Vec<ShoppingList>,
    pub loading: bool,
    pub error: Option<String>,
    pub colors: ListColors,
    /// Set after a successful join so the page can navigate to it.
    pub joined_list_id: Option<String>,
    /// Set after a create so the page can navigate to it.
    pub created_list_id: Option<String>,
    /// Items moved by the last purchase-to-inventory, for a toast.
    pub last_purchase_count: Option<u32>,
    next_seq: u64,
    latest: HashMap<EntityKey, u64>,
}

impl ShoppingListsState {
    pub fn list(&self, list_id: &str) -> Option<&ShoppingList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    fn list_mut(&mut self, list_id: &str) -> Option<&mut ShoppingList> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }

    fn item_mut(&mut self, list_id: &str, item_id: &str) -> Option<&mut ShoppingListItem> {
        self.list_mut(list_id)?.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Color for `list_id`, if one has been assigned.
    pub fn color(&self, list_id: &str) -> Option<&str> {
        self.colors.get(list_id)
    }

    /// Replace all lists with a fresh server snapshot.
    pub fn set_lists(&mut self, lists: Vec<ShoppingList>) {
        self.colors = list_colors::assign_all(lists.iter().map(|l| l.id.as_str()));
        self.lists = lists;
        self.loading = false;
        self.error = None;
    }

    /// Insert or replace a single list from the server.
    pub fn upsert_list(&mut self, list: ShoppingList) {
        if self.colors.get(&list.id).is_none() {
            self.colors.assign(&list.id);
            self.colors.save();
        }
        match self.list_mut(&list.id) {
            Some(existing) => *existing = list,
            None => self.lists.push(list),
        }
    }

    /// Take the next sequence number for `entity`.
    pub fn begin(&mut self, entity: EntityKey) -> Ticket {
        self.next_seq += 1;
        self.latest.insert(entity.clone(), self.next_seq);
        Ticket { entity, seq: self.next_seq }
    }

    pub fn is_latest(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.entity) == Some(&ticket.seq)
    }

    /// Retire `ticket`. Returns `true` if it was still the latest.
    fn settle(&mut self, ticket: &Ticket) -> bool {
        if !self.is_latest(ticket) {
            return false;
        }
        self.latest.remove(&ticket.entity);
        true
    }

    /// Number of mutations still waiting on the server.
    pub fn pending_count(&self) -> usize {
        self.latest.len()
    }

    // ---------------------------------------------------------------
    // Optimistic mutations
    // ---------------------------------------------------------------

    pub fn toggle_item(&mut self, list_id: &str, item_id: &str) -> Option<Ticket> {
        let item = self.item_mut(list_id, item_id)?;
        item.completed = !item.completed;
        Some(self.begin(EntityKey::item(list_id, item_id)))
    }

    pub fn update_item(&mut self, list_id: &str, item_id: &str, patch: &ShoppingItemPatch) -> Option<Ticket> {
        let item = self.item_mut(list_id, item_id)?;
        patch.apply_to(item);
        Some(self.begin(EntityKey::item(list_id, item_id)))
    }

    pub fn remove_item(&mut self, list_id: &str, item_id: &str) -> Option<Ticket> {
        let list = self.list_mut(list_id)?;
        let before = list.items.len();
        list.items.retain(|i| i.id != item_id);
        if list.items.len() == before {
            return None;
        }
        Some(self.begin(EntityKey::item(list_id, item_id)))
    }

    /// Show `item` immediately under a placeholder id until the server
    /// assigns the real one.
    pub fn add_item(&mut self, list_id: &str, item: &NewShoppingItem) -> Option<Ticket> {
        let placeholder = format!("pending-{}", self.next_seq + 1);
        let list = self.list_mut(list_id)?;
        list.items.push(ShoppingListItem {
            id: placeholder.clone(),
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            category: item.category.clone(),
            completed: false,
            notes: None,
        });
        Some(self.begin(EntityKey::item(list_id, &placeholder)))
    }

    pub fn rename_list(&mut self, list_id: &str, name: &str) -> Option<Ticket> {
        let list = self.list_mut(list_id)?;
        name.clone_into(&mut list.name);
        Some(self.begin(EntityKey::List(list_id.to_owned())))
    }

    pub fn clear_completed(&mut self, list_id: &str) -> Option<Ticket> {
        let list = self.list_mut(list_id)?;
        list.items.retain(|i| !i.completed);
        Some(self.begin(EntityKey::List(list_id.to_owned())))
    }

    pub fn remove_list(&mut self, list_id: &str) -> Option<Ticket> {
        let before = self.lists.len();
        self.lists.retain(|l| l.id != list_id);
        if self.lists.len() == before {
            return None;
        }
        Some(self.begin(EntityKey::List(list_id.to_owned())))
    }

    // ---------------------------------------------------------------
    // Server replies
    // ---------------------------------------------------------------

    /// Apply the server's copy of an item. Stale replies are dropped.
    pub fn confirm_item(&mut self, ticket: &Ticket, item: ShoppingListItem) -> bool {
        if !self.settle(ticket) {
            return false;
        }
        let EntityKey::Item { list_id, item_id } = &ticket.entity else {
            return false;
        };
        let Some(list) = self.list_mut(list_id) else {
            return false;
        };
        match list.items.iter_mut().find(|i| i.id == *item_id || i.id == item.id) {
            Some(existing) => *existing = item,
            None => list.items.push(item),
        }
        true
    }

    /// Apply the server's copy of a list. Stale replies are dropped.
    pub fn confirm_list(&mut self, ticket: &Ticket, list: ShoppingList) -> bool {
        if !self.settle(ticket) {
            return false;
        }
        self.upsert_list(list);
        true
    }

    /// Acknowledge a reply with no body (deletes).
    pub fn confirm_removal(&mut self, ticket: &Ticket) -> bool {
        self.settle(ticket)
    }

    /// Record a failed mutation. Returns `true` when it was the latest for
    /// its entity, meaning the caller should refetch.
    pub fn reject(&mut self, ticket: &Ticket, message: Option<String>) -> bool {
        if !self.settle(ticket) {
            return false;
        }
        if message.is_some() {
            self.error = message;
        }
        true
    }
}

/// List id a ticket belongs to.
fn ticket_list_id(ticket: &Ticket) -> &str {
    match &ticket.entity {
        EntityKey::List(id) | EntityKey::Item { list_id: id, .. } => id,
    }
}

// ---------------------------------------------------------------
// Actions
// ---------------------------------------------------------------

/// Handles every shopping page needs to run an action.
#[derive(Clone, Copy)]
pub struct ShoppingCtx {
    pub state: RwSignal<ShoppingListsState>,
    pub session: RwSignal<SessionState>,
}

impl ShoppingCtx {
    pub fn from_context() -> Self {
        Self {
            state: expect_context::<RwSignal<ShoppingListsState>>(),
            session: expect_context::<RwSignal<SessionState>>(),
        }
    }

    fn fail(self, context: &str, err: &crate::net::error::ApiError) {
        let message = report(self.session, context, err);
        self.state.update(|s| {
            s.loading = false;
            if message.is_some() {
                s.error = message;
            }
        });
    }

    /// Fetch every list the user can see.
    pub fn load_lists(self) {
        self.state.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            match shopping::fetch_lists().await {
                Ok(lists) => self.state.update(|s| s.set_lists(lists)),
                Err(e) => self.fail("load shopping lists", &e),
            }
        });
    }

    /// Refetch one list, replacing local state with the server's.
    pub fn refetch(self, list_id: String) {
        leptos::task::spawn_local(async move {
            match shopping::fetch_list(&list_id).await {
                Ok(list) => self.state.update(|s| s.upsert_list(list)),
                Err(e) => self.fail("refetch shopping list", &e),
            }
        });
    }

    fn on_rejected(self, ticket: &Ticket, context: &str, err: &crate::net::error::ApiError) {
        let message = report(self.session, context, err);
        let mut refetch = false;
        self.state.update(|s| refetch = s.reject(ticket, message));
        if refetch {
            self.refetch(ticket_list_id(ticket).to_owned());
        }
    }

    pub fn create_list(self, name: String) {
        leptos::task::spawn_local(async move {
            match shopping::create_list(&name).await {
                Ok(list) => self.state.update(|s| {
                    s.created_list_id = Some(list.id.clone());
                    s.upsert_list(list);
                }),
                Err(e) => self.fail("create shopping list", &e),
            }
        });
    }

    pub fn rename_list(self, list_id: String, name: String) {
        let mut ticket = None;
        self.state.update(|s| ticket = s.rename_list(&list_id, &name));
        let Some(ticket) = ticket else { return };
        leptos::task::spawn_local(async move {
            let patch = ShoppingListPatch { name: Some(name) };
            match shopping::update_list(&list_id, &patch).await {
                Ok(list) => self.state.update(|s| {
                    s.confirm_list(&ticket, list);
                }),
                Err(e) => self.on_rejected(&ticket, "rename shopping list", &e),
            }
        });
    }

    pub fn delete_list(self, list_id: String) {
        let mut ticket = None;
        self.state.update(|s| ticket = s.remove_list(&list_id));
        let Some(ticket) = ticket else { return };
        leptos::task::spawn_local(async move {
            match shopping::delete_list(&list_id).await {
                Ok(()) => self.state.update(|s| {
                    s.confirm_removal(&ticket);
                }),
                Err(e) => {
                    // The list is gone locally; reload everything to restore it.
                    let message = report(self.session, "delete shopping list", &e);
                    let mut reload = false;
                    self.state.update(|s| reload = s.reject(&ticket, message));
                    if reload {
                        self.load_lists();
                    }
                }
            }
        });
    }

    pub fn add_item(self, list_id: String, item: NewShoppingItem) {
        let mut ticket = None;
        self.state.update(|s| ticket = s.add_item(&list_id, &item));
        let Some(ticket) = ticket else { return };
        leptos::task::spawn_local(async move {
            match shopping::add_item(&list_id, &item).await {
                Ok(saved) => self.state.update(|s| {
                    s.confirm_item(&ticket, saved);
                }),
                Err(e) => self.on_rejected(&ticket, "add shopping item", &e),
            }
        });
    }

    pub fn toggle_item(self, list_id: String, item_id: String) {
        let mut ticket = None;
        self.state.update(|s| ticket = s.toggle_item(&list_id, &item_id));
        let Some(ticket) = ticket else { return };
        leptos::task::spawn_local(async move {
            match shopping::toggle_item(&list_id, &item_id).await {
                Ok(item) => self.state.update(|s| {
                    s.confirm_item(&ticket, item);
                }),
                Err(e) => self.on_rejected(&ticket, "toggle shopping item", &e),
            }
        });
    }

    pub fn update_item(self, list_id: String, item_id: String, patch: ShoppingItemPatch) {
        let mut ticket = None;
        self.state.update(|s| ticket = s.update_item(&list_id, &item_id, &patch));
        let Some(ticket) = ticket else { return };
        leptos::task::spawn_local(async move {
            match shopping::update_item(&list_id, &item_id, &patch).await {
                Ok(item) => self.state.update(|s| {
                    s.confirm_item(&ticket, item);
                }),
                Err(e) => self.on_rejected(&ticket, "update shopping item", &e),
            }
        });
    }

    pub fn delete_item(self, list_id: String, item_id: String) {
        let mut ticket = None;
        self.state.update(|s| ticket = s.remove_item(&list_id, &item_id));
        let Some(ticket) = ticket else { return };
        leptos::task::spawn_local(async move {
            match shopping::delete_item(&list_id, &item_id).await {
                Ok(()) => self.state.update(|s| {
                    s.confirm_removal(&ticket);
                }),
                Err(e) => self.on_rejected(&ticket, "delete shopping item", &e),
            }
        });
    }

    pub fn clear_completed(self, list_id: String) {
        let mut ticket = None;
        self.state.update(|s| ticket = s.clear_completed(&list_id));
        let Some(ticket) = ticket else { return };
        leptos::task::spawn_local(async move {
            match shopping::clear_completed(&list_id).await {
                Ok(list) => self.state.update(|s| {
                    s.confirm_list(&ticket, list);
                }),
                Err(e) => self.on_rejected(&ticket, "clear completed items", &e),
            }
        });
    }

    pub fn share_list(self, list_id: String) {
        leptos::task::spawn_local(async move {
            match shopping::share_list(&list_id).await {
                Ok(share) => self.state.update(|s| {
                    if let Some(list) = s.list_mut(&list_id) {
                        list.share_code = Some(share.share_code);
                        list.is_shared = true;
                    }
                }),
                Err(e) => self.fail("share shopping list", &e),
            }
        });
    }

    /// Join by share code. `raw` may be a bare code or an invite link.
    pub fn join_list(self, raw: &str) {
        let Some(code) = shopping::normalize_share_code(raw) else {
            self.state.update(|s| s.error = Some("That share code doesn't look right.".to_owned()));
            return;
        };
        leptos::task::spawn_local(async move {
            match shopping::join_list(&code).await {
                Ok(list) => self.state.update(|s| {
                    s.joined_list_id = Some(list.id.clone());
                    s.error = None;
                    s.upsert_list(list);
                }),
                Err(e) => self.fail("join shopping list", &e),
            }
        });
    }

    pub fn purchase_to_inventory(self, list_id: String) {
        leptos::task::spawn_local(async move {
            match shopping::purchase_to_inventory(&list_id).await {
                Ok(result) => {
                    self.state.update(|s| s.last_purchase_count = Some(result.moved));
                    self.refetch(list_id);
                }
                Err(e) => self.fail("move purchases to inventory", &e),
            }
        });
    }

    /// Upload lists an older version kept on the device, once.
    pub fn migrate_legacy_lists(self) {
        let Some(legacy) = storage::load_json::<serde_json::Value>(StorageKey::LegacyShoppingLists) else {
            return;
        };
        if legacy.as_array().is_none_or(Vec::is_empty) {
            storage::clear(StorageKey::LegacyShoppingLists);
            return;
        }
        leptos::task::spawn_local(async move {
            match shopping::migrate_lists(&legacy).await {
                Ok(result) => {
                    leptos::logging::log!("migrated {} on-device shopping lists", result.migrated);
                    storage::clear(StorageKey::LegacyShoppingLists);
                    self.load_lists();
                }
                Err(e) => {
                    report(self.session, "migrate on-device shopping lists", &e);
                }
            }
        });
    }
}
