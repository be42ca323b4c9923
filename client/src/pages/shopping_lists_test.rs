use super::*;
use crate::net::types::ShoppingListItem;

fn list_with(done: &[bool]) -> ShoppingList {
    ShoppingList {
        id: "l1".to_owned(),
        name: "Weekly".to_owned(),
        items: done
            .iter()
            .enumerate()
            .map(|(i, completed)| ShoppingListItem {
                id: format!("i{i}"),
                name: format!("Item {i}"),
                quantity: None,
                category: None,
                completed: *completed,
                notes: None,
            })
            .collect(),
        share_code: None,
        is_shared: false,
        updated_at: None,
    }
}

#[test]
fn empty_list_says_so() {
    assert_eq!(progress_label(&list_with(&[])), "Empty");
}

#[test]
fn progress_counts_completed_items() {
    assert_eq!(progress_label(&list_with(&[true, false, true])), "2 of 3 done");
    assert_eq!(progress_label(&list_with(&[false])), "0 of 1 done");
}
