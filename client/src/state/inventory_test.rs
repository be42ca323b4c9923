use time::macros::date;

use super::*;

const TODAY: Date = date!(2026 - 03 - 10);

fn item(name: &str, category: Option<&str>, expiry: Option<&str>) -> InventoryItem {
    InventoryItem {
        id: name.to_lowercase(),
        name: name.to_owned(),
        category: category.map(str::to_owned),
        quantity: None,
        expiry_date: expiry.map(str::to_owned),
        image_url: None,
    }
}

fn pantry() -> InventoryState {
    InventoryState {
        items: vec![
            item("Rice", Some("Grains"), None),
            item("Yogurt", Some("Dairy"), Some("2026-03-12")),
            item("Spinach", Some("Veggies"), Some("2026-03-09")),
            item("Cheddar", Some("Dairy"), Some("2026-03-20T00:00:00.000Z")),
            item("Apples", Some("Fruit"), Some("2026-03-16")),
        ],
        ..InventoryState::default()
    }
}

fn names(rows: &[InventoryRow]) -> Vec<&str> {
    rows.iter().map(|r| r.item.name.as_str()).collect()
}

#[test]
fn rows_sort_by_urgency_with_undated_last() {
    let rows = pantry().rows(TODAY);
    assert_eq!(names(&rows), vec!["Spinach", "Yogurt", "Apples", "Cheddar", "Rice"]);
}

#[test]
fn rows_carry_expiry_status() {
    let rows = pantry().rows(TODAY);
    assert_eq!(rows[0].status, Some(ExpiryStatus::Expired));
    assert_eq!(rows[1].days_left, Some(2));
    assert_eq!(rows[1].status, Some(ExpiryStatus::ExpiringSoon));
    assert_eq!(rows[2].status, Some(ExpiryStatus::Warning));
    assert_eq!(rows[3].status, Some(ExpiryStatus::Good));
    assert_eq!(rows[4].status, None);
}

#[test]
fn category_filter_resolves_aliases() {
    let mut state = pantry();
    state.category_filter = Some("Vegetables".to_owned());
    assert_eq!(names(&state.rows(TODAY)), vec!["Spinach"]);
}

#[test]
fn search_is_case_insensitive() {
    let mut state = pantry();
    state.search = "  CHED ".to_owned();
    assert_eq!(names(&state.rows(TODAY)), vec!["Cheddar"]);
}

#[test]
fn categories_are_canonical_and_distinct() {
    assert_eq!(pantry().categories(), vec!["Dairy", "Fruits", "Grains", "Vegetables"]);
}

#[test]
fn urgent_count_includes_expired_and_expiring_soon() {
    assert_eq!(pantry().urgent_count(TODAY), 2);
}
