use super::*;

#[test]
fn numeric_quantity_stays_numeric() {
    assert_eq!(parse_quantity(" 2 "), Some(Quantity::Number(2.0)));
    assert_eq!(parse_quantity("1.5"), Some(Quantity::Number(1.5)));
}

#[test]
fn free_text_quantity_is_kept_as_typed() {
    assert_eq!(parse_quantity("2 cups"), Some(Quantity::Text("2 cups".to_owned())));
    assert_eq!(parse_quantity("inf"), Some(Quantity::Text("inf".to_owned())));
}

#[test]
fn blank_quantity_is_none() {
    assert_eq!(parse_quantity("   "), None);
}

#[test]
fn blank_name_builds_nothing() {
    assert_eq!(new_item_from_input("  ", "2"), None);
}

#[test]
fn new_item_trims_name() {
    let item = new_item_from_input("  Milk ", "").unwrap();
    assert_eq!(item.name, "Milk");
    assert_eq!(item.quantity, None);
}
