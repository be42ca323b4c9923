use super::*;

#[test]
fn summary_line_for_empty_kitchen() {
    assert!(summary_line(0, 0).contains("empty"));
}

#[test]
fn summary_line_counts_items_and_urgent() {
    assert_eq!(summary_line(1, 0), "1 item on hand, nothing expiring soon.");
    assert_eq!(summary_line(5, 0), "5 items on hand, nothing expiring soon.");
    assert_eq!(summary_line(5, 1), "5 items on hand, 1 to use up soon.");
    assert_eq!(summary_line(5, 3), "5 items on hand, 3 to use up soon.");
}
