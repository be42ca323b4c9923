use super::*;

#[test]
fn split_lines_drops_blanks_and_trims() {
    assert_eq!(split_lines("  2 eggs \n\n 1 cup flour\n   \n"), vec!["2 eggs", "1 cup flour"]);
    assert!(split_lines("").is_empty());
}

#[test]
fn usage_label_reports_remaining_imports() {
    assert_eq!(usage_label(ApifyUsage { used: 3, limit: 5 }), "2 enhanced imports left this month.");
    assert_eq!(usage_label(ApifyUsage { used: 4, limit: 5 }), "1 enhanced import left this month.");
    assert!(usage_label(ApifyUsage { used: 5, limit: 5 }).contains("used up (5/5)"));
}
