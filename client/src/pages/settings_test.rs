use super::*;

#[test]
fn stats_label_when_everything_is_backed_up() {
    let stats = SyncStats { total_recipes: 4, synced_recipes: 4, pending_recipes: 0, last_sync_at: None };
    assert_eq!(stats_label(&stats), "All 4 recipes backed up.");
}

#[test]
fn stats_label_with_pending_recipes() {
    let stats = SyncStats { total_recipes: 5, synced_recipes: 3, pending_recipes: 2, last_sync_at: None };
    assert_eq!(stats_label(&stats), "3 of 5 backed up, 2 waiting.");
}

#[test]
fn sync_all_label_mentions_failures_only_when_present() {
    assert_eq!(sync_all_label(&SyncAllResponse { synced: 6, failed: 0 }), "Synced 6 recipes.");
    assert_eq!(sync_all_label(&SyncAllResponse { synced: 6, failed: 1 }), "Synced 6 recipes, 1 failed.");
}
