use super::*;

#[test]
fn connected_only_with_status() {
    let mut state = DriveState::default();
    assert!(!state.is_connected());
    state.status = Some(DriveStatus { connected: true, ..DriveStatus::default() });
    assert!(state.is_connected());
}

#[test]
fn recipe_sync_is_deduplicated() {
    let mut state = DriveState::default();
    assert!(state.begin_sync("r1"));
    assert!(!state.begin_sync("r1"));
    assert!(state.is_syncing("r1"));
    state.end_sync("r1");
    assert!(!state.is_syncing("r1"));
    assert!(state.begin_sync("r1"));
}

#[test]
fn disconnect_clears_details() {
    let mut state = DriveState {
        status: Some(DriveStatus { connected: true, email: Some("a@b.c".to_owned()), ..DriveStatus::default() }),
        stats: Some(SyncStats::default()),
        last_sync_all: Some(SyncAllResponse::default()),
        ..DriveState::default()
    };
    state.disconnected();
    assert!(!state.is_connected());
    assert_eq!(state.stats, None);
    assert_eq!(state.last_sync_all, None);
}
