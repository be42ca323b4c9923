use super::*;
use crate::util::storage::{MemoryBackend, install_backend, with_store};

fn fresh(platform: Platform) -> TourState {
    install_backend(Box::new(MemoryBackend::new()));
    TourState::load(platform)
}

fn stored_blob() -> Option<serde_json::Value> {
    storage::load_json(StorageKey::TourProgress)
}

// =============================================================
// Step table
// =============================================================

#[test]
fn table_starts_and_ends_with_sentinels() {
    assert_eq!(STEP_TABLE.first().map(|(s, _)| *s), Some(TourStep::NotStarted));
    assert_eq!(STEP_TABLE.last().map(|(s, _)| *s), Some(TourStep::Completed));
    assert_eq!(STEP_TABLE.len(), 26);
}

#[test]
fn only_install_shortcut_needs_ios() {
    let ios_only: Vec<TourStep> = STEP_TABLE
        .iter()
        .filter(|(_, r)| *r == StepRequirement::IosOnly)
        .map(|(s, _)| *s)
        .collect();
    assert_eq!(ios_only, vec![TourStep::InstallShortcut]);
}

#[test]
fn next_step_follows_table_order_on_ios() {
    for pair in STEP_TABLE.windows(2) {
        assert_eq!(next_step(pair[0].0, Platform::Ios), Some(pair[1].0));
    }
    assert_eq!(next_step(TourStep::Completed, Platform::Ios), None);
}

#[test]
fn next_step_skips_install_shortcut_elsewhere() {
    assert_eq!(next_step(TourStep::ImportRecipe, Platform::Other), Some(TourStep::AiRecipesIntro));
    assert_eq!(next_step(TourStep::ImportRecipe, Platform::Ios), Some(TourStep::InstallShortcut));
    for (step, _) in STEP_TABLE {
        assert_ne!(next_step(*step, Platform::Other), Some(TourStep::InstallShortcut));
    }
}

#[test]
fn steps_serialize_snake_case() {
    assert_eq!(serde_json::to_string(&TourStep::ShoppingListIntro).unwrap(), "\"shopping_list_intro\"");
    assert_eq!(serde_json::to_string(&TourStep::AiRecipesIntro).unwrap(), "\"ai_recipes_intro\"");
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn first_load_is_not_started_and_inactive() {
    let tour = fresh(Platform::Other);
    assert_eq!(tour.current_step(), TourStep::NotStarted);
    assert!(!tour.is_active());
}

#[test]
fn start_shows_welcome_screen() {
    let mut tour = fresh(Platform::Other);
    tour.start();
    assert_eq!(tour.current_step(), TourStep::WelcomeScreen);
    assert!(tour.is_active());
    assert!(tour.progress.last_updated.is_some());
}

#[test]
fn walking_the_whole_tour_off_ios_never_visits_install_shortcut() {
    let mut tour = fresh(Platform::Other);
    tour.start();
    let mut visited = vec![tour.current_step()];
    while tour.is_active() {
        tour.advance();
        visited.push(tour.current_step());
    }
    assert!(!visited.contains(&TourStep::InstallShortcut));
    assert_eq!(visited.last(), Some(&TourStep::Completed));
    assert_eq!(visited.len(), STEP_TABLE.len() - 2);
}

#[test]
fn advance_from_last_step_completes() {
    let mut tour = fresh(Platform::Ios);
    tour.jump_to(TourStep::ReplayHint);
    tour.advance();
    assert_eq!(tour.current_step(), TourStep::Completed);
    assert!(!tour.is_active());
    assert!(tour.progress.completed_at.is_some());
    assert_eq!(tour.progress.dismissed_at, None);
}

#[test]
fn advance_when_completed_is_a_no_op() {
    let mut tour = fresh(Platform::Other);
    tour.complete();
    let before = tour.progress.clone();
    tour.advance();
    assert_eq!(tour.progress, before);
}

#[test]
fn dismiss_records_dismissal() {
    let mut tour = fresh(Platform::Other);
    tour.start();
    tour.dismiss();
    assert_eq!(tour.current_step(), TourStep::Completed);
    assert!(!tour.is_active());
    assert!(tour.progress.dismissed_at.is_some());
    assert_eq!(tour.progress.completed_at, None);
}

#[test]
fn jump_to_activates_target_step() {
    let mut tour = fresh(Platform::Other);
    tour.complete();
    tour.jump_to(TourStep::RecipesIntro);
    assert!(tour.is_step_active(TourStep::RecipesIntro));
    assert_eq!(tour.progress.completed_at, None);
}

#[test]
fn jump_to_sentinels_complete_or_reset() {
    let mut tour = fresh(Platform::Other);
    tour.start();
    tour.jump_to(TourStep::Completed);
    assert_eq!(tour.current_step(), TourStep::Completed);
    assert!(!tour.is_active());

    tour.jump_to(TourStep::NotStarted);
    assert_eq!(tour.progress, TourProgress::default());
    assert_eq!(stored_blob(), None);
}

#[test]
fn reset_then_start_matches_first_start() {
    let mut first = fresh(Platform::Other);
    first.start();

    let mut replay = fresh(Platform::Other);
    replay.start();
    replay.advance();
    replay.dismiss();
    replay.reset();
    replay.start();

    assert_eq!(replay.current_step(), first.current_step());
    assert_eq!(replay.is_active(), first.is_active());
    assert_eq!(replay.progress.completed_at, None);
    assert_eq!(replay.progress.dismissed_at, None);
}

#[test]
fn is_step_active_only_for_current_step_while_active() {
    let mut tour = fresh(Platform::Other);
    assert!(!tour.is_step_active(TourStep::NotStarted));
    tour.start();
    for (step, _) in STEP_TABLE {
        assert_eq!(tour.is_step_active(*step), *step == TourStep::WelcomeScreen);
    }
    tour.dismiss();
    for (step, _) in STEP_TABLE {
        assert!(!tour.is_step_active(*step));
    }
}

#[test]
fn is_step_active_holds_for_each_step_in_turn() {
    let mut tour = fresh(Platform::Ios);
    let real_steps: Vec<TourStep> = STEP_TABLE[1..STEP_TABLE.len() - 1].iter().map(|(s, _)| *s).collect();
    for step in &real_steps {
        tour.jump_to(*step);
        assert!(tour.is_step_active(*step), "{step:?} should be active after jumping to it");
        for (other, _) in STEP_TABLE {
            if other != step {
                assert!(!tour.is_step_active(*other), "{other:?} active while at {step:?}");
            }
        }
        tour.dismiss();
        for (any, _) in STEP_TABLE {
            assert!(!tour.is_step_active(*any), "{any:?} active after dismiss");
        }
    }
}

#[test]
fn jump_to_install_shortcut_replays_that_segment() {
    let mut tour = fresh(Platform::Ios);
    tour.start();
    tour.complete();
    tour.jump_to(TourStep::InstallShortcut);
    assert!(tour.is_active());
    assert!(tour.is_step_active(TourStep::InstallShortcut));
    assert_eq!(tour.progress.completed_at, None);
    tour.advance();
    assert_eq!(tour.current_step(), TourStep::AiRecipesIntro);
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn progress_survives_reload() {
    let mut tour = fresh(Platform::Ios);
    tour.start();
    tour.advance();
    tour.advance();

    let reloaded = TourState::load(Platform::Ios);
    assert_eq!(reloaded.progress, tour.progress);
    assert_eq!(reloaded.current_step(), TourStep::AddGroceries);
}

#[test]
fn persisted_blob_is_versioned_camel_case() {
    let mut tour = fresh(Platform::Other);
    tour.start();
    let blob = stored_blob().unwrap();
    assert_eq!(blob["version"], 2);
    assert_eq!(blob["currentStep"], "welcome_screen");
    assert_eq!(blob["isActive"], true);
    assert!(blob["lastUpdated"].is_i64());
}

#[test]
fn stale_schema_version_is_discarded() {
    install_backend(Box::new(MemoryBackend::new()));
    let old = serde_json::json!({
        "version": 1,
        "currentStep": "recipes_intro",
        "isActive": true,
    });
    storage::save_json(StorageKey::TourProgress, &old);

    let tour = TourState::load(Platform::Other);
    assert_eq!(tour.current_step(), TourStep::NotStarted);
    assert!(!tour.is_active());
    assert_eq!(stored_blob(), None);
}

#[test]
fn corrupt_blob_is_discarded() {
    install_backend(Box::new(MemoryBackend::new()));
    let bad = serde_json::json!({ "version": 2, "currentStep": "moon_landing", "isActive": true });
    storage::save_json(StorageKey::TourProgress, &bad);

    let tour = TourState::load(Platform::Other);
    assert_eq!(tour.progress, TourProgress::default());
    assert_eq!(stored_blob(), None);
}

#[test]
fn completed_blob_loads_inactive() {
    install_backend(Box::new(MemoryBackend::new()));
    let blob = serde_json::json!({ "version": 2, "currentStep": "completed", "isActive": true });
    storage::save_json(StorageKey::TourProgress, &blob);

    let tour = TourState::load(Platform::Other);
    assert_eq!(tour.current_step(), TourStep::Completed);
    assert!(!tour.is_active());
}

#[test]
fn legacy_welcome_flow_is_removed_on_load() {
    install_backend(Box::new(MemoryBackend::new()));
    with_store(|s| s.set_raw(StorageKey::WelcomeFlow, "{\"step\":3}")).unwrap();

    let _tour = TourState::load(Platform::Other);
    assert_eq!(with_store(|s| s.get_raw(StorageKey::WelcomeFlow)), None);
}

#[test]
fn rejected_writes_do_not_block_transitions() {
    install_backend(Box::new(MemoryBackend::rejecting_writes()));
    let mut tour = TourState::load(Platform::Other);
    tour.start();
    tour.advance();
    assert_eq!(tour.current_step(), TourStep::GroceriesIntro);
    assert!(tour.is_active());
}

// =============================================================
// Server reconciliation
// =============================================================

#[test]
fn server_not_started_without_local_progress_asks_to_start() {
    let mut tour = fresh(Platform::Other);
    assert!(tour.reconcile(OnboardingStatus::NotStarted));
    assert_eq!(tour.current_step(), TourStep::NotStarted);
    assert!(stored_blob().is_some());
}

#[test]
fn server_not_started_keeps_local_progress() {
    let mut tour = fresh(Platform::Other);
    tour.jump_to(TourStep::InventoryIntro);
    assert!(!tour.reconcile(OnboardingStatus::NotStarted));
    assert!(tour.is_step_active(TourStep::InventoryIntro));
}

#[test]
fn server_in_progress_keeps_local_progress() {
    let mut tour = fresh(Platform::Other);
    tour.jump_to(TourStep::ShareList);
    assert!(!tour.reconcile(OnboardingStatus::InProgress));
    assert!(tour.is_step_active(TourStep::ShareList));
}

#[test]
fn server_terminal_status_clears_local_progress() {
    for status in [OnboardingStatus::Completed, OnboardingStatus::Dismissed] {
        let mut tour = fresh(Platform::Other);
        tour.jump_to(TourStep::ShareList);
        assert!(!tour.reconcile(status));
        assert_eq!(tour.progress, TourProgress::default());
        assert_eq!(stored_blob(), None);
    }
}

#[test]
fn position_counts_only_visible_steps() {
    let mut tour = fresh(Platform::Other);
    assert_eq!(tour.position(), None);
    tour.start();
    assert_eq!(tour.position(), Some((1, 23)));

    let mut ios = fresh(Platform::Ios);
    ios.jump_to(TourStep::ReplayHint);
    assert_eq!(ios.position(), Some((24, 24)));
}
