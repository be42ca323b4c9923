use super::*;
use crate::net::api::set_auth_token;
use futures::executor::block_on;
use crate::util::storage::{MemoryBackend, install_backend};

const POLL: PollConfig = PollConfig { interval_ms: 3_000, timeout_ms: 60_000, max_consecutive_errors: 3 };

fn saved(id: &str) -> SavedRecipe {
    SavedRecipe {
        id: id.to_owned(),
        title: format!("Recipe {id}"),
        image_url: None,
        source_url: None,
        created_at: None,
        synced_to_drive: false,
    }
}

fn recipe(title: &str) -> Recipe {
    Recipe { title: title.to_owned(), ingredients: vec!["1 egg".to_owned()], ..Recipe::default() }
}

fn reviewing(title: &str) -> RecipesState {
    RecipesState { flow: ImportFlow::Review { recipe: recipe(title) }, ..RecipesState::default() }
}

// =============================================================
// Import method
// =============================================================

#[test]
fn apify_used_only_with_quota_left() {
    assert_eq!(choose_import_method(None), ImportMethod::Standard);
    assert_eq!(choose_import_method(Some(ApifyUsage { used: 5, limit: 5 })), ImportMethod::Standard);
    assert_eq!(choose_import_method(Some(ApifyUsage { used: 2, limit: 5 })), ImportMethod::Apify);
}

// =============================================================
// Import flow
// =============================================================

#[test]
fn invalid_link_stays_idle_with_input_error() {
    let mut state = RecipesState::default();
    assert_eq!(state.begin_import("https://example.com/pasta"), None);
    assert_eq!(state.flow, ImportFlow::Idle);
    assert!(state.input_error.is_some());
}

#[test]
fn valid_link_enters_fetching() {
    let mut state = RecipesState::default();
    let url = state.begin_import("instagram.com/reel/abc").unwrap();
    assert_eq!(url, "https://www.instagram.com/reel/abc/");
    assert_eq!(state.flow, ImportFlow::Fetching { url });
    assert_eq!(state.input_error, None);
}

#[test]
fn second_import_while_busy_is_ignored() {
    let mut state = RecipesState::default();
    state.begin_import("instagram.com/p/one").unwrap();
    assert_eq!(state.begin_import("instagram.com/p/two"), None);
}

#[test]
fn extraction_success_goes_to_review_with_source() {
    let mut state = RecipesState::default();
    state.extraction_finished(Some("https://www.instagram.com/p/x/".to_owned()), Ok(recipe("Shakshuka")));
    let ImportFlow::Review { recipe } = &state.flow else { panic!("expected review, got {:?}", state.flow) };
    assert_eq!(recipe.source_url.as_deref(), Some("https://www.instagram.com/p/x/"));
}

#[test]
fn extraction_failure_falls_back_to_manual_entry() {
    let mut state = RecipesState::default();
    let err = ApiError::Http { status: 422, message: Some("No recipe found in caption".to_owned()) };
    state.extraction_finished(Some("u".to_owned()), Err(err));
    assert_eq!(
        state.flow,
        ImportFlow::ManualEntry {
            reason: Some("No recipe found in caption".to_owned()),
            source_url: Some("u".to_owned()),
        }
    );

    state.extraction_finished(None, Err(ApiError::Network("offline".to_owned())));
    assert!(matches!(state.flow, ImportFlow::ManualEntry { reason: Some(_), .. }));
}

#[test]
fn limit_during_extraction_fails_flow() {
    let mut state = RecipesState::default();
    state.extraction_finished(None, Err(ApiError::LimitExceeded { message: None }));
    assert!(matches!(state.flow, ImportFlow::Failed { .. }));
}

#[test]
fn manual_entry_is_validated_and_inherits_source() {
    let mut state = RecipesState {
        flow: ImportFlow::ManualEntry { reason: None, source_url: Some("src".to_owned()) },
        ..RecipesState::default()
    };
    let untitled = Recipe { title: "  ".to_owned(), ..recipe("") };
    assert_eq!(state.submit_manual(untitled), Err("Give the recipe a title."));
    let no_ingredients = Recipe { ingredients: vec![" ".to_owned()], ..recipe("Soup") };
    assert_eq!(state.submit_manual(no_ingredients), Err("Add at least one ingredient."));

    state.submit_manual(recipe(" Soup ")).unwrap();
    let ImportFlow::Review { recipe } = &state.flow else { panic!("expected review") };
    assert_eq!(recipe.title, "Soup");
    assert_eq!(recipe.source_url.as_deref(), Some("src"));
}

#[test]
fn save_success_records_recipe_and_flag() {
    install_backend(Box::new(MemoryBackend::new()));
    let mut state = reviewing("Dal");
    let sent = state.begin_save().unwrap();
    assert_eq!(sent.title, "Dal");
    assert!(state.flow.is_busy());

    state.save_finished(Ok(saved("r7")));
    assert!(matches!(&state.flow, ImportFlow::Saved { saved_id, .. } if saved_id == "r7"));
    assert_eq!(state.saved[0].id, "r7");
    assert!(has_imported_recipe());
}

#[test]
fn save_failure_returns_to_review() {
    install_backend(Box::new(MemoryBackend::new()));
    let mut state = reviewing("Dal");
    state.begin_save().unwrap();
    state.save_finished(Err(ApiError::Http { status: 500, message: None }));
    assert!(matches!(state.flow, ImportFlow::Review { .. }));
    assert!(state.save_error.is_some());
    assert!(!has_imported_recipe());
}

#[test]
fn save_result_outside_saving_is_ignored() {
    let mut state = reviewing("Dal");
    state.save_finished(Ok(saved("r1")));
    assert!(matches!(state.flow, ImportFlow::Review { .. }));
    assert!(state.saved.is_empty());
}

#[test]
fn suggestion_enters_review_unless_busy() {
    let mut state = RecipesState::default();
    assert!(state.review(recipe("Stir fry")));
    assert!(matches!(&state.flow, ImportFlow::Review { recipe } if recipe.title == "Stir fry"));

    state.begin_save().unwrap();
    assert!(!state.review(recipe("Soup")));
    assert!(matches!(state.flow, ImportFlow::Saving { .. }));
}

#[test]
fn reset_returns_to_idle() {
    let mut state = reviewing("Dal");
    state.save_error = Some("x".to_owned());
    state.reset_flow();
    assert_eq!(state.flow, ImportFlow::Idle);
    assert_eq!(state.save_error, None);
}

// =============================================================
// Import detection
// =============================================================

#[test]
fn new_recipe_is_found() {
    let mut poller = ImportPoller::new(POLL, 0).with_baseline(["a".to_owned(), "b".to_owned()]);
    assert_eq!(poller.observe(3_000, Ok(vec![saved("a"), saved("b")])), None);
    assert_eq!(
        poller.observe(6_000, Ok(vec![saved("c"), saved("a"), saved("b")])),
        Some(PollOutcome::Found(saved("c")))
    );
}

#[test]
fn poll_times_out_at_deadline() {
    let mut poller = ImportPoller::new(POLL, 1_000);
    assert_eq!(poller.precheck(60_999), None);
    assert_eq!(poller.observe(60_999, Ok(vec![])), None);
    assert_eq!(poller.precheck(61_000), Some(PollOutcome::TimedOut));
    assert_eq!(poller.observe(61_000, Ok(vec![])), Some(PollOutcome::TimedOut));
}

#[test]
fn consecutive_failures_end_in_connectivity_lost() {
    let mut poller = ImportPoller::new(POLL, 0);
    let offline = || Err(ApiError::Network("offline".to_owned()));
    assert_eq!(poller.observe(1, offline()), None);
    assert_eq!(poller.observe(2, offline()), None);
    assert_eq!(poller.observe(3, offline()), Some(PollOutcome::ConnectivityLost));
}

#[test]
fn success_resets_failure_streak() {
    let mut poller = ImportPoller::new(POLL, 0);
    let offline = || Err(ApiError::Network("offline".to_owned()));
    poller.observe(1, offline());
    poller.observe(2, offline());
    poller.observe(3, Ok(vec![]));
    assert_eq!(poller.observe(4, offline()), None);
    assert_eq!(poller.observe(5, offline()), None);
}

#[test]
fn session_errors_end_polling_immediately() {
    let mut poller = ImportPoller::new(POLL, 0);
    assert_eq!(
        poller.observe(1, Err(ApiError::SessionExpired)),
        Some(PollOutcome::Failed(ApiError::SessionExpired))
    );
}

#[test]
fn cleared_alive_flag_stops_before_next_poll() {
    let poller = ImportPoller::new(POLL, 0);
    let alive = poller.alive_handle();
    assert_eq!(poller.precheck(1), None);
    alive.store(false, Ordering::Relaxed);
    assert_eq!(poller.precheck(1), Some(PollOutcome::Stopped));
}

#[test]
fn stop_clears_shared_flag() {
    let poller = ImportPoller::new(POLL, 0);
    let alive = poller.alive_handle();
    poller.stop();
    assert!(!alive.load(Ordering::Relaxed));
}

#[test]
fn run_poller_ends_when_api_is_unreachable() {
    install_backend(Box::new(MemoryBackend::new()));
    set_auth_token("tok");
    let mut poller = ImportPoller::new(POLL, clock::now_ms());
    assert_eq!(block_on(run_poller(&mut poller)), PollOutcome::Failed(ApiError::Unavailable));
}

#[test]
fn run_poller_stops_immediately_when_not_alive() {
    let mut poller = ImportPoller::new(POLL, clock::now_ms());
    poller.stop();
    assert_eq!(block_on(run_poller(&mut poller)), PollOutcome::Stopped);
}

#[test]
fn first_poll_seeds_baseline_instead_of_reporting_found() {
    let mut poller = ImportPoller::new(POLL, 0);
    assert_eq!(poller.observe(3_000, Ok(vec![saved("old-1"), saved("old-2")])), None);
    assert_eq!(poller.observe(6_000, Ok(vec![saved("old-1"), saved("old-2")])), None);
    assert_eq!(
        poller.observe(9_000, Ok(vec![saved("new"), saved("old-1"), saved("old-2")])),
        Some(PollOutcome::Found(saved("new")))
    );
}

#[test]
fn failed_first_poll_does_not_seed_baseline() {
    let mut poller = ImportPoller::new(POLL, 0);
    assert_eq!(poller.observe(1, Err(ApiError::Network("offline".to_owned()))), None);
    assert_eq!(poller.observe(2, Ok(vec![saved("old-1")])), None);
    assert_eq!(poller.observe(3, Ok(vec![saved("fresh"), saved("old-1")])), Some(PollOutcome::Found(saved("fresh"))));
}

#[test]
fn detection_found_prepends_recipe_and_sets_flag() {
    install_backend(Box::new(MemoryBackend::new()));
    let mut state = RecipesState { saved: vec![saved("a")], ..RecipesState::default() };
    state.detection_finished(PollOutcome::Found(saved("z")));
    assert_eq!(state.saved[0].id, "z");
    assert!(has_imported_recipe());
    assert!(matches!(state.detection, DetectionStatus::Finished(PollOutcome::Found(_))));
}

#[test]
fn outcome_messages_are_user_facing() {
    assert!(PollOutcome::TimedOut.message().contains("longer than expected"));
    assert!(PollOutcome::Found(saved("q")).message().contains("Recipe q"));
}
