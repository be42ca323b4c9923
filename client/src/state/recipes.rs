//! Recipe import flow, saved recipes and shortcut import detection.
//!
//! DESIGN
//! ======
//! Importing a post is a small state machine (`ImportFlow`):
//!
//! ```text
//! Idle -> Fetching -> Review -> Saving -> Saved
//!            |          ^  |
//!            v          |  v (save failed)
//!        ManualEntry ---+  Review + save_error
//! ```
//!
//! Session expiry and plan limits move any in-flight step to `Failed`;
//! they are handled app-wide and retrying locally cannot help.
//!
//! Recipes shared through the iOS Shortcut arrive on the server without the
//! app being involved. `ImportPoller` watches the saved-recipe list for an id
//! missing from a baseline snapshot, on a fixed interval with a hard timeout.
//! The loop stops on detection, on timeout, after too many consecutive failed
//! polls, or as soon as its owner clears the shared alive flag.

#[cfg(test)]
#[path = "recipes_test.rs"]
mod recipes_test;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use super::session::{SessionState, report};
use crate::config::PollConfig;
use crate::net::error::ApiError;
use crate::net::recipes;
use crate::net::types::{ApifyUsage, ExtractRequest, Recipe, SavedRecipe, ShortcutSetup};
use crate::util::clock;
use crate::util::storage::{self, StorageKey};

const INVALID_LINK: &str = "Paste a link to an Instagram post or reel.";
const EXTRACTION_FAILED: &str = "We couldn't pull a recipe out of that post. You can enter it yourself below.";

/// Which backend import to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportMethod {
    Standard,
    Apify,
}

/// Prefer the Apify scraper while the user has quota left.
pub fn choose_import_method(usage: Option<ApifyUsage>) -> ImportMethod {
    match usage {
        Some(u) if u.remaining() > 0 => ImportMethod::Apify,
        _ => ImportMethod::Standard,
    }
}

fn is_session_wide(err: &ApiError) -> bool {
    matches!(
        err,
        ApiError::SessionExpired | ApiError::MissingToken | ApiError::LimitExceeded { .. }
    )
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ImportFlow {
    #[default]
    Idle,
    Fetching {
        url: String,
    },
    Review {
        recipe: Recipe,
    },
    ManualEntry {
        reason: Option<String>,
        source_url: Option<String>,
    },
    Saving {
        recipe: Recipe,
    },
    Saved {
        recipe: Recipe,
        saved_id: String,
    },
    Failed {
        message: String,
    },
}

impl ImportFlow {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Fetching { .. } | Self::Saving { .. })
    }
}

/// Whether this device has ever imported a recipe.
pub fn has_imported_recipe() -> bool {
    storage::load_json::<bool>(StorageKey::HasImportedRecipe).unwrap_or(false)
}

fn mark_imported() {
    storage::save_json(StorageKey::HasImportedRecipe, &true);
}

// ---------------------------------------------------------------
// Import detection
// ---------------------------------------------------------------

/// Why a detection poll ended.
#[derive(Clone, Debug, PartialEq)]
pub enum PollOutcome {
    Found(SavedRecipe),
    TimedOut,
    ConnectivityLost,
    Stopped,
    Failed(ApiError),
}

impl PollOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Found(recipe) => format!("Imported \u{201c}{}\u{201d}.", recipe.title),
            Self::TimedOut => "This is taking longer than expected. Try again in a moment.".to_owned(),
            Self::ConnectivityLost => "Lost connection while waiting for your recipe.".to_owned(),
            Self::Stopped => "Stopped waiting for the import.".to_owned(),
            Self::Failed(e) => e.user_message(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DetectionStatus {
    #[default]
    Idle,
    Watching,
    Finished(PollOutcome),
}

/// Tick logic for the import detection loop.
#[derive(Debug)]
pub struct ImportPoller {
    config: PollConfig,
    /// Recipe ids that existed before the watch. Seeded by the first good
    /// poll unless given up front.
    baseline: Option<HashSet<String>>,
    started_ms: i64,
    consecutive_errors: u32,
    alive: Arc<AtomicBool>,
}

impl ImportPoller {
    pub fn new(config: PollConfig, started_ms: i64) -> Self {
        Self {
            config,
            baseline: None,
            started_ms,
            consecutive_errors: 0,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Use a known list of existing ids instead of the first poll.
    #[must_use]
    pub fn with_baseline(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.baseline = Some(ids.into_iter().collect());
        self
    }

    /// Shared flag; clearing it stops the loop before its next poll.
    pub fn alive_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.alive)
    }

    pub fn stop(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    pub fn interval_ms(&self) -> u32 {
        self.config.interval_ms
    }

    fn timed_out(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= i64::from(self.config.timeout_ms)
    }

    /// Checked before each poll.
    pub fn precheck(&self, now_ms: i64) -> Option<PollOutcome> {
        if !self.alive.load(Ordering::Relaxed) {
            return Some(PollOutcome::Stopped);
        }
        self.timed_out(now_ms).then_some(PollOutcome::TimedOut)
    }

    /// Fold one poll result. `None` means keep polling.
    pub fn observe(&mut self, now_ms: i64, result: Result<Vec<SavedRecipe>, ApiError>) -> Option<PollOutcome> {
        match result {
            Ok(recipes) => {
                self.consecutive_errors = 0;
                if self.baseline.is_none() {
                    self.baseline = Some(recipes.into_iter().map(|r| r.id).collect());
                } else if let Some(known) = &self.baseline {
                    if let Some(found) = recipes.into_iter().find(|r| !known.contains(&r.id)) {
                        return Some(PollOutcome::Found(found));
                    }
                }
            }
            Err(e) if is_session_wide(&e) || e == ApiError::Unavailable => {
                return Some(PollOutcome::Failed(e));
            }
            Err(e) => {
                self.consecutive_errors += 1;
                leptos::logging::warn!(
                    "import poll failed ({}/{}): {e}",
                    self.consecutive_errors,
                    self.config.max_consecutive_errors
                );
                if self.consecutive_errors >= self.config.max_consecutive_errors {
                    return Some(PollOutcome::ConnectivityLost);
                }
            }
        }
        self.timed_out(now_ms).then_some(PollOutcome::TimedOut)
    }
}

/// Drive `poller` until it reaches an outcome.
pub async fn run_poller(poller: &mut ImportPoller) -> PollOutcome {
    loop {
        #[cfg(feature = "hydrate")]
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(poller.interval_ms()))).await;
        if let Some(outcome) = poller.precheck(clock::now_ms()) {
            return outcome;
        }
        let result = recipes::fetch_saved_recipes().await;
        if let Some(outcome) = poller.observe(clock::now_ms(), result) {
            return outcome;
        }
    }
}

// ---------------------------------------------------------------
// State
// ---------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct RecipesState {
    pub flow: ImportFlow,
    /// Problem with the pasted link; shown under the input.
    pub input_error: Option<String>,
    /// Last save failure; shown on the review card.
    pub save_error: Option<String>,
    pub usage: Option<ApifyUsage>,
    pub saved: Vec<SavedRecipe>,
    pub ai_recipes: Vec<Recipe>,
    pub loading: bool,
    pub error: Option<String>,
    pub detection: DetectionStatus,
    pub shortcut: Option<ShortcutSetup>,
}

impl RecipesState {
    /// Validate `raw` and enter `Fetching`. Returns the canonical post URL.
    pub fn begin_import(&mut self, raw: &str) -> Option<String> {
        if self.flow.is_busy() {
            return None;
        }
        let Some(url) = recipes::normalize_instagram_url(raw) else {
            self.input_error = Some(INVALID_LINK.to_owned());
            return None;
        };
        self.input_error = None;
        self.save_error = None;
        self.flow = ImportFlow::Fetching { url: url.clone() };
        Some(url)
    }

    /// Fold the result of an extraction call.
    pub fn extraction_finished(&mut self, source_url: Option<String>, result: Result<Recipe, ApiError>) {
        self.flow = match result {
            Ok(mut recipe) => {
                if recipe.source_url.is_none() {
                    recipe.source_url = source_url;
                }
                ImportFlow::Review { recipe }
            }
            Err(e) if is_session_wide(&e) => ImportFlow::Failed { message: e.user_message() },
            Err(e) => {
                let reason = match e {
                    ApiError::Http { message: Some(message), .. } => message,
                    _ => EXTRACTION_FAILED.to_owned(),
                };
                ImportFlow::ManualEntry { reason: Some(reason), source_url }
            }
        };
    }

    /// Skip extraction and type the recipe in.
    pub fn enter_manually(&mut self) {
        if self.flow.is_busy() {
            return;
        }
        self.flow = ImportFlow::ManualEntry { reason: None, source_url: None };
    }

    /// Accept a hand-entered recipe for review.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when the title or ingredients are empty.
    pub fn submit_manual(&mut self, mut recipe: Recipe) -> Result<(), &'static str> {
        recipe.title = recipe.title.trim().to_owned();
        recipe.ingredients.retain(|i| !i.trim().is_empty());
        recipe.instructions.retain(|i| !i.trim().is_empty());
        if recipe.title.is_empty() {
            return Err("Give the recipe a title.");
        }
        if recipe.ingredients.is_empty() {
            return Err("Add at least one ingredient.");
        }
        if let ImportFlow::ManualEntry { source_url, .. } = &self.flow {
            if recipe.source_url.is_none() {
                recipe.source_url.clone_from(source_url);
            }
        }
        self.flow = ImportFlow::Review { recipe };
        Ok(())
    }

    /// Put an existing recipe, such as an AI suggestion, up for saving.
    pub fn review(&mut self, recipe: Recipe) -> bool {
        if self.flow.is_busy() {
            return false;
        }
        self.save_error = None;
        self.flow = ImportFlow::Review { recipe };
        true
    }

    /// Move `Review` to `Saving`, returning the recipe to send.
    pub fn begin_save(&mut self) -> Option<Recipe> {
        let ImportFlow::Review { recipe } = &self.flow else {
            return None;
        };
        let recipe = recipe.clone();
        self.save_error = None;
        self.flow = ImportFlow::Saving { recipe: recipe.clone() };
        Some(recipe)
    }

    /// Fold the result of a save call.
    pub fn save_finished(&mut self, result: Result<SavedRecipe, ApiError>) {
        let ImportFlow::Saving { recipe } = &self.flow else {
            return;
        };
        let recipe = recipe.clone();
        self.flow = match result {
            Ok(saved) => {
                mark_imported();
                let saved_id = saved.id.clone();
                self.saved.retain(|r| r.id != saved.id);
                self.saved.insert(0, saved);
                ImportFlow::Saved { recipe, saved_id }
            }
            Err(e) if is_session_wide(&e) => ImportFlow::Failed { message: e.user_message() },
            Err(e) => {
                self.save_error = Some(e.user_message());
                ImportFlow::Review { recipe }
            }
        };
    }

    pub fn reset_flow(&mut self) {
        self.flow = ImportFlow::Idle;
        self.input_error = None;
        self.save_error = None;
    }

    /// Fold a finished detection run.
    pub fn detection_finished(&mut self, outcome: PollOutcome) {
        if let PollOutcome::Found(recipe) = &outcome {
            mark_imported();
            self.saved.retain(|r| r.id != recipe.id);
            self.saved.insert(0, recipe.clone());
        }
        self.detection = DetectionStatus::Finished(outcome);
    }
}

// ---------------------------------------------------------------
// Actions
// ---------------------------------------------------------------

#[derive(Clone, Copy)]
pub struct RecipesCtx {
    pub state: RwSignal<RecipesState>,
    pub session: RwSignal<SessionState>,
}

impl RecipesCtx {
    pub fn from_context() -> Self {
        Self {
            state: expect_context::<RwSignal<RecipesState>>(),
            session: expect_context::<RwSignal<SessionState>>(),
        }
    }

    fn fail(self, context: &str, err: &ApiError) {
        let message = report(self.session, context, err);
        self.state.update(|s| {
            s.loading = false;
            s.error = message;
        });
    }

    /// Saved recipes, cached AI suggestions and scraper quota.
    pub fn load(self) {
        self.state.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            match recipes::fetch_saved_recipes().await {
                Ok(saved) => self.state.update(|s| s.saved = saved),
                Err(e) => return self.fail("load saved recipes", &e),
            }
            match recipes::fetch_cached_ai_recipes().await {
                Ok(ai) => self.state.update(|s| s.ai_recipes = ai),
                Err(e) => leptos::logging::warn!("cached ai recipes unavailable: {e}"),
            }
            match recipes::fetch_apify_usage().await {
                Ok(usage) => self.state.update(|s| s.usage = Some(usage)),
                Err(e) => leptos::logging::warn!("apify usage unavailable: {e}"),
            }
            self.state.update(|s| {
                s.loading = false;
                s.error = None;
            });
        });
    }

    /// Import an Instagram post from a pasted link.
    pub fn import(self, raw: String) {
        let mut url = None;
        self.state.update(|s| url = s.begin_import(&raw));
        let Some(url) = url else { return };
        let method = choose_import_method(self.state.with_untracked(|s| s.usage));
        leptos::task::spawn_local(async move {
            let result = match method {
                ImportMethod::Apify => recipes::import_instagram_apify(&url).await,
                ImportMethod::Standard => recipes::import_instagram(&url).await,
            };
            if let Err(e) = &result {
                report(self.session, "import recipe", e);
            }
            self.state.update(|s| s.extraction_finished(Some(url), result));
        });
    }

    /// Extract from a caption and images the user pasted by hand.
    pub fn extract(self, request: ExtractRequest) {
        let source_url = request.source_url.clone();
        self.state.update(|s| s.flow = ImportFlow::Fetching { url: source_url.clone().unwrap_or_default() });
        leptos::task::spawn_local(async move {
            let result = recipes::multi_modal_extract(&request).await;
            if let Err(e) = &result {
                report(self.session, "extract recipe", e);
            }
            self.state.update(|s| s.extraction_finished(source_url, result));
        });
    }

    pub fn save(self) {
        let mut recipe = None;
        self.state.update(|s| recipe = s.begin_save());
        let Some(recipe) = recipe else { return };
        leptos::task::spawn_local(async move {
            let result = recipes::save_recipe(&recipe).await;
            if let Err(e) = &result {
                report(self.session, "save recipe", e);
            }
            self.state.update(|s| s.save_finished(result));
        });
    }

    /// Save an AI suggestion through the same review/save flow as imports.
    pub fn save_suggestion(self, recipe: Recipe) {
        let mut ready = false;
        self.state.update(|s| ready = s.review(recipe));
        if ready {
            self.save();
        }
    }

    /// Start watching for a recipe shared through the shortcut.
    ///
    /// Returns the alive flag; the owning component clears it on cleanup.
    pub fn watch_for_import(self, config: PollConfig) -> Arc<AtomicBool> {
        // The page's saved list may still be loading, so the first poll
        // decides what already existed.
        let mut poller = ImportPoller::new(config, clock::now_ms());
        let alive = poller.alive_handle();
        let alive_task = Arc::clone(&alive);
        self.state.update(|s| s.detection = DetectionStatus::Watching);
        leptos::task::spawn_local(async move {
            let outcome = run_poller(&mut poller).await;
            if outcome == PollOutcome::Stopped || !alive_task.load(Ordering::Relaxed) {
                return;
            }
            leptos::logging::log!("import detection finished: {outcome:?}");
            if let PollOutcome::Failed(e) = &outcome {
                report(self.session, "import detection", e);
            }
            self.state.update(|s| s.detection_finished(outcome));
        });
        alive
    }

    pub fn load_shortcut_setup(self) {
        leptos::task::spawn_local(async move {
            match recipes::fetch_shortcut_setup().await {
                Ok(setup) => self.state.update(|s| s.shortcut = Some(setup)),
                Err(e) => self.fail("load shortcut setup", &e),
            }
        });
    }
}
