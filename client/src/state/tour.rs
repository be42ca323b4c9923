//! Guided-tour step sequencer.
//!
//! DESIGN
//! ======
//! The onboarding script is a fixed, ordered table of steps. Each entry
//! carries the platform capability it needs, so "what comes next" is a
//! lookup over the table rather than a special case in control flow:
//! `next_step` returns the first later entry the platform can show. Only
//! `install_shortcut` is iOS-only, which makes advancing off iOS skip it.
//!
//! Progress is persisted after every transition. Storage failures are
//! logged and the in-memory transition still happens.
//!
//! INVARIANTS
//! ==========
//! - `current_step` is always one of the table entries.
//! - `current_step == Completed` implies `!is_active`.

#[cfg(test)]
#[path = "tour_test.rs"]
mod tour_test;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::session::{SessionState, report};
use crate::net::inventory::{fetch_onboarding_status, report_onboarding_status};
use crate::net::types::OnboardingStatus;
use crate::util::clock;
use crate::util::platform::Platform;
use crate::util::storage::{self, StorageKey};

/// Version stamped into the persisted blob. Blobs with any other version
/// are discarded on load.
pub const TOUR_SCHEMA_VERSION: u32 = 2;

/// Named positions in the onboarding script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourStep {
    #[default]
    NotStarted,
    WelcomeScreen,
    GroceriesIntro,
    AddGroceries,
    ScanReceipt,
    ReviewItems,
    InventoryIntro,
    ExpiryTracking,
    ItemDetails,
    FilterInventory,
    ShoppingListIntro,
    CreateShoppingList,
    AddListItem,
    CheckOffItem,
    ShareList,
    PurchaseToInventory,
    RecipesIntro,
    ImportRecipe,
    InstallShortcut,
    AiRecipesIntro,
    GenerateRecipe,
    SaveRecipe,
    CloudSyncIntro,
    SettingsIntro,
    ReplayHint,
    Completed,
}

/// Platform capability a step needs before it can be shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepRequirement {
    Any,
    IosOnly,
}

impl StepRequirement {
    pub fn allows(self, platform: Platform) -> bool {
        match self {
            Self::Any => true,
            Self::IosOnly => platform.is_ios(),
        }
    }
}

/// The script, in order.
pub const STEP_TABLE: &[(TourStep, StepRequirement)] = &[
    (TourStep::NotStarted, StepRequirement::Any),
    (TourStep::WelcomeScreen, StepRequirement::Any),
    (TourStep::GroceriesIntro, StepRequirement::Any),
    (TourStep::AddGroceries, StepRequirement::Any),
    (TourStep::ScanReceipt, StepRequirement::Any),
    (TourStep::ReviewItems, StepRequirement::Any),
    (TourStep::InventoryIntro, StepRequirement::Any),
    (TourStep::ExpiryTracking, StepRequirement::Any),
    (TourStep::ItemDetails, StepRequirement::Any),
    (TourStep::FilterInventory, StepRequirement::Any),
    (TourStep::ShoppingListIntro, StepRequirement::Any),
    (TourStep::CreateShoppingList, StepRequirement::Any),
    (TourStep::AddListItem, StepRequirement::Any),
    (TourStep::CheckOffItem, StepRequirement::Any),
    (TourStep::ShareList, StepRequirement::Any),
    (TourStep::PurchaseToInventory, StepRequirement::Any),
    (TourStep::RecipesIntro, StepRequirement::Any),
    (TourStep::ImportRecipe, StepRequirement::Any),
    (TourStep::InstallShortcut, StepRequirement::IosOnly),
    (TourStep::AiRecipesIntro, StepRequirement::Any),
    (TourStep::GenerateRecipe, StepRequirement::Any),
    (TourStep::SaveRecipe, StepRequirement::Any),
    (TourStep::CloudSyncIntro, StepRequirement::Any),
    (TourStep::SettingsIntro, StepRequirement::Any),
    (TourStep::ReplayHint, StepRequirement::Any),
    (TourStep::Completed, StepRequirement::Any),
];

impl TourStep {
    /// Position in [`STEP_TABLE`].
    pub fn index(self) -> usize {
        STEP_TABLE.iter().position(|(step, _)| *step == self).unwrap_or_default()
    }

    pub fn requirement(self) -> StepRequirement {
        STEP_TABLE[self.index()].1
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// The step that follows `step` on `platform`, or `None` at the end.
pub fn next_step(step: TourStep, platform: Platform) -> Option<TourStep> {
    STEP_TABLE[step.index() + 1..]
        .iter()
        .find(|(_, requirement)| requirement.allows(platform))
        .map(|(next, _)| *next)
}

/// Durable tour progress. Timestamps are milliseconds since the epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourProgress {
    pub current_step: TourStep,
    pub is_active: bool,
    #[serde(default)]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub dismissed_at: Option<i64>,
}

#[derive(Serialize, Deserialize)]
struct PersistedTour {
    version: u32,
    #[serde(flatten)]
    progress: TourProgress,
}

/// Decode a stored blob, rejecting other schema versions.
fn decode_persisted(raw: &serde_json::Value) -> Option<TourProgress> {
    let version = raw.get("version").and_then(serde_json::Value::as_u64);
    if version != Some(u64::from(TOUR_SCHEMA_VERSION)) {
        return None;
    }
    let persisted: PersistedTour = serde_json::from_value(raw.clone()).ok()?;
    let mut progress = persisted.progress;
    if progress.current_step.is_terminal() {
        progress.is_active = false;
    }
    Some(progress)
}

/// Tour sequencer held in a `RwSignal` context.
#[derive(Clone, Debug, Default)]
pub struct TourState {
    pub progress: TourProgress,
    pub platform: Platform,
}

impl TourState {
    pub fn new(platform: Platform) -> Self {
        Self { progress: TourProgress::default(), platform }
    }

    /// Restore progress from device storage.
    ///
    /// Incompatible or corrupt blobs are removed and progress starts over at
    /// `not_started`. The retired welcome-flow blob is always removed.
    pub fn load(platform: Platform) -> Self {
        if storage::with_store(|s| s.get_raw(StorageKey::WelcomeFlow)).is_some() {
            leptos::logging::log!("discarding legacy welcome-flow progress");
            storage::clear(StorageKey::WelcomeFlow);
        }

        let mut state = Self::new(platform);
        let Some(raw) = storage::load_json::<serde_json::Value>(StorageKey::TourProgress) else {
            return state;
        };
        match decode_persisted(&raw) {
            Some(progress) => state.progress = progress,
            None => {
                leptos::logging::warn!("discarding incompatible tour progress: {raw}");
                storage::clear(StorageKey::TourProgress);
            }
        }
        state
    }

    pub fn current_step(&self) -> TourStep {
        self.progress.current_step
    }

    pub fn is_active(&self) -> bool {
        self.progress.is_active
    }

    /// 1-based position of the current step among the steps this platform
    /// shows, and how many there are. `None` outside the script.
    pub fn position(&self) -> Option<(usize, usize)> {
        let visible: Vec<TourStep> = STEP_TABLE
            .iter()
            .filter(|(step, req)| !matches!(step, TourStep::NotStarted | TourStep::Completed) && req.allows(self.platform))
            .map(|(step, _)| *step)
            .collect();
        let index = visible.iter().position(|s| *s == self.progress.current_step)?;
        Some((index + 1, visible.len()))
    }

    /// True iff the tour is showing and positioned at `step`.
    pub fn is_step_active(&self, step: TourStep) -> bool {
        self.progress.is_active && self.progress.current_step == step
    }

    /// Begin at the first real step.
    pub fn start(&mut self) {
        self.progress = TourProgress {
            current_step: TourStep::WelcomeScreen,
            is_active: true,
            last_updated: Some(clock::now_ms()),
            completed_at: None,
            dismissed_at: None,
        };
        self.persist();
    }

    /// Move to the next step this platform can show. No-op at the end.
    pub fn advance(&mut self) {
        let Some(next) = next_step(self.progress.current_step, self.platform) else {
            return;
        };
        if next.is_terminal() {
            self.complete();
            return;
        }
        self.progress.current_step = next;
        self.progress.last_updated = Some(clock::now_ms());
        self.persist();
    }

    /// Jump straight to `step` and show the tour, e.g. to replay one segment.
    pub fn jump_to(&mut self, step: TourStep) {
        match step {
            TourStep::Completed => self.complete(),
            TourStep::NotStarted => self.reset(),
            _ => {
                self.progress = TourProgress {
                    current_step: step,
                    is_active: true,
                    last_updated: Some(clock::now_ms()),
                    completed_at: None,
                    dismissed_at: None,
                };
                self.persist();
            }
        }
    }

    /// Finish the tour normally.
    pub fn complete(&mut self) {
        let now = clock::now_ms();
        self.finish();
        self.progress.completed_at = Some(now);
        self.progress.last_updated = Some(now);
        self.persist();
    }

    /// Finish the tour because the user skipped it.
    pub fn dismiss(&mut self) {
        let now = clock::now_ms();
        self.finish();
        self.progress.dismissed_at = Some(now);
        self.progress.last_updated = Some(now);
        self.persist();
    }

    /// Forget all progress, in memory and on the device.
    pub fn reset(&mut self) {
        self.progress = TourProgress::default();
        storage::clear(StorageKey::TourProgress);
    }

    /// Align local progress with the server's view.
    ///
    /// Returns `true` when the tour should be started now: the server has
    /// never seen the user start it and there is no local progress either.
    pub fn reconcile(&mut self, server: OnboardingStatus) -> bool {
        match server {
            OnboardingStatus::NotStarted => {
                if self.progress.current_step != TourStep::NotStarted {
                    return false;
                }
                self.progress = TourProgress {
                    last_updated: Some(clock::now_ms()),
                    ..TourProgress::default()
                };
                self.persist();
                true
            }
            OnboardingStatus::InProgress => false,
            OnboardingStatus::Completed | OnboardingStatus::Dismissed => {
                self.reset();
                false
            }
        }
    }

    fn finish(&mut self) {
        self.progress.current_step = TourStep::Completed;
        self.progress.is_active = false;
    }

    fn persist(&self) {
        let blob = PersistedTour { version: TOUR_SCHEMA_VERSION, progress: self.progress.clone() };
        if !storage::save_json(StorageKey::TourProgress, &blob) {
            leptos::logging::warn!(
                "tour progress not persisted; continuing in memory at {:?}",
                self.progress.current_step
            );
        }
    }
}

// ---------------------------------------------------------------
// Actions
// ---------------------------------------------------------------

/// Tell the server the tour ended. Best effort; failures are only logged.
fn report_finished(status: OnboardingStatus) {
    leptos::task::spawn_local(async move {
        if let Err(e) = report_onboarding_status(status).await {
            leptos::logging::warn!("onboarding status not reported: {e}");
        }
    });
}

/// Advance and report completion if that was the last step.
pub fn advance_tour(tour: RwSignal<TourState>) {
    let mut finished = false;
    tour.update(|t| {
        t.advance();
        finished = t.current_step().is_terminal();
    });
    if finished {
        report_finished(OnboardingStatus::Completed);
    }
}

/// Skip the rest of the tour.
pub fn dismiss_tour(tour: RwSignal<TourState>) {
    tour.update(TourState::dismiss);
    report_finished(OnboardingStatus::Dismissed);
}

/// Reconcile with the server on the first authenticated load and start the
/// tour for brand-new users.
pub fn bootstrap_tour(tour: RwSignal<TourState>, session: RwSignal<SessionState>) {
    leptos::task::spawn_local(async move {
        let status = match fetch_onboarding_status().await {
            Ok(status) => status,
            Err(e) => {
                report(session, "load onboarding status", &e);
                return;
            }
        };
        let mut start = false;
        tour.update(|t| start = t.reconcile(status));
        if start {
            tour.update(TourState::start);
            if let Err(e) = report_onboarding_status(OnboardingStatus::InProgress).await {
                leptos::logging::warn!("onboarding status not reported: {e}");
            }
        }
    });
}
