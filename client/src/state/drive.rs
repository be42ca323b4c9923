//! Google Drive backup state for the settings page.

#[cfg(test)]
#[path = "drive_test.rs"]
mod drive_test;

use std::collections::HashSet;

use leptos::prelude::*;

use super::session::{SessionState, report};
use crate::net::drive;
use crate::net::error::ApiError;
use crate::net::types::{DriveSettings, DriveStatus, SyncAllResponse, SyncStats};

#[derive(Clone, Debug, Default)]
pub struct DriveState {
    pub status: Option<DriveStatus>,
    pub stats: Option<SyncStats>,
    pub loading: bool,
    /// Recipes with a sync request in flight.
    pub syncing: HashSet<String>,
    pub syncing_all: bool,
    pub last_sync_all: Option<SyncAllResponse>,
    pub error: Option<String>,
}

impl DriveState {
    pub fn is_connected(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.connected)
    }

    /// Mark `recipe_id` as syncing. Returns `false` if it already was.
    pub fn begin_sync(&mut self, recipe_id: &str) -> bool {
        self.syncing.insert(recipe_id.to_owned())
    }

    pub fn end_sync(&mut self, recipe_id: &str) {
        self.syncing.remove(recipe_id);
    }

    pub fn is_syncing(&self, recipe_id: &str) -> bool {
        self.syncing.contains(recipe_id)
    }

    /// Forget connection details after a disconnect.
    pub fn disconnected(&mut self) {
        self.status = Some(DriveStatus::default());
        self.stats = None;
        self.last_sync_all = None;
    }
}

#[derive(Clone, Copy)]
pub struct DriveCtx {
    pub state: RwSignal<DriveState>,
    pub session: RwSignal<SessionState>,
}

impl DriveCtx {
    pub fn from_context() -> Self {
        Self {
            state: expect_context::<RwSignal<DriveState>>(),
            session: expect_context::<RwSignal<SessionState>>(),
        }
    }

    fn fail(self, context: &str, err: &ApiError) {
        let message = report(self.session, context, err);
        self.state.update(|s| {
            s.loading = false;
            s.syncing_all = false;
            s.error = message;
        });
    }

    /// Load connection status, then sync stats when connected.
    pub fn load(self) {
        self.state.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            let status = match drive::fetch_status().await {
                Ok(status) => status,
                Err(e) => return self.fail("load drive status", &e),
            };
            let connected = status.connected;
            self.state.update(|s| {
                s.status = Some(status);
                s.error = None;
            });
            if connected {
                match drive::fetch_sync_stats().await {
                    Ok(stats) => self.state.update(|s| s.stats = Some(stats)),
                    Err(e) => return self.fail("load drive sync stats", &e),
                }
            }
            self.state.update(|s| s.loading = false);
        });
    }

    /// Send the browser to Google's consent screen.
    pub fn connect(self) {
        leptos::task::spawn_local(async move {
            match drive::fetch_auth_url().await {
                Ok(url) => navigate_external(&url),
                Err(e) => self.fail("start drive connection", &e),
            }
        });
    }

    pub fn disconnect(self) {
        leptos::task::spawn_local(async move {
            match drive::disconnect().await {
                Ok(()) => self.state.update(DriveState::disconnected),
                Err(e) => self.fail("disconnect drive", &e),
            }
        });
    }

    pub fn update_settings(self, settings: DriveSettings) {
        leptos::task::spawn_local(async move {
            match drive::update_settings(&settings).await {
                Ok(status) => self.state.update(|s| s.status = Some(status)),
                Err(e) => self.fail("update drive settings", &e),
            }
        });
    }

    pub fn sync_recipe(self, recipe_id: String) {
        let mut started = false;
        self.state.update(|s| started = s.begin_sync(&recipe_id));
        if !started {
            return;
        }
        leptos::task::spawn_local(async move {
            let result = drive::sync_recipe(&recipe_id).await;
            self.state.update(|s| s.end_sync(&recipe_id));
            if let Err(e) = result {
                self.fail("sync recipe to drive", &e);
            }
        });
    }

    pub fn sync_all(self) {
        if self.state.with_untracked(|s| s.syncing_all) {
            return;
        }
        self.state.update(|s| s.syncing_all = true);
        leptos::task::spawn_local(async move {
            match drive::sync_all().await {
                Ok(result) => {
                    self.state.update(|s| {
                        s.syncing_all = false;
                        s.last_sync_all = Some(result);
                    });
                    self.load();
                }
                Err(e) => self.fail("sync all recipes to drive", &e),
            }
        });
    }
}

fn navigate_external(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else { return };
        if let Err(e) = window.location().set_href(url) {
            leptos::logging::warn!("could not open {url}: {e:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        leptos::logging::log!("external navigation skipped outside the browser: {url}");
    }
}
