//! App-wide banners driven by `SessionState`.

use leptos::prelude::*;

use crate::state::session::{AuthNotice, SessionState};

/// Re-authentication banner after a 401, or a sign-in prompt without a token.
#[component]
pub fn SessionBanner() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    move || {
        session.with(SessionState::notice).map(|notice| {
            let (text, action) = match notice {
                AuthNotice::Expired => ("Your session has expired.", "Sign in again"),
                AuthNotice::SignIn => ("Sign in to keep your kitchen in sync.", "Sign in"),
            };
            view! {
                <div class="session-banner" role="alert">
                    <span>{text}</span>
                    <a class="session-banner__action" href="/login" rel="external">{action}</a>
                </div>
            }
        })
    }
}

/// Upgrade modal shown after a plan limit was hit.
#[component]
pub fn UpgradePrompt() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let on_close = move |_| session.update(SessionState::dismiss_upgrade);

    move || {
        session.with(|s| s.upgrade_prompt.clone()).map(|message| {
            view! {
                <div class="upgrade-prompt__backdrop">
                    <div class="upgrade-prompt" role="dialog" aria-modal="true">
                        <h2 class="upgrade-prompt__title">"Upgrade to keep going"</h2>
                        <p class="upgrade-prompt__body">{message}</p>
                        <div class="upgrade-prompt__actions">
                            <button class="upgrade-prompt__later" on:click=on_close>"Not now"</button>
                            <a class="upgrade-prompt__upgrade" href="/settings#plan">"See plans"</a>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
