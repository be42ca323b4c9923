//! "Add to Home Screen" banner for iOS Safari.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::util::clock;
use crate::util::platform;

/// Shown on iOS outside standalone mode, at most once per cooldown window.
/// With `first_batch` set it is shown only once per device, after the
/// user's first grocery batch.
#[component]
pub fn InstallPrompt(#[prop(optional)] first_batch: bool) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let visible = RwSignal::new(false);

    Effect::new(move || {
        let eligible = platform::should_show_install_prompt(
            platform::detect(),
            platform::is_standalone(),
            platform::install_prompt_dismissed_at(),
            clock::now_ms(),
            config.install_prompt_cooldown_days,
        );
        if eligible && (!first_batch || platform::claim_first_batch_prompt()) {
            visible.set(true);
        }
    });

    let on_dismiss = move |_| {
        platform::dismiss_install_prompt(clock::now_ms());
        visible.set(false);
    };

    view! {
        <Show when=move || visible.get()>
            <div class="install-prompt" role="dialog">
                <p class="install-prompt__text">
                    "Install Trackabite: tap the Share button, then \u{201c}Add to Home Screen\u{201d}."
                </p>
                <button class="install-prompt__dismiss" on:click=on_dismiss aria-label="Dismiss">
                    "\u{2715}"
                </button>
            </div>
        </Show>
    }
}
