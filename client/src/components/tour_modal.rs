//! Guided-tour modal, tooltip and resume banner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page mounts `TourModal` with its own `TourPage`; the modal renders
//! while the current step is a modal on that page. Anchored controls wrap
//! themselves in `TourTooltip`, which registers in `MountedAnchors` so the
//! modal can stand in for a tooltip whose anchor isn't rendered. When the
//! active step lives on another page, `TourResumeBanner` links there.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::config::ClientConfig;
use crate::state::tour::{TourState, TourStep, advance_tour, dismiss_tour};
use crate::state::tour_script::{self, MountedAnchors, Presentation, StepContent, TourPage};

/// Content for the active step, if the tour is showing one.
fn active_content(tour: &TourState) -> Option<StepContent> {
    if !tour.is_active() {
        return None;
    }
    tour_script::content(tour.current_step())
}

/// Centered onboarding card for modal steps on `page`.
#[component]
pub fn TourModal(page: TourPage) -> impl IntoView {
    let tour = expect_context::<RwSignal<TourState>>();
    let anchors = expect_context::<RwSignal<MountedAnchors>>();

    let modal = move || {
        let step = tour.with(|t| t.is_active().then(|| t.current_step()))?;
        anchors.with(|a| tour_script::modal_content(step, page, a))
    };
    let position = move || tour.with(TourState::position);

    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let config = expect_context::<ClientConfig>();
        let alive = Arc::new(AtomicBool::new(true));
        let alive_effect = Arc::clone(&alive);
        let delay_ms = u64::from(config.tour_auto_advance_ms);
        Effect::new(move || {
            let step = tour.with(TourState::current_step);
            let Some(content) = modal().filter(|c| c.auto_advance) else {
                return;
            };
            leptos::logging::log!("tour: auto-advancing {step:?} \"{}\" in {delay_ms}ms", content.title);
            let alive_task = Arc::clone(&alive_effect);
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(delay_ms)).await;
                if !alive_task.load(Ordering::Relaxed) {
                    return;
                }
                if tour.with_untracked(|t| t.is_step_active(step)) {
                    advance_tour(tour);
                }
            });
        });
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    let on_next = move |_| advance_tour(tour);
    let on_skip = move |_| dismiss_tour(tour);

    move || {
        modal().map(|c| {
            view! {
                <div class="tour-modal__backdrop">
                    <div class="tour-modal" role="dialog" aria-modal="true" aria-labelledby="tour-modal-title">
                        {move || {
                            position()
                                .map(|(n, total)| {
                                    view! { <div class="tour-modal__progress">{format!("{n} of {total}")}</div> }
                                })
                        }}
                        <h2 id="tour-modal-title" class="tour-modal__title">{c.title}</h2>
                        <p class="tour-modal__body">{c.body}</p>
                        <div class="tour-modal__actions">
                            <button class="tour-modal__skip" on:click=on_skip>"Skip tour"</button>
                            <button class="tour-modal__next" on:click=on_next>{c.action_label}</button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

/// Wrap an anchored control; shows a callout while `step` is active.
#[component]
pub fn TourTooltip(step: TourStep, children: Children) -> impl IntoView {
    let tour = expect_context::<RwSignal<TourState>>();
    let anchors = expect_context::<RwSignal<MountedAnchors>>();
    anchors.update(|a| a.mount(step));
    on_cleanup(move || {
        anchors.try_update(|a| a.unmount(step));
    });
    let content = tour_script::content(step);
    let anchor = match content.map(|c| c.presentation) {
        Some(Presentation::Tooltip { anchor }) => anchor,
        _ => "",
    };
    let active = move || tour.with(|t| t.is_step_active(step));

    view! {
        <span class="tour-anchor" class:tour-anchor--active=active data-tour-anchor=anchor>
            {children()}
            {move || {
                content
                    .filter(|_| active())
                    .map(|c| {
                        view! {
                            <span class="tour-tooltip" role="tooltip">
                                <strong class="tour-tooltip__title">{c.title}</strong>
                                <span class="tour-tooltip__body">{c.body}</span>
                                <span class="tour-tooltip__actions">
                                    <button class="tour-tooltip__skip" on:click=move |_| dismiss_tour(tour)>
                                        "Skip tour"
                                    </button>
                                    <button class="tour-tooltip__next" on:click=move |_| advance_tour(tour)>
                                        {c.action_label}
                                    </button>
                                </span>
                            </span>
                        }
                    })
            }}
        </span>
    }
}

/// Link to the page the active step belongs to, when that isn't `page`.
#[component]
pub fn TourResumeBanner(page: TourPage) -> impl IntoView {
    let tour = expect_context::<RwSignal<TourState>>();
    let elsewhere = move || {
        tour.with(active_content)
            .map(|c| c.page)
            .filter(|target| target.route() != page.route())
    };

    move || {
        elsewhere().map(|target| {
            view! {
                <a class="tour-resume" href=target.route()>
                    {format!("Continue the tour in {} \u{2192}", target.label())}
                </a>
            }
        })
    }
}
