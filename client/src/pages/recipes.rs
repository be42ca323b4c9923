//! Recipes page: Instagram import, AI suggestions and saved recipes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The import card renders whatever `ImportFlow` step `RecipesState` is in.
//! On iOS the page can also wait for a recipe sent through the share-sheet
//! shortcut; that watch stops when the page unmounts.

#[cfg(test)]
#[path = "recipes_test.rs"]
mod recipes_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::components::item_image::ItemImage;
use crate::components::tour_modal::{TourModal, TourResumeBanner, TourTooltip};
use crate::config::ClientConfig;
use crate::net::types::{ApifyUsage, ExtractRequest, Recipe, SavedRecipe};
use crate::state::drive::{DriveCtx, DriveState};
use crate::state::recipes::{DetectionStatus, ImportFlow, RecipesCtx, RecipesState};
use crate::state::tour::TourStep;
use crate::state::tour_script::TourPage;
use crate::util::platform::Platform;

/// Non-blank lines of a textarea, trimmed.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_owned).collect()
}

pub(crate) fn usage_label(usage: ApifyUsage) -> String {
    match usage.remaining() {
        0 => format!("Enhanced imports used up ({}/{}). Standard import still works.", usage.used, usage.limit),
        1 => "1 enhanced import left this month.".to_owned(),
        n => format!("{n} enhanced imports left this month."),
    }
}

#[component]
pub fn RecipesPage() -> impl IntoView {
    let ctx = RecipesCtx::from_context();
    let state = ctx.state;
    let drive = DriveCtx::from_context();
    let platform = expect_context::<RwSignal<Platform>>();
    let poll = expect_context::<ClientConfig>().import_poll;

    Effect::new(move || {
        ctx.load();
        if drive.state.with_untracked(|d| d.status.is_none() && !d.loading) {
            drive.load();
        }
    });

    let link = RwSignal::new(String::new());
    let on_import = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        ctx.import(link.get_untracked());
    };

    let watcher = StoredValue::new(None::<Arc<AtomicBool>>);
    let stop_watching = move || {
        if let Some(alive) = watcher.get_value() {
            alive.store(false, Ordering::Relaxed);
        }
        watcher.set_value(None);
    };
    let on_watch = move |_| {
        stop_watching();
        watcher.set_value(Some(ctx.watch_for_import(poll)));
    };
    let on_stop = move |_| {
        stop_watching();
        state.update(|s| s.detection = DetectionStatus::Idle);
    };
    on_cleanup(stop_watching);

    view! {
        <div class="page recipes-page">
            <TourModal page=TourPage::Recipes/>
            <TourResumeBanner page=TourPage::Recipes/>
            <header class="page__header">
                <h1 class="page__title">"Recipes"</h1>
            </header>

            <section class="recipes-page__import card">
                <h2 class="card__title">"Import from Instagram"</h2>
                <TourTooltip step=TourStep::ImportRecipe>
                    <form class="inline-form" on:submit=on_import>
                        <input
                            class="inline-form__input"
                            type="url"
                            placeholder="https://www.instagram.com/reel/..."
                            prop:value=move || link.get()
                            on:input=move |ev| link.set(event_target_value(&ev))
                        />
                        <button
                            class="btn btn--primary"
                            type="submit"
                            disabled=move || state.with(|s| s.flow.is_busy())
                        >
                            "Import"
                        </button>
                    </form>
                </TourTooltip>
                {move || state.with(|s| s.input_error.clone()).map(|e| view! { <p class="field-error">{e}</p> })}
                {move || state.with(|s| s.usage).map(|u| view! { <p class="card__hint">{usage_label(u)}</p> })}
                <button class="btn btn--link" on:click=move |_| state.update(RecipesState::enter_manually)>
                    "Type a recipe in instead"
                </button>
                <ImportFlowView/>
            </section>

            <Show when=move || platform.get().is_ios()>
                <section class="recipes-page__shortcut card">
                    <h2 class="card__title">"Share from Instagram"</h2>
                    <p>
                        "Send posts to Trackabite from the share sheet. "
                        <a href="/shortcut-setup">"Set up the shortcut"</a>
                    </p>
                    {move || match state.with(|s| s.detection.clone()) {
                        DetectionStatus::Watching => {
                            view! {
                                <p class="card__hint">"Waiting for your shared recipe..."</p>
                                <button class="btn" on:click=on_stop>
                                    "Stop waiting"
                                </button>
                            }
                                .into_any()
                        }
                        DetectionStatus::Finished(outcome) => {
                            view! {
                                <p class="card__hint">{outcome.message()}</p>
                                <button class="btn" on:click=on_watch>
                                    "Wait again"
                                </button>
                            }
                                .into_any()
                        }
                        DetectionStatus::Idle => {
                            view! {
                                <button class="btn" on:click=on_watch>
                                    "I just shared a recipe"
                                </button>
                            }
                                .into_any()
                        }
                    }}
                </section>
            </Show>

            <section class="recipes-page__ai card">
                <h2 class="card__title">"Ideas from your kitchen"</h2>
                <TourTooltip step=TourStep::GenerateRecipe>
                    <button class="btn" on:click=move |_| ctx.load() disabled=move || state.with(|s| s.loading)>
                        "Suggest recipes"
                    </button>
                </TourTooltip>
                <ul class="recipe-list">
                    {move || {
                        state
                            .with(|s| s.ai_recipes.clone())
                            .into_iter()
                            .enumerate()
                            .map(|(index, recipe)| view! { <SuggestionRow recipe=recipe first={index == 0}/> })
                            .collect_view()
                    }}
                </ul>
                <Show when=move || state.with(|s| s.ai_recipes.is_empty() && !s.loading)>
                    <p class="page__empty">"No suggestions yet. Add groceries to get ideas."</p>
                </Show>
            </section>

            <section class="recipes-page__saved card">
                <h2 class="card__title">"Saved recipes"</h2>
                <Show when=move || state.with(|s| s.error.is_some())>
                    <p class="page__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
                </Show>
                <ul class="recipe-list">
                    {move || {
                        state
                            .with(|s| s.saved.clone())
                            .into_iter()
                            .map(|recipe| view! { <SavedRow recipe=recipe/> })
                            .collect_view()
                    }}
                </ul>
                <Show when=move || state.with(|s| s.saved.is_empty() && !s.loading)>
                    <p class="page__empty">"Nothing saved yet."</p>
                </Show>
            </section>
        </div>
    }
}

/// The import card body for the current flow step.
#[component]
fn ImportFlowView() -> impl IntoView {
    let ctx = RecipesCtx::from_context();
    let state = ctx.state;

    move || match state.with(|s| s.flow.clone()) {
        ImportFlow::Idle => ().into_any(),
        ImportFlow::Fetching { .. } => view! { <p class="card__status">"Reading the post..."</p> }.into_any(),
        ImportFlow::Review { recipe } => {
            view! {
                <RecipePreview recipe=recipe/>
                {move || state.with(|s| s.save_error.clone()).map(|e| view! { <p class="field-error">{e}</p> })}
                <div class="card__actions">
                    <button class="btn" on:click=move |_| state.update(RecipesState::reset_flow)>
                        "Discard"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| ctx.save()>
                        "Save recipe"
                    </button>
                </div>
            }
                .into_any()
        }
        ImportFlow::ManualEntry { reason, source_url } => {
            view! { <ManualEntryForm reason=reason source_url=source_url/> }.into_any()
        }
        ImportFlow::Saving { recipe } => {
            view! {
                <RecipePreview recipe=recipe/>
                <p class="card__status">"Saving..."</p>
            }
                .into_any()
        }
        ImportFlow::Saved { recipe, .. } => {
            view! {
                <p class="card__status card__status--ok">{format!("Saved \u{201c}{}\u{201d}.", recipe.title)}</p>
                <button class="btn" on:click=move |_| state.update(RecipesState::reset_flow)>
                    "Import another"
                </button>
            }
                .into_any()
        }
        ImportFlow::Failed { message } => {
            view! {
                <p class="page__error">{message}</p>
                <button class="btn" on:click=move |_| state.update(RecipesState::reset_flow)>
                    "Start over"
                </button>
            }
                .into_any()
        }
    }
}

#[component]
fn RecipePreview(recipe: Recipe) -> impl IntoView {
    view! {
        <article class="recipe-preview">
            <ItemImage url=recipe.image_url.clone() name=recipe.title.clone() large=true/>
            <h3 class="recipe-preview__title">{recipe.title.clone()}</h3>
            {recipe.description.clone().map(|d| view! { <p class="recipe-preview__description">{d}</p> })}
            <h4>"Ingredients"</h4>
            <ul class="recipe-preview__ingredients">
                {recipe.ingredients.iter().map(|i| view! { <li>{i.clone()}</li> }).collect_view()}
            </ul>
            {(!recipe.instructions.is_empty()).then(|| view! { <h4>"Steps"</h4> })}
            <ol class="recipe-preview__steps">
                {recipe.instructions.iter().map(|i| view! { <li>{i.clone()}</li> }).collect_view()}
            </ol>
        </article>
    }
}

/// Hand entry, or extraction from a pasted caption, after an import failed.
#[component]
fn ManualEntryForm(reason: Option<String>, source_url: Option<String>) -> impl IntoView {
    let ctx = RecipesCtx::from_context();
    let title = RwSignal::new(String::new());
    let ingredients = RwSignal::new(String::new());
    let instructions = RwSignal::new(String::new());
    let caption = RwSignal::new(String::new());
    let error = RwSignal::new(None::<&'static str>);

    let manual_source = source_url.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let recipe = Recipe {
            title: title.get_untracked(),
            ingredients: split_lines(&ingredients.get_untracked()),
            instructions: split_lines(&instructions.get_untracked()),
            source_url: manual_source.clone(),
            ..Recipe::default()
        };
        let mut result = Ok(());
        ctx.state.update(|s| result = s.submit_manual(recipe));
        error.set(result.err());
    };

    let on_extract = move |_| {
        let text = caption.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        ctx.extract(ExtractRequest { caption: Some(text), image_urls: Vec::new(), source_url: source_url.clone() });
    };

    view! {
        {reason.map(|r| view! { <p class="card__hint">{r}</p> })}
        <div class="manual-entry__extract">
            <textarea
                class="manual-entry__caption"
                placeholder="Paste the post caption"
                prop:value=move || caption.get()
                on:input=move |ev| caption.set(event_target_value(&ev))
            ></textarea>
            <button class="btn" on:click=on_extract>
                "Extract from caption"
            </button>
        </div>
        <form class="manual-entry" on:submit=on_submit>
            <input
                class="manual-entry__title"
                type="text"
                placeholder="Recipe title"
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Ingredients, one per line"
                prop:value=move || ingredients.get()
                on:input=move |ev| ingredients.set(event_target_value(&ev))
            ></textarea>
            <textarea
                placeholder="Steps, one per line"
                prop:value=move || instructions.get()
                on:input=move |ev| instructions.set(event_target_value(&ev))
            ></textarea>
            {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            <div class="card__actions">
                <button class="btn" type="button" on:click=move |_| ctx.state.update(RecipesState::reset_flow)>
                    "Cancel"
                </button>
                <button class="btn btn--primary" type="submit">
                    "Review"
                </button>
            </div>
        </form>
    }
}

#[component]
fn SuggestionRow(recipe: Recipe, first: bool) -> impl IntoView {
    let ctx = RecipesCtx::from_context();
    let title = recipe.title.clone();
    let image = recipe.image_url.clone();
    let busy = move || ctx.state.with(|s| s.flow.is_busy());
    let save = move |_| ctx.save_suggestion(recipe.clone());
    let button = view! {
        <button class="btn" on:click=save disabled=busy>
            "Save"
        </button>
    };

    view! {
        <li class="recipe-row">
            <ItemImage url=image name=title.clone()/>
            <span class="recipe-row__title">{title.clone()}</span>
            {if first {
                view! { <TourTooltip step=TourStep::SaveRecipe>{button}</TourTooltip> }.into_any()
            } else {
                button.into_any()
            }}
        </li>
    }
}

#[component]
fn SavedRow(recipe: SavedRecipe) -> impl IntoView {
    let drive = DriveCtx::from_context();
    let SavedRecipe { id, title, image_url, source_url, synced_to_drive, .. } = recipe;
    let connected = move || drive.state.with(DriveState::is_connected);
    let sync_id = id.clone();
    let syncing = move || drive.state.with(|d| d.is_syncing(&sync_id));

    view! {
        <li class="recipe-row">
            <ItemImage url=image_url name=title.clone()/>
            <span class="recipe-row__title">
                {match source_url {
                    Some(url) => view! { <a href=url target="_blank" rel="noopener">{title.clone()}</a> }.into_any(),
                    None => title.clone().into_any(),
                }}
            </span>
            <Show when=connected>
                {
                    let id = id.clone();
                    let syncing = syncing.clone();
                    let syncing_disabled = syncing.clone();
                    view! {
                        <button
                            class="btn btn--small"
                            disabled=syncing_disabled
                            on:click=move |_| drive.sync_recipe(id.clone())
                        >
                            {move || {
                                if syncing() {
                                    "Syncing..."
                                } else if synced_to_drive {
                                    "Synced"
                                } else {
                                    "Sync to Drive"
                                }
                            }}
                        </button>
                    }
                }
            </Show>
        </li>
    }
}
