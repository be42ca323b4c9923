//! Product or recipe image that falls back to an emoji icon.
//!
//! DESIGN
//! ======
//! The first `error` event for a URL records it in the session-wide fallback
//! cache and swaps this slot to the icon. Other slots showing the same URL
//! pick up the icon the next time they render.

use leptos::prelude::*;

use crate::util::image_fallback::{self, ImageSource};

#[component]
pub fn ItemImage(
    url: Option<String>,
    name: String,
    #[prop(default = None)] category: Option<String>,
    #[prop(optional)] large: bool,
) -> impl IntoView {
    let source = RwSignal::new(image_fallback::resolve(url.as_deref(), &name, category.as_deref()));
    let fallback_name = name.clone();

    let on_error = move |_| {
        if let ImageSource::Remote(failed) = source.get_untracked() {
            image_fallback::mark_failed(&failed);
            source.set(image_fallback::resolve(Some(&failed), &fallback_name, category.as_deref()));
        }
    };

    view! {
        <span class="item-image" class:item-image--large=large>
            {move || match source.get() {
                ImageSource::Remote(src) => {
                    view! { <img class="item-image__img" src=src alt=name.clone() loading="lazy" on:error=on_error.clone()/> }
                        .into_any()
                }
                ImageSource::Icon(icon) => {
                    view! { <span class="item-image__icon" role="img" aria-label=name.clone()>{icon}</span> }
                        .into_any()
                }
            }}
        </span>
    }
}
