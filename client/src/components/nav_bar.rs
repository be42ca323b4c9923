//! Bottom navigation between the main pages.

use leptos::prelude::*;

const LINKS: &[(&str, &str, &str)] = &[
    ("/", "\u{1f3e0}", "Home"),
    ("/inventory", "\u{1f96b}", "Inventory"),
    ("/shopping-lists", "\u{1f6d2}", "Lists"),
    ("/recipes", "\u{1f373}", "Recipes"),
    ("/settings", "\u{2699}\u{fe0f}", "Settings"),
];

#[component]
pub fn NavBar() -> impl IntoView {
    view! {
        <nav class="nav-bar">
            {LINKS
                .iter()
                .map(|(href, icon, label)| {
                    view! {
                        <a href=*href class="nav-bar__link">
                            <span class="nav-bar__icon" aria-hidden="true">{*icon}</span>
                            <span class="nav-bar__label">{*label}</span>
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}
