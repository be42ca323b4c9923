//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome, onboarding overlays and list rows while
//! reading/writing shared state from Leptos context providers.

pub mod expiry_badge;
pub mod install_prompt;
pub mod item_image;
pub mod nav_bar;
pub mod session_notices;
pub mod shopping_item_row;
pub mod tour_modal;
