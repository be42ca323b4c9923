//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod auth_callback;
pub mod home;
pub mod inventory;
pub mod join_list;
pub mod recipes;
pub mod settings;
pub mod shopping_list;
pub mod shopping_lists;
pub mod shortcut_setup;
