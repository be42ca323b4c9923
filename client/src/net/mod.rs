//! REST client for the Trackabite backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the request core (auth header, status classification), `error`
//! the failure taxonomy, `types` the DTOs, and the remaining modules are one
//! thin wrapper per feature area.

pub mod api;
pub mod drive;
pub mod error;
pub mod inventory;
pub mod recipes;
pub mod shopping;
pub mod types;
