//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, user agent,
//! clock) and pure lookup tables from page and component logic.

pub mod clock;
pub mod format;
pub mod icons;
pub mod image_fallback;
pub mod list_colors;
pub mod platform;
pub mod storage;
