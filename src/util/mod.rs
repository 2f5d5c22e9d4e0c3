//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (cookies, location,
//! fetch) from page and component logic to improve reuse and testability.

pub mod formatter;
pub mod guard;
pub mod navigator;
pub mod store;
