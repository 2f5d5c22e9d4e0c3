//! Shared layout components.

pub mod auth_layout;
pub mod user_badge;
