//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` tracks the session and guard progress; `gate` answers permission
//! questions from the stored permission list.

pub mod auth;
pub mod gate;
