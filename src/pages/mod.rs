//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates permission checks
//! to the gate and display formatting to `util::formatter`.

pub mod dashboard;
pub mod errors;
pub mod modules;
