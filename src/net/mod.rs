//! Networking modules for the portal API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the generic request helper, `api` holds portal endpoints, and
//! `types` defines the wire and storage schema.

pub mod api;
pub mod http;
pub mod types;
