//! Portal configuration baked in at build time.
//!
//! The client ships as static WASM, so there is no runtime environment to
//! read. `PORTAL_URL` and `PORTAL_API_URL` are captured by `option_env!`
//! when the crate is compiled and fall back to local development defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORTAL_URL: &str = "http://localhost:8000";
pub const DEFAULT_PORTAL_API_URL: &str = "http://localhost:8000/api";

/// Permission domains requested on every auth exchange, independent of the
/// route being entered.
pub const PERMISSION_DOMAINS: [&str; 4] = ["fund_sources", "wfps", "ppmps", "apps"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// External login portal; unauthenticated users are sent here.
    pub portal_url: String,
    /// Base URL of the portal API (no trailing slash).
    pub api_url: String,
}

impl PortalConfig {
    /// Build config from the values captured at compile time.
    ///
    /// Optional:
    /// - `PORTAL_URL`: login portal (default `http://localhost:8000`)
    /// - `PORTAL_API_URL`: API base (default `http://localhost:8000/api`)
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("PORTAL_URL"), option_env!("PORTAL_API_URL"))
    }

    pub fn from_values(portal_url: Option<&str>, api_url: Option<&str>) -> Self {
        Self {
            portal_url: normalize(portal_url, DEFAULT_PORTAL_URL),
            api_url: normalize(api_url, DEFAULT_PORTAL_API_URL).trim_end_matches('/').to_owned(),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

fn normalize(raw: Option<&str>, default: &str) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => default.to_owned(),
    }
}
