//! Portal API endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth exchange trades the stored session token for the current user and
//! the user's permissions across every module of the app.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{HttpClient, HttpError, HttpTransport, Method};
use super::types::AuthResponse;
use crate::config::PERMISSION_DOMAINS;

/// `{api}/auth?permissions=<comma-joined domains>`.
pub fn auth_endpoint(api_url: &str, domains: &[&str]) -> String {
    format!("{}/auth?permissions={}", api_url.trim_end_matches('/'), domains.join(","))
}

/// Join an API base URL and a resource path with exactly one slash.
pub fn endpoint(api_url: &str, path: &str) -> String {
    format!("{}/{}", api_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// POST the auth exchange once. The caller is responsible for having set the
/// bearer token on `client`; the response interceptor is not run.
///
/// # Errors
///
/// Returns the transport/status error from the request, or
/// [`HttpError::Decode`] if the body is not an auth payload.
pub async fn exchange_token<T: HttpTransport>(client: &HttpClient<T>, api_url: &str) -> Result<AuthResponse, HttpError> {
    let url = auth_endpoint(api_url, &PERMISSION_DOMAINS);
    let resp = client.send_raw(Method::Post, &url, None).await?;
    resp.json::<AuthResponse>()
}
