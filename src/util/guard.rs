//! Route auth guard and response interceptor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation into a protected route runs [`run_guard`]: it checks for a
//! session token, exchanges it once for the user and permission list, and
//! persists both to the client store. Views then read permissions through the
//! gate. The response interceptor is installed once per [`HttpClient`] at app
//! startup and maps error statuses to login redirects or error views.
//!
//! Racing navigations are not coordinated: each runs its own exchange and the
//! last completed write to the store wins.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::rc::Rc;

use crate::config::PortalConfig;
use crate::net::api::exchange_token;
use crate::net::http::{HttpClient, HttpError, HttpTransport};
use crate::net::types::{AuthResponse, PermissionRecord, UserSnapshot};
use crate::routes::{RouteDescriptor, error_path};
use crate::util::navigator::Navigator;
use crate::util::store::{AUTH_PERMISSIONS_KEY, AUTH_TOKEN_KEY, AUTH_USER_KEY, ClientStore, save_json};

/// Per-navigation guard state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    /// Target does not require auth; the guard does nothing.
    Public,
    #[default]
    Unauthenticated,
    PendingExchange,
    Authenticated,
    RedirectedToLogin,
    RedirectedToError(u16),
    /// The exchange failed in a way no redirect covers (transport, decode,
    /// unmapped status).
    Failed,
}

impl GuardState {
    /// Whether the target view may render.
    pub fn allows_render(self) -> bool {
        matches!(self, Self::Public | Self::Authenticated)
    }

    /// State reached when a guard run fails with `error` after the
    /// interceptor has acted on it.
    pub fn after_error(error: &HttpError) -> Self {
        match intercept_action(error.status()) {
            InterceptAction::RedirectLogin => Self::RedirectedToLogin,
            InterceptAction::ShowError(status) => Self::RedirectedToError(status),
            InterceptAction::PassThrough => Self::Failed,
        }
    }
}

/// What the response interceptor does for a failed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterceptAction {
    RedirectLogin,
    ShowError(u16),
    PassThrough,
}

pub fn intercept_action(status: Option<u16>) -> InterceptAction {
    match status {
        Some(401) => InterceptAction::RedirectLogin,
        Some(status) if error_path(status).is_some() => InterceptAction::ShowError(status),
        _ => InterceptAction::PassThrough,
    }
}

/// Apply the interceptor mapping for `error`. The error itself is left for
/// the caller to propagate.
pub fn handle_response_error(error: &HttpError, navigator: &impl Navigator, login_url: &str) -> InterceptAction {
    let action = intercept_action(error.status());
    match action {
        InterceptAction::RedirectLogin => navigator.redirect_external(login_url),
        InterceptAction::ShowError(status) => {
            let body = error.body().map(ToString::to_string).unwrap_or_default();
            leptos::logging::error!("request failed with {status}: {body}");
            if let Some(path) = error_path(status) {
                navigator.push(path);
            }
        }
        InterceptAction::PassThrough => {}
    }
    action
}

/// Install the process-lifetime response interceptor on `client`.
pub fn install_response_interceptor<T, N>(client: &HttpClient<T>, navigator: Rc<N>, login_url: String)
where
    T: HttpTransport,
    N: Navigator + 'static,
{
    client.install_interceptor(move |error| {
        handle_response_error(error, &navigator, &login_url);
    });
}

/// Permission list to persist after an exchange for `route`: office ids are
/// kept only for permissions the route requires and that carry offices.
pub fn scope_permissions(resp: &AuthResponse, route: &RouteDescriptor) -> Vec<PermissionRecord> {
    resp.permissions
        .iter()
        .map(|permission| {
            let offices = match &permission.offices {
                Some(offices) if route.requires(&permission.name) && !offices.is_empty() => {
                    offices.iter().map(|office| office.id).collect()
                }
                _ => Vec::new(),
            };
            PermissionRecord { name: permission.name.clone(), offices }
        })
        .collect()
}

/// Replace the stored user snapshot and permission list.
pub fn store_session(store: &(impl ClientStore + ?Sized), resp: &AuthResponse, route: &RouteDescriptor) {
    save_json(store, AUTH_USER_KEY, &UserSnapshot::from(resp));
    save_json(store, AUTH_PERMISSIONS_KEY, &scope_permissions(resp, route));
}

fn session_token(store: &(impl ClientStore + ?Sized)) -> Option<String> {
    store.get(AUTH_TOKEN_KEY).filter(|token| !token.is_empty())
}

/// Run the guard for a navigation to `route`.
///
/// Returns the terminal state for this navigation. A 404 from the exchange
/// means "not logged in" and redirects to the login portal without touching
/// the store.
///
/// # Errors
///
/// Any other exchange failure is passed through the client's interceptor and
/// then returned unchanged.
pub async fn run_guard<S, T, N>(
    route: &RouteDescriptor,
    store: &S,
    client: &HttpClient<T>,
    navigator: &N,
    config: &PortalConfig,
) -> Result<GuardState, HttpError>
where
    S: ClientStore + ?Sized,
    T: HttpTransport,
    N: Navigator + ?Sized,
{
    if !route.requires_auth {
        return Ok(GuardState::Public);
    }

    let Some(token) = session_token(store) else {
        leptos::logging::log!("no session token; redirecting to login");
        navigator.redirect_external(&config.portal_url);
        return Ok(GuardState::RedirectedToLogin);
    };

    client.set_bearer(&token);

    match exchange_token(client, &config.api_url).await {
        Ok(resp) => {
            store_session(store, &resp, route);
            Ok(GuardState::Authenticated)
        }
        Err(e) if e.status() == Some(404) => {
            leptos::logging::log!("auth exchange returned 404; redirecting to login");
            navigator.redirect_external(&config.portal_url);
            Ok(GuardState::RedirectedToLogin)
        }
        Err(e) => {
            leptos::logging::warn!("auth exchange failed: {e}");
            client.intercept(&e);
            Err(e)
        }
    }
}
