//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Updated by the auth layout as each guard run starts and settles. Views key
//! permission reads off `revision` so they re-read the gate after every
//! exchange.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::http::HttpError;
use crate::net::types::UserSnapshot;
use crate::util::guard::GuardState;
use crate::util::store::{AUTH_USER_KEY, ClientStore, load_json};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserSnapshot>,
    pub guard: GuardState,
    /// Bumped after every successful exchange.
    pub revision: u64,
    /// Message from the last failed exchange, cleared when a new one starts.
    pub error: Option<String>,
}

impl AuthState {
    /// Seed from whatever the store holds from an earlier session.
    pub fn from_store(store: &(impl ClientStore + ?Sized)) -> Self {
        Self { user: load_json(store, AUTH_USER_KEY), ..Self::default() }
    }

    pub fn begin_exchange(&mut self) {
        self.guard = GuardState::PendingExchange;
        self.error = None;
    }

    pub fn finish(&mut self, result: &Result<GuardState, HttpError>, store: &(impl ClientStore + ?Sized)) {
        self.guard = match result {
            Ok(state) => *state,
            Err(e) => GuardState::after_error(e),
        };
        if self.guard == GuardState::Failed {
            self.error = result.as_ref().err().map(ToString::to_string);
        }
        if self.guard == GuardState::Authenticated {
            self.user = load_json(store, AUTH_USER_KEY);
            self.revision += 1;
        }
    }

    /// True while the guard for the current navigation has not settled.
    pub fn loading(&self) -> bool {
        matches!(self.guard, GuardState::Unauthenticated | GuardState::PendingExchange)
    }
}
