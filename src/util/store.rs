//! Client-side key/value store holding the session token, user snapshot, and
//! permission list.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser store is cookie-backed and shared across navigations with no
//! synchronization: the last completed write wins. Everything that reads or
//! writes auth data goes through [`ClientStore`] so tests can swap in
//! [`MemoryStore`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Opaque session token issued by the login portal. Read-only here.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// JSON `{avatar, name}` snapshot of the signed-in user.
pub const AUTH_USER_KEY: &str = "auth_user";
/// JSON `[{n, o}]` list of permission records.
pub const AUTH_PERMISSIONS_KEY: &str = "auth_permissions";

pub trait ClientStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn clear(&self, key: &str);
}

impl<S: ClientStore + ?Sized> ClientStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn clear(&self, key: &str) {
        (**self).clear(key);
    }
}

/// Load a JSON value stored under `key`. Missing or malformed data is `None`.
pub fn load_json<T: DeserializeOwned>(store: &(impl ClientStore + ?Sized), key: &str) -> Option<T> {
    let raw = store.get(key)?;
    serde_json::from_str(&raw).ok()
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(store: &(impl ClientStore + ?Sized), key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => leptos::logging::warn!("failed to encode {key}: {e}"),
    }
}

/// In-process store used by tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from `(key, value)` pairs without counting the writes.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { entries: RefCell::new(map), writes: Cell::new(0) }
    }

    /// Number of `set`/`clear` calls since construction.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl ClientStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.writes.set(self.writes.get() + 1);
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn clear(&self, key: &str) {
        self.writes.set(self.writes.get() + 1);
        self.entries.borrow_mut().remove(key);
    }
}

/// Browser cookie store (`document.cookie`, path `/`, URI-component encoded
/// values). Outside the browser every read is `None` and writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct CookieStore;

impl ClientStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let raw = document_cookie()?;
            let encoded = find_cookie(&raw, key)?;
            js_sys::decode_uri_component(encoded).ok().map(String::from)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let encoded: String = js_sys::encode_uri_component(value).into();
            write_document_cookie(&cookie_assignment(key, &encoded));
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn clear(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            write_document_cookie(&cookie_expiry(key));
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

#[cfg(feature = "csr")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

#[cfg(feature = "csr")]
fn document_cookie() -> Option<String> {
    html_document()?.cookie().ok()
}

#[cfg(feature = "csr")]
fn write_document_cookie(assignment: &str) {
    let Some(doc) = html_document() else {
        return;
    };
    if let Err(e) = doc.set_cookie(assignment) {
        leptos::logging::warn!("cookie write failed: {e:?}");
    }
}

#[cfg(any(test, feature = "csr"))]
/// Find the raw (still encoded) value of `key` in a `document.cookie` string.
fn find_cookie<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == key).then_some(value)
    })
}

#[cfg(any(test, feature = "csr"))]
fn cookie_assignment(key: &str, encoded_value: &str) -> String {
    format!("{key}={encoded_value}; path=/")
}

#[cfg(any(test, feature = "csr"))]
fn cookie_expiry(key: &str) -> String {
    format!("{key}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT")
}
