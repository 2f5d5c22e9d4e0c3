//! Wire and storage DTOs for the auth exchange.
//!
//! DESIGN
//! ======
//! `AuthResponse` mirrors the portal's `/auth` payload. `PermissionRecord`
//! and `UserSnapshot` are the compact shapes persisted in the client store;
//! their short field names (`n`, `o`) are part of the stored format.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Successful body of `POST /auth`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<AuthPermission>,
}

/// A permission granted to the user, optionally scoped to offices.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthPermission {
    pub name: String,
    #[serde(default)]
    pub offices: Option<Vec<AuthOffice>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthOffice {
    pub id: i64,
}

/// Persisted permission: name plus the office ids it is scoped to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "o", default)]
    pub offices: Vec<i64>,
}

impl PermissionRecord {
    pub fn new(name: impl Into<String>, offices: impl Into<Vec<i64>>) -> Self {
        Self { name: name.into(), offices: offices.into() }
    }
}

/// Display-only snapshot of the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub avatar: String,
    pub name: String,
}

impl From<&AuthResponse> for UserSnapshot {
    fn from(resp: &AuthResponse) -> Self {
        Self { avatar: resp.avatar.clone(), name: resp.name.clone() }
    }
}

/// Missing and `null` both decode to `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
