//! Permission gate over the stored permission list.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth guard writes `auth_permissions` after each exchange; views build a
//! [`Gate`] from the store and ask point (`check_one`) or batch (`check_any`)
//! questions before rendering management or evaluation controls.
//!
//! Lists are small (tens of entries), so lookups are linear scans and the
//! first record with a given name wins.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::net::types::PermissionRecord;
use crate::util::store::{AUTH_PERMISSIONS_KEY, ClientStore};

/// Either a single permission name or a set of alternatives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionQuery<'a> {
    One(&'a str),
    Any(&'a [&'a str]),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gate {
    records: Vec<PermissionRecord>,
}

impl Gate {
    /// Decode the permission list from `store`. Absent or malformed data
    /// yields an empty gate.
    pub fn load(store: &(impl ClientStore + ?Sized)) -> Self {
        store
            .get(AUTH_PERMISSIONS_KEY)
            .map_or_else(Self::default, |raw| Self::from_json(&raw))
    }

    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Vec<PermissionRecord>>(raw) {
            Ok(records) => Self { records },
            Err(e) => {
                leptos::logging::warn!("ignoring malformed permission list: {e}");
                Self::default()
            }
        }
    }

    pub fn from_records(records: Vec<PermissionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PermissionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when `name` is held and, if an office filter is given, scoped to
    /// that office.
    pub fn check_one(&self, name: &str, office_id: Option<i64>) -> bool {
        match self.find(name) {
            Some(record) => passes_office(record, office_id),
            None => false,
        }
    }

    /// True when at least one record named in `names` passes the office
    /// filter.
    pub fn check_any(&self, names: &[&str], office_id: Option<i64>) -> bool {
        let matches = self.records.iter().fold(0usize, |count, record| {
            if names.contains(&record.name.as_str()) && passes_office(record, office_id) {
                count + 1
            } else {
                count
            }
        });
        matches > 0
    }

    /// Office ids of the first record named `name`, or empty.
    pub fn offices_of(&self, name: &str) -> Vec<i64> {
        self.find(name).map(|r| r.offices.clone()).unwrap_or_default()
    }

    /// Union of [`Gate::offices_of`] across `names`, deduplicated in
    /// first-seen order.
    pub fn offices_of_any(&self, names: &[&str]) -> Vec<i64> {
        let mut offices: Vec<i64> = Vec::new();
        for name in names {
            let Some(record) = self.find(name) else {
                continue;
            };
            for id in &record.offices {
                if !offices.contains(id) {
                    offices.push(*id);
                }
            }
        }
        offices
    }

    pub fn has_permission(&self, query: PermissionQuery<'_>, office_id: Option<i64>) -> bool {
        match query {
            PermissionQuery::One(name) => self.check_one(name, office_id),
            PermissionQuery::Any(names) => self.check_any(names, office_id),
        }
    }

    pub fn offices(&self, query: PermissionQuery<'_>) -> Vec<i64> {
        match query {
            PermissionQuery::One(name) => self.offices_of(name),
            PermissionQuery::Any(names) => self.offices_of_any(names),
        }
    }

    fn find(&self, name: &str) -> Option<&PermissionRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

/// `None` and `Some(0)` both mean "no office filter".
fn passes_office(record: &PermissionRecord, office_id: Option<i64>) -> bool {
    match office_id {
        None | Some(0) => true,
        Some(id) => record.offices.contains(&id),
    }
}

/// Parse an office id from a route or query parameter using integer-prefix
/// rules: leading whitespace and sign are accepted, parsing stops at the
/// first non-digit, and no digits at all is `None`.
pub fn parse_office_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}
