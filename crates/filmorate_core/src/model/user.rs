//! User domain model.
//!
//! # Responsibility
//! - Define the user record and its friend-id set.
//! - Validate contact fields and normalize the display name.
//!
//! # Invariants
//! - `friends` never contains the user's own id.
//! - `friends` is only changed through the friendship operations of
//!   `UserRepository`, never by a general update.
//! - After normalization `name` is never blank; it falls back to `login`.

use super::{EntityId, ValidationError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)*$").expect("valid email regex")
});

/// User record as stored by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned on creation; required on update.
    #[serde(default)]
    pub id: Option<EntityId>,
    pub email: String,
    pub login: String,
    /// Display name. Blank input is replaced by `login`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Ids of befriended users. Ignored on inbound update payloads.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub friends: BTreeSet<EntityId>,
}

impl User {
    /// Creates an unsaved user without an id or friends.
    pub fn new(
        email: impl Into<String>,
        login: impl Into<String>,
        name: impl Into<String>,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            login: login.into(),
            name: name.into(),
            birthday,
            friends: BTreeSet::new(),
        }
    }

    /// Returns the same user addressed to an existing id, for update calls.
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks contact fields and birthday against `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        let mut messages = Vec::new();

        if self.email.trim().is_empty() {
            messages.push("email must not be blank".to_string());
        } else if !EMAIL_RE.is_match(&self.email) {
            messages.push(format!("email `{}` is not a valid address", self.email));
        }
        if self.login.trim().is_empty() {
            messages.push("login must not be blank".to_string());
        }
        if let Some(birthday) = self.birthday {
            if birthday > today {
                messages.push("birthday must not be in the future".to_string());
            }
        }

        ValidationError::check(messages)
    }

    /// Falls back to `login` when the display name is blank.
    pub fn normalize_name(&mut self) {
        if self.name.trim().is_empty() {
            self.name = self.login.clone();
        }
    }

    /// Copies contact fields from `source`, leaving `id` and `friends` intact.
    pub(crate) fn apply_update(&mut self, source: &User) {
        self.email = source.email.clone();
        self.login = source.login.clone();
        self.name = source.name.clone();
        self.birthday = source.birthday;
    }
}
