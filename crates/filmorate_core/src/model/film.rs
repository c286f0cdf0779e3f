//! Film domain model.
//!
//! # Responsibility
//! - Define the film record exchanged with adapters and stored by `FilmRepository`.
//! - Enforce field constraints before any store mutation.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one and never changes afterwards.
//! - `release_date` is never earlier than [`CINEMA_BIRTHDAY`].
//! - `description` holds at most [`MAX_DESCRIPTION_CHARS`] characters.

use super::{EntityId, ValidationError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Maximum description length, counted in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Earliest accepted release date: the first public film screening.
pub static CINEMA_BIRTHDAY: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1895, 12, 28).expect("valid cinema birthday"));

/// Film record as stored by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Assigned on creation; required on update.
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    /// Length in minutes.
    pub duration: i32,
}

impl Film {
    /// Creates an unsaved film without an id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        release_date: NaiveDate,
        duration: i32,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            release_date,
            duration,
        }
    }

    /// Returns the same film addressed to an existing id, for update calls.
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks every field rule and reports all violations together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut messages = Vec::new();

        if self.name.trim().is_empty() {
            messages.push("film name must not be blank".to_string());
        }
        if self.description.trim().is_empty() {
            messages.push("film description must not be blank".to_string());
        }
        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            messages.push(format!(
                "film description must be at most {MAX_DESCRIPTION_CHARS} characters"
            ));
        }
        if self.release_date < *CINEMA_BIRTHDAY {
            messages.push(format!(
                "release date must not be earlier than {}",
                *CINEMA_BIRTHDAY
            ));
        }
        if self.duration <= 0 {
            messages.push("film duration must be positive".to_string());
        }

        ValidationError::check(messages)
    }

    /// Copies the business fields of `source` while keeping this film's id.
    pub(crate) fn apply_update(&mut self, source: &Film) {
        self.name = source.name.clone();
        self.description = source.description.clone();
        self.release_date = source.release_date;
        self.duration = source.duration;
    }
}
