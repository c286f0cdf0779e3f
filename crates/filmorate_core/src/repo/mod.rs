//! In-memory stores for films, users and likes.
//!
//! # Responsibility
//! - Own the catalog maps and assign identifiers.
//! - Return semantic errors (`NotFound`, `ConditionsNotMet`) alongside
//!   validation failures.
//!
//! # Invariants
//! - Write paths validate before mutating; a failed call leaves no trace.
//! - Every compound mutation runs under a single write lock.
//! - Identifiers are strictly increasing and never reused.

use crate::model::{EntityId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod film_repo;
pub mod like_index;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of entity referenced by a `NotFound` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Film(EntityId),
    User(EntityId),
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Film(id) => write!(f, "film id = {id}"),
            Self::User(id) => write!(f, "user id = {id}"),
        }
    }
}

/// Transport-neutral classification of catalog errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    ConditionsNotMet,
    NotFound,
    Internal,
}

/// Error returned by stores and services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Input fails static field constraints.
    Validation(ValidationError),
    /// Structural precondition violated (missing id, self-friendship, duplicate like).
    ConditionsNotMet(String),
    /// Referenced entity does not exist.
    NotFound(EntityRef),
    /// A lock was poisoned by a panicking writer.
    Poisoned(&'static str),
}

impl RepoError {
    pub fn conditions(message: impl Into<String>) -> Self {
        Self::ConditionsNotMet(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::ConditionsNotMet(_) => ErrorKind::ConditionsNotMet,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Poisoned(_) => ErrorKind::Internal,
        }
    }

    /// Human-readable messages suitable for an adapter error body.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(err) => err.messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ConditionsNotMet(message) => write!(f, "{message}"),
            Self::NotFound(entity) => write!(f, "{entity} not found"),
            Self::Poisoned(store) => write!(f, "{store} store lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Returns the next identifier for a collection: max existing id + 1, or 1.
///
/// Computed from the current keys on every call so externally seeded ids
/// are respected.
pub fn next_id<I>(ids: I) -> EntityId
where
    I: IntoIterator<Item = EntityId>,
{
    ids.into_iter().max().map_or(1, |max| max + 1)
}
