//! Catalog domain model for films and users.
//!
//! # Responsibility
//! - Define the canonical film and user records owned by the stores.
//! - Provide field-level validation shared by add and update paths.
//!
//! # Invariants
//! - Identifiers are assigned by the stores, never by callers on create.
//! - Validation collects every violated rule instead of stopping at the first.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod film;
pub mod user;

/// Stable numeric identifier shared by films and users.
pub type EntityId = i64;

/// Field-level validation failure with one message per violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Turns collected messages into a result; empty means valid.
    pub(crate) fn check(messages: Vec<String>) -> Result<(), Self> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self { messages })
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: {}", self.messages.join("; "))
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn check_passes_on_empty_messages() {
        assert!(ValidationError::check(Vec::new()).is_ok());
    }

    #[test]
    fn display_joins_all_messages() {
        let err = ValidationError::check(vec!["a".to_string(), "b".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "validation failed: a; b");
    }
}
