//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the operations exposed to adapters.
//! - Enforce cross-entity checks (a film must exist before it is liked).
//!
//! # Invariants
//! - Services never bypass store validation.
//! - Errors propagate unchanged; nothing is retried or logged here.

pub mod catalog;
pub mod film_service;
pub mod user_service;
