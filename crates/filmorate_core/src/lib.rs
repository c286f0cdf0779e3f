//! Core domain logic for the Filmorate catalog.
//! This crate is the single source of truth for film, user, like and
//! friendship invariants; transport adapters sit on top of `Catalog`.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigLoad, CoreConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LogTarget};
pub use model::film::{Film, CINEMA_BIRTHDAY, MAX_DESCRIPTION_CHARS};
pub use model::user::User;
pub use model::{EntityId, ValidationError};
pub use repo::film_repo::{FilmRepository, InMemoryFilmRepository};
pub use repo::like_index::LikeIndex;
pub use repo::user_repo::{InMemoryUserRepository, UserRepository};
pub use repo::{next_id, EntityRef, ErrorKind, RepoError, RepoResult};
pub use service::catalog::Catalog;
pub use service::film_service::{FilmService, POPULAR_DEFAULT_LIMIT};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
