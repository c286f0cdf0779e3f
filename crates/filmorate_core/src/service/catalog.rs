//! In-memory catalog wiring.
//!
//! Builds film and user services that share one user store, so likes and
//! friendships see the same users.

use crate::config::CoreConfig;
use crate::repo::film_repo::InMemoryFilmRepository;
use crate::repo::user_repo::InMemoryUserRepository;
use crate::service::film_service::FilmService;
use crate::service::user_service::UserService;
use std::sync::Arc;

pub type InMemoryFilmService = FilmService<InMemoryFilmRepository, InMemoryUserRepository>;
pub type InMemoryUserService = UserService<InMemoryUserRepository>;

/// Entry point consumed by adapters.
pub struct Catalog {
    pub films: InMemoryFilmService,
    pub users: InMemoryUserService,
}

impl Catalog {
    /// Creates an empty catalog with default settings.
    pub fn in_memory() -> Self {
        Self::from_stores(
            Arc::new(InMemoryFilmRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }

    /// Creates an empty catalog honoring configured service settings.
    pub fn from_config(config: &CoreConfig) -> Self {
        let Self { films, users } = Self::in_memory();
        Self {
            films: films.with_popular_default(config.popular_default_limit),
            users,
        }
    }

    /// Wires services over caller-provided stores.
    pub fn from_stores(
        films: Arc<InMemoryFilmRepository>,
        users: Arc<InMemoryUserRepository>,
    ) -> Self {
        Self {
            films: FilmService::new(films, Arc::clone(&users)),
            users: UserService::new(users),
        }
    }
}
