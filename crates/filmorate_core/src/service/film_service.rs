//! Film use-case service.
//!
//! # Responsibility
//! - Expose film CRUD on top of `FilmRepository`.
//! - Own the like index and produce the popularity ranking.
//!
//! # Invariants
//! - `like`/`unlike` check film and user existence while holding the
//!   like index lock, so a like never refers to an unknown entity.
//! - `popular` returns at most `limit` films, all with at least one like.

use crate::model::film::Film;
use crate::model::EntityId;
use crate::repo::film_repo::FilmRepository;
use crate::repo::like_index::{LikeIndex, LikeIndexWriter};
use crate::repo::user_repo::UserRepository;
use crate::repo::{EntityRef, RepoError, RepoResult};
use std::sync::Arc;

/// Limit used by `popular` when the caller passes none or a non-positive one.
pub const POPULAR_DEFAULT_LIMIT: usize = 10;

/// Film service facade over film and user repositories.
pub struct FilmService<F: FilmRepository, U: UserRepository> {
    films: Arc<F>,
    users: Arc<U>,
    likes: LikeIndex,
    popular_default: usize,
}

impl<F: FilmRepository, U: UserRepository> FilmService<F, U> {
    /// Creates a service with an empty like index.
    pub fn new(films: Arc<F>, users: Arc<U>) -> Self {
        Self {
            films,
            users,
            likes: LikeIndex::new(),
            popular_default: POPULAR_DEFAULT_LIMIT,
        }
    }

    /// Overrides the limit applied when `popular` gets no usable count.
    pub fn with_popular_default(mut self, limit: usize) -> Self {
        self.popular_default = limit.max(1);
        self
    }

    pub fn find_all(&self) -> RepoResult<Vec<Film>> {
        self.films.find_all()
    }

    /// Gets one film, failing with `NotFound` when absent.
    pub fn get_film(&self, film_id: EntityId) -> RepoResult<Film> {
        self.films
            .find_by_id(film_id)?
            .ok_or(RepoError::NotFound(EntityRef::Film(film_id)))
    }

    pub fn add(&self, film: Film) -> RepoResult<Film> {
        self.films.add(film)
    }

    pub fn update(&self, film: Film) -> RepoResult<Film> {
        self.films.update(film)
    }

    /// Records that `user_id` likes `film_id`.
    ///
    /// Fails with `ConditionsNotMet` when the like already exists.
    pub fn like(&self, film_id: EntityId, user_id: EntityId) -> RepoResult<()> {
        let mut likes = self.locked_for(film_id, user_id)?;
        if likes.contains(film_id, user_id) {
            return Err(RepoError::conditions(format!(
                "user id = {user_id} already likes film id = {film_id}"
            )));
        }
        likes.insert(film_id, user_id);
        Ok(())
    }

    /// Withdraws a like. Removing a like that does not exist is a no-op.
    pub fn unlike(&self, film_id: EntityId, user_id: EntityId) -> RepoResult<()> {
        let mut likes = self.locked_for(film_id, user_id)?;
        likes.remove(film_id, user_id);
        Ok(())
    }

    /// Number of users liking `film_id`.
    pub fn like_count(&self, film_id: EntityId) -> RepoResult<usize> {
        self.get_film(film_id)?;
        self.likes.count_for(film_id)
    }

    /// Most liked films, like count descending and film id ascending on ties.
    ///
    /// `None` or a non-positive `count` falls back to the default limit.
    pub fn popular(&self, count: Option<i32>) -> RepoResult<Vec<Film>> {
        let limit = normalize_popular_limit(count, self.popular_default);
        let ranked = self.likes.ranked()?;
        let mut films = Vec::with_capacity(limit.min(ranked.len()));
        for (film_id, _) in ranked {
            if films.len() == limit {
                break;
            }
            if let Some(film) = self.films.find_by_id(film_id)? {
                films.push(film);
            }
        }
        Ok(films)
    }

    fn locked_for(&self, film_id: EntityId, user_id: EntityId) -> RepoResult<LikeIndexWriter<'_>> {
        let likes = self.likes.lock()?;
        if self.films.find_by_id(film_id)?.is_none() {
            return Err(RepoError::NotFound(EntityRef::Film(film_id)));
        }
        self.users.find_by_id(user_id)?;
        Ok(likes)
    }
}

/// Normalizes the `popular` count into an effective limit.
pub fn normalize_popular_limit(count: Option<i32>, default: usize) -> usize {
    match count {
        Some(value) if value > 0 => value as usize,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_popular_limit, POPULAR_DEFAULT_LIMIT};

    #[test]
    fn popular_limit_defaults_for_missing_or_non_positive_counts() {
        assert_eq!(normalize_popular_limit(None, POPULAR_DEFAULT_LIMIT), 10);
        assert_eq!(normalize_popular_limit(Some(0), POPULAR_DEFAULT_LIMIT), 10);
        assert_eq!(normalize_popular_limit(Some(-3), POPULAR_DEFAULT_LIMIT), 10);
        assert_eq!(normalize_popular_limit(Some(3), POPULAR_DEFAULT_LIMIT), 3);
    }
}
