//! Film store contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide list/find/add/update over the film collection.
//! - Assign identifiers on add.
//!
//! # Invariants
//! - `add` and `update` call `Film::validate()` before mutating.
//! - `update` replaces business fields in place; `id` is preserved.
//! - `find_by_id` reports absence as `Ok(None)`, not as an error.

use super::{next_id, EntityRef, RepoError, RepoResult};
use crate::model::film::Film;
use crate::model::EntityId;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Repository interface for film storage.
pub trait FilmRepository {
    fn find_all(&self) -> RepoResult<Vec<Film>>;
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Film>>;
    fn add(&self, film: Film) -> RepoResult<Film>;
    fn update(&self, film: Film) -> RepoResult<Film>;
}

/// Process-lifetime film store guarded by a read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryFilmRepository {
    films: RwLock<BTreeMap<EntityId, Film>>,
}

impl InMemoryFilmRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a film under its existing id, bypassing id assignment.
    #[cfg(test)]
    pub(crate) fn seed(&self, film: Film) -> RepoResult<Film> {
        let Some(id) = film.id else {
            return Err(RepoError::conditions("seeded film must carry an id"));
        };
        film.validate()?;
        self.write()?.insert(id, film.clone());
        Ok(film)
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, BTreeMap<EntityId, Film>>> {
        self.films.read().map_err(|_| RepoError::Poisoned("film"))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, BTreeMap<EntityId, Film>>> {
        self.films.write().map_err(|_| RepoError::Poisoned("film"))
    }
}

impl FilmRepository for InMemoryFilmRepository {
    fn find_all(&self) -> RepoResult<Vec<Film>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Film>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn add(&self, mut film: Film) -> RepoResult<Film> {
        film.validate()?;

        let mut films = self.write()?;
        let id = next_id(films.keys().copied());
        film.id = Some(id);
        films.insert(id, film.clone());
        Ok(film)
    }

    fn update(&self, film: Film) -> RepoResult<Film> {
        let Some(id) = film.id else {
            return Err(RepoError::conditions("film id must be provided for update"));
        };
        film.validate()?;

        let mut films = self.write()?;
        let stored = films
            .get_mut(&id)
            .ok_or(RepoError::NotFound(EntityRef::Film(id)))?;
        stored.apply_update(&film);
        Ok(stored.clone())
    }
}
