//! Film like index.
//!
//! # Responsibility
//! - Record which users like which films.
//! - Rank liked films by number of distinct likes.
//!
//! # Invariants
//! - A (film, user) pair is stored at most once.
//! - Films whose like set becomes empty are dropped from the index.
//! - Ranking order is like count descending, then film id ascending.

use super::{RepoError, RepoResult};
use crate::model::EntityId;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type Likes = BTreeMap<EntityId, BTreeSet<EntityId>>;

/// Mapping from film id to the ids of users who like it.
#[derive(Debug, Default)]
pub struct LikeIndex {
    likes: RwLock<Likes>,
}

/// Exclusive access to the index for one compound operation.
///
/// Callers run their existence checks while holding this guard so the
/// check and the mutation form a single critical section.
pub struct LikeIndexWriter<'a> {
    likes: RwLockWriteGuard<'a, Likes>,
}

impl LikeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> RepoResult<LikeIndexWriter<'_>> {
        let likes = self.likes.write().map_err(|_| RepoError::Poisoned("like"))?;
        Ok(LikeIndexWriter { likes })
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, Likes>> {
        self.likes.read().map_err(|_| RepoError::Poisoned("like"))
    }

    /// Number of distinct users liking `film_id`.
    pub fn count_for(&self, film_id: EntityId) -> RepoResult<usize> {
        Ok(self.read()?.get(&film_id).map_or(0, BTreeSet::len))
    }

    /// Liked film ids with their like counts, most liked first.
    ///
    /// Ties are broken by ascending film id.
    pub fn ranked(&self) -> RepoResult<Vec<(EntityId, usize)>> {
        let mut ranked: Vec<(EntityId, usize)> = self
            .read()?
            .iter()
            .map(|(film_id, users)| (*film_id, users.len()))
            .collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1).then(left.0.cmp(&right.0)));
        Ok(ranked)
    }
}

impl LikeIndexWriter<'_> {
    pub fn contains(&self, film_id: EntityId, user_id: EntityId) -> bool {
        self.likes
            .get(&film_id)
            .is_some_and(|users| users.contains(&user_id))
    }

    /// Adds a like; returns `false` when the pair was already present.
    pub fn insert(&mut self, film_id: EntityId, user_id: EntityId) -> bool {
        self.likes.entry(film_id).or_default().insert(user_id)
    }

    /// Removes a like; returns `false` when the pair was absent.
    pub fn remove(&mut self, film_id: EntityId, user_id: EntityId) -> bool {
        let Some(users) = self.likes.get_mut(&film_id) else {
            return false;
        };
        let removed = users.remove(&user_id);
        if users.is_empty() {
            self.likes.remove(&film_id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::LikeIndex;

    #[test]
    fn duplicate_insert_is_reported() {
        let index = LikeIndex::new();
        let mut writer = index.lock().unwrap();
        assert!(writer.insert(1, 10));
        assert!(!writer.insert(1, 10));
        assert!(writer.contains(1, 10));
    }

    #[test]
    fn removing_last_like_drops_the_entry() {
        let index = LikeIndex::new();
        {
            let mut writer = index.lock().unwrap();
            writer.insert(1, 10);
            assert!(writer.remove(1, 10));
            assert!(!writer.remove(1, 10));
        }
        assert!(index.ranked().unwrap().is_empty());
        assert_eq!(index.count_for(1).unwrap(), 0);
    }

    #[test]
    fn ranking_breaks_ties_by_film_id() {
        let index = LikeIndex::new();
        {
            let mut writer = index.lock().unwrap();
            writer.insert(3, 1);
            writer.insert(2, 1);
            writer.insert(5, 1);
            writer.insert(5, 2);
        }
        assert_eq!(index.ranked().unwrap(), vec![(5, 2), (2, 1), (3, 1)]);
    }
}
