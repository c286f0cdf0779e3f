//! User store contract, in-memory implementation and friendship graph.
//!
//! # Responsibility
//! - Provide list/find/add/update over the user collection.
//! - Maintain the symmetric friendship relation between stored users.
//!
//! # Invariants
//! - `find_by_id` fails with `NotFound` for unknown ids.
//! - Friendship is symmetric: both sides change under one write lock or neither does.
//! - No user is ever its own friend.
//! - `update` never touches `id` or `friends`.

use super::{next_id, EntityRef, RepoError, RepoResult};
use crate::model::user::User;
use crate::model::EntityId;
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Repository interface for users and their friendships.
pub trait UserRepository {
    fn find_all(&self) -> RepoResult<Vec<User>>;
    fn find_by_id(&self, id: EntityId) -> RepoResult<User>;
    fn add(&self, user: User) -> RepoResult<User>;
    fn update(&self, user: User) -> RepoResult<User>;
    /// Adds each user to the other's friend set; returns both records.
    fn link_friends(&self, id: EntityId, friend_id: EntityId) -> RepoResult<(User, User)>;
    /// Removes a friendship from both sides; `false` when it did not exist.
    fn unlink_friends(&self, id: EntityId, friend_id: EntityId) -> RepoResult<bool>;
    fn friends_of(&self, id: EntityId) -> RepoResult<Vec<User>>;
    /// Users befriended by both `id` and `other_id`, ordered by id.
    fn mutual_friends(&self, id: EntityId, other_id: EntityId) -> RepoResult<Vec<User>>;
}

/// Process-lifetime user store guarded by a read/write lock.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<EntityId, User>>,
    today: fn() -> NaiveDate,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::with_clock(|| Local::now().date_naive())
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that validates birthdays against a custom clock.
    pub fn with_clock(today: fn() -> NaiveDate) -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            today,
        }
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, BTreeMap<EntityId, User>>> {
        self.users.read().map_err(|_| RepoError::Poisoned("user"))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, BTreeMap<EntityId, User>>> {
        self.users.write().map_err(|_| RepoError::Poisoned("user"))
    }

    fn prepare(&self, user: &mut User) -> RepoResult<()> {
        user.validate((self.today)())?;
        user.normalize_name();
        Ok(())
    }
}

fn lookup(users: &BTreeMap<EntityId, User>, id: EntityId) -> RepoResult<&User> {
    users.get(&id).ok_or(RepoError::NotFound(EntityRef::User(id)))
}

fn resolve_friends(users: &BTreeMap<EntityId, User>, user: &User) -> Vec<User> {
    user.friends
        .iter()
        .filter_map(|friend_id| users.get(friend_id).cloned())
        .collect()
}

impl UserRepository for InMemoryUserRepository {
    fn find_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<User> {
        let users = self.read()?;
        lookup(&users, id).cloned()
    }

    fn add(&self, mut user: User) -> RepoResult<User> {
        self.prepare(&mut user)?;
        user.friends.clear();

        let mut users = self.write()?;
        let id = next_id(users.keys().copied());
        user.id = Some(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    fn update(&self, mut user: User) -> RepoResult<User> {
        let Some(id) = user.id else {
            return Err(RepoError::conditions("user id must be provided for update"));
        };
        self.prepare(&mut user)?;

        let mut users = self.write()?;
        let stored = users
            .get_mut(&id)
            .ok_or(RepoError::NotFound(EntityRef::User(id)))?;
        stored.apply_update(&user);
        Ok(stored.clone())
    }

    fn link_friends(&self, id: EntityId, friend_id: EntityId) -> RepoResult<(User, User)> {
        if id == friend_id {
            return Err(RepoError::conditions("a user cannot befriend themselves"));
        }

        let mut users = self.write()?;
        lookup(&users, id)?;
        lookup(&users, friend_id)?;

        if let Some(user) = users.get_mut(&id) {
            user.friends.insert(friend_id);
        }
        if let Some(friend) = users.get_mut(&friend_id) {
            friend.friends.insert(id);
        }

        Ok((lookup(&users, id)?.clone(), lookup(&users, friend_id)?.clone()))
    }

    fn unlink_friends(&self, id: EntityId, friend_id: EntityId) -> RepoResult<bool> {
        let mut users = self.write()?;
        let befriended = lookup(&users, id)?.friends.contains(&friend_id);
        lookup(&users, friend_id)?;

        if !befriended {
            return Ok(false);
        }

        if let Some(user) = users.get_mut(&id) {
            user.friends.remove(&friend_id);
        }
        if let Some(friend) = users.get_mut(&friend_id) {
            friend.friends.remove(&id);
        }
        Ok(true)
    }

    fn friends_of(&self, id: EntityId) -> RepoResult<Vec<User>> {
        let users = self.read()?;
        let user = lookup(&users, id)?;
        Ok(resolve_friends(&users, user))
    }

    fn mutual_friends(&self, id: EntityId, other_id: EntityId) -> RepoResult<Vec<User>> {
        let users = self.read()?;
        let user = lookup(&users, id)?;
        let other = lookup(&users, other_id)?;

        Ok(user
            .friends
            .intersection(&other.friends)
            .filter_map(|friend_id| users.get(friend_id).cloned())
            .collect())
    }
}
