//! User and friendship use-case service.
//!
//! # Responsibility
//! - Expose user CRUD on top of `UserRepository`.
//! - Provide friend add/remove/list and mutual-friend queries.
//!
//! # Invariants
//! - Self-friendship is rejected before any store access.
//! - `add_friend` and `mutual_friends` treat unknown users as a soft no-op;
//!   `remove_friend` and `friends_of` fail with `NotFound`.

use crate::model::user::User;
use crate::model::EntityId;
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};
use std::sync::Arc;

/// User service facade over a shared user repository.
pub struct UserService<U: UserRepository> {
    users: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub fn find_all(&self) -> RepoResult<Vec<User>> {
        self.users.find_all()
    }

    pub fn get_user(&self, id: EntityId) -> RepoResult<User> {
        self.users.find_by_id(id)
    }

    pub fn add(&self, user: User) -> RepoResult<User> {
        self.users.add(user)
    }

    pub fn update(&self, user: User) -> RepoResult<User> {
        self.users.update(user)
    }

    /// Makes two users friends of each other.
    ///
    /// Returns both records after the change. When either user is unknown
    /// nothing changes and only the records that do exist are returned.
    pub fn add_friend(&self, id: EntityId, friend_id: EntityId) -> RepoResult<Vec<User>> {
        if id == friend_id {
            return Err(RepoError::conditions("a user cannot befriend themselves"));
        }

        match self.users.link_friends(id, friend_id) {
            Ok((user, friend)) => Ok(vec![user, friend]),
            Err(RepoError::NotFound(_)) => {
                let mut existing = Vec::with_capacity(2);
                for lookup_id in [id, friend_id] {
                    match self.users.find_by_id(lookup_id) {
                        Ok(user) => existing.push(user),
                        Err(RepoError::NotFound(_)) => {}
                        Err(err) => return Err(err),
                    }
                }
                Ok(existing)
            }
            Err(err) => Err(err),
        }
    }

    /// Ends a friendship on both sides; `false` when there was none.
    pub fn remove_friend(&self, id: EntityId, friend_id: EntityId) -> RepoResult<bool> {
        self.users.unlink_friends(id, friend_id)
    }

    pub fn friends_of(&self, id: EntityId) -> RepoResult<Vec<User>> {
        self.users.friends_of(id)
    }

    /// Friends shared by both users; empty when either user is unknown.
    pub fn mutual_friends(&self, id: EntityId, other_id: EntityId) -> RepoResult<Vec<User>> {
        match self.users.mutual_friends(id, other_id) {
            Err(RepoError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }
}
