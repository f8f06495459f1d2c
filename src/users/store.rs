//! In-memory user store.
//!
//! [`UserStore`] holds the records and the id counter and enforces the two
//! invariants: ids are never reused, and no two live records share an email
//! (exact, case-sensitive comparison). [`Users`] is the cloneable handle the
//! HTTP layer shares between connections; every call locks once for its whole
//! check-then-write sequence.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

use super::model::{NewUser, User, UserId, UserPatch};

/// Why a store operation was refused. `Display` is the client-facing detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User not found")]
    NotFound,

    #[error("Email already exists")]
    DuplicateEmail,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Records keyed by id. Ids only grow, so key order is insertion order.
#[derive(Debug)]
pub struct UserStore {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl UserStore {
    pub fn new() -> Self {
        Self { users: BTreeMap::new(), next_id: 1 }
    }

    pub fn create(&mut self, input: NewUser) -> StoreResult<User> {
        if self.email_taken(&input.email, None) {
            return Err(StoreError::DuplicateEmail);
        }

        let id = self.next_id;
        self.next_id += 1;

        let user = User { id, name: input.name, email: input.email };
        self.users.insert(id, user.clone());
        debug!(id, "user created");
        Ok(user)
    }

    /// All live records in creation order.
    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn get(&self, id: UserId) -> StoreResult<User> {
        self.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    /// Applies `patch` to record `id`. On error the record is left untouched.
    pub fn update(&mut self, id: UserId, patch: UserPatch) -> StoreResult<User> {
        let current = self.users.get(&id).ok_or(StoreError::NotFound)?;

        let name = patch.name.resolve(current.name.clone());
        let email = patch.email.resolve(current.email.clone());

        if email != current.email && self.email_taken(&email, Some(id)) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User { id, name, email };
        self.users.insert(id, user.clone());
        debug!(id, "user updated");
        Ok(user)
    }

    pub fn delete(&mut self, id: UserId) -> StoreResult<()> {
        self.users.remove(&id).ok_or(StoreError::NotFound)?;
        debug!(id, "user deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email == email)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared, thread-safe handle to a [`UserStore`].
///
/// Clones point at the same store. [`Users::new`] starts a fresh, empty one.
#[derive(Clone, Debug, Default)]
pub struct Users {
    inner: Arc<Mutex<UserStore>>,
}

impl Users {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, input: NewUser) -> StoreResult<User> {
        self.lock().create(input)
    }

    pub fn list(&self) -> Vec<User> {
        self.lock().list()
    }

    pub fn get(&self, id: UserId) -> StoreResult<User> {
        self.lock().get(id)
    }

    pub fn update(&self, id: UserId, patch: UserPatch) -> StoreResult<User> {
        self.lock().update(id, patch)
    }

    pub fn delete(&self, id: UserId) -> StoreResult<()> {
        self.lock().delete(id)
    }

    // Every mutation is a single map write, so a panic cannot leave the
    // store half-updated and a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, UserStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
