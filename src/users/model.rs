//! User record and the typed inputs the store accepts.

use serde::Serialize;

/// Identifier of a user record. Assigned by the store, starting at 1.
pub type UserId = u64;

/// A stored user, as returned to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Validated input for creating a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// One field of a partial update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Change<T> {
    /// Keep the stored value.
    #[default]
    Unchanged,
    /// Replace the stored value.
    Set(T),
}

impl<T> Change<T> {
    /// The new value, or `current` when unchanged.
    pub fn resolve(self, current: T) -> T {
        match self {
            Change::Unchanged => current,
            Change::Set(v) => v,
        }
    }
}

/// Validated input for a partial update. `UserPatch::default()` changes nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Change<String>,
    pub email: Change<String>,
}
