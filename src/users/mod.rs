//! The user resource: records, store, validation and HTTP handlers.

pub mod api;
pub mod model;
pub mod store;
pub mod validation;

pub use model::{Change, NewUser, User, UserId, UserPatch};
pub use store::{StoreError, StoreResult, UserStore, Users};
pub use validation::{FieldError, ValidationError};
