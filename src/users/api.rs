//! HTTP handlers for the `/users` resource.
//!
//! | Verb | Path | Success |
//! |---|---|---|
//! | POST | `/users` | 201 + created user |
//! | GET | `/users` | 200 + users in creation order |
//! | GET | `/users/{id}` | 200 + user |
//! | PUT | `/users/{id}` | 200 + updated user |
//! | DELETE | `/users/{id}` | 204, empty body |
//!
//! Path ids are validated first, then bodies, then the store is called.

use tracing::debug;

use super::model::{User, UserId};
use super::store::{StoreError, Users};
use super::validation::{parse_new_user, parse_user_id, parse_user_patch};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            StoreError::NotFound => Status::NotFound,
            StoreError::DuplicateEmail => Status::BadRequest,
        };
        debug!(error = %self, "store rejected request");
        Response::detail(status, &self.to_string())
    }
}

/// An id too large to have been assigned names no user.
fn known(id: Option<UserId>) -> Result<UserId, StoreError> {
    id.ok_or(StoreError::NotFound)
}

/// Registers the user routes on `router`, all sharing `users`.
pub fn routes(router: Router, users: &Users) -> Router {
    let (create, list, get, update, delete) =
        (users.clone(), users.clone(), users.clone(), users.clone(), users.clone());

    router
        .post("/users", move |req: Request| create_user(create.clone(), req))
        .get("/users", move |req: Request| list_users(list.clone(), req))
        .get("/users/{id}", move |req: Request| get_user(get.clone(), req))
        .put("/users/{id}", move |req: Request| update_user(update.clone(), req))
        .delete("/users/{id}", move |req: Request| delete_user(delete.clone(), req))
}

pub async fn create_user(users: Users, req: Request) -> Response {
    let input = match parse_new_user(req.body()) {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    users
        .create(input)
        .map(|user| {
            let location = format!("/users/{}", user.id);
            let mut res = (Status::Created, Json(user)).into_response();
            res.headers.push(("location".to_owned(), location));
            res
        })
        .into_response()
}

pub async fn list_users(users: Users, _req: Request) -> Json<Vec<User>> {
    Json(users.list())
}

pub async fn get_user(users: Users, req: Request) -> Response {
    match parse_user_id(req.param("id")) {
        Ok(id) => known(id).and_then(|id| users.get(id)).map(Json).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_user(users: Users, req: Request) -> Response {
    let id = match parse_user_id(req.param("id")) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let patch = match parse_user_patch(req.body()) {
        Ok(patch) => patch,
        Err(e) => return e.into_response(),
    };

    known(id).and_then(|id| users.update(id, patch)).map(Json).into_response()
}

pub async fn delete_user(users: Users, req: Request) -> Response {
    match parse_user_id(req.param("id")) {
        Ok(id) => known(id)
            .and_then(|id| users.delete(id))
            .map(|()| Status::NoContent)
            .into_response(),
        Err(e) => e.into_response(),
    }
}
