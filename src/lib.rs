//! # userbase
//!
//! An HTTP CRUD service for a single "user" resource, kept in process memory.
//!
//! ## Layers
//!
//! - [`users`]: the record store (id assignment, email uniqueness), input
//!   validation, and the `/users` handlers
//! - [`Router`] / [`Server`]: radix-tree routing via [`matchit`], hyper 1
//!   connections, graceful shutdown on SIGTERM / Ctrl-C
//! - [`middleware::trace`]: one tracing span per request
//! - [`health`] and [`pages`]: probes and the informational HTML pages
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use userbase::{Config, Server, users::Users};
//!
//! #[tokio::main]
//! async fn main() -> userbase::error::Result<()> {
//!     let config = Config::from_env()?;
//!     let app = userbase::app(&Users::new());
//!
//!     Server::bind(config.addr).await?.serve(app).await
//! }
//! ```

pub mod config;
pub mod error;
mod handler;
pub mod health;
mod method;
pub mod middleware;
pub mod pages;
mod request;
mod response;
mod router;
mod server;
mod status;
pub mod users;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_GRACE_PERIOD, Server};
pub use status::Status;

/// The complete route table, serving `users`.
pub fn app(users: &users::Users) -> Router {
    let router = Router::new()
        .get("/", pages::index)
        .get("/about", pages::about)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness);

    users::api::routes(router, users)
}
