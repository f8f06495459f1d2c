//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::trace;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid pattern or conflicts with a route
    /// already registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Routes one fully-read request and produces its response.
    ///
    /// Unmatched paths answer `404`. Paths registered only under other
    /// methods answer `405` with an `Allow` header listing those methods.
    /// Both carry a `{"detail": ...}` body.
    pub async fn respond(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let http::request::Parts { method: raw_method, uri, headers, .. } = parts;
        let path = uri.path().to_owned();

        trace::instrument(raw_method.as_str(), &path, async {
            let Ok(method) = Method::try_from(&raw_method) else {
                return method_not_allowed(&self.allowed_methods(&path));
            };

            if let Some((handler, params)) = self.lookup(method, &path) {
                return handler.call(Request::new(method, path.clone(), headers, body, params)).await;
            }

            let allowed = self.allowed_methods(&path);
            if allowed.is_empty() {
                Response::detail(Status::NotFound, Status::NotFound.reason())
            } else {
                method_not_allowed(&allowed)
            }
        })
        .await
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Methods with a route matching `path`, in [`Method::ALL`] order.
    fn allowed_methods(&self, path: &str) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.routes.get(m).is_some_and(|tree| tree.at(path).is_ok()))
            .collect()
    }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let mut res = Response::detail(Status::MethodNotAllowed, Status::MethodNotAllowed.reason());
    if !allowed.is_empty() {
        let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
        res.headers.push(("allow".to_owned(), allow));
    }
    res
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
