//! Informational HTML pages served at `/` and `/about`.

use crate::{Request, Response};

const INDEX: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>userbase</title>
</head>
<body>
  <h1>userbase</h1>
  <p>An in-memory user CRUD service.</p>
  <ul>
    <li><code>POST /users</code> creates a user</li>
    <li><code>GET /users</code> lists users in creation order</li>
    <li><code>GET /users/{id}</code> fetches one user</li>
    <li><code>PUT /users/{id}</code> updates name and/or email</li>
    <li><code>DELETE /users/{id}</code> removes a user</li>
  </ul>
  <p><a href="/about">About</a></p>
</body>
</html>
"#;

const ABOUT: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>About userbase</title>
</head>
<body>
  <h1>About</h1>
  <p>Users live in process memory and are lost on restart. Emails are unique
  across users; ids are assigned from 1 and never reused.</p>
  <p><a href="/">Home</a></p>
</body>
</html>
"#;

pub async fn index(_req: Request) -> Response {
    Response::html(INDEX)
}

pub async fn about(_req: Request) -> Response {
    Response::html(ABOUT)
}
