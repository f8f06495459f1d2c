//! End-to-end behaviour of the route table, driven in-process.

use bytes::Bytes;
use serde_json::{Value, json};
use userbase::users::Users;
use userbase::{Response, Router, Status};

fn app() -> Router {
    userbase::app(&Users::new())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let body = body.map(|v| Bytes::from(v.to_string())).unwrap_or_default();
    let req = http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.respond(req).await
}

fn json_body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

async fn create(app: &Router, name: &str, email: &str) -> Value {
    let res = send(app, "POST", "/users", Some(json!({ "name": name, "email": email }))).await;
    assert_eq!(res.status_code(), Status::Created, "{:?}", String::from_utf8_lossy(res.body()));
    json_body(&res)
}

#[tokio::test]
async fn crud_flow() {
    let app = app();

    let res = send(&app, "POST", "/users", Some(json!({ "name": "Ivan", "email": "ivan@example.com" }))).await;
    assert_eq!(res.status_code(), Status::Created);
    assert_eq!(res.header("location"), Some("/users/1"));
    assert_eq!(json_body(&res), json!({ "id": 1, "name": "Ivan", "email": "ivan@example.com" }));

    let res = send(&app, "GET", "/users", None).await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(json_body(&res), json!([{ "id": 1, "name": "Ivan", "email": "ivan@example.com" }]));

    let res = send(&app, "GET", "/users/1", None).await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(json_body(&res)["email"], "ivan@example.com");

    let res = send(&app, "PUT", "/users/1", Some(json!({ "name": "Ivan Petrov" }))).await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(json_body(&res), json!({ "id": 1, "name": "Ivan Petrov", "email": "ivan@example.com" }));

    let res = send(&app, "DELETE", "/users/1", None).await;
    assert_eq!(res.status_code(), Status::NoContent);
    assert!(res.body().is_empty());

    let res = send(&app, "GET", "/users/1", None).await;
    assert_eq!(res.status_code(), Status::NotFound);
    assert_eq!(json_body(&res), json!({ "detail": "User not found" }));
}

#[tokio::test]
async fn missing_user_is_404_for_every_verb() {
    let app = app();
    for (method, body) in [("GET", None), ("PUT", Some(json!({ "name": "X" }))), ("DELETE", None)] {
        let res = send(&app, method, "/users/999", body).await;
        assert_eq!(res.status_code(), Status::NotFound, "{method}");
        assert_eq!(json_body(&res), json!({ "detail": "User not found" }));
    }
}

#[tokio::test]
async fn duplicate_email_on_create_is_400() {
    let app = app();
    create(&app, "A", "a@example.com").await;

    let res = send(&app, "POST", "/users", Some(json!({ "name": "B", "email": "a@example.com" }))).await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(json_body(&res), json!({ "detail": "Email already exists" }));

    let res = send(&app, "GET", "/users", None).await;
    assert_eq!(json_body(&res).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn email_domains_compare_case_insensitively() {
    let app = app();
    let first = create(&app, "A", "a@EXAMPLE.com").await;
    assert_eq!(first["email"], "a@example.com");

    let res = send(&app, "POST", "/users", Some(json!({ "name": "B", "email": "a@Example.COM" }))).await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(json_body(&res), json!({ "detail": "Email already exists" }));

    let other = create(&app, "C", "A@example.com").await;
    assert_eq!(other["email"], "A@example.com");
}

#[tokio::test]
async fn update_to_another_users_email_is_400() {
    let app = app();
    let a = create(&app, "U1", "u1@example.com").await;
    let b = create(&app, "U2", "u2@example.com").await;

    let uri = format!("/users/{}", b["id"]);
    let res = send(&app, "PUT", &uri, Some(json!({ "email": a["email"] }))).await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(json_body(&res), json!({ "detail": "Email already exists" }));

    let res = send(&app, "GET", &uri, None).await;
    assert_eq!(json_body(&res), b);
}

#[tokio::test]
async fn update_with_own_email_and_empty_body_succeed() {
    let app = app();
    let user = create(&app, "Ivan", "ivan@example.com").await;
    create(&app, "Other", "other@example.com").await;

    let res = send(&app, "PUT", "/users/1", Some(json!({ "email": "ivan@example.com" }))).await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(json_body(&res), user);

    let res = send(&app, "PUT", "/users/1", Some(json!({}))).await;
    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(json_body(&res), user);
}

#[tokio::test]
async fn create_validation_is_422() {
    let app = app();
    for payload in [
        json!({ "name": "NoEmail" }),
        json!({ "email": "no-name@example.com" }),
        json!({ "name": "BadEmail", "email": "not-an-email" }),
        json!({ "name": "", "email": "empty@example.com" }),
        json!({ "name": "x".repeat(101), "email": "long@example.com" }),
    ] {
        let res = send(&app, "POST", "/users", Some(payload.clone())).await;
        assert_eq!(res.status_code(), Status::UnprocessableContent, "{payload}");
        assert!(json_body(&res)["detail"].is_array());
    }

    let res = send(&app, "GET", "/users", None).await;
    assert_eq!(json_body(&res), json!([]));
}

#[tokio::test]
async fn validation_detail_names_the_field() {
    let app = app();
    let res = send(&app, "POST", "/users", Some(json!({ "email": "no-name@example.com" }))).await;
    assert_eq!(
        json_body(&res),
        json!({ "detail": [{ "loc": ["body", "name"], "msg": "Field required", "type": "missing" }] })
    );
}

#[tokio::test]
async fn bad_path_ids_are_422() {
    let app = app();
    create(&app, "Ivan", "ivan@example.com").await;

    for (uri, kind) in [
        ("/users/0", "greater_than_equal"),
        ("/users/-1", "greater_than_equal"),
        ("/users/abc", "int_parsing"),
    ] {
        let res = send(&app, "GET", uri, None).await;
        assert_eq!(res.status_code(), Status::UnprocessableContent, "{uri}");
        assert_eq!(json_body(&res)["detail"][0]["loc"], json!(["path", "user_id"]));
        assert_eq!(json_body(&res)["detail"][0]["type"], kind, "{uri}");
    }
}

#[tokio::test]
async fn oversized_ids_are_unknown_users() {
    let app = app();
    create(&app, "Ivan", "ivan@example.com").await;
    let uri = "/users/99999999999999999999999";

    for method in ["GET", "DELETE"] {
        let res = send(&app, method, uri, None).await;
        assert_eq!(res.status_code(), Status::NotFound, "{method}");
        assert_eq!(json_body(&res), json!({ "detail": "User not found" }));
    }

    let res = send(&app, "PUT", uri, Some(json!({ "name": "Ivan Petrov" }))).await;
    assert_eq!(res.status_code(), Status::NotFound);

    let res = send(&app, "PUT", uri, Some(json!({ "name": "" }))).await;
    assert_eq!(res.status_code(), Status::UnprocessableContent);
}

#[tokio::test]
async fn put_checks_path_before_body_and_body_before_store() {
    let app = app();

    let res = send(&app, "PUT", "/users/0", Some(json!({ "name": "" }))).await;
    assert_eq!(json_body(&res)["detail"][0]["loc"], json!(["path", "user_id"]));

    let res = send(&app, "PUT", "/users/999", Some(json!({ "name": "" }))).await;
    assert_eq!(res.status_code(), Status::UnprocessableContent);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let app = app();
    create(&app, "A", "a@example.com").await;
    let b = create(&app, "B", "b@example.com").await;

    send(&app, "DELETE", &format!("/users/{}", b["id"]), None).await;
    let c = create(&app, "C", "c@example.com").await;
    assert_eq!(c["id"], 3);
}

#[tokio::test]
async fn list_keeps_creation_order() {
    let app = app();
    for (name, email) in [("A", "a@example.com"), ("B", "b@example.com"), ("C", "c@example.com")] {
        create(&app, name, email).await;
    }

    let res = send(&app, "GET", "/users", None).await;
    let names: Vec<Value> = json_body(&res)
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].clone())
        .collect();
    assert_eq!(names, [json!("A"), json!("B"), json!("C")]);
}

#[tokio::test]
async fn apps_with_separate_stores_are_isolated() {
    let first = app();
    let second = app();
    create(&first, "Ivan", "ivan@example.com").await;

    let res = send(&second, "GET", "/users", None).await;
    assert_eq!(json_body(&res), json!([]));
}

#[tokio::test]
async fn pages_and_probes() {
    let app = app();

    for uri in ["/", "/about"] {
        let res = send(&app, "GET", uri, None).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
        assert!(res.body().starts_with(b"<!doctype html>"));
    }

    assert_eq!(send(&app, "GET", "/healthz", None).await.body(), b"ok");
    assert_eq!(send(&app, "GET", "/readyz", None).await.body(), b"ready");
}

#[tokio::test]
async fn unrouted_requests() {
    let app = app();

    let res = send(&app, "GET", "/nowhere", None).await;
    assert_eq!(res.status_code(), Status::NotFound);
    assert_eq!(json_body(&res), json!({ "detail": "Not Found" }));

    let res = send(&app, "PATCH", "/users/1", Some(json!({}))).await;
    assert_eq!(res.status_code(), Status::MethodNotAllowed);
    assert_eq!(json_body(&res), json!({ "detail": "Method Not Allowed" }));
    assert_eq!(res.header("allow"), Some("DELETE, GET, PUT"));
}
