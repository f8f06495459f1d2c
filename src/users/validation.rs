//! Request validation for the user routes.
//!
//! Raw path segments and JSON bodies are turned into [`UserId`], [`NewUser`]
//! and [`UserPatch`] here, or rejected with a [`ValidationError`] that lists
//! every failing field. Nothing reaches the store unvalidated.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::model::{Change, NewUser, UserId, UserPatch};
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

pub const NAME_MAX_CHARS: usize = 100;

const EMAIL_LOCAL_MAX_LEN: usize = 64;
const EMAIL_MAX_LEN: usize = 254;

static EMAIL_LOCAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~.-]+$").expect("email local-part pattern compiles")
});

static DOMAIN_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?$").expect("domain label pattern compiles")
});

/// One rejected input location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Where the bad input sits, e.g. `["body", "email"]` or `["path", "user_id"]`.
    pub loc: Vec<&'static str>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    fn new(loc: Vec<&'static str>, msg: impl Into<String>, kind: &'static str) -> Self {
        Self { loc, msg: msg.into(), kind }
    }

    fn body(field: &'static str, msg: impl Into<String>, kind: &'static str) -> Self {
        Self::new(vec!["body", field], msg, kind)
    }
}

/// Malformed request input. Answered with `422` and the field list.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{} validation error(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    fn single(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    detail: &'a [FieldError],
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (Status::UnprocessableContent, Json(ValidationBody { detail: &self.errors })).into_response()
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Parses the `{id}` path segment: an integer ≥ 1.
///
/// `Ok(None)` is a well-formed id too large for [`UserId`]. No record can
/// carry it, so callers answer it like any other unknown id.
pub fn parse_user_id(raw: Option<&str>) -> Result<Option<UserId>, ValidationError> {
    let loc = || vec!["path", "user_id"];

    let Some(raw) = raw else {
        return Err(ValidationError::single(FieldError::new(loc(), "Field required", "missing")));
    };

    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::single(FieldError::new(
            loc(),
            "Input should be a valid integer, unable to parse string as an integer",
            "int_parsing",
        )));
    }
    if raw.starts_with('-') || digits.bytes().all(|b| b == b'0') {
        return Err(ValidationError::single(FieldError::new(
            loc(),
            "Input should be greater than or equal to 1",
            "greater_than_equal",
        )));
    }

    Ok(digits.parse::<UserId>().ok())
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Validates a `POST /users` body: `name` and `email` both required.
pub fn parse_new_user(body: &[u8]) -> Result<NewUser, ValidationError> {
    let object = body_object(body)?;
    let mut errors = Vec::new();

    let name = read_string(&object, "name", true, &mut errors)
        .and_then(|name| check_name(name, &mut errors));
    let email = read_string(&object, "email", true, &mut errors)
        .and_then(|email| check_email(email, &mut errors));

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(NewUser { name, email }),
        _ => Err(ValidationError { errors }),
    }
}

/// Validates a `PUT /users/{id}` body. Missing or `null` fields stay unchanged.
pub fn parse_user_patch(body: &[u8]) -> Result<UserPatch, ValidationError> {
    let object = body_object(body)?;
    let mut errors = Vec::new();

    let name = read_string(&object, "name", false, &mut errors)
        .and_then(|name| check_name(name, &mut errors));
    let email = read_string(&object, "email", false, &mut errors)
        .and_then(|email| check_email(email, &mut errors));

    if !errors.is_empty() {
        return Err(ValidationError { errors });
    }

    Ok(UserPatch {
        name: name.map_or(Change::Unchanged, Change::Set),
        email: email.map_or(Change::Unchanged, Change::Set),
    })
}

fn body_object(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    let body_error = |msg: &str, kind| ValidationError::single(FieldError::new(vec!["body"], msg, kind));

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(body_error("Field required", "missing"));
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(body_error(
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )),
        Err(e) => Err(body_error(&format!("JSON decode error: {e}"), "json_invalid")),
    }
}

/// Reads a string field. `null` counts as absent unless the field is required.
fn read_string(
    object: &Map<String, Value>,
    field: &'static str,
    required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        None if required => {
            errors.push(FieldError::body(field, "Field required", "missing"));
            None
        }
        None | Some(Value::Null) if !required => None,
        Some(_) | None => {
            errors.push(FieldError::body(field, "Input should be a valid string", "string_type"));
            None
        }
    }
}

fn check_name(name: String, errors: &mut Vec<FieldError>) -> Option<String> {
    let chars = name.chars().count();
    if chars == 0 {
        errors.push(FieldError::body("name", "String should have at least 1 character", "string_too_short"));
        None
    } else if chars > NAME_MAX_CHARS {
        errors.push(FieldError::body(
            "name",
            format!("String should have at most {NAME_MAX_CHARS} characters"),
            "string_too_long",
        ));
        None
    } else {
        Some(name)
    }
}

fn check_email(email: String, errors: &mut Vec<FieldError>) -> Option<String> {
    match normalize_email(&email) {
        Ok(email) => Some(email),
        Err(reason) => {
            errors.push(FieldError::body(
                "email",
                format!("value is not a valid email address: {reason}"),
                "value_error",
            ));
            None
        }
    }
}

/// Checks `local@domain` syntax and returns the address with its domain
/// lowercased. The local part is kept as written. No DNS.
pub fn normalize_email(email: &str) -> Result<String, &'static str> {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err("An email address must have an @-sign.");
    };

    if local.is_empty() {
        return Err("There must be something before the @-sign.");
    }
    if domain.is_empty() {
        return Err("There must be something after the @-sign.");
    }
    if email.len() > EMAIL_MAX_LEN {
        return Err("The email address is too long.");
    }
    if local.len() > EMAIL_LOCAL_MAX_LEN {
        return Err("The email address is too long before the @-sign.");
    }
    if !EMAIL_LOCAL.is_match(local) {
        return Err("The email address contains invalid characters before the @-sign.");
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err("The email address contains a misplaced period before the @-sign.");
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err("The part after the @-sign is not valid. It should have a period.");
    }
    if !labels.iter().all(|label| DOMAIN_LABEL.is_match(label)) {
        return Err("The part after the @-sign is not valid.");
    }
    if labels.last().is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit())) {
        return Err("The part after the @-sign is not valid. It is not within a valid top-level domain.");
    }

    Ok(format!("{local}@{}", domain.to_lowercase()))
}
