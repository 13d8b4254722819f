//! Field rules shared by the request schemas, for use with
//! `#[validate(custom(function = "..."))]`.

use mongodb::bson::oid::ObjectId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

// `(?-u)`: word, digit and space classes are ASCII only.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("valid email regex")
});

pub static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^(\+?\d{1,3}\s?-?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{2}[\s.-]?\d{2}$")
        .expect("valid phone regex")
});

pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 20;

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(rule("email", "\"Email\" doesn't look like an email"))
    }
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(rule("phone", "\"Phone\" doesn't look like a phone"))
    }
}

/// 8 to 20 characters with at least one ASCII digit, one ASCII lowercase
/// and one ASCII uppercase letter.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let length = value.chars().count();
    let valid = (PASSWORD_MIN..=PASSWORD_MAX).contains(&length)
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase());

    if valid {
        Ok(())
    } else {
        Err(rule(
            "password",
            "\"Password\" must be 8-20 characters with a digit, a lowercase and an uppercase letter",
        ))
    }
}

pub fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    ObjectId::parse_str(value)
        .map(|_| ())
        .map_err(|_| rule("object_id", "must be a valid id"))
}

/// Message of the first violated rule.
///
/// Fields are visited in name order and nested paths are joined with `.`
/// (`client.email`, `items[0].name`) so the choice is stable between runs.
pub fn first_message(errors: &ValidationErrors) -> String {
    first_in(errors, "").unwrap_or_else(|| "Request validation failed".to_string())
}

fn first_in(errors: &ValidationErrors, prefix: &str) -> Option<String> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields.into_iter().find_map(|(field, kind)| {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|error| match &error.message {
                Some(message) if path.contains('.') || path.contains('[') => {
                    format!("{path}: {message}")
                }
                Some(message) => message.to_string(),
                None => format!("{path} is invalid"),
            }),
            ValidationErrorsKind::Struct(inner) => first_in(inner, &path),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(index, inner)| first_in(inner, &format!("{path}[{index}]"))),
        }
    })
}
