//! Field-level input validation.
//!
//! Rules run before any storage access. Failures are collected per field so a
//! client sees every problem with its payload in one response.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Maximum length of a post title, in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// Maximum length of a user name, in characters.
pub const NAME_MAX_CHARS: usize = 255;

/// Minimum length of a password, in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when no rule failed, otherwise the collected errors.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Check a required string field.
///
/// Surrounding whitespace is trimmed and a blank value counts as missing.
/// Returns the trimmed value when it passes, recording a message otherwise.
pub fn required_string(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&Value>,
    max_chars: Option<usize>,
) -> Option<String> {
    let raw = match value {
        None | Some(Value::Null) => {
            errors.add(field, format!("The {} field is required.", field));
            return None;
        }
        Some(Value::String(s)) => s.trim(),
        Some(_) => {
            errors.add(field, format!("The {} must be a string.", field));
            return None;
        }
    };

    if raw.is_empty() {
        errors.add(field, format!("The {} field is required.", field));
        return None;
    }

    if let Some(max) = max_chars {
        if raw.chars().count() > max {
            errors.add(
                field,
                format!("The {} may not be greater than {} characters.", field, max),
            );
            return None;
        }
    }

    Some(raw.to_string())
}

/// Validate a post title.
pub fn title(value: Option<&Value>) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::new();
    let title = required_string(&mut errors, "title", value, Some(TITLE_MAX_CHARS));
    match title {
        Some(title) => errors.finish(title),
        None => Err(errors),
    }
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validate a registration payload.
pub fn registration(
    name: Option<&Value>,
    email: Option<&Value>,
    password: Option<&Value>,
) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required_string(&mut errors, "name", name, Some(NAME_MAX_CHARS));

    let email = required_string(&mut errors, "email", email, Some(NAME_MAX_CHARS));
    let email = email.filter(|e| {
        let valid = e.contains('@');
        if !valid {
            errors.add("email", "The email must be a valid email address.");
        }
        valid
    });

    let password = required_string(&mut errors, "password", password, None);
    let password = password.filter(|p| {
        let valid = p.chars().count() >= PASSWORD_MIN_CHARS;
        if !valid {
            errors.add(
                "password",
                format!(
                    "The password must be at least {} characters.",
                    PASSWORD_MIN_CHARS
                ),
            );
        }
        valid
    });

    match (name, email, password) {
        (Some(name), Some(email), Some(password)) => errors.finish(Registration {
            name,
            email: email.to_lowercase(),
            password,
        }),
        _ => Err(errors),
    }
}

/// Validated login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validate a login payload. Only presence is checked here.
pub fn credentials(email: Option<&Value>, password: Option<&Value>) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = required_string(&mut errors, "email", email, Some(NAME_MAX_CHARS));
    let password = required_string(&mut errors, "password", password, None);

    match (email, password) {
        (Some(email), Some(password)) => errors.finish(Credentials {
            email: email.to_lowercase(),
            password,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_accepts_and_trims() {
        let value = json!("  El titulo ");
        assert_eq!(title(Some(&value)).unwrap(), "El titulo");
    }

    #[test]
    fn test_title_empty_is_required_error() {
        let value = json!("");
        let errors = title(Some(&value)).unwrap_err();
        assert!(errors.contains("title"));
        assert_eq!(errors.messages("title"), ["The title field is required."]);
    }

    #[test]
    fn test_title_whitespace_only_is_rejected() {
        let value = json!("   ");
        assert!(title(Some(&value)).unwrap_err().contains("title"));
    }

    #[test]
    fn test_title_missing_and_null() {
        assert!(title(None).unwrap_err().contains("title"));
        assert!(title(Some(&Value::Null)).unwrap_err().contains("title"));
    }

    #[test]
    fn test_title_must_be_string() {
        let value = json!(42);
        let errors = title(Some(&value)).unwrap_err();
        assert_eq!(errors.messages("title"), ["The title must be a string."]);
    }

    #[test]
    fn test_title_length_limit_counts_characters() {
        let at_limit = Value::String("ñ".repeat(TITLE_MAX_CHARS));
        assert!(title(Some(&at_limit)).is_ok());

        let over = Value::String("a".repeat(TITLE_MAX_CHARS + 1));
        assert!(title(Some(&over)).unwrap_err().contains("title"));
    }

    #[test]
    fn test_registration_collects_every_field() {
        let errors = registration(None, Some(&json!("nope")), Some(&json!("short"))).unwrap_err();

        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["email", "name", "password"]);
    }

    #[test]
    fn test_registration_normalizes_email() {
        let reg = registration(
            Some(&json!("Ana")),
            Some(&json!("Ana@Example.com")),
            Some(&json!("secret-password")),
        )
        .unwrap();

        assert_eq!(reg.email, "ana@example.com");
        assert_eq!(reg.name, "Ana");
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.add("title", "The title field is required.");
        assert_eq!(errors.to_string(), "title: The title field is required.");
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let email = json!("Ana@Example.com");
        let errors = credentials(Some(&email), None).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["password"]);

        let password = json!("correct-horse");
        let ok = credentials(Some(&email), Some(&password)).unwrap();
        assert_eq!(ok.email, "ana@example.com");
    }
}
