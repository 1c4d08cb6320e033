use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{self, FieldErrors};

/// Post entity - a titled entry owned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Replace the title and refresh `updated_at`.
    ///
    /// `updated_at` always moves forward, even when the clock has not ticked
    /// since the last write.
    pub fn retitle(&mut self, title: String) {
        let now = Utc::now();
        self.title = title;
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::TimeDelta::microseconds(1)
        };
    }

    /// Validate a raw title and apply it.
    pub fn apply_title(&mut self, title: Option<&Value>) -> Result<(), FieldErrors> {
        let title = validation::title(title)?;
        self.retitle(title);
        Ok(())
    }
}

/// A post that passed validation but has not been stored yet.
///
/// Storage assigns the id; both timestamps are taken at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    created_at: DateTime<Utc>,
}

impl NewPost {
    /// Build a new post from a raw title value.
    pub fn from_input(title: Option<&Value>) -> Result<Self, FieldErrors> {
        let title = validation::title(title)?;
        Ok(Self {
            title,
            created_at: Utc::now(),
        })
    }

    /// Build a new post from a title string.
    pub fn new(title: impl Into<String>) -> Result<Self, FieldErrors> {
        Self::from_input(Some(&Value::String(title.into())))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materialize with the id assigned by storage.
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_post_sets_both_timestamps() {
        let post = NewPost::new("Hello").unwrap().into_post(7);

        assert_eq!(post.id, 7);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_new_post_rejects_empty_title() {
        let errors = NewPost::new("").unwrap_err();
        assert!(errors.contains("title"));
    }

    #[test]
    fn test_retitle_keeps_identity_and_advances_updated_at() {
        let mut post = NewPost::new("Before").unwrap().into_post(1);
        let created_at = post.created_at;
        let updated_at = post.updated_at;

        post.retitle("After".to_string());

        assert_eq!(post.id, 1);
        assert_eq!(post.title, "After");
        assert_eq!(post.created_at, created_at);
        assert!(post.updated_at > updated_at);
    }

    #[test]
    fn test_apply_title_leaves_post_untouched_on_error() {
        let mut post = NewPost::new("Keep me").unwrap().into_post(1);
        let before = post.clone();

        let result = post.apply_title(Some(&json!("")));

        assert!(result.is_err());
        assert_eq!(post, before);
    }
}
