//! Test-data builders.
//!
//! Each builder starts from valid, randomized defaults; override only the
//! fields a test cares about.
//!
//! ```ignore
//! let draft = factory::post().title("El titulo").build();
//! let saved = posts.create(draft).await?;
//! ```

use uuid::Uuid;

use crate::domain::{NewPost, NewUser};

fn token() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Start building a post.
pub fn post() -> PostFactory {
    PostFactory {
        title: format!("Post {}", token()),
    }
}

/// Start building a user.
pub fn user() -> UserFactory {
    let tag = token();
    UserFactory {
        name: format!("User {}", tag),
        email: format!("user-{}@example.com", tag),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$factory$unverifiable".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct PostFactory {
    title: String,
}

impl PostFactory {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// # Panics
    ///
    /// Panics if an overridden title does not pass validation.
    pub fn build(self) -> NewPost {
        NewPost::new(self.title).expect("factory post title must be valid")
    }

    /// Build `count` posts with distinct random titles.
    pub fn build_many(count: usize) -> Vec<NewPost> {
        (0..count).map(|_| post().build()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct UserFactory {
    name: String,
    email: String,
    password_hash: String,
}

impl UserFactory {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }

    pub fn build(self) -> NewUser {
        NewUser::new(self.name, self.email, self.password_hash)
    }
}
