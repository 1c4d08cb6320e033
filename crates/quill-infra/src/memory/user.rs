use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{NewUser, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, UserRepository};

struct Table {
    rows: BTreeMap<i64, User>,
    last_id: i64,
}

/// In-memory user store. Emails are unique, compared case-insensitively.
pub struct InMemoryUserRepository {
    table: RwLock<Table>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn email_taken(table: &Table, email: &str, except: Option<i64>) -> bool {
    table
        .rows
        .values()
        .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut table = self.table.write().await;
        if email_taken(&table, &user.email, Some(user.id)) {
            return Err(RepoError::Constraint("Email already registered".to_string()));
        }
        match table.rows.get_mut(&user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(user)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut table = self.table.write().await;
        if email_taken(&table, &user.email, None) {
            return Err(RepoError::Constraint("Email already registered".to_string()));
        }
        table.last_id += 1;
        let user = user.into_user(table.last_id);
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}
