use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, Post};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

struct Table {
    rows: BTreeMap<i64, Post>,
    last_id: i64,
}

/// In-memory post store keyed by id.
///
/// Ids start at 1 and are never reused, even after deletes.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&post.id) {
            Some(row) => {
                *row = post.clone();
                Ok(post)
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
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let post = post.into_post(table.last_id);
        table.rows.insert(post.id, post.clone());

        tracing::debug!(post_id = post.id, "Stored post in memory");
        Ok(post)
    }
}
