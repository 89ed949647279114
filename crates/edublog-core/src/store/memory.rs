//! In-memory [`PostStore`] implementation for tests and embedding.
//!
//! Posts live in a `Vec` behind `std::sync::RwLock`. Every query is a full
//! scan evaluated by [`evaluate`](super::evaluate).

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::PostRecord;

use super::{evaluate, PostQuery, PostStore};

/// In-memory store for testing.
pub struct InMemoryStore {
    posts: RwLock<Vec<PostRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    /// Insert a post, replacing any existing post with the same id.
    pub fn insert(&self, post: PostRecord) -> Result<()> {
        let mut posts = self
            .posts
            .write()
            .map_err(|_| anyhow!("post store lock poisoned"))?;
        posts.retain(|p| p.id != post.id);
        posts.push(post);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.posts.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<PostRecord> for InMemoryStore {
    fn from_iter<I: IntoIterator<Item = PostRecord>>(iter: I) -> Self {
        Self {
            posts: RwLock::new(iter.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn query_posts(&self, query: &PostQuery) -> Result<Vec<PostRecord>> {
        let snapshot = self
            .posts
            .read()
            .map_err(|_| anyhow!("post store lock poisoned"))?
            .clone();
        Ok(evaluate(query, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostStatus;
    use crate::store::{OrderBy, Predicate, StatusFilter};
    use chrono::Utc;

    fn post(id: &str, title: &str) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            title: title.to_string(),
            body: String::new(),
            author_name: "Prof. Ana".to_string(),
            status: PostStatus::Active,
            created_at: Utc::now(),
            score: None,
        }
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let store = InMemoryStore::new();
        store.insert(post("1", "Primeiro")).unwrap();
        store.insert(post("1", "Revisado")).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_query_scans_all_posts() {
        let store: InMemoryStore = vec![post("1", "Frações"), post("2", "Biologia")]
            .into_iter()
            .collect();
        let out = store
            .query_posts(&PostQuery {
                predicate: Predicate::Contains("fra".to_string()),
                order: OrderBy::Recency,
                status_filter: StatusFilter::All,
            })
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Frações");
    }
}
