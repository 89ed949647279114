//! Bulk post import from a JSON file.
//!
//! The file holds an array of posts:
//!
//! ```json
//! [
//!   {
//!     "title": "Introdução à Programação",
//!     "body": "Variáveis e laços.",
//!     "author_name": "Prof. Ana",
//!     "status": "ativo",
//!     "created_at": "2024-03-01T12:00:00Z"
//!   }
//! ]
//! ```
//!
//! `id`, `status` and `created_at` are optional. Missing ids get a fresh
//! UUID v4, missing status defaults to `ativo`, missing timestamps to now.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use uuid::Uuid;

use edublog_core::models::{PostRecord, PostStatus};

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    pub author_name: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn into_record(self) -> PostRecord {
        PostRecord {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title,
            body: self.body,
            author_name: self.author_name,
            status: self.status,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            score: None,
        }
    }
}

/// Parse a JSON array of posts.
pub fn parse_posts(json: &str) -> Result<Vec<NewPost>> {
    serde_json::from_str(json).with_context(|| "Failed to parse posts JSON")
}

/// Insert every post into `store`, returning the number written.
pub async fn import_posts(store: &SqliteStore, posts: Vec<NewPost>) -> Result<usize> {
    let mut written = 0;
    for post in posts {
        let record = post.into_record();
        store
            .insert_post(&record)
            .await
            .with_context(|| format!("Failed to insert post {}", record.id))?;
        written += 1;
    }
    Ok(written)
}

pub async fn run_import(config: &Config, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read posts file: {}", file.display()))?;
    let posts = parse_posts(&content)?;

    let pool = db::connect(config).await?;
    crate::migrate::apply(&pool).await?;
    let store = SqliteStore::new(pool);

    let written = import_posts(&store, posts).await?;
    let total = store.count_posts().await?;
    store.pool().close().await;

    tracing::info!(written, total, "import complete");
    println!("Imported {} posts ({} total).", written, total);
    Ok(())
}
