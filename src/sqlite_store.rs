//! SQLite-backed [`PostStore`] implementation.
//!
//! The status filter is pushed down into SQL. Accent folding and trigram
//! similarity are evaluated in Rust over the surviving rows with
//! [`edublog_core::store::evaluate`], so both backends share one
//! definition of a match.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use edublog_core::models::{PostRecord, PostStatus};
use edublog_core::store::{evaluate, PostQuery, PostStore, StatusFilter};

/// SQLite implementation of the [`PostStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert a post, replacing any existing row with the same id.
    pub async fn insert_post(&self, post: &PostRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, body, author_name, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                body = excluded.body,
                author_name = excluded.author_name,
                status = excluded.status,
                created_at = excluded.created_at
            "#,
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.author_name)
        .bind(post.status.as_str())
        .bind(post.created_at.timestamp_micros())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count_posts(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_post(row: &SqliteRow) -> Result<PostRecord> {
    let status: String = row.get("status");
    let created_at: i64 = row.get("created_at");
    Ok(PostRecord {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        author_name: row.get("author_name"),
        status: status.parse::<PostStatus>().map_err(|e| anyhow!(e))?,
        created_at: DateTime::<Utc>::from_timestamp_micros(created_at)
            .ok_or_else(|| anyhow!("invalid created_at timestamp: {}", created_at))?,
        score: None,
    })
}

#[async_trait]
impl PostStore for SqliteStore {
    async fn query_posts(&self, query: &PostQuery) -> Result<Vec<PostRecord>> {
        let rows = match query.status_filter {
            StatusFilter::ActiveOnly => {
                sqlx::query(
                    "SELECT id, title, body, author_name, status, created_at
                     FROM posts WHERE status = ?",
                )
                .bind(PostStatus::Active.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            StatusFilter::All => {
                sqlx::query("SELECT id, title, body, author_name, status, created_at FROM posts")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let candidates = rows.iter().map(row_to_post).collect::<Result<Vec<_>>>()?;
        Ok(evaluate(query, candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use edublog_core::store::{OrderBy, Predicate};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::migrate::apply(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    fn post(id: &str, title: &str, status: PostStatus, day: u32) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            title: title.to_string(),
            body: "Conteúdo da aula.".to_string(),
            author_name: "Prof. Beatriz".to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 8, day, 10, 0, 0).unwrap(),
            score: None,
        }
    }

    #[tokio::test]
    async fn test_insert_replaces_same_id() {
        let store = memory_store().await;
        store
            .insert_post(&post("a", "Primeiro", PostStatus::Active, 1))
            .await
            .unwrap();
        store
            .insert_post(&post("a", "Revisado", PostStatus::Inactive, 1))
            .await
            .unwrap();
        assert_eq!(store.count_posts().await.unwrap(), 1);

        let all = store
            .query_posts(&PostQuery {
                predicate: Predicate::Contains("rev".to_string()),
                order: OrderBy::Recency,
                status_filter: StatusFilter::All,
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, PostStatus::Inactive);
    }

    #[tokio::test]
    async fn test_status_filter_pushed_down() {
        let store = memory_store().await;
        store
            .insert_post(&post("a", "Álgebra linear", PostStatus::Active, 1))
            .await
            .unwrap();
        store
            .insert_post(&post("b", "Álgebra abstrata", PostStatus::Inactive, 2))
            .await
            .unwrap();

        let q = |status_filter| PostQuery {
            predicate: Predicate::Contains("al".to_string()),
            order: OrderBy::Recency,
            status_filter,
        };
        let active = store.query_posts(&q(StatusFilter::ActiveOnly)).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "a");

        let all = store.query_posts(&q(StatusFilter::All)).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_timestamps_round_trip() {
        let store = memory_store().await;
        let original = post("a", "Geometria", PostStatus::Active, 15);
        store.insert_post(&original).await.unwrap();
        let out = store
            .query_posts(&PostQuery {
                predicate: Predicate::Similarity {
                    query: "geometria".to_string(),
                    min: 0.15,
                },
                order: OrderBy::SimilarityDesc,
                status_filter: StatusFilter::ActiveOnly,
            })
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].created_at, original.created_at);
        assert!(out[0].score.is_some());
    }

    #[tokio::test]
    async fn test_sub_second_timestamps_preserved() {
        let store = memory_store().await;
        // same second; the id tie-break alone would put "b" first
        let mut earlier = post("b", "Óptica", PostStatus::Active, 20);
        earlier.created_at += Duration::microseconds(123_456);
        let mut later = post("a", "Óptica", PostStatus::Active, 20);
        later.created_at += Duration::microseconds(123_457);
        store.insert_post(&later).await.unwrap();
        store.insert_post(&earlier).await.unwrap();

        let out = store
            .query_posts(&PostQuery {
                predicate: Predicate::Contains("op".to_string()),
                order: OrderBy::Recency,
                status_filter: StatusFilter::ActiveOnly,
            })
            .await
            .unwrap();
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(out[0].created_at, later.created_at);
        assert_eq!(out[1].created_at, earlier.created_at);
    }
}
