//! Time-bounded post search over the SQLite store.
//!
//! Wraps [`edublog_core::search::search`] in `tokio::time::timeout`. A
//! store that does not answer within `[search] timeout_ms` surfaces as
//! [`Error::SearchUnavailable`], the same as a store failure.

use anyhow::Result;

use edublog_core::models::{Audience, PostRecord};
use edublog_core::store::PostStore;
use edublog_core::Error;

use crate::config::{Config, SearchConfig};
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Search `store` for `raw_query` on behalf of `audience`.
pub async fn search_posts<S: PostStore + ?Sized>(
    store: &S,
    raw_query: &str,
    audience: Audience,
    settings: &SearchConfig,
) -> edublog_core::Result<Vec<PostRecord>> {
    let thresholds = settings.thresholds();
    let started = std::time::Instant::now();

    let results = tokio::time::timeout(
        settings.timeout(),
        edublog_core::search::search(store, raw_query, audience, &thresholds),
    )
    .await
    .map_err(|_| {
        tracing::warn!(timeout_ms = settings.timeout_ms, "post search timed out");
        Error::SearchUnavailable(format!(
            "search timed out after {} ms",
            settings.timeout_ms
        ))
    })??;

    tracing::info!(
        %audience,
        results = results.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "post search"
    );
    Ok(results)
}

pub async fn run_search(config: &Config, query: &str, audience: Audience) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);

    let results = search_posts(&store, query, audience, &config.search).await;
    store.pool().close().await;
    let results = results?;

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, post) in results.iter().enumerate() {
        let score = post
            .score
            .map(|s| format!("  score={:.2}", s))
            .unwrap_or_default();
        println!(
            "{}. {} [{}]{}",
            i + 1,
            post.title,
            post.status.as_str(),
            score
        );
        println!(
            "   id={}  author={}  created={}",
            post.id,
            post.author_name,
            post.created_at.format("%Y-%m-%d")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edublog_core::store::memory::InMemoryStore;
    use edublog_core::store::PostQuery;
    use std::time::Duration;

    struct SlowStore;

    #[async_trait]
    impl PostStore for SlowStore {
        async fn query_posts(&self, _query: &PostQuery) -> anyhow::Result<Vec<PostRecord>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    fn settings(timeout_ms: u64) -> SearchConfig {
        SearchConfig {
            timeout_ms,
            ..SearchConfig::default()
        }
    }

    #[tokio::test]
    async fn test_timeout_maps_to_unavailable() {
        let err = search_posts(&SlowStore, "geografia", Audience::Student, &settings(20))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SearchUnavailable(_)));
    }

    #[tokio::test]
    async fn test_invalid_query_passes_through() {
        let err = search_posts(&InMemoryStore::new(), " ", Audience::Student, &settings(1000))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidQuery));
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty() {
        let results = search_posts(
            &InMemoryStore::new(),
            "geografia",
            Audience::Author,
            &settings(1000),
        )
        .await
        .unwrap();
        assert!(results.is_empty());
    }
}
