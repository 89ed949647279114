//! Search execution over a [`PostStore`].
//!
//! Translates a [`SearchStrategy`] into a [`PostQuery`] and issues a single
//! read. The audience decides the status filter; the strategy decides the
//! predicate and ordering:
//!
//! | Strategy | Predicate | Order |
//! |----------|-----------|-------|
//! | `ExactMatch` | folded substring in title or body | newest first |
//! | `FuzzyMatch` | word similarity `> min_similarity` | similarity desc, then newest |
//!
//! Store failures surface as [`Error::SearchUnavailable`]; results are
//! never partially returned. Bounding the read with a timeout is the
//! caller's job (the app wraps this in `tokio::time::timeout`).

use crate::error::{Error, Result};
use crate::models::{Audience, PostRecord};
use crate::query::{classify, SearchStrategy, SearchThresholds};
use crate::store::{OrderBy, PostQuery, PostStore, Predicate, StatusFilter};

/// Build the store query for a strategy and audience.
pub fn build_query(strategy: &SearchStrategy, audience: Audience) -> PostQuery {
    let status_filter = match audience {
        Audience::Student => StatusFilter::ActiveOnly,
        Audience::Author => StatusFilter::All,
    };

    match strategy {
        SearchStrategy::ExactMatch { pattern } => PostQuery {
            predicate: Predicate::Contains(pattern.clone()),
            order: OrderBy::Recency,
            status_filter,
        },
        SearchStrategy::FuzzyMatch {
            normalized_query,
            min_similarity,
        } => PostQuery {
            predicate: Predicate::Similarity {
                query: normalized_query.clone(),
                min: *min_similarity,
            },
            order: OrderBy::SimilarityDesc,
            status_filter,
        },
    }
}

/// Run one strategy against the store.
pub async fn execute<S: PostStore + ?Sized>(
    store: &S,
    strategy: &SearchStrategy,
    audience: Audience,
) -> Result<Vec<PostRecord>> {
    let query = build_query(strategy, audience);
    tracing::debug!(?query, %audience, "executing post search");

    store.query_posts(&query).await.map_err(|e| {
        tracing::warn!(error = %e, "post store query failed");
        Error::SearchUnavailable(e.to_string())
    })
}

/// Classify `raw_query` and execute the resulting strategy.
///
/// This is the entry point shared by the CLI and the HTTP server.
pub async fn search<S: PostStore + ?Sized>(
    store: &S,
    raw_query: &str,
    audience: Audience,
    thresholds: &SearchThresholds,
) -> Result<Vec<PostRecord>> {
    let strategy = classify(raw_query, audience, thresholds)?;
    execute(store, &strategy, audience).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostStatus;
    use crate::store::memory::InMemoryStore;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    struct FailingStore;

    #[async_trait]
    impl PostStore for FailingStore {
        async fn query_posts(&self, _query: &PostQuery) -> anyhow::Result<Vec<PostRecord>> {
            Err(anyhow!("connection refused"))
        }
    }

    fn post(id: &str, title: &str, body: &str, status: PostStatus, day: u32) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            author_name: "Prof. Carlos".to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap(),
            score: None,
        }
    }

    fn fixture() -> InMemoryStore {
        vec![
            post(
                "p1",
                "Introdução à Programação",
                "Variáveis e laços em Python.",
                PostStatus::Active,
                1,
            ),
            post(
                "p2",
                "Programação orientada a objetos",
                "Classes e herança.",
                PostStatus::Inactive,
                2,
            ),
            post(
                "p3",
                "Segunda Guerra Mundial",
                "A história da Europa no século XX.",
                PostStatus::Active,
                3,
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_build_query_exact() {
        let q = build_query(
            &SearchStrategy::ExactMatch {
                pattern: "py".to_string(),
            },
            Audience::Student,
        );
        assert_eq!(q.predicate, Predicate::Contains("py".to_string()));
        assert_eq!(q.order, OrderBy::Recency);
        assert_eq!(q.status_filter, StatusFilter::ActiveOnly);
    }

    #[test]
    fn test_build_query_fuzzy_author() {
        let q = build_query(
            &SearchStrategy::FuzzyMatch {
                normalized_query: "programacao".to_string(),
                min_similarity: 0.05,
            },
            Audience::Author,
        );
        assert_eq!(q.order, OrderBy::SimilarityDesc);
        assert_eq!(q.status_filter, StatusFilter::All);
    }

    #[tokio::test]
    async fn test_store_failure_is_search_unavailable() {
        let err = search(
            &FailingStore,
            "programação",
            Audience::Student,
            &SearchThresholds::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::SearchUnavailable(_)));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_empty_query_never_reaches_store() {
        let err = search(&FailingStore, "  ", Audience::Author, &SearchThresholds::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidQuery));
    }

    #[tokio::test]
    async fn test_student_sees_only_active_posts() {
        let store = fixture();
        let results = search(
            &store,
            "Programacao",
            Audience::Student,
            &SearchThresholds::default(),
        )
        .await
        .unwrap();
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1"]);
    }

    #[tokio::test]
    async fn test_author_sees_all_statuses() {
        let store = fixture();
        let results = search(
            &store,
            "programação",
            Audience::Author,
            &SearchThresholds::default(),
        )
        .await
        .unwrap();
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert!(ids.contains(&"p1"));
        assert!(ids.contains(&"p2"));
        assert!(results.iter().all(|p| p.score.is_some()));
    }

    #[tokio::test]
    async fn test_short_query_orders_by_recency() {
        let store = fixture();
        let results = search(&store, "ç", Audience::Author, &SearchThresholds::default())
            .await
            .unwrap();
        // "ç" folds to "c", present in every fixture post.
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p2", "p1"]);
    }
}
