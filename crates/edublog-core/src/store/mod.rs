//! Storage abstraction for post search.
//!
//! The [`PostStore`] trait is the single read operation the search path
//! needs from persistence: a predicate, an ordering, and an audience
//! status filter in; an ordered list of posts out. Backends (SQLite,
//! in-memory) live behind it.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.
//!
//! # Ordering contract
//!
//! | [`OrderBy`] | Sort keys |
//! |-------------|-----------|
//! | `Recency` | `created_at` desc, `id` desc |
//! | `SimilarityDesc` | score desc, `created_at` desc, `id` desc |

pub mod memory;

use std::cmp::Ordering;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{PostRecord, PostStatus};
use crate::normalize::normalize;
use crate::similarity::{similarity, word_similarity};

/// Which posts match.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Folded title or folded body contains the folded pattern.
    Contains(String),
    /// Word similarity between the folded query and folded
    /// `title + " " + body` is strictly greater than `min`.
    Similarity { query: String, min: f64 },
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Recency,
    SimilarityDesc,
}

/// Status filter derived from the audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    ActiveOnly,
    All,
}

impl StatusFilter {
    pub fn admits(&self, status: PostStatus) -> bool {
        match self {
            StatusFilter::ActiveOnly => status == PostStatus::Active,
            StatusFilter::All => true,
        }
    }
}

/// Everything a store needs to answer one search.
#[derive(Debug, Clone, PartialEq)]
pub struct PostQuery {
    pub predicate: Predicate,
    pub order: OrderBy,
    pub status_filter: StatusFilter,
}

/// Abstract read-side storage for posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Return the posts matching `query`, already ordered.
    async fn query_posts(&self, query: &PostQuery) -> Result<Vec<PostRecord>>;
}

/// Apply `query` to already-loaded candidate posts.
///
/// Shared by backends that cannot evaluate folding or trigram similarity
/// natively. Filters by status and predicate, fills `score` for
/// similarity predicates, and sorts per the ordering contract.
pub fn evaluate(query: &PostQuery, candidates: Vec<PostRecord>) -> Vec<PostRecord> {
    let mut matched: Vec<PostRecord> = candidates
        .into_iter()
        .filter(|p| query.status_filter.admits(p.status))
        .filter_map(|mut p| match &query.predicate {
            Predicate::Contains(pattern) => {
                let pattern = normalize(pattern);
                if normalize(&p.title).contains(&pattern) || normalize(&p.body).contains(&pattern)
                {
                    p.score = None;
                    Some(p)
                } else {
                    None
                }
            }
            Predicate::Similarity { query: q, min } => {
                let q = normalize(q);
                let haystack = normalize(&format!("{} {}", p.title, p.body));
                if word_similarity(&q, &haystack) > *min {
                    p.score = Some(similarity(&q, &haystack));
                    Some(p)
                } else {
                    None
                }
            }
        })
        .collect();

    sort_posts(&mut matched, query.order);
    matched
}

/// Sort posts per the ordering contract.
pub fn sort_posts(posts: &mut [PostRecord], order: OrderBy) {
    let recency = |a: &PostRecord, b: &PostRecord| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    };
    match order {
        OrderBy::Recency => posts.sort_by(recency),
        OrderBy::SimilarityDesc => posts.sort_by(|a, b| {
            let sa = a.score.unwrap_or(0.0);
            let sb = b.score.unwrap_or(0.0);
            sb.partial_cmp(&sa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| recency(a, b))
        }),
    }
}
