//! Query routing: decide per request between exact substring matching
//! and fuzzy similarity-ranked matching.
//!
//! Trigram similarity degenerates for very short strings (one or two
//! characters yield almost no trigrams), so short queries fall back to
//! substring containment instead of ranked similarity.
//!
//! ```rust
//! use edublog_core::query::{classify, SearchStrategy, SearchThresholds};
//! use edublog_core::Audience;
//!
//! let t = SearchThresholds::default();
//! let s = classify("Programação", Audience::Student, &t).unwrap();
//! assert_eq!(
//!     s,
//!     SearchStrategy::FuzzyMatch { normalized_query: "programacao".into(), min_similarity: 0.15 }
//! );
//! ```

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::Audience;
use crate::normalize::normalize;

/// Default fuzzy threshold for students (stricter).
pub const STUDENT_MIN_SIMILARITY: f64 = 0.15;
/// Default fuzzy threshold for authors (looser, favors recall).
pub const AUTHOR_MIN_SIMILARITY: f64 = 0.05;
/// Queries with at most this many characters use exact matching.
pub const EXACT_MATCH_MAX_LEN: usize = 2;

/// How a single search request is executed against the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Folded substring containment. The store wraps `pattern` with
    /// wildcards on both ends.
    ExactMatch { pattern: String },
    /// Similarity-ranked match over folded `title + " " + body`.
    FuzzyMatch {
        normalized_query: String,
        min_similarity: f64,
    },
}

/// Routing tuning parameters, decoupled from application config.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchThresholds {
    pub student_min_similarity: f64,
    pub author_min_similarity: f64,
    pub exact_match_max_len: usize,
}

impl Default for SearchThresholds {
    fn default() -> Self {
        Self {
            student_min_similarity: STUDENT_MIN_SIMILARITY,
            author_min_similarity: AUTHOR_MIN_SIMILARITY,
            exact_match_max_len: EXACT_MATCH_MAX_LEN,
        }
    }
}

impl SearchThresholds {
    pub fn min_similarity(&self, audience: Audience) -> f64 {
        match audience {
            Audience::Student => self.student_min_similarity,
            Audience::Author => self.author_min_similarity,
        }
    }
}

/// Pick the search strategy for `raw_query`.
///
/// Length is measured in characters of the trimmed query, before folding.
pub fn classify(
    raw_query: &str,
    audience: Audience,
    thresholds: &SearchThresholds,
) -> Result<SearchStrategy> {
    let trimmed = raw_query.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidQuery);
    }

    if trimmed.chars().count() <= thresholds.exact_match_max_len {
        return Ok(SearchStrategy::ExactMatch {
            pattern: normalize(trimmed),
        });
    }

    Ok(SearchStrategy::FuzzyMatch {
        normalized_query: normalize(trimmed),
        min_similarity: thresholds.min_similarity(audience),
    })
}
