//! Topic classification by keyword substring counting.

use std::sync::Arc;

use serde::Serialize;

use crate::normalize::normalize;

use super::tables::Taxonomy;

/// Catch-all topic when no keyword matches.
pub const FALLBACK_TOPIC: &str = "geral";

/// Confidence added per keyword hit.
const CONFIDENCE_PER_HIT: f64 = 0.25;
/// Confidence never exceeds this, however many keywords hit.
const MAX_CONFIDENCE: f64 = 0.95;

/// Best-matching topic and a confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub topic: String,
    pub confidence: f64,
}

/// Scores text against a fixed, ordered taxonomy.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    taxonomy: Arc<Taxonomy>,
}

impl ContentClassifier {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Classify `title + " " + body`.
    ///
    /// Each topic scores the number of its keywords found as substrings
    /// of the folded text. The strictly greatest score wins; ties keep the
    /// topic listed first. Zero hits everywhere yields `"geral"` at `0.0`.
    pub fn classify(&self, title: &str, body: &str) -> Classification {
        let haystack = normalize(&format!("{} {}", title, body));

        let mut best: Option<(&str, usize)> = None;
        for topic in self.taxonomy.topics() {
            let hits = topic
                .folded_keywords()
                .iter()
                .filter(|k| haystack.contains(k.as_str()))
                .count();
            if hits > best.map(|(_, n)| n).unwrap_or(0) {
                best = Some((topic.name.as_str(), hits));
            }
        }

        match best {
            Some((topic, hits)) => Classification {
                topic: topic.to_string(),
                confidence: (hits as f64 * CONFIDENCE_PER_HIT).min(MAX_CONFIDENCE),
            },
            None => Classification {
                topic: FALLBACK_TOPIC.to_string(),
                confidence: 0.0,
            },
        }
    }
}
