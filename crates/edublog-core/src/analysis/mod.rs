//! Rule-based content analysis.
//!
//! A deterministic stand-in for a model-backed analysis service. Every
//! component is a total function over present text: degenerate input
//! (empty strings, odd punctuation) degrades to documented fallbacks
//! instead of failing. Only missing required fields are errors.
//!
//! | Component | Output |
//! |-----------|--------|
//! | [`tagger::tag`] | up to 5 lowercase keyword tags |
//! | [`summary::summarize`] | first two sentences, or `"Resumo não disponível"` |
//! | [`classifier::ContentClassifier`] | best topic + confidence, or `"geral"` |
//! | [`moderator::ContentModerator`] | binary denylist verdict |
//! | [`responder::AutoResponder`] | templated comment acknowledgment |
//! | [`suggest::ContentSuggester`] | templated post draft from a title |
//!
//! [`AnalysisOrchestrator`] composes the tagger, summarizer and
//! classifier into one `analyze` result, and wraps the moderator.

pub mod classifier;
pub mod moderator;
pub mod responder;
pub mod suggest;
pub mod summary;
pub mod tables;
pub mod tagger;

use serde::Serialize;

use crate::error::{Error, Result};

use classifier::{Classification, ContentClassifier};
use moderator::{ContentModerator, ModerationVerdict};
use tables::AnalysisTables;

/// Reading speed used for `reading_time_minutes`.
pub const WORDS_PER_MINUTE: usize = 200;

/// Text submitted for analysis. `title` may be absent for
/// moderation-only calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentInput {
    pub title: Option<String>,
    pub body: String,
}

impl ContentInput {
    /// Build from optional request fields; a missing body is rejected.
    pub fn new(title: Option<String>, body: Option<String>) -> Result<Self> {
        let body = body.ok_or_else(|| Error::InvalidInput("body is required".to_string()))?;
        Ok(Self { title, body })
    }
}

/// Combined output of [`AnalysisOrchestrator::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub tags: Vec<String>,
    pub summary: String,
    pub classification: Classification,
    pub word_count: usize,
    pub reading_time_minutes: usize,
}

/// Whitespace-token count.
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// `ceil(words / 200)`; zero words read in zero minutes.
pub fn reading_time_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

/// Composes the analysis components over shared, immutable tables.
#[derive(Debug, Clone)]
pub struct AnalysisOrchestrator {
    classifier: ContentClassifier,
    moderator: ContentModerator,
}

impl AnalysisOrchestrator {
    pub fn new(tables: &AnalysisTables) -> Self {
        Self {
            classifier: ContentClassifier::new(tables.taxonomy.clone()),
            moderator: ContentModerator::new(tables.denylist.clone()),
        }
    }

    /// Tags, summary, classification and reading statistics for a post.
    ///
    /// Requires a title; an empty title is accepted.
    pub fn analyze(&self, input: &ContentInput) -> Result<Analysis> {
        let title = input
            .title
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("title is required".to_string()))?;
        let body = input.body.as_str();

        let words = word_count(body);
        let analysis = Analysis {
            tags: tagger::tag(title, body),
            summary: summary::summarize(body),
            classification: self.classifier.classify(title, body),
            word_count: words,
            reading_time_minutes: reading_time_minutes(words),
        };

        tracing::debug!(
            topic = %analysis.classification.topic,
            words,
            tags = analysis.tags.len(),
            "analyzed content"
        );
        Ok(analysis)
    }

    pub fn moderate(&self, content: &str) -> ModerationVerdict {
        let verdict = self.moderator.moderate(content);
        if verdict.flagged {
            tracing::info!("content flagged by denylist");
        }
        verdict
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new(&AnalysisTables::default())
    }
}
