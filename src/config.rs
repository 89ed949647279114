//! TOML configuration parsing and validation.
//!
//! ```toml
//! [db]
//! path = "./data/edublog.sqlite"
//!
//! [server]
//! bind = "127.0.0.1:7340"
//!
//! [search]
//! student_min_similarity = 0.15
//! author_min_similarity = 0.05
//! exact_match_max_len = 2
//! timeout_ms = 5000
//!
//! [analysis]
//! version = "2"
//! denylist = ["spam", "idiota"]
//!
//! [[analysis.topics]]
//! name = "tecnologia"
//! keywords = ["programação", "código"]
//! ```
//!
//! `[search]` and `[analysis]` are optional. Without `[analysis]` the
//! built-in taxonomy and denylist are used; a config may override either
//! table independently.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use edublog_core::analysis::tables::{
    AnalysisTables, Denylist, Taxonomy, TopicSpec, BUILTIN_VERSION,
};
use edublog_core::query::{
    SearchThresholds, AUTHOR_MIN_SIMILARITY, EXACT_MATCH_MAX_LEN, STUDENT_MIN_SIMILARITY,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_student_min_similarity")]
    pub student_min_similarity: f64,
    #[serde(default = "default_author_min_similarity")]
    pub author_min_similarity: f64,
    #[serde(default = "default_exact_match_max_len")]
    pub exact_match_max_len: usize,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            student_min_similarity: STUDENT_MIN_SIMILARITY,
            author_min_similarity: AUTHOR_MIN_SIMILARITY,
            exact_match_max_len: EXACT_MATCH_MAX_LEN,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_student_min_similarity() -> f64 {
    STUDENT_MIN_SIMILARITY
}
fn default_author_min_similarity() -> f64 {
    AUTHOR_MIN_SIMILARITY
}
fn default_exact_match_max_len() -> usize {
    EXACT_MATCH_MAX_LEN
}
fn default_timeout_ms() -> u64 {
    5000
}

impl SearchConfig {
    pub fn thresholds(&self) -> SearchThresholds {
        SearchThresholds {
            student_min_similarity: self.student_min_similarity,
            author_min_similarity: self.author_min_similarity,
            exact_match_max_len: self.exact_match_max_len,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<TopicSpec>>,
    #[serde(default)]
    pub denylist: Option<Vec<String>>,
}

impl AnalysisConfig {
    /// Build the immutable analysis tables, falling back to the built-in
    /// taxonomy and denylist for whatever is not configured.
    pub fn tables(&self) -> Result<AnalysisTables> {
        let taxonomy = match &self.topics {
            Some(specs) => Taxonomy::new(specs.clone())?,
            None => Taxonomy::builtin(),
        };
        let denylist = match &self.denylist {
            Some(entries) => Denylist::new(entries.clone())?,
            None => Denylist::builtin(),
        };
        let version = self
            .version
            .clone()
            .unwrap_or_else(|| BUILTIN_VERSION.to_string());
        Ok(AnalysisTables::new(version, taxonomy, denylist))
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate search
    for (key, value) in [
        ("search.student_min_similarity", config.search.student_min_similarity),
        ("search.author_min_similarity", config.search.author_min_similarity),
    ] {
        if !(0.0..=1.0).contains(&value) {
            bail!("{} must be in [0.0, 1.0]", key);
        }
    }

    if config.search.timeout_ms == 0 {
        bail!("search.timeout_ms must be > 0");
    }

    // Validate analysis tables
    config.analysis.tables()?;

    Ok(config)
}
