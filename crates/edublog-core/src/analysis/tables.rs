//! Versioned keyword tables driving classification and moderation.
//!
//! The topic taxonomy and the moderation denylist are data, not code:
//! they are loaded once (built-in defaults or the `[analysis]` config
//! section), validated, folded, and then shared immutably by `Arc`.
//!
//! Taxonomy order is significant. When two topics tie on keyword hits,
//! the one listed first wins.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::normalize::normalize;

/// Version tag of the built-in tables.
pub const BUILTIN_VERSION: &str = "1";

/// Built-in taxonomy, in tie-break order.
const BUILTIN_TOPICS: &[(&str, &[&str])] = &[
    (
        "tecnologia",
        &[
            "programação",
            "código",
            "sistema",
            "software",
            "computador",
            "algoritmo",
            "internet",
            "tecnologia",
        ],
    ),
    (
        "matemática",
        &[
            "matemática",
            "equação",
            "cálculo",
            "álgebra",
            "geometria",
            "número",
            "fração",
        ],
    ),
    (
        "ciências",
        &[
            "ciência",
            "biologia",
            "química",
            "física",
            "experimento",
            "laboratório",
        ],
    ),
    (
        "história",
        &["história", "guerra", "século", "revolução", "império"],
    ),
    (
        "linguagens",
        &[
            "gramática",
            "literatura",
            "redação",
            "poesia",
            "leitura",
            "português",
        ],
    ),
    (
        "educação",
        &[
            "aula",
            "estudante",
            "aluno",
            "professor",
            "escola",
            "ensino",
            "aprendizagem",
        ],
    ),
];

const BUILTIN_DENYLIST: &[&str] = &[
    "spam", "idiota", "imbecil", "estúpido", "burro", "otário", "lixo",
];

/// One topic as written in configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TopicSpec {
    pub name: String,
    pub keywords: Vec<String>,
}

/// A validated topic with pre-folded keywords.
#[derive(Debug, Clone)]
pub struct Topic {
    pub name: String,
    pub keywords: Vec<String>,
    folded: Vec<String>,
}

impl Topic {
    /// Keywords after accent and case folding.
    pub fn folded_keywords(&self) -> &[String] {
        &self.folded
    }
}

/// Ordered topic taxonomy.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    topics: Vec<Topic>,
}

impl Taxonomy {
    /// Validate and fold a list of topic specs.
    ///
    /// Rejects empty or duplicate topic names, topics with no keywords,
    /// and blank keywords.
    pub fn new(specs: Vec<TopicSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut topics = Vec::with_capacity(specs.len());

        for spec in specs {
            let name = spec.name.trim().to_string();
            if name.is_empty() {
                bail!("analysis.topics: topic name must not be empty");
            }
            if !seen.insert(name.clone()) {
                bail!("analysis.topics: duplicate topic '{}'", name);
            }
            if spec.keywords.is_empty() {
                bail!("analysis.topics: topic '{}' has no keywords", name);
            }
            if spec.keywords.iter().any(|k| k.trim().is_empty()) {
                bail!("analysis.topics: topic '{}' has a blank keyword", name);
            }
            let folded = spec.keywords.iter().map(|k| normalize(k.trim())).collect();
            topics.push(Topic {
                name,
                keywords: spec.keywords,
                folded,
            });
        }

        Ok(Self { topics })
    }

    pub fn builtin() -> Self {
        let specs = BUILTIN_TOPICS
            .iter()
            .map(|(name, keywords)| TopicSpec {
                name: name.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        // Built-in table is known-valid.
        Self::new(specs).unwrap_or(Self { topics: Vec::new() })
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }
}

/// Moderation denylist with pre-folded entries.
#[derive(Debug, Clone)]
pub struct Denylist {
    folded: Vec<String>,
}

impl Denylist {
    pub fn new(entries: Vec<String>) -> Result<Self> {
        if entries.iter().any(|e| e.trim().is_empty()) {
            bail!("analysis.denylist: entries must not be blank");
        }
        Ok(Self {
            folded: entries.iter().map(|e| normalize(e.trim())).collect(),
        })
    }

    pub fn builtin() -> Self {
        Self {
            folded: BUILTIN_DENYLIST.iter().map(|e| normalize(e)).collect(),
        }
    }

    /// True if any entry occurs in `folded_text`.
    pub fn matches(&self, folded_text: &str) -> bool {
        self.folded.iter().any(|e| folded_text.contains(e.as_str()))
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}

/// Immutable analysis tables shared by the classifier and the moderator.
#[derive(Debug, Clone)]
pub struct AnalysisTables {
    pub version: String,
    pub taxonomy: Arc<Taxonomy>,
    pub denylist: Arc<Denylist>,
}

impl AnalysisTables {
    pub fn new(version: String, taxonomy: Taxonomy, denylist: Denylist) -> Self {
        Self {
            version,
            taxonomy: Arc::new(taxonomy),
            denylist: Arc::new(denylist),
        }
    }
}

impl Default for AnalysisTables {
    fn default() -> Self {
        Self::new(
            BUILTIN_VERSION.to_string(),
            Taxonomy::builtin(),
            Denylist::builtin(),
        )
    }
}
