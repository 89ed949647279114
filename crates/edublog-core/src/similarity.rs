//! Trigram similarity over folded text.
//!
//! Follows the PostgreSQL `pg_trgm` conventions: text is split into words
//! on non-alphanumeric characters, each word is padded with two leading
//! spaces and one trailing space, and the distinct three-character windows
//! form the trigram set.
//!
//! Callers pass text that has already been through
//! [`normalize`](crate::normalize::normalize).

use std::collections::HashSet;

/// Distinct trigrams of `text`.
pub fn trigrams(text: &str) -> HashSet<String> {
    let mut set = HashSet::new();
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        let padded: Vec<char> = "  ".chars().chain(word.chars()).chain(" ".chars()).collect();
        for window in padded.windows(3) {
            set.insert(window.iter().collect());
        }
    }
    set
}

/// Jaccard similarity of the trigram sets, in `[0.0, 1.0]`.
///
/// Used to rank fuzzy results. Two empty inputs score `0.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let ta = trigrams(a);
    let tb = trigrams(b);
    let union = ta.union(&tb).count();
    if union == 0 {
        return 0.0;
    }
    ta.intersection(&tb).count() as f64 / union as f64
}

/// Share of the query's trigrams present anywhere in `text`, in `[0.0, 1.0]`.
///
/// Used as the fuzzy filter: long posts are not penalized for everything
/// else they talk about.
pub fn word_similarity(query: &str, text: &str) -> f64 {
    let tq = trigrams(query);
    if tq.is_empty() {
        return 0.0;
    }
    let tt = trigrams(text);
    tq.intersection(&tt).count() as f64 / tq.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigrams_padding() {
        let t = trigrams("cat");
        let expected: HashSet<String> = ["  c", " ca", "cat", "at "]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(t, expected);
    }

    #[test]
    fn test_trigrams_split_on_punctuation() {
        let t = trigrams("a-b");
        assert!(t.contains("  a"));
        assert!(t.contains("  b"));
        assert!(!t.iter().any(|g| g.contains('-')));
    }

    #[test]
    fn test_identical_strings_score_one() {
        assert!((similarity("geometria plana", "geometria plana") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn test_similarity_in_unit_range() {
        let pairs = [
            ("programacao", "programacao funcional em rust"),
            ("historia", "a historia do brasil"),
            ("x", "xx"),
        ];
        for (a, b) in pairs {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s), "out of range: {}", s);
        }
    }

    #[test]
    fn test_word_similarity_full_containment() {
        let ws = word_similarity("algebra", "introducao a algebra linear para calouros");
        assert!((ws - 1.0).abs() < 1e-12);
        assert!(similarity("algebra", "introducao a algebra linear para calouros") < ws);
    }

    #[test]
    fn test_word_similarity_typo_still_matches() {
        let ws = word_similarity("geometira", "aula de geometria");
        assert!(ws > 0.15, "typo should keep partial overlap, got {}", ws);
    }

    #[test]
    fn test_word_similarity_empty_query() {
        assert_eq!(word_similarity("", "anything"), 0.0);
    }
}
