//! Crude keyword extraction: no stopwords, no stemming.

/// Maximum number of tags per post.
pub const MAX_TAGS: usize = 5;

/// Tokens must be longer than this (in characters) to become tags.
const MIN_TAG_LEN: usize = 4;

/// Extract up to [`MAX_TAGS`] lowercase tags from `title + " " + body`.
///
/// Tokens are whitespace-separated and kept as-is, punctuation included,
/// so `"sistema."` and `"sistema"` are distinct tags. First-seen order is
/// kept and duplicates dropped.
pub fn tag(title: &str, body: &str) -> Vec<String> {
    let text = format!("{} {}", title, body).to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    for token in text.split_whitespace() {
        if token.chars().count() <= MIN_TAG_LEN {
            continue;
        }
        if tags.iter().any(|t| t == token) {
            continue;
        }
        tags.push(token.to_string());
        if tags.len() == MAX_TAGS {
            break;
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_long_tokens_in_order() {
        let tags = tag(
            "Aula de programação",
            "Hoje vamos estudar código em um novo sistema",
        );
        assert_eq!(
            tags,
            vec!["programação", "vamos", "estudar", "código", "sistema"]
        );
    }

    #[test]
    fn test_cap_and_dedup() {
        let tags = tag(
            "Geometria Geometria",
            "geometria triângulos círculos vetores matrizes funções limites",
        );
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags[0], "geometria");
        assert_eq!(tags.iter().filter(|t| *t == "geometria").count(), 1);
    }

    #[test]
    fn test_punctuation_stays_on_tokens() {
        let tags = tag("", "casa. (aula) sistema. sistema");
        assert_eq!(tags, vec!["casa.", "(aula)", "sistema.", "sistema"]);
        // punctuation counts toward the length
        assert!(tag("", "aula casa").is_empty());
    }

    #[test]
    fn test_boundary_length() {
        // four characters excluded, five kept
        assert_eq!(tag("casa", "livro"), vec!["livro"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tag("", "").is_empty());
    }

    #[test]
    fn test_never_more_than_five() {
        let long_body = (0..50)
            .map(|i| format!("palavra{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        assert!(tag("titulo longo demais", &long_body).len() <= MAX_TAGS);
    }
}
