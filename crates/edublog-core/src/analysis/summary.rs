//! First-sentences summary.

/// Returned when the body has no sentence boundary to cut on.
pub const SUMMARY_FALLBACK: &str = "Resumo não disponível";

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Number of leading sentences kept.
const SUMMARY_SENTENCES: usize = 2;

/// Summarize `body` as its first two sentences joined with `". "`.
///
/// Fragments keep their own whitespace; only the joined result is trimmed,
/// so a sentence that followed `". "` in the body keeps its leading space.
/// A body with no `.`, `!` or `?` at all, or with only blank fragments
/// between them, yields [`SUMMARY_FALLBACK`].
pub fn summarize(body: &str) -> String {
    if !body.contains(SENTENCE_TERMINATORS) {
        return SUMMARY_FALLBACK.to_string();
    }

    let sentences: Vec<&str> = body
        .split(SENTENCE_TERMINATORS)
        .filter(|s| !s.trim().is_empty())
        .take(SUMMARY_SENTENCES)
        .collect();

    if sentences.is_empty() {
        return SUMMARY_FALLBACK.to_string();
    }

    sentences.join(". ").trim().to_string()
}
