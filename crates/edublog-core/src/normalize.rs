//! Accent and case folding.
//!
//! Every comparison in the search path and the analysis pipeline runs on
//! folded text on both sides. Folded text is never compared against raw
//! text.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold diacritics and case: `"Programação"` becomes `"programacao"`.
///
/// Decomposes to NFD, drops combining marks, then lowercases. The result
/// is stable under a second application.
///
/// ```rust
/// use edublog_core::normalize::normalize;
///
/// assert_eq!(normalize("Ciências É"), "ciencias e");
/// ```
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
