//! Binary denylist moderation.
//!
//! A single substring test over folded text. The confidence is a fixed
//! constant per outcome, never derived from the number of hits.

use std::sync::Arc;

use serde::Serialize;

use crate::normalize::normalize;

use super::tables::Denylist;

pub const FLAGGED_CONFIDENCE: f64 = 0.85;
pub const CLEAN_CONFIDENCE: f64 = 0.05;
pub const FLAGGED_REASON: &str = "Conteúdo potencialmente inapropriado detectado";
pub const CLEAN_REASON: &str = "Conteúdo apropriado";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationVerdict {
    pub flagged: bool,
    pub confidence: f64,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ContentModerator {
    denylist: Arc<Denylist>,
}

impl ContentModerator {
    pub fn new(denylist: Arc<Denylist>) -> Self {
        Self { denylist }
    }

    pub fn moderate(&self, content: &str) -> ModerationVerdict {
        if self.denylist.matches(&normalize(content)) {
            ModerationVerdict {
                flagged: true,
                confidence: FLAGGED_CONFIDENCE,
                reason: FLAGGED_REASON.to_string(),
            }
        } else {
            ModerationVerdict {
                flagged: false,
                confidence: CLEAN_CONFIDENCE,
                reason: CLEAN_REASON.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moderator() -> ContentModerator {
        ContentModerator::new(Arc::new(Denylist::builtin()))
    }

    #[test]
    fn test_spam_is_flagged() {
        let v = moderator().moderate("Isso é spam");
        assert!(v.flagged);
        assert_eq!(v.confidence, FLAGGED_CONFIDENCE);
        assert_eq!(v.reason, FLAGGED_REASON);
    }

    #[test]
    fn test_clean_content() {
        let v = moderator().moderate("This is appropriate educational content.");
        assert!(!v.flagged);
        assert_eq!(v.confidence, CLEAN_CONFIDENCE);
        assert_eq!(v.reason, CLEAN_REASON);
    }

    #[test]
    fn test_confidence_is_binary() {
        let m = moderator();
        let inputs = [
            "",
            "SPAM SPAM SPAM idiota lixo",
            "Você é ESTÚPIDO",
            "Uma ótima aula sobre frações",
            "   ",
        ];
        for input in inputs {
            let v = m.moderate(input);
            let expected = if v.flagged {
                FLAGGED_CONFIDENCE
            } else {
                CLEAN_CONFIDENCE
            };
            assert_eq!(v.confidence, expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_accent_folding_on_both_sides() {
        let m = ContentModerator::new(Arc::new(Denylist::new(vec!["Otário".to_string()]).unwrap()));
        assert!(m.moderate("que OTARIO").flagged);
        assert!(m.moderate("que otário").flagged);
    }
}
