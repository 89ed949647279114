//! Post content suggestions from a title.

use serde::Serialize;

use crate::error::{Error, Result};

use super::responder::{choose, RandomChoice, ThreadRandom};

const SUGGESTION_TEMPLATES: &[&str] = &[
    "Aqui está um ótimo conteúdo sobre {title}. É importante destacar os pontos principais e engajar a audiência.",
    "Explorando o tema {title}, podemos observar diversas nuances interessantes. Aprofunde-se nos detalhes!",
    "Dicas valiosas sobre {title}: 1. Planejamento, 2. Execução, 3. Revisão. Espero que ajude!",
    "Pensando em {title}? Considere abordar os desafios comuns e como superá-los.",
    "Uma perspectiva inovadora sobre {title} pode ser a chave para um post de sucesso.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub content: String,
}

/// Drafts an opening paragraph for a post from its title.
pub struct ContentSuggester {
    rng: Box<dyn RandomChoice>,
}

impl ContentSuggester {
    pub fn new(rng: Box<dyn RandomChoice>) -> Self {
        Self { rng }
    }

    pub fn suggest(&self, title: &str) -> Result<Suggestion> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput(
                "title is required to generate a suggestion".to_string(),
            ));
        }
        let template = choose(self.rng.as_ref(), SUGGESTION_TEMPLATES)
            .copied()
            .unwrap_or(SUGGESTION_TEMPLATES[0]);
        Ok(Suggestion {
            content: template.replace("{title}", title),
        })
    }
}

impl Default for ContentSuggester {
    fn default() -> Self {
        Self::new(Box::new(ThreadRandom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::responder::FixedChoice;

    #[test]
    fn test_blank_title_rejected() {
        let s = ContentSuggester::default();
        assert!(matches!(s.suggest("  "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_title_interpolated() {
        let s = ContentSuggester::new(Box::new(FixedChoice(3)));
        let out = s.suggest(" Frações ").unwrap();
        assert_eq!(
            out.content,
            "Pensando em Frações? Considere abordar os desafios comuns e como superá-los."
        );
    }

    #[test]
    fn test_every_template_mentions_title() {
        for i in 0..SUGGESTION_TEMPLATES.len() {
            let s = ContentSuggester::new(Box::new(FixedChoice(i)));
            assert!(s.suggest("Ecologia").unwrap().content.contains("Ecologia"));
        }
    }
}
