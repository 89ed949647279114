//! Templated comment acknowledgments and the random-choice seam.
//!
//! Template selection goes through [`RandomChoice`] so tests and
//! deterministic deployments can substitute a fixed picker.

use rand::Rng;

use crate::error::{Error, Result};

/// Picks one index out of `len` options.
pub trait RandomChoice: Send + Sync {
    /// Return an index in `0..len`. Never called with `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomChoice for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same index (clamped to the option count).
#[derive(Debug, Clone, Copy)]
pub struct FixedChoice(pub usize);

impl RandomChoice for FixedChoice {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

/// Choose one element of `options`, or `None` if it is empty.
pub fn choose<'a, T>(rng: &dyn RandomChoice, options: &'a [T]) -> Option<&'a T> {
    if options.is_empty() {
        return None;
    }
    options.get(rng.pick(options.len()))
}

pub const RESPONSE_TEMPLATES: &[&str] = &[
    "Obrigado pelo seu comentário! Ficamos felizes com a sua participação.",
    "Agradecemos a sua contribuição! Seu comentário foi recebido.",
    "Que bom ter você por aqui! Obrigado por comentar.",
    "Comentário recebido. O professor responderá em breve.",
    "Obrigado por compartilhar a sua opinião com a turma!",
];

/// Acknowledges comments with a fixed template.
///
/// The reply depends only on the comment being present, never on what
/// it says.
pub struct AutoResponder {
    rng: Box<dyn RandomChoice>,
}

impl AutoResponder {
    pub fn new(rng: Box<dyn RandomChoice>) -> Self {
        Self { rng }
    }

    pub fn respond(&self, comment_text: &str) -> Result<String> {
        if comment_text.trim().is_empty() {
            return Err(Error::EmptyComment);
        }
        let template = choose(self.rng.as_ref(), RESPONSE_TEMPLATES)
            .copied()
            .unwrap_or(RESPONSE_TEMPLATES[0]);
        Ok(template.to_string())
    }
}

impl Default for AutoResponder {
    fn default() -> Self {
        Self::new(Box::new(ThreadRandom))
    }
}
