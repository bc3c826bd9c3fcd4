//! Answer composition
//!
//! Retrieved segments are joined into a bounded context, wrapped in a fixed
//! prompt and handed to a [`Completer`]. The completer's text comes back
//! untouched.
//!
//! ```text
//! question -> retrieve top-k -> context -> prompt -> Completer -> answer
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::RagConfig;
use crate::search::SearchResult;
use crate::Result;

/// Placed between segment texts in the context block
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Returned without calling the completer when nothing was retrieved
pub const NO_CONTEXT_ANSWER: &str = "No relevant context found in this document.";

/// A text-generation backend
#[async_trait]
pub trait Completer: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// Failures surface as [`Error::Completion`](crate::Error::Completion)
    /// and are not retried.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Returns the backend name/identifier
    fn name(&self) -> &str;
}

/// Result of answering one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    /// Number of segments placed in the context
    pub segments_used: usize,
    /// Characters of context actually sent
    pub context_chars: usize,
}

/// Builds prompts from retrieved segments and forwards them to a completer.
pub struct AnswerComposer<P: Completer> {
    completer: P,
    max_context_chars: usize,
}

impl<P: Completer> AnswerComposer<P> {
    #[must_use]
    pub fn new(completer: P, max_context_chars: usize) -> Self {
        Self {
            completer,
            max_context_chars,
        }
    }

    #[must_use]
    pub fn from_config(completer: P, config: &RagConfig) -> Self {
        Self::new(completer, config.max_context_chars)
    }

    /// Join segment texts in rank order and cut to the context budget.
    #[must_use]
    pub fn build_context(&self, results: &[SearchResult]) -> String {
        let joined = results
            .iter()
            .map(|r| r.segment.segment.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);
        truncate_chars(&joined, self.max_context_chars).to_string()
    }

    /// Render the full prompt for `question` without calling the completer.
    #[must_use]
    pub fn prompt_for(&self, results: &[SearchResult], question: &str) -> String {
        render_prompt(&self.build_context(results), question)
    }

    /// Answer `question` from the retrieved segments.
    pub async fn answer(&self, results: &[SearchResult], question: &str) -> Result<Answer> {
        if results.is_empty() {
            debug!("no segments retrieved, skipping completion");
            return Ok(Answer {
                answer: NO_CONTEXT_ANSWER.to_string(),
                segments_used: 0,
                context_chars: 0,
            });
        }

        let context = self.build_context(results);
        let prompt = render_prompt(&context, question);
        debug!(
            completer = self.completer.name(),
            segments = results.len(),
            prompt_chars = prompt.chars().count(),
            "requesting completion"
        );

        let answer = self.completer.complete(&prompt).await.inspect_err(|e| {
            warn!(completer = self.completer.name(), error = %e, "completion failed");
        })?;

        Ok(Answer {
            answer,
            segments_used: results.len(),
            context_chars: context.chars().count(),
        })
    }

    /// Returns a reference to the completer.
    #[must_use]
    pub fn completer(&self) -> &P {
        &self.completer
    }
}

/// Fill the fixed prompt template.
#[must_use]
pub fn render_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a helpful assistant answering questions about a document.\n\
         Answer the question conversationally using the context below.\n\
         If the context does not contain enough information to answer, say so \
         plainly instead of guessing.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer:"
    )
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

mod openai;
pub use openai::*;

#[cfg(test)]
pub(crate) mod testing;
