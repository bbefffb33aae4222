//! Translation Layer
//!
//! A single request/response call to a hosted chat model. The prompt is a
//! pure function of the language pair and context; see `prompt`.

pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::language::Language;

pub use openai::OpenAiTranslator;
pub use prompt::{build_prompt, effective_context, CONTEXT_PLACEHOLDER};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit or quota exceeded: {0}")]
    RateLimited(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no translation")]
    EmptyResponse,
}

/// Translation capability
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text`, returning the trimmed result
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
        context: Option<&str>,
    ) -> Result<String, TranslateError>;
}
