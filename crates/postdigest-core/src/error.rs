use thiserror::Error;

use crate::ai::Provider;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Post not found: {0}")]
    PostNotFound(i64),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single text generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Unknown AI model: {0}")]
    UnknownModel(String),

    #[error("{0} API key is required")]
    MissingCredential(Provider),

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error: {message}")]
    Provider { provider: Provider, message: String },

    #[error("No text generated by {provider}{}", detail_suffix(.detail))]
    EmptyGeneration {
        provider: Provider,
        detail: Option<String>,
    },

    #[error("Prompt too long ({chars} chars, limit {limit})")]
    PromptTooLong { chars: usize, limit: usize },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(". {d}"),
        None => String::new(),
    }
}

/// Stable tag for each generation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    UnknownModel,
    MissingCredential,
    TransportError,
    ProviderError,
    EmptyGeneration,
    PromptTooLong,
}

impl GenerationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownModel => "unknown_model",
            Self::MissingCredential => "missing_api_key",
            Self::TransportError => "transport_error",
            Self::ProviderError => "api_error",
            Self::EmptyGeneration => "empty_generation",
            Self::PromptTooLong => "prompt_too_long",
        }
    }
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::UnknownModel(_) => GenerationErrorKind::UnknownModel,
            Self::MissingCredential(_) => GenerationErrorKind::MissingCredential,
            Self::Transport { .. } => GenerationErrorKind::TransportError,
            Self::Provider { .. } => GenerationErrorKind::ProviderError,
            Self::EmptyGeneration { .. } => GenerationErrorKind::EmptyGeneration,
            Self::PromptTooLong { .. } => GenerationErrorKind::PromptTooLong,
        }
    }
}
