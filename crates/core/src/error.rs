//! Error types for the Colloquy domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Colloquy operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Generation errors ---
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    // --- Document contract errors ---
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors from the injected LLM completion collaborator.
#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by completion service, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("Generator not configured: {0}")]
    NotConfigured(String),
}

/// Errors from parsing generated structured documents.
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    #[error("Generated output is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Generated output is empty")]
    Empty,
}
