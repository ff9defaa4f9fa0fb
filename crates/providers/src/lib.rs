//! Completion-service clients.
//!
//! The core pipeline only knows the [`colloquy_core::Generator`] trait;
//! this crate supplies the production implementation for any
//! OpenAI-compatible `/chat/completions` endpoint.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatGenerator;
