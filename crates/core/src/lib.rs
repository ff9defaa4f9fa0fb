//! # Colloquy Core
//!
//! Domain types, collaborator traits, and error definitions for the Colloquy
//! stakeholder-interview context engine. This crate has **zero framework
//! dependencies** — it defines the value objects that all other crates
//! operate on.
//!
//! ## Design Philosophy
//!
//! Everything here is a transient, request-scoped value object: raw records
//! arrive from the storage collaborator, get prepared into normalized
//! structures, and are discarded after the generation call. Nothing is cached
//! or mutated in place across requests. The LLM completion service appears
//! only as the [`Generator`] trait, so the orchestration crates never know
//! which transport is behind it.

pub mod error;
pub mod generate;
pub mod prepared;
pub mod record;

// Re-export key types at crate root for ergonomics
pub use error::{DocumentError, Error, GeneratorError, Result};
pub use generate::{Combiner, Generator, SectionJoinCombiner};
pub use prepared::{
    PreparedUpload, ProjectSummary, QuestionAnswerPair, StakeholderAnswer, StakeholderProfile,
};
pub use record::{
    ClientRecord, DocumentRunRecord, ProjectRecord, QuestionJoin, QuestionRecord, ResponseRecord,
    SessionRecord, StakeholderJoin, StakeholderRecord, UploadRecord,
};
