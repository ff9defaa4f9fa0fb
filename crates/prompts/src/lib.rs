//! Task-level prompt assembly.
//!
//! [`build_context`] folds a project's prepared data into one
//! [`FormattedContext`] bundle; the task builders splice that bundle (or
//! selected sections) into role-specific instruction templates, and the
//! document module defines the strict JSON contract that structured
//! generation must return.

pub mod context;
pub mod document;
pub mod tasks;
pub mod template;

pub use context::{build_context, context_blocks, FormattedContext, ProjectData};
pub use document::{parse_document, DocumentSection, DocumentTable, GeneratedDocument};
pub use tasks::{
    build_document_analysis_prompt, build_question_generator_prompt, build_sidekick_prompt,
    build_structured_prompt,
};
pub use template::substitute_placeholders;
