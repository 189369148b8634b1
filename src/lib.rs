//! git2doc: AI-generated READMEs for public GitHub repositories.
//!
//! The pipeline: list the repository tree, pick the files worth reading
//! (heuristically or from a user selection), fetch their content
//! concurrently, fold it back into the listing, and hand the result to an
//! LLM prompt.

pub mod classifier;
pub mod config;
pub mod error;
pub mod github;
pub mod handlers;
pub mod llm;
pub mod merge;
pub mod models;
pub mod prompts;
pub mod selection;
pub mod tree;
