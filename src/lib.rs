//! # prompt-playground
//!
//! Try prompt templates against small models and compare what comes back, side by side.
//!
//! **Note: `prompt-playground` is a WIP, so the APIs are subject to change.**
//!
//! ## Usage
//! It's not released on crates.io. To use it, add a dependency in `Cargo.toml`
//! ```toml
//! prompt-playground = { git = "https://github.com/ifsheldon/prompt-playground.git", branch = "main"}
//! ```
//!
//! ## Concepts and Design
//! Everything is plain data passed explicitly. There is no global state: one user's context is a
//! [`Session`](crate::session::Session) that you own and hand to each interaction.
//!
//! ### Prompt Template
//!
//! A template is text with placeholders written in one of three bracket styles:
//!
//! ```text
//! Summarize the following text: {input}
//! ```
//!
//! Only the input spellings `{input}`, `{INPUT}`, `[INPUT]` and `<input>` get substituted; other placeholders are
//! reported by [`extract_placeholders`](crate::utils::prompt_processing::extract_placeholders) but left alone.
//! A [`PromptTemplate`](crate::prompt::PromptTemplate) validates, formats and previews a template.
//!
//! ### Safety Gate
//!
//! User input is checked before it reaches a model (empty, too long, looks like prompt injection) and may be wrapped in
//! a polite assistant preamble. Model output is screened against a word list when the `profanity` feature is on.
//! See [`safety`](crate::safety).
//!
//! ### Models
//!
//! An identifier resolves to a [`ModelKind`](crate::models::ModelKind): FakeGPT, one of the prompt engineering tools,
//! or a handle from an [`InferenceBackend`](crate::models::resolver::InferenceBackend) you plug in. Generation returns
//! `Result<String, GenerationError>`, never a marker string.
//!
//! ### Comparison
//!
//! [`compare_models`](crate::compare::compare_models) runs up to three models one after another, times each, and
//! optionally diffs the first two successful responses. A failing model is recorded and the round goes on.
//!
//! ### Around it
//!
//! * [`catalog`](crate::catalog): prompt types loaded from a JSON file.
//! * [`export`](crate::export): plain-text and Markdown reports of a round.
//! * [`utils::clipboard`](crate::utils::clipboard): best-effort copy with a manual-copy fallback.
//! * `utils::printing` (feature `terminal_printing`): renders reports in the terminal with `termimad`.
//!
//! ## Features
//! * `terminal_printing` (default): terminal Markdown rendering.
//! * `profanity` (default): output screening.
//! * `clipboard`: the system clipboard through `arboard`. Without it reports fall back to manual copy.
//! * `tiktoken` (default): a BPE [`CountToken`](crate::utils::token::CountToken) implementation. We re-export the
//!   `tiktoken-rs` crate in `utils::token::tiktoken`.
//!
//! ## Logging
//! The crate logs through the `log` facade and never installs a logger.
//!
//! ## License
//!
//! `prompt-playground` will always remain free under Apache license.


pub mod prompt;
pub mod catalog;
pub mod safety;
pub mod models;
pub mod compare;
pub mod session;
pub mod export;
pub mod utils;
