//! Locheck - structural consistency checker for localized string corpora
//!
//! Locheck audits per-locale translation snapshots of a large string corpus
//! (e.g. a browser's UI resources): for every locale it verifies that each
//! translation preserves the structural elements of its reference message -
//! HTML tags, CSS values, formatting function calls and placeholder groups -
//! while leaving the human-readable text to the translators.
//!
//! ## Module Structure
//!
//! - `cli`: command-line interface layer (arguments, dispatch, report)
//! - `config`: configuration file loading and parsing
//! - `core`: snapshots, exclusions, fingerprints and the check engine
//! - `history`: run-over-run comparison and archival
//! - `issues`: diagnostic type definitions
//! - `rules`: the individual check implementations

pub mod cli;
pub mod config;
pub mod core;
pub mod history;
pub mod issues;
pub mod rules;
