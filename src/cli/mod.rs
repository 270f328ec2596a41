//! CLI support for odata-expand
//!
//! Provides programmatic access to the CLI commands so other tools can
//! check, render and dump expand trees described as JSON.

mod check;
mod convert;

pub use check::{
    execute_check, execute_dump, execute_render, CheckOptions, TreeStats, TreeSummary,
};
pub use convert::{json_to_expand, read_tree};

use crate::error::TokenError;
use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// A token could not be assembled
    #[error("Invalid expand term: {0}")]
    Token(#[from] TokenError),

    /// The tree description is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is well formed but does not describe a tree
    #[error("Invalid tree description: {0}")]
    InvalidTree(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Pass a JSON tree or pipe one to stdin.")]
    NoInput,
}
