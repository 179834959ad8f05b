//! Error types for faleproxy operations.

use thiserror::Error;

/// Errors that can occur while configuring or running the rewriter.
///
/// Transforming a document never fails; these cover setup and I/O around it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid brand rules: {0}")]
    InvalidRules(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
