//! Error types.

use std::path::PathBuf;

/// Fatal errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tree-sitter init: {0}")]
    Grammar(String),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Per-file failures; the file is skipped and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("syntax error at {line}:{column}")]
    Syntax { line: usize, column: usize },

    #[error("source is not valid UTF-8")]
    Encoding,

    #[error("tree-sitter init: {0}")]
    Grammar(String),
}
