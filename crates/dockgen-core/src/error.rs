use std::path::PathBuf;

use crate::config::DocumentFormat;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Project document ──
    #[error("project document not found at {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read project document {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {format} at {path}: {detail}")]
    ConfigParse {
        path: PathBuf,
        format: DocumentFormat,
        detail: String,
    },

    #[error("project document {path} must be a mapping at the top level, found {found}")]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("invalid value for `{key}`: {reason}")]
    InvalidField { key: String, reason: String },

    // ── Templates ──
    #[error("template '{name}' not found in {dir}")]
    TemplateNotFound { dir: PathBuf, name: String },

    #[error("template '{name}' failed to compile: {detail}")]
    TemplateSyntax { name: String, detail: String },

    #[error("invalid startup command")]
    Tokenize(#[from] TokenizeError),

    #[error("failed to render template '{name}': {detail}")]
    Render { name: String, detail: String },

    // ── Output ──
    #[error("failed to write {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure to split a shell-style command string into words.
///
/// Offsets are byte positions into the original command string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("unterminated single quote starting at byte {offset} in {command:?}")]
    UnterminatedSingleQuote { command: String, offset: usize },

    #[error("unterminated double quote starting at byte {offset} in {command:?}")]
    UnterminatedDoubleQuote { command: String, offset: usize },

    #[error("trailing backslash at byte {offset} in {command:?} has nothing to escape")]
    TrailingEscape { command: String, offset: usize },
}
