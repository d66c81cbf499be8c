//! Diagnostic error types for lexicon loading.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while loading lexicon data.
///
/// Lookups themselves never fail: a missing entry is a normal outcome.
#[derive(Debug, Error, Diagnostic)]
pub enum LexiconError {
    #[error("failed to parse lexicon \"{source_name}\": {message}")]
    #[diagnostic(
        code(triple_norm::lexicon::parse),
        help(
            "Check the lexicon TOML syntax. Every table maps a lowercased word to a \
             facet value, e.g. `[kinship] mom = \"mother\"`."
        )
    )]
    Parse { source_name: String, message: String },

    #[error("failed to read lexicon file: {path}")]
    #[diagnostic(
        code(triple_norm::lexicon::io),
        help("Ensure the lexicon file exists and is readable, or omit --lexicon to use the bundled one.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for lexicon operations.
pub type LexiconResult<T> = std::result::Result<T, LexiconError>;
