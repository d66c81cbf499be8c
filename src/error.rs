//! Top-level diagnostic error type.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives next to the code that raises it; this module only gathers them.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::dialogue::DialogueError;
use crate::lexicon::LexiconError;
use crate::normalize::NormalizeError;

/// Any error the crate can surface, with the subsystem's diagnostic chain
/// (code, help text, source) preserved.
#[derive(Debug, Error, Diagnostic)]
pub enum TripleNormError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Dialogue(#[from] DialogueError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Normalize(#[from] NormalizeError),
}

pub type TripleNormResult<T> = std::result::Result<T, TripleNormError>;
