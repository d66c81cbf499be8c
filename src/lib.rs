// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # triple-norm
//!
//! Rule-based normalization of subject-predicate-object triples extracted
//! from dialogue, with an attached epistemic perspective.
//!
//! ## Architecture
//!
//! - **Lexicon** (`lexicon`): word → entry with person, deictic, kinship,
//!   activity, condition, container, profession, valence and NLP category
//!   facets, plus a rule-based lemmatizer. Bundled English data in TOML.
//! - **Dialogue** (`dialogue`): the two participants and who is speaking;
//!   first/second-person pronoun resolution.
//! - **Normalization** (`normalize`): domain rewrite rules, phrase
//!   restructuring, predicate fixing, semantic typing and perspective
//!   extraction, sequenced by [`TripleNormalizer`].
//!
//! ## Library usage
//!
//! ```no_run
//! use triple_norm::config::NormalizerConfig;
//! use triple_norm::dialogue::{DialogueContext, UtteranceContext};
//! use triple_norm::normalize::TripleNormalizer;
//! use triple_norm::triple::RawTriple;
//!
//! let normalizer = TripleNormalizer::from_config(NormalizerConfig::default()).unwrap();
//! let ctx = UtteranceContext::statement(DialogueContext::human_speaking("Lenka", "Leolani").unwrap());
//! let out = normalizer
//!     .normalize(&ctx, RawTriple::new("my-mother", "is", "a-doctor"))
//!     .unwrap();
//! assert_eq!(out.subject.label, "Lenka");
//! assert_eq!(out.predicate.label, "have-mother");
//! ```

pub mod config;
pub mod dialogue;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod triple;

pub use error::{TripleNormError, TripleNormResult};
pub use normalize::TripleNormalizer;
