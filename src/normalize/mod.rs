//! The normalization cascade.
//!
//! ```text
//! RawTriple ─canonical─→ analyzer ─→ negation ─→ domain rules ─┬─ matched ──→ argument resolution ─────────────┐
//!                                                               └─ unmatched → restructure → trim → fix predicate ┤
//!                                                                                                                ▼
//!                                                                  FinalTriple ←─ perspective ←─ typing ←───────┘
//! ```
//!
//! Every stage takes a triple value and returns a new one. The only fatal
//! input is a dialogue context that cannot tell its participants apart;
//! everything else degrades to leaving a slot as it was.

pub mod analyzer;
pub mod domain;
pub mod perspective;
pub mod phrase;
pub mod predicate;
pub mod typing;

use std::sync::Arc;

use miette::Diagnostic;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::NormalizerConfig;
use crate::dialogue::{DialogueContext, DialogueError, UtteranceContext};
use crate::lexicon::{Category, Lexicon, LexiconEntry, LexiconResult, LexiconTable};
use crate::triple::{FinalTriple, RawTriple, Slot, Triple};

pub use domain::{DomainMatch, DomainOutcome, DomainRule, apply_domain_rules};
pub use predicate::fix_predicate;
pub use typing::{fix_nlp_types, type_slot};

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Error, Diagnostic)]
pub enum NormalizeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Dialogue(#[from] DialogueError),
}

pub type NormalizeResult<T> = std::result::Result<T, NormalizeError>;

// ── Stages ──────────────────────────────────────────────────────────────

/// States of the cascade, in order. Used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Raw,
    DomainMatched,
    DomainUnmatched,
    Restructured,
    PredicateFixed,
    Typed,
    PerspectiveAttached,
    Final,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Raw => "raw",
            Self::DomainMatched => "domain_matched",
            Self::DomainUnmatched => "domain_unmatched",
            Self::Restructured => "restructured",
            Self::PredicateFixed => "predicate_fixed",
            Self::Typed => "typed",
            Self::PerspectiveAttached => "perspective_attached",
            Self::Final => "final",
        };
        f.write_str(name)
    }
}

// ── Rule context ────────────────────────────────────────────────────────

/// Read-only inputs shared by the rewrite rules of one normalization.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub lexicon: &'a dyn Lexicon,
    pub dialogue: &'a DialogueContext,
}

impl<'a> RuleContext<'a> {
    pub fn new(lexicon: &'a dyn Lexicon, dialogue: &'a DialogueContext) -> Self {
        Self { lexicon, dialogue }
    }

    /// Case-insensitive lexicon lookup.
    pub fn entry(&self, word: &str) -> Option<&'a LexiconEntry> {
        self.lexicon.lookup(&word.to_lowercase())
    }

    /// Whether a single token is a kinship term.
    pub fn is_kinship(&self, token: &str) -> bool {
        self.lexicon.lookup_subword(token, Category::Kinship).is_some()
    }
}

// ── Batch input ─────────────────────────────────────────────────────────

/// One independent item of a batch: the utterance context and its triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub context: UtteranceContext,
    pub triple: RawTriple,
}

// ── TripleNormalizer ────────────────────────────────────────────────────

/// Turns raw upstream triples into typed, perspective-annotated ones.
///
/// Cheap to clone; the lexicon is shared behind an `Arc`.
#[derive(Clone)]
pub struct TripleNormalizer {
    lexicon: Arc<dyn Lexicon>,
    config: NormalizerConfig,
}

impl std::fmt::Debug for TripleNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleNormalizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TripleNormalizer {
    pub fn new(lexicon: Arc<dyn Lexicon>, config: NormalizerConfig) -> Self {
        Self { lexicon, config }
    }

    /// Build a normalizer over the lexicon named in the config, or the
    /// bundled English lexicon when none is.
    pub fn from_config(config: NormalizerConfig) -> LexiconResult<Self> {
        let lexicon = match &config.lexicon_path {
            Some(path) => LexiconTable::load(path)?,
            None => LexiconTable::english()?,
        };
        Ok(Self::new(Arc::new(lexicon), config))
    }

    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Run the full cascade on one triple.
    pub fn normalize(&self, context: &UtteranceContext, raw: RawTriple) -> NormalizeResult<FinalTriple> {
        let lexicon = self.lexicon.as_ref();
        let raw = analyzer::analyze(context.utterance_type, raw.canonical());
        let upstream = raw.perspective;
        let triple = raw.working();
        tracing::debug!(stage = %Stage::Raw, %triple, "normalizing");

        let rules = RuleContext::new(lexicon, &context.dialogue);
        let triple = phrase::split_negation(triple, &rules);
        let triple = match apply_domain_rules(&triple, &rules)? {
            DomainOutcome::Matched(m) => {
                tracing::debug!(
                    stage = %Stage::DomainMatched,
                    rule = %m.rule,
                    term = %m.term,
                    triple = %m.triple,
                    "domain rule matched"
                );
                let triple = phrase::resolve_arguments(m.triple, &rules)?.trimmed();
                tracing::debug!(stage = %Stage::Restructured, %triple, "arguments resolved");
                triple
            }
            DomainOutcome::NoMatch => {
                tracing::debug!(stage = %Stage::DomainUnmatched, %triple, "no domain rule");
                let triple = phrase::restructure(triple, &rules)?.trimmed();
                tracing::debug!(stage = %Stage::Restructured, %triple, "phrases restructured");
                let predicate = fix_predicate(&triple.predicate, lexicon);
                let triple = triple.with_predicate(predicate);
                tracing::debug!(stage = %Stage::PredicateFixed, %triple, "predicate fixed");
                triple
            }
        };

        let Triple {
            subject,
            predicate,
            object,
        } = triple;
        let subject = type_slot(Slot::Raw(subject), lexicon, &self.config).into_typed();
        let predicate = type_slot(Slot::Raw(predicate), lexicon, &self.config).into_typed();
        let object = type_slot(Slot::Raw(object), lexicon, &self.config).into_typed();
        tracing::debug!(
            stage = %Stage::Typed,
            subject = ?subject.types,
            predicate = ?predicate.types,
            object = ?object.types,
            "slots typed"
        );

        let perspective = perspective::extract(&predicate.label, upstream, lexicon);
        tracing::debug!(
            stage = %Stage::PerspectiveAttached,
            ?perspective,
            negated = perspective.is_negated(),
            "perspective attached"
        );

        let result = FinalTriple {
            subject,
            predicate,
            object,
            perspective,
            utterance_type: context.utterance_type,
            dialogue_act: context.dialogue_act.clone(),
        };
        tracing::debug!(stage = %Stage::Final, triple = %result.labels(), "normalized");
        Ok(result)
    }

    /// Normalize independent items in parallel. Results keep input order and
    /// each item carries its own result.
    pub fn normalize_batch(&self, items: Vec<BatchItem>) -> Vec<NormalizeResult<FinalTriple>> {
        let results: Vec<_> = items
            .into_par_iter()
            .map(|item| self.normalize(&item.context, item.triple))
            .collect();
        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(total = results.len(), failed, "batch normalized");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TripleNormalizer {
        TripleNormalizer::from_config(NormalizerConfig::default()).unwrap()
    }

    fn lenka_speaking() -> UtteranceContext {
        UtteranceContext::statement(DialogueContext::human_speaking("Lenka", "Leolani").unwrap())
    }

    #[test]
    fn domain_branch_keeps_predicate() {
        let out = normalizer()
            .normalize(&lenka_speaking(), RawTriple::new("my-mother", "is", "doctor"))
            .unwrap();
        assert_eq!(out.labels(), Triple::new("Lenka", "have-mother", "doctor"));
        assert!(out.subject.has_type("person"));
    }

    #[test]
    fn generic_branch_fixes_predicate() {
        let out = normalizer()
            .normalize(&lenka_speaking(), RawTriple::new("i", "likes", "ice cream"))
            .unwrap();
        assert_eq!(out.labels(), Triple::new("Lenka", "like", "ice-cream"));
        assert!(out.object.has_type("food"));
    }

    #[test]
    fn question_is_carried_through() {
        let ctx = UtteranceContext::question(DialogueContext::human_speaking("Lenka", "Leolani").unwrap())
            .with_dialogue_act("question.wh");
        let out = normalizer()
            .normalize(&ctx, RawTriple::new("who", "like", "cheese"))
            .unwrap();
        assert_eq!(out.subject.label, "");
        assert_eq!(out.utterance_type, crate::dialogue::UtteranceType::Question);
        assert_eq!(out.dialogue_act.as_deref(), Some("question.wh"));
    }

    #[test]
    fn batch_keeps_order() {
        let ctx = lenka_speaking();
        let items: Vec<BatchItem> = ["dogs", "cats", "birds"]
            .into_iter()
            .map(|object| BatchItem {
                context: ctx.clone(),
                triple: RawTriple::new("i", "like", object),
            })
            .collect();
        let results = normalizer().normalize_batch(items);
        let objects: Vec<String> = results
            .into_iter()
            .map(|r| r.unwrap().object.label)
            .collect();
        assert_eq!(objects, vec!["dogs", "cats", "birds"]);
    }

    #[test]
    fn negated_complement_keeps_domain_rewrite() {
        let out = normalizer()
            .normalize(&lenka_speaking(), RawTriple::new("i", "am", "not-glad"))
            .unwrap();
        assert_eq!(out.labels(), Triple::new("Lenka", "not-feel", "happy"));
        assert!(out.perspective.is_negated());
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::DomainUnmatched.to_string(), "domain_unmatched");
        assert_eq!(Stage::PerspectiveAttached.to_string(), "perspective_attached");
    }
}
