//! Domain rewrite rules: kinship, activity, condition, location, profession.
//!
//! Each detector lemmatizes the predicate, checks its trigger set, and looks
//! for a domain term in the arguments. A hit rewrites the triple into a
//! specific relation (`have-mother`, `be-inside`, `work-as`) and claims it;
//! the orchestrator then skips the remaining detectors and generic
//! predicate re-derivation. Detectors are pure functions of the triple,
//! the dialogue context and the lexicon.

use serde::Serialize;

use super::RuleContext;
use super::phrase::{owner_of, resolve_owner};
use super::predicate::predicate_lemma;
use crate::dialogue::DialogueResult;
use crate::lexicon::Category;
use crate::triple::{Triple, join_phrase};

// ── Trigger sets ────────────────────────────────────────────────────────

const COPULA: &str = "be";
const POSSESSION: &str = "have";
const NAMING_TRIGGERS: &[&str] = &["is-named", "is-called", "be-named", "be-called"];
const MARRIAGE_TRIGGERS: &[&str] = &["is-married", "be-married"];
const ACTIVITY_TRIGGERS: &[&str] = &[
    "go",
    "watch",
    "attend",
    "visit",
    "listen-to",
    "listen",
    "play",
    "do",
];
const CONDITION_TRIGGERS: &[&str] = &["be", "feel"];
const PROFESSION_TRIGGERS: &[&str] = &["be", "work"];

/// Leading object token → location relation.
const LOCATION_RELATIONS: &[(&str, &str)] = &[
    ("in", "be-inside"),
    ("on", "be-on"),
    ("next-to", "be-next-to"),
];

/// Predicate prefix of a negated triple.
const NEGATION: &str = "not";

/// Relation used when the lexicon has no entry for "married".
const DEFAULT_SPOUSE_RELATION: &str = "spouse";

// ── Outcome ─────────────────────────────────────────────────────────────

/// The five detectors, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainRule {
    Kinship,
    Activity,
    Condition,
    Location,
    Profession,
}

impl DomainRule {
    pub const ALL: [DomainRule; 5] = [
        DomainRule::Kinship,
        DomainRule::Activity,
        DomainRule::Condition,
        DomainRule::Location,
        DomainRule::Profession,
    ];

    /// Run this detector alone.
    pub fn detect(self, triple: &Triple, ctx: &RuleContext<'_>) -> DialogueResult<DomainOutcome> {
        match self {
            Self::Kinship => kinship(triple, ctx),
            Self::Activity => activity(triple, ctx),
            Self::Condition => condition(triple, ctx),
            Self::Location => location(triple, ctx),
            Self::Profession => profession(triple, ctx),
        }
    }
}

impl std::fmt::Display for DomainRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kinship => write!(f, "kinship"),
            Self::Activity => write!(f, "activity"),
            Self::Condition => write!(f, "condition"),
            Self::Location => write!(f, "location"),
            Self::Profession => write!(f, "profession"),
        }
    }
}

/// A triple claimed by a domain rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatch {
    pub rule: DomainRule,
    /// The canonical relation name the rule derived.
    pub relation: String,
    /// The domain term found in the arguments.
    pub term: String,
    /// The rewritten triple.
    pub triple: Triple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainOutcome {
    Matched(DomainMatch),
    NoMatch,
}

impl DomainOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    fn matched(rule: DomainRule, relation: &str, term: &str, triple: Triple) -> Self {
        Self::Matched(DomainMatch {
            rule,
            relation: relation.to_string(),
            term: term.to_string(),
            triple,
        })
    }
}

/// Try every detector in priority order; the first match wins.
///
/// A `not-` predicate prefix is set aside while the detectors run and put
/// back on the rewritten predicate: `i not-be glad` → `Lenka not-feel happy`.
pub fn apply_domain_rules(triple: &Triple, ctx: &RuleContext<'_>) -> DialogueResult<DomainOutcome> {
    let negated = triple.predicate.strip_prefix("not-");
    let affirmed = match negated {
        Some(rest) => triple.clone().with_predicate(rest),
        None => triple.clone(),
    };
    for rule in DomainRule::ALL {
        match rule.detect(&affirmed, ctx)? {
            DomainOutcome::Matched(mut m) => {
                if negated.is_some() {
                    m.triple.predicate = join_phrase(&[NEGATION, m.triple.predicate.as_str()]);
                }
                return Ok(DomainOutcome::Matched(m));
            }
            DomainOutcome::NoMatch => tracing::trace!(%rule, %triple, "domain rule did not match"),
        }
    }
    Ok(DomainOutcome::NoMatch)
}

// ── Kinship ─────────────────────────────────────────────────────────────

fn kinship(triple: &Triple, ctx: &RuleContext<'_>) -> DialogueResult<DomainOutcome> {
    let lemma = predicate_lemma(&triple.predicate, ctx.lexicon);

    if lemma == COPULA {
        kinship_copula(triple, ctx)
    } else if lemma == POSSESSION {
        let Some(m) = ctx.lexicon.lookup_subword(&triple.object, Category::Kinship) else {
            return Ok(DomainOutcome::NoMatch);
        };
        let subject = resolve_owner(&triple.subject, ctx)?;
        let rewritten = Triple::new(subject, have(&m.relation), m.term.as_str());
        Ok(DomainOutcome::matched(DomainRule::Kinship, &m.relation, &m.term, rewritten))
    } else if NAMING_TRIGGERS.contains(&lemma.as_str()) || NAMING_TRIGGERS.contains(&triple.predicate.as_str()) {
        kinship_copula(triple, ctx)
    } else if MARRIAGE_TRIGGERS.contains(&lemma.as_str())
        || MARRIAGE_TRIGGERS.contains(&triple.predicate.as_str())
    {
        let relation = ctx
            .entry("married")
            .and_then(|e| e.kinship.clone())
            .unwrap_or_else(|| DEFAULT_SPOUSE_RELATION.to_string());
        let subject = resolve_owner(&triple.subject, ctx)?;
        let partner = triple.object.strip_prefix("to-").unwrap_or(&triple.object);
        let object = resolve_owner(partner, ctx)?;
        let rewritten = Triple::new(subject, have(&relation), object);
        Ok(DomainOutcome::matched(DomainRule::Kinship, &relation, "married", rewritten))
    } else {
        Ok(DomainOutcome::NoMatch)
    }
}

/// `my-mother be selene` → `Lenka have-mother selene`;
/// `selene be my-mother` → `Lenka have-mother selene`.
fn kinship_copula(triple: &Triple, ctx: &RuleContext<'_>) -> DialogueResult<DomainOutcome> {
    if let Some(m) = ctx.lexicon.lookup_subword(&triple.subject, Category::Kinship) {
        let owner = owner_of(&triple.subject, Category::Kinship, ctx)?;
        if !owner.is_empty() {
            let object = resolve_owner(&triple.object, ctx)?;
            let rewritten = Triple::new(owner, have(&m.relation), object);
            return Ok(DomainOutcome::matched(DomainRule::Kinship, &m.relation, &m.term, rewritten));
        }
    } else if let Some(m) = ctx.lexicon.lookup_subword(&triple.object, Category::Kinship) {
        let owner = owner_of(&triple.object, Category::Kinship, ctx)?;
        if !owner.is_empty() {
            let object = resolve_owner(&triple.subject, ctx)?;
            let rewritten = Triple::new(owner, have(&m.relation), object);
            return Ok(DomainOutcome::matched(DomainRule::Kinship, &m.relation, &m.term, rewritten));
        }
    }
    Ok(DomainOutcome::NoMatch)
}

fn have(relation: &str) -> String {
    join_phrase(&[POSSESSION, relation])
}

// ── Activity ────────────────────────────────────────────────────────────

/// `i go to-the-gym` → `Lenka go-exercise gym`.
fn activity(triple: &Triple, ctx: &RuleContext<'_>) -> DialogueResult<DomainOutcome> {
    let lemma = predicate_lemma(&triple.predicate, ctx.lexicon);
    if !ACTIVITY_TRIGGERS.contains(&lemma.as_str()) {
        return Ok(DomainOutcome::NoMatch);
    }
    let Some(m) = ctx.lexicon.lookup_subword(&triple.object, Category::Activity) else {
        return Ok(DomainOutcome::NoMatch);
    };
    let subject = resolve_owner(&triple.subject, ctx)?;
    let predicate = join_phrase(&[lemma.as_str(), m.relation.as_str()]);
    let rewritten = Triple::new(subject, predicate, m.term.as_str());
    Ok(DomainOutcome::matched(DomainRule::Activity, &m.relation, &m.term, rewritten))
}

// ── Condition ───────────────────────────────────────────────────────────

/// `i be glad` → `Lenka feel happy`.
fn condition(triple: &Triple, ctx: &RuleContext<'_>) -> DialogueResult<DomainOutcome> {
    let lemma = predicate_lemma(&triple.predicate, ctx.lexicon);
    if !CONDITION_TRIGGERS.contains(&lemma.as_str()) {
        return Ok(DomainOutcome::NoMatch);
    }
    let Some(m) = ctx.lexicon.lookup_subword(&triple.object, Category::Condition) else {
        return Ok(DomainOutcome::NoMatch);
    };
    let subject = resolve_owner(&triple.subject, ctx)?;
    let rewritten = Triple::new(subject, "feel", m.relation.as_str());
    Ok(DomainOutcome::matched(DomainRule::Condition, &m.relation, &m.term, rewritten))
}

// ── Location ────────────────────────────────────────────────────────────

/// `my-keys be in-my-bag` → `Lenka-keys be-inside Lenka-bag`.
fn location(triple: &Triple, ctx: &RuleContext<'_>) -> DialogueResult<DomainOutcome> {
    let lemma = predicate_lemma(&triple.predicate, ctx.lexicon);
    if lemma != COPULA {
        return Ok(DomainOutcome::NoMatch);
    }
    let tokens = ctx.lexicon.tokens(&triple.object);
    let Some((first, rest)) = tokens.split_first() else {
        return Ok(DomainOutcome::NoMatch);
    };
    let Some(relation) = LOCATION_RELATIONS
        .iter()
        .find(|(prep, _)| prep == first)
        .map(|(_, relation)| *relation)
    else {
        return Ok(DomainOutcome::NoMatch);
    };
    let place = rest.join("-");
    let Some(m) = ctx.lexicon.lookup_subword(&place, Category::Container) else {
        return Ok(DomainOutcome::NoMatch);
    };

    let owner = match rest.first() {
        Some(word) if ctx.entry(word).is_some_and(|e| e.possessive) => Some(ctx.dialogue.resolve(word)?),
        _ => None,
    };
    let object = match owner {
        Some(owner) => join_phrase(&[owner.as_str(), m.term.as_str()]),
        None => m.term.clone(),
    };
    let subject = resolve_owner(&triple.subject, ctx)?;
    let rewritten = Triple::new(subject, relation, object);
    Ok(DomainOutcome::matched(DomainRule::Location, relation, &m.term, rewritten))
}

// ── Profession ──────────────────────────────────────────────────────────

/// `i work as-a-teacher` → `Lenka work-as teacher`.
fn profession(triple: &Triple, ctx: &RuleContext<'_>) -> DialogueResult<DomainOutcome> {
    let lemma = predicate_lemma(&triple.predicate, ctx.lexicon);
    if !PROFESSION_TRIGGERS.contains(&lemma.as_str()) {
        return Ok(DomainOutcome::NoMatch);
    }
    let Some(role) = triple.object.strip_prefix("as-") else {
        return Ok(DomainOutcome::NoMatch);
    };
    let Some(m) = ctx.lexicon.lookup_subword(role, Category::Profession) else {
        return Ok(DomainOutcome::NoMatch);
    };
    let subject = resolve_owner(&triple.subject, ctx)?;
    let rewritten = Triple::new(subject, "work-as", m.relation.as_str());
    Ok(DomainOutcome::matched(DomainRule::Profession, &m.relation, &m.term, rewritten))
}
