//! Pre-normalization strategies selected by utterance type and the class of
//! the leading word.
//!
//! A flat lookup table replaces a hierarchy of statement/question analyzers:
//! classify the raw triple once, find the matching row, apply its function.

use crate::dialogue::UtteranceType;
use crate::triple::{RawTriple, join_phrase};

/// Question words that open a query slot.
const WH_WORDS: &[&str] = &["what", "who", "where", "when", "which", "why", "how"];

/// Do-support auxiliaries that lead a yes/no question predicate.
const DO_SUPPORT: &[&str] = &["do", "does", "did"];

/// Surface forms of the copula a `where` question can carry.
const COPULA_FORMS: &[&str] = &["be", "am", "is", "are", "was", "were"];

/// Class of the word that drives the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingWord {
    /// A wh-word in some slot.
    Wh,
    /// A do-support auxiliary leading the predicate or the subject.
    Verb,
    Other,
}

type Strategy = fn(RawTriple) -> RawTriple;

/// `(utterance type, leading word) → strategy`. First matching row wins.
static STRATEGIES: &[(UtteranceType, LeadingWord, Strategy)] = &[
    (UtteranceType::Question, LeadingWord::Wh, wh_question),
    (UtteranceType::Question, LeadingWord::Verb, verb_question),
    (UtteranceType::Question, LeadingWord::Other, identity),
    (UtteranceType::Statement, LeadingWord::Wh, identity),
    (UtteranceType::Statement, LeadingWord::Verb, identity),
    (UtteranceType::Statement, LeadingWord::Other, identity),
];

/// Classify the triple and apply the matching strategy.
pub fn analyze(utterance_type: UtteranceType, triple: RawTriple) -> RawTriple {
    let leading = classify(&triple);
    let strategy = STRATEGIES
        .iter()
        .find(|(ty, lw, _)| *ty == utterance_type && *lw == leading)
        .map_or(identity as Strategy, |(_, _, strategy)| *strategy);
    tracing::trace!(%utterance_type, ?leading, "utterance analyzer");
    strategy(triple)
}

/// Wh-words win over do-support.
pub fn classify(triple: &RawTriple) -> LeadingWord {
    let slots = [&triple.subject, &triple.predicate, &triple.object];
    if slots.iter().any(|slot| wh_word(slot).is_some()) {
        LeadingWord::Wh
    } else if leading_do(&triple.predicate).is_some() || leading_do(&triple.subject).is_some() {
        LeadingWord::Verb
    } else {
        LeadingWord::Other
    }
}

fn identity(triple: RawTriple) -> RawTriple {
    triple
}

/// Empty each slot that is a wh-word, or drop a wh-word leading a longer
/// slot (`which-city` → `city`). `where` turns a bare copula predicate into
/// `be-in`. Do-support is dropped as in a yes/no question.
fn wh_question(triple: RawTriple) -> RawTriple {
    let mut asks_place = false;
    let mut open = |slot: String| -> String {
        match wh_word(&slot) {
            Some((word, rest)) => {
                asks_place |= word == "where";
                rest.to_string()
            }
            None => slot,
        }
    };
    let subject = open(triple.subject);
    let object = open(triple.object);
    let mut predicate = triple.predicate;
    if asks_place && COPULA_FORMS.contains(&predicate.to_lowercase().as_str()) {
        predicate = join_phrase(&["be", "in"]);
    }
    verb_question(RawTriple {
        subject,
        predicate,
        object,
        perspective: triple.perspective,
    })
}

/// `does-like` → `like`, `do-you` → `you`.
fn verb_question(triple: RawTriple) -> RawTriple {
    let subject = leading_do(&triple.subject)
        .map(str::to_string)
        .unwrap_or(triple.subject);
    let predicate = leading_do(&triple.predicate)
        .map(str::to_string)
        .unwrap_or(triple.predicate);
    RawTriple {
        subject,
        predicate,
        ..triple
    }
}

/// The wh-word leading a slot and what follows it.
fn wh_word(slot: &str) -> Option<(&'static str, &str)> {
    let (head, rest) = slot.split_once('-').unwrap_or((slot, ""));
    let head = head.to_lowercase();
    WH_WORDS.iter().find(|w| **w == head).map(|w| (*w, rest))
}

/// The slot with its leading do-support removed, when present.
fn leading_do(slot: &str) -> Option<&str> {
    let (head, rest) = slot.split_once('-')?;
    (DO_SUPPORT.contains(&head.to_lowercase().as_str()) && !rest.is_empty()).then_some(rest)
}
