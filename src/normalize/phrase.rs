//! Phrase restructuring: move tokens between the argument slots and the
//! predicate based on what the first token of an argument is.
//!
//! ```text
//! argument ──not-──→ predicate prefix
//! subject  ──possessive──→ owner[-kin span] / rest demoted to "<rest>-is"
//! object   ──preposition──→ "<pred>-<prep>" (or "<pred>-be-<prep>")
//!          ──possessive──→ owner resolved in place
//!          ──modal──→ folded onto the predicate
//! ```
//!
//! Every function takes a triple by value and returns the rewritten one. A
//! single-token predicate is verb-lemmatized before anything is spliced
//! onto it.

use super::RuleContext;
use super::predicate::{is_copula, lemmatize_verb};
use crate::dialogue::DialogueResult;
use crate::lexicon::{Category, LexiconEntry};
use crate::triple::{Triple, join_phrase};

/// Negation fragment that can lead a subject after contraction splitting.
const NEGATION: &str = "not";

/// Modifier kept with a kinship term in a possessive subject.
const KIN_MODIFIER: &str = "best";

/// Marker appended to tokens demoted from a possessive subject.
const DERIVED_PROPERTY: &str = "is";

/// Full restructuring for triples no domain rule claimed: subject noun
/// phrase, object complement, then subject complement. Negation is split
/// off earlier, before the domain rules see the triple.
pub fn restructure(triple: Triple, ctx: &RuleContext<'_>) -> DialogueResult<Triple> {
    let triple = analyze_noun_phrase(triple, ctx)?;
    let triple = analyze_object(triple, ctx)?;
    Ok(analyze_subject_complement(triple, ctx))
}

/// Argument-only restructuring for triples a domain rule already rewrote:
/// owners and pronouns are resolved in place and the predicate is left
/// alone.
pub fn resolve_arguments(triple: Triple, ctx: &RuleContext<'_>) -> DialogueResult<Triple> {
    let subject = resolve_owner(&triple.subject, ctx)?;
    let object = resolve_owner(&triple.object, ctx)?;
    Ok(triple.with_subject(subject).with_object(object))
}

// ── Subject ─────────────────────────────────────────────────────────────

/// Move a leading `not-` from the subject or the object to the front of the
/// predicate: `i am not-happy` → `i not-be happy`.
pub fn split_negation(triple: Triple, ctx: &RuleContext<'_>) -> Triple {
    let (subject, subject_negated) = strip_negation(&triple.subject);
    let (object, object_negated) = strip_negation(&triple.object);
    if !subject_negated && !object_negated {
        return triple;
    }
    let verb = lemmatize_verb(&triple.predicate, ctx.lexicon);
    let predicate = if verb == NEGATION || verb.starts_with("not-") {
        verb
    } else {
        join_phrase(&[NEGATION, verb.as_str()])
    };
    Triple::new(subject, predicate, object)
}

fn strip_negation(slot: &str) -> (String, bool) {
    if slot == NEGATION {
        (String::new(), true)
    } else if let Some(rest) = slot.strip_prefix("not-") {
        (rest.to_string(), true)
    } else {
        (slot.to_string(), false)
    }
}

/// Possessive analysis for a multi-word subject led by a person-denoting
/// word, else pronoun resolution of a one-word subject.
pub fn analyze_noun_phrase(triple: Triple, ctx: &RuleContext<'_>) -> DialogueResult<Triple> {
    let tokens = ctx.lexicon.tokens(&triple.subject);
    match tokens.as_slice() {
        [] => Ok(triple),
        [word] => {
            let subject = ctx.dialogue.resolve(word)?;
            Ok(triple.with_subject(subject))
        }
        [first, rest @ ..] => match ctx.entry(first) {
            Some(entry) if entry.possessive => possessive_subject(triple, first, rest, ctx),
            Some(entry) if entry.denotes_person() => {
                let subject = resolve_owner(&triple.subject, ctx)?;
                Ok(triple.with_subject(subject))
            }
            _ => Ok(triple),
        },
    }
}

/// `my-best-friend` stays `Lenka-best-friend`; `my-favorite-color be blue`
/// becomes `Lenka favorite-color-is blue`.
fn possessive_subject(
    triple: Triple,
    possessive: &str,
    rest: &[String],
    ctx: &RuleContext<'_>,
) -> DialogueResult<Triple> {
    let owner = ctx.dialogue.resolve(possessive)?;
    let (kin, demoted): (Vec<&String>, Vec<&String>) = rest
        .iter()
        .partition(|token| token.as_str() == KIN_MODIFIER || ctx.is_kinship(token));

    let mut subject_parts = vec![owner.as_str()];
    subject_parts.extend(kin.iter().map(|t| t.as_str()));
    let subject = join_phrase(&subject_parts);

    if demoted.is_empty() {
        return Ok(triple.with_subject(subject));
    }

    let mut property: Vec<&str> = demoted.iter().map(|t| t.as_str()).collect();
    property.push(DERIVED_PROPERTY);
    let property = join_phrase(&property);
    let predicate = if triple.predicate.is_empty() || is_copula(&triple.predicate, ctx.lexicon) {
        property
    } else {
        let verb = lemmatize_verb(&triple.predicate, ctx.lexicon);
        join_phrase(&[property.as_str(), verb.as_str()])
    };
    Ok(triple.with_subject(subject).with_predicate(predicate))
}

/// A preposition- or modal-led subject hands its first token to the
/// predicate, like an object does.
pub fn analyze_subject_complement(triple: Triple, ctx: &RuleContext<'_>) -> Triple {
    let tokens = ctx.lexicon.tokens(&triple.subject);
    match tokens.as_slice() {
        [word] if ctx.entry(word).is_some_and(LexiconEntry::is_modal) => {
            let predicate = fold_modal(&triple.predicate, word, ctx);
            triple.with_subject("").with_predicate(predicate)
        }
        [first, rest @ ..] if !rest.is_empty() => match ctx.entry(first) {
            Some(entry) if entry.is_preposition() => {
                let predicate = splice_preposition(&triple.predicate, first, ctx);
                triple.with_subject(rest.join("-")).with_predicate(predicate)
            }
            Some(entry) if entry.is_modal() => {
                let predicate = fold_modal(&triple.predicate, first, ctx);
                triple.with_subject(rest.join("-")).with_predicate(predicate)
            }
            _ => triple,
        },
        _ => triple,
    }
}

// ── Object ──────────────────────────────────────────────────────────────

/// Complement analysis of the object, dispatching on its word count.
pub fn analyze_object(triple: Triple, ctx: &RuleContext<'_>) -> DialogueResult<Triple> {
    let tokens = ctx.lexicon.tokens(&triple.object);
    match tokens.as_slice() {
        [] => Ok(triple),
        [word] => {
            if ctx.entry(word).is_some_and(LexiconEntry::is_modal) {
                let predicate = fold_modal(&triple.predicate, word, ctx);
                return Ok(triple.with_object("").with_predicate(predicate));
            }
            let object = ctx.dialogue.resolve(word)?;
            Ok(triple.with_object(object))
        }
        [first, rest @ ..] => match ctx.entry(first) {
            Some(entry) if entry.is_preposition() => {
                let predicate = splice_preposition(&triple.predicate, first, ctx);
                let object = resolve_owner(&rest.join("-"), ctx)?;
                Ok(triple.with_object(object).with_predicate(predicate))
            }
            Some(entry) if entry.denotes_person() => {
                let object = resolve_owner(&triple.object, ctx)?;
                Ok(triple.with_object(object))
            }
            Some(entry) if entry.is_modal() => {
                let predicate = fold_modal(&triple.predicate, first, ctx);
                Ok(triple.with_object(rest.join("-")).with_predicate(predicate))
            }
            _ => Ok(triple),
        },
    }
}

/// `<pred>-<prep>`, or `<pred>-be-<prep>` after a modal/auxiliary.
pub fn splice_preposition(predicate: &str, preposition: &str, ctx: &RuleContext<'_>) -> String {
    let verb = lemmatize_verb(predicate, ctx.lexicon);
    let auxiliary = !verb.contains('-') && ctx.entry(&verb).is_some_and(LexiconEntry::is_auxiliary);
    if auxiliary {
        join_phrase(&[verb.as_str(), "be", preposition])
    } else {
        join_phrase(&[verb.as_str(), preposition])
    }
}

/// `<pred>-<modal>`.
fn fold_modal(predicate: &str, modal: &str, ctx: &RuleContext<'_>) -> String {
    let verb = lemmatize_verb(predicate, ctx.lexicon);
    join_phrase(&[verb.as_str(), modal])
}

// ── Owners ──────────────────────────────────────────────────────────────

/// Resolve the person-denoting head of a phrase in place, keeping the rest
/// of the phrase: `my-dog` → `Lenka-dog`, `you` → `Leolani`.
pub fn resolve_owner(phrase: &str, ctx: &RuleContext<'_>) -> DialogueResult<String> {
    let tokens = ctx.lexicon.tokens(phrase);
    match tokens.as_slice() {
        [] => Ok(String::new()),
        [word] => ctx.dialogue.resolve(word),
        [first, rest @ ..] => {
            if !ctx.entry(first).is_some_and(LexiconEntry::denotes_person) {
                return Ok(phrase.to_string());
            }
            let owner = ctx.dialogue.resolve(first)?;
            let mut parts = vec![owner.as_str()];
            parts.extend(rest.iter().map(String::as_str));
            Ok(join_phrase(&parts))
        }
    }
}

/// The owner of a phrase containing a domain term: every token that is not
/// part of the term span, with the first one pronoun-resolved and any
/// `'s` clitic dropped. Empty when the phrase is only the term.
pub fn owner_of(phrase: &str, category: Category, ctx: &RuleContext<'_>) -> DialogueResult<String> {
    let tokens = ctx.lexicon.tokens(phrase);
    let mut owner = Vec::new();
    for token in &tokens {
        let in_span = token == KIN_MODIFIER
            || ctx.lexicon.lookup_subword(token, category).is_some()
            || ctx.entry(token).is_some_and(|e| e.category.as_deref() == Some("determiner"));
        if in_span {
            continue;
        }
        let token = token.strip_suffix("'s").unwrap_or(token);
        if owner.is_empty() {
            owner.push(ctx.dialogue.resolve(token)?);
        } else {
            owner.push(token.to_string());
        }
    }
    Ok(join_phrase(&owner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::DialogueContext;
    use crate::lexicon::LexiconTable;

    fn fixture() -> (LexiconTable, DialogueContext) {
        (
            LexiconTable::english().unwrap(),
            DialogueContext::human_speaking("Lenka", "Leolani").unwrap(),
        )
    }

    #[test]
    fn negation_moves_to_predicate() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = split_negation(Triple::new("not-selene", "likes", "cheese"), &ctx);
        assert_eq!(t, Triple::new("selene", "not-like", "cheese"));
        let untouched = split_negation(Triple::new("nothing", "is", "free"), &ctx);
        assert_eq!(untouched, Triple::new("nothing", "is", "free"));
    }

    #[test]
    fn negated_complement_moves_to_predicate() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = split_negation(Triple::new("i", "am", "not-happy"), &ctx);
        assert_eq!(t, Triple::new("i", "not-be", "happy"));
        let t = split_negation(Triple::new("my-keys", "are", "not-in-my-bag"), &ctx);
        assert_eq!(t, Triple::new("my-keys", "not-be", "in-my-bag"));
        // Negated on both sides is still one negation.
        let t = split_negation(Triple::new("not-selene", "like", "not"), &ctx);
        assert_eq!(t, Triple::new("selene", "not-like", ""));
    }

    #[test]
    fn possessive_subject_keeps_kin_span() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_noun_phrase(Triple::new("my-best-friend", "like", "cheese"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka-best-friend", "like", "cheese"));
    }

    #[test]
    fn possessive_subject_demotes_property() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_noun_phrase(Triple::new("my-favorite-color", "be", "blue"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "favorite-color-is", "blue"));

        let t = analyze_noun_phrase(Triple::new("your-dog", "like", "cheese"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Leolani", "dog-is-like", "cheese"));
    }

    #[test]
    fn one_word_subject_is_resolved() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_noun_phrase(Triple::new("you", "hate", "dogs"), &ctx).unwrap();
        assert_eq!(t.subject, "Leolani");
    }

    #[test]
    fn preposition_led_object_moves_to_predicate() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_object(Triple::new("Lenka", "live", "in-my-house"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "live-in", "Lenka-house"));

        let t = analyze_object(Triple::new("Lenka", "be", "from-amsterdam"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "be-from", "amsterdam"));
    }

    #[test]
    fn inflected_predicate_is_lemmatized_before_splicing() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_object(Triple::new("Lenka", "am", "from-amsterdam"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "be-from", "amsterdam"));
        let t = analyze_object(Triple::new("Lenka", "lives", "in-amsterdam"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "live-in", "amsterdam"));
        let t = analyze_object(Triple::new("Lenka", "was", "at-home"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "be-at", "home"));
        let t = analyze_object(Triple::new("Lenka", "did", "in-the-garden"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "do-be-in", "the-garden"));
        let t = analyze_object(Triple::new("Lenka", "swims", "can"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "swim-can", ""));

        let t = analyze_noun_phrase(Triple::new("my-dog", "likes", "cheese"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "dog-is-like", "cheese"));
    }

    #[test]
    fn preposition_after_modal_inserts_be() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_object(Triple::new("Lenka", "can", "in-the-garden"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "can-be-in", "the-garden"));
        // A collocation preposition is one token.
        let t = analyze_object(Triple::new("cat", "sit", "next-to-the-sofa"), &ctx).unwrap();
        assert_eq!(t, Triple::new("cat", "sit-next-to", "the-sofa"));
    }

    #[test]
    fn modal_object_is_folded() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_object(Triple::new("Lenka", "swim", "can"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "swim-can", ""));

        let t = analyze_object(Triple::new("Lenka", "be", "must-go"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka", "be-must", "go"));
    }

    #[test]
    fn possessive_object_keeps_phrase() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_object(Triple::new("selene", "like", "your-hat"), &ctx).unwrap();
        assert_eq!(t.object, "Leolani-hat");
        let t = analyze_object(Triple::new("selene", "see", "me"), &ctx).unwrap();
        assert_eq!(t.object, "Lenka");
    }

    #[test]
    fn preposition_led_subject() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = analyze_subject_complement(Triple::new("in-the-box", "be", "cat"), &ctx);
        assert_eq!(t, Triple::new("the-box", "be-in", "cat"));
    }

    #[test]
    fn owner_of_strips_domain_span() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        assert_eq!(owner_of("my-mother", Category::Kinship, &ctx).unwrap(), "Lenka");
        assert_eq!(owner_of("selene's-best-friend", Category::Kinship, &ctx).unwrap(), "selene");
        assert_eq!(owner_of("the-mother", Category::Kinship, &ctx).unwrap(), "");
    }

    #[test]
    fn resolve_arguments_leaves_predicate() {
        let (lex, dlg) = fixture();
        let ctx = RuleContext::new(&lex, &dlg);
        let t = resolve_arguments(Triple::new("my-keys", "be-inside", "you"), &ctx).unwrap();
        assert_eq!(t, Triple::new("Lenka-keys", "be-inside", "Leolani"));
    }
}
