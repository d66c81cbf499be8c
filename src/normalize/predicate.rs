//! Predicate fixing: lemmatize single-token predicates and patch the known
//! lemmatizer failures.

use crate::lexicon::{Lexicon, Pos};

/// Lemmatizer outputs that are known to be wrong → the intended lemma.
static LEMMA_CORRECTIONS: &[(&str, &str)] = &[("hat", "hate"), ("bear", "born"), ("borne", "born")];

/// Lemma used for an empty predicate.
pub const COPULA: &str = "be";

/// Apply the correction table to a single lemma.
pub fn correct(lemma: &str) -> &str {
    LEMMA_CORRECTIONS
        .iter()
        .find(|(wrong, _)| *wrong == lemma)
        .map_or(lemma, |(_, right)| *right)
}

/// Canonicalize a predicate.
///
/// Empty → `be`. A single token is lemmatized as a verb. The correction
/// table then applies to the whole predicate and to each hyphen segment;
/// multi-word predicates are otherwise left as they are.
pub fn fix_predicate(predicate: &str, lexicon: &dyn Lexicon) -> String {
    let predicate = predicate.trim_matches('-');
    if predicate.is_empty() {
        return COPULA.to_string();
    }

    if !predicate.contains('-') {
        let lemma = lemmatize_verb(predicate, lexicon);
        if lemma.is_empty() {
            return COPULA.to_string();
        }
        return lemma;
    }

    let whole = correct(predicate);
    if whole != predicate {
        return whole.to_string();
    }
    predicate
        .split('-')
        .map(correct)
        .collect::<Vec<_>>()
        .join("-")
}

/// Corrected verb lemma of a single-token predicate. Multi-word predicates
/// are already canonical and come back with only their outer hyphens
/// trimmed.
///
/// Restructuring runs this on a predicate before growing it into a phrase
/// (`lives` + `in` → `live-in`), since [`fix_predicate`] no longer
/// lemmatizes it afterwards.
pub fn lemmatize_verb(predicate: &str, lexicon: &dyn Lexicon) -> String {
    let predicate = predicate.trim_matches('-');
    if predicate.is_empty() || predicate.contains('-') {
        return predicate.to_string();
    }
    correct(&lexicon.lemmatize(predicate, Some(Pos::Verb))).to_string()
}

/// Lemma of a predicate for trigger matching: a single token is lemmatized
/// as a verb; for a hyphenated predicate only the head segment is.
///
/// `"is-named"` → `"be-named"`, `"listening-to"` → `"listen-to"`.
pub fn predicate_lemma(predicate: &str, lexicon: &dyn Lexicon) -> String {
    let predicate = predicate.trim_matches('-');
    match predicate.split_once('-') {
        None => lexicon.lemmatize(predicate, Some(Pos::Verb)),
        Some((head, rest)) => format!("{}-{rest}", lexicon.lemmatize(head, Some(Pos::Verb))),
    }
}

/// Whether the predicate is a bare copula ("be", "is", "am", ...).
pub fn is_copula(predicate: &str, lexicon: &dyn Lexicon) -> bool {
    !predicate.contains('-') && predicate_lemma(predicate, lexicon) == COPULA
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconTable;

    fn lex() -> LexiconTable {
        LexiconTable::english().unwrap()
    }

    #[test]
    fn empty_predicate_is_copula() {
        let lex = lex();
        assert_eq!(fix_predicate("", &lex), "be");
        assert_eq!(fix_predicate("-", &lex), "be");
    }

    #[test]
    fn single_token_is_lemmatized() {
        let lex = lex();
        assert_eq!(fix_predicate("likes", &lex), "like");
        assert_eq!(fix_predicate("is", &lex), "be");
        assert_eq!(fix_predicate("went", &lex), "go");
    }

    #[test]
    fn lemmatizer_failures_are_patched() {
        let lex = lex();
        // The lemmatizer alone gets these wrong.
        assert_eq!(lex.lemmatize("hated", Some(Pos::Verb)), "hat");
        assert_eq!(fix_predicate("hated", &lex), "hate");
        assert_eq!(fix_predicate("born", &lex), "born");
        assert_eq!(fix_predicate("borne", &lex), "born");
    }

    #[test]
    fn multi_word_only_gets_corrections() {
        let lex = lex();
        assert_eq!(fix_predicate("be-from", &lex), "be-from");
        assert_eq!(fix_predicate("not-hat", &lex), "not-hate");
        assert_eq!(fix_predicate("was-bear", &lex), "was-born");
        // Not re-lemmatized.
        assert_eq!(fix_predicate("likes-to", &lex), "likes-to");
    }

    #[test]
    fn verb_lemma_before_splicing() {
        let lex = lex();
        assert_eq!(lemmatize_verb("lives", &lex), "live");
        assert_eq!(lemmatize_verb("am", &lex), "be");
        assert_eq!(lemmatize_verb("hated", &lex), "hate");
        assert_eq!(lemmatize_verb("can", &lex), "can");
        assert_eq!(lemmatize_verb("", &lex), "");
        assert_eq!(lemmatize_verb("likes-to", &lex), "likes-to");
        // Stable under repetition.
        assert_eq!(lemmatize_verb(&lemmatize_verb("born", &lex), &lex), "born");
    }

    #[test]
    fn lemma_of_head_segment() {
        let lex = lex();
        assert_eq!(predicate_lemma("is-named", &lex), "be-named");
        assert_eq!(predicate_lemma("watches", &lex), "watch");
        assert!(is_copula("are", &lex));
        assert!(!is_copula("be-from", &lex));
    }
}
