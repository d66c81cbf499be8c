//! Semantic typing of finalized slots.
//!
//! Types are coarse tags (`person`, `robot`, `animal`, `action`, ...) derived
//! from the lexicon's dotted NLP categories and a couple of name heuristics.
//! An untypeable slot is `types: None`, which downstream type inference is
//! expected to resolve; it is never an error.

use indexmap::IndexSet;

use crate::config::NormalizerConfig;
use crate::lexicon::{Lexicon, LexiconEntry, Pos};
use crate::triple::{Slot, TypedLabel};

/// Tags that carry syntax, not semantics. Pronouns and deictics need
/// coreference rather than typing.
const SYNTACTIC_TAGS: &[&str] = &[
    "determiner",
    "article",
    "preposition",
    "adjective",
    "pronoun",
    "deictic",
    "auxiliary",
];

/// Dotted categories that generalize to their prefix.
const PREFIX_CLASSES: &[&str] = &["article", "preposition", "numeral", "adverb"];

/// Type a slot. Already-typed slots are returned unchanged.
pub fn type_slot(slot: Slot, lexicon: &dyn Lexicon, config: &NormalizerConfig) -> Slot {
    let label = match slot {
        Slot::Typed(_) => return slot,
        Slot::Raw(label) => label,
    };

    if label.is_empty() {
        return Slot::Typed(TypedLabel::new(label, Some(IndexSet::new())));
    }

    let tokens = lexicon.tokens(&label);
    let types = if tokens.len() <= 1 {
        type_word(&label, lexicon, config)
    } else {
        type_phrase(&tokens, lexicon, config)
    };
    Slot::Typed(TypedLabel::new(label, types))
}

/// Type a single word (or a whole-slot collocation).
fn type_word(word: &str, lexicon: &dyn Lexicon, config: &NormalizerConfig) -> Option<IndexSet<String>> {
    let tags = word_tags(word, lexicon, config)?;
    if tags.iter().any(|t| t == "deictic" || t == "pronoun") {
        return Some(tags.into_iter().collect());
    }
    let fixed = fix_nlp_types(&tags);
    (!fixed.is_empty()).then_some(fixed)
}

/// Type each word independently, then filter and generalize the union.
/// `None` when nothing survives the filter.
fn type_phrase(
    tokens: &[String],
    lexicon: &dyn Lexicon,
    config: &NormalizerConfig,
) -> Option<IndexSet<String>> {
    let tags: Vec<String> = tokens
        .iter()
        .filter_map(|token| word_tags(token, lexicon, config))
        .flatten()
        .collect();
    let fixed = fix_nlp_types(&tags);
    (!fixed.is_empty()).then_some(fixed)
}

/// Raw tags for one word, before `fix_nlp_types`.
fn word_tags(word: &str, lexicon: &dyn Lexicon, config: &NormalizerConfig) -> Option<Vec<String>> {
    let lower = word.to_lowercase();
    if let Some(entry) = typed_entry(&lower, lexicon) {
        if entry.proximity.is_some() {
            return Some(vec!["deictic".into()]);
        }
        if entry.person.is_some() {
            return Some(vec!["pronoun".into()]);
        }
        if let Some(category) = &entry.category {
            return Some(vec![category.clone()]);
        }
    }

    if config.is_agent_name(&lower) {
        Some(vec!["robot".into()])
    } else if config.is_known_person(&lower)
        || (config.capitalized_as_person && word.chars().next().is_some_and(char::is_uppercase))
    {
        Some(vec!["person".into()])
    } else {
        None
    }
}

/// The lexicon entry for a word or its noun lemma, if it carries any
/// typing facet.
fn typed_entry<'a>(word: &str, lexicon: &'a dyn Lexicon) -> Option<&'a LexiconEntry> {
    let carries_type =
        |e: &&LexiconEntry| e.proximity.is_some() || e.person.is_some() || e.category.is_some();
    lexicon.lookup(word).filter(carries_type).or_else(|| {
        let lemma = lexicon.lemmatize(word, Some(Pos::Noun));
        if lemma == word {
            return None;
        }
        lexicon.lookup(&lemma).filter(carries_type)
    })
}

/// Filter and generalize raw NLP tags.
///
/// Drops bare syntactic tags, collapses `modal.*` to `modal`, keeps the
/// prefix of article/preposition/numeral/adverb categories, maps `verb.*`
/// to `verb`, and keeps the suffix of other dotted categories. Finally
/// `artifact` implies `object`, and `verb`/`act` imply `action`.
pub fn fix_nlp_types<S: AsRef<str>>(tags: &[S]) -> IndexSet<String> {
    let mut fixed = IndexSet::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || SYNTACTIC_TAGS.contains(&tag) {
            continue;
        }
        let generalized = match tag.split_once('.') {
            None => tag,
            Some(("modal", _)) => "modal",
            Some(("verb", _)) => "verb",
            Some((prefix, _)) if PREFIX_CLASSES.contains(&prefix) => prefix,
            Some((_, suffix)) => suffix,
        };
        fixed.insert(generalized.to_string());
    }

    let implied: Vec<String> = fixed
        .iter()
        .filter_map(|t| match t.as_str() {
            "artifact" => Some("object".to_string()),
            "verb" | "act" => Some("action".to_string()),
            _ => None,
        })
        .collect();
    fixed.extend(implied);
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconTable;

    fn lex() -> LexiconTable {
        LexiconTable::english().unwrap()
    }

    fn types_of(label: &str) -> Option<Vec<String>> {
        let lex = lex();
        let config = NormalizerConfig::default();
        type_slot(Slot::from(label), &lex, &config)
            .into_typed()
            .types
            .map(|t| t.into_iter().collect())
    }

    #[test]
    fn fix_nlp_types_rules() {
        let fixed = fix_nlp_types(&[
            "determiner",
            "modal.ability",
            "preposition.spatial",
            "verb.motion",
            "noun.artifact",
            "numeral.cardinal",
            "adjective",
        ]);
        let fixed: Vec<&str> = fixed.iter().map(String::as_str).collect();
        assert_eq!(
            fixed,
            vec!["modal", "preposition", "verb", "artifact", "numeral", "action", "object"]
        );
    }

    #[test]
    fn act_implies_action() {
        let fixed = fix_nlp_types(&["noun.act"]);
        assert!(fixed.contains("act"));
        assert!(fixed.contains("action"));
    }

    #[test]
    fn empty_slot_has_empty_types() {
        assert_eq!(types_of(""), Some(vec![]));
    }

    #[test]
    fn single_words() {
        assert_eq!(types_of("this"), Some(vec!["deictic".into()]));
        assert_eq!(types_of("she"), Some(vec!["pronoun".into()]));
        assert_eq!(types_of("dogs"), Some(vec!["animal".into()]));
        assert_eq!(types_of("hat"), Some(vec!["artifact".into(), "object".into()]));
        assert_eq!(types_of("leolani"), Some(vec!["robot".into()]));
        assert_eq!(types_of("Lenka"), Some(vec!["person".into()]));
        assert_eq!(types_of("amsterdam"), None);
        // Only syntactic tags: nothing left to say.
        assert_eq!(types_of("the"), None);
    }

    #[test]
    fn collocation_is_one_word() {
        assert_eq!(types_of("ice-cream"), Some(vec!["food".into()]));
        assert_eq!(types_of("new-york"), Some(vec!["location".into()]));
    }

    #[test]
    fn multi_word_phrases() {
        assert_eq!(types_of("the-blue-hat"), Some(vec!["artifact".into(), "object".into()]));
        assert_eq!(types_of("be-from"), Some(vec!["verb".into(), "preposition".into(), "action".into()]));
        assert_eq!(types_of("zorp-blarg"), None);
        // Tags present but all syntactic.
        assert_eq!(types_of("the-blue"), None);
    }

    #[test]
    fn typing_is_idempotent() {
        let lex = lex();
        let config = NormalizerConfig::default();
        let once = type_slot(Slot::from("my-dog"), &lex, &config);
        let twice = type_slot(once.clone(), &lex, &config);
        assert_eq!(once, twice);

        let custom = Slot::Typed(TypedLabel::new("x", None));
        assert_eq!(type_slot(custom.clone(), &lex, &config), custom);
    }

    #[test]
    fn roster_and_heuristic_are_configurable() {
        let lex = lex();
        let config = NormalizerConfig {
            capitalized_as_person: false,
            known_persons: vec!["selene".into()],
            ..Default::default()
        };
        let amsterdam = type_slot(Slot::from("Amsterdam"), &lex, &config).into_typed();
        assert_eq!(amsterdam.types, None);
        let selene = type_slot(Slot::from("selene"), &lex, &config).into_typed();
        assert!(selene.has_type("person"));
    }
}
