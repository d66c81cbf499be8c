//! Rule-based English lemmatizer.
//!
//! Works like WordNet's morphy: irregular forms come from a static
//! exception table, regular forms are produced by suffix detachment rules,
//! and each candidate is checked against a dictionary predicate (normally
//! "is this word in the lexicon?"). The first known candidate wins; when no
//! candidate is known the first applicable rule's output is used.
//!
//! The dictionary check is what produces the lemmatizer's characteristic
//! failures: "hated" detaches to "hat" before "hate" because "hat" is a
//! known noun. The predicate fixer patches those cases.

use super::entry::Pos;

/// Irregular verb forms → lemma.
static IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("'m", "be"),
    ("'re", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("saw", "see"),
    ("seen", "see"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("made", "make"),
    ("took", "take"),
    ("taken", "take"),
    ("got", "get"),
    ("gotten", "get"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("felt", "feel"),
    ("told", "tell"),
    ("said", "say"),
    ("came", "come"),
    ("gave", "give"),
    ("given", "give"),
    ("found", "find"),
    ("bought", "buy"),
    ("brought", "bring"),
    ("heard", "hear"),
    ("met", "meet"),
    ("left", "leave"),
    ("kept", "keep"),
    ("slept", "sleep"),
    ("sat", "sit"),
    ("ran", "run"),
    ("wrote", "write"),
    ("written", "write"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("drank", "drink"),
    ("drunk", "drink"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("born", "bear"),
    ("bore", "bear"),
    ("borne", "bear"),
    ("began", "begin"),
    ("begun", "begin"),
    ("became", "become"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("taught", "teach"),
    ("caught", "catch"),
    ("fought", "fight"),
    ("sold", "sell"),
    ("built", "build"),
    ("sent", "send"),
    ("spent", "spend"),
    ("lost", "lose"),
    ("won", "win"),
    ("understood", "understand"),
    ("stood", "stand"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("swam", "swim"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("hid", "hide"),
    ("hidden", "hide"),
    ("led", "lead"),
    ("meant", "mean"),
    ("paid", "pay"),
    ("held", "hold"),
];

/// Irregular noun plurals → singular.
static IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("shelves", "shelf"),
];

/// Verb suffix detachment rules, tried in order.
static VERB_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("s", ""),
    ("ed", ""),
    ("ed", "e"),
    ("ing", ""),
    ("ing", "e"),
];

/// Noun suffix detachment rules, tried in order.
static NOUN_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("s", ""),
];

/// Shortest word the suffix rules will touch.
const MIN_RULE_LEN: usize = 3;

/// Shortest stem a suffix rule may leave behind.
const MIN_STEM_LEN: usize = 3;

/// Stateless rule lemmatizer over the static tables above.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self
    }

    /// Lemmatize a single lowercased token.
    ///
    /// Hyphen-joined phrases are returned unchanged: lemmatizing a phrase is
    /// the caller's job, segment by segment. With no POS hint the verb
    /// reading is preferred when it yields a known word.
    pub fn lemmatize(&self, word: &str, pos: Option<Pos>, known: impl Fn(&str) -> bool) -> String {
        let lower = word.trim().to_lowercase();
        if lower.is_empty() || lower.contains('-') {
            return lower;
        }

        match pos {
            Some(Pos::Verb) => self.verb(&lower, &known),
            Some(Pos::Noun) => self.noun(&lower, &known),
            None => {
                let verb = self.verb(&lower, &known);
                if verb != lower && known(&verb) {
                    verb
                } else {
                    self.noun(&lower, &known)
                }
            }
        }
    }

    fn verb(&self, word: &str, known: &impl Fn(&str) -> bool) -> String {
        if let Some(lemma) = irregular(IRREGULAR_VERBS, word) {
            return lemma.to_string();
        }
        prefer_known(word, detach(word, VERB_RULES, known), known)
    }

    fn noun(&self, word: &str, known: &impl Fn(&str) -> bool) -> String {
        if let Some(lemma) = irregular(IRREGULAR_NOUNS, word) {
            return lemma.to_string();
        }
        if word.ends_with("ss") || word.ends_with("us") {
            return word.to_string();
        }
        prefer_known(word, detach(word, NOUN_RULES, known), known)
    }
}

fn irregular(table: &'static [(&'static str, &'static str)], word: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, lemma)| *lemma)
}

/// A known word is only replaced by a candidate that is itself known.
fn prefer_known(word: &str, candidate: String, known: &impl Fn(&str) -> bool) -> String {
    if known(word) && !known(&candidate) {
        word.to_string()
    } else {
        candidate
    }
}

/// Apply suffix rules; return the first known candidate, else the first
/// candidate produced, else the word itself.
fn detach(word: &str, rules: &[(&str, &str)], known: &impl Fn(&str) -> bool) -> String {
    if word.len() < MIN_RULE_LEN {
        return word.to_string();
    }

    let mut fallback: Option<String> = None;
    for (suffix, replacement) in rules {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        if stem.len() < MIN_STEM_LEN {
            continue;
        }
        let candidate = format!("{stem}{replacement}");
        if known(&candidate) {
            return candidate;
        }
        if let Some(undoubled) = undouble(stem) {
            if replacement.is_empty() && known(&undoubled) {
                return undoubled;
            }
        }
        if fallback.is_none() {
            fallback = Some(match undouble(stem) {
                Some(undoubled) if replacement.is_empty() => undoubled,
                _ => candidate,
            });
        }
    }

    fallback.unwrap_or_else(|| word.to_string())
}

/// "runn" → "run", "stopp" → "stop". Only for doubled ASCII consonants.
fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let prev = chars.next()?;
    chars.next()?;
    let consonant = last.is_ascii_alphabetic() && !"aeiouls".contains(last);
    if last == prev && consonant {
        // `last` is ASCII, so dropping one byte stays on a char boundary.
        Some(stem[..stem.len() - last.len_utf8()].to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |w| words.contains(&w)
    }

    #[test]
    fn irregular_verbs() {
        let lem = RuleLemmatizer::new();
        let none = dict(&[]);
        assert_eq!(lem.lemmatize("is", Some(Pos::Verb), &none), "be");
        assert_eq!(lem.lemmatize("Went", Some(Pos::Verb), &none), "go");
        assert_eq!(lem.lemmatize("born", Some(Pos::Verb), &none), "bear");
    }

    #[test]
    fn regular_verbs_use_dictionary() {
        let lem = RuleLemmatizer::new();
        let known = dict(&["like", "watch", "hate", "visit"]);
        assert_eq!(lem.lemmatize("likes", Some(Pos::Verb), &known), "like");
        assert_eq!(lem.lemmatize("liked", Some(Pos::Verb), &known), "like");
        assert_eq!(lem.lemmatize("watches", Some(Pos::Verb), &known), "watch");
        assert_eq!(lem.lemmatize("watching", Some(Pos::Verb), &known), "watch");
        assert_eq!(lem.lemmatize("visited", Some(Pos::Verb), &known), "visit");
        assert_eq!(lem.lemmatize("hates", Some(Pos::Verb), &known), "hate");
    }

    #[test]
    fn known_noun_shadows_verb_stem() {
        let lem = RuleLemmatizer::new();
        let known = dict(&["hat", "hate"]);
        assert_eq!(lem.lemmatize("hated", Some(Pos::Verb), &known), "hat");
    }

    #[test]
    fn unknown_words_fall_back_to_first_rule() {
        let lem = RuleLemmatizer::new();
        let none = dict(&[]);
        assert_eq!(lem.lemmatize("running", Some(Pos::Verb), &none), "run");
        assert_eq!(lem.lemmatize("jumped", Some(Pos::Verb), &none), "jump");
    }

    #[test]
    fn known_words_are_not_mangled() {
        let lem = RuleLemmatizer::new();
        let known = dict(&["guess", "series", "like"]);
        assert_eq!(lem.lemmatize("guess", Some(Pos::Verb), &known), "guess");
        assert_eq!(lem.lemmatize("series", Some(Pos::Noun), &known), "series");
        assert_eq!(lem.lemmatize("like", Some(Pos::Verb), &known), "like");
        assert_eq!(lem.lemmatize("bring", Some(Pos::Verb), &dict(&[])), "bring");
    }

    #[test]
    fn nouns() {
        let lem = RuleLemmatizer::new();
        let known = dict(&["dog", "box", "sister"]);
        assert_eq!(lem.lemmatize("dogs", Some(Pos::Noun), &known), "dog");
        assert_eq!(lem.lemmatize("boxes", Some(Pos::Noun), &known), "box");
        assert_eq!(lem.lemmatize("children", Some(Pos::Noun), &known), "child");
        assert_eq!(lem.lemmatize("glass", Some(Pos::Noun), &known), "glass");
        assert_eq!(lem.lemmatize("sisters", None, &known), "sister");
    }

    #[test]
    fn non_ascii_tokens_do_not_panic() {
        let lem = RuleLemmatizer::new();
        let none = dict(&[]);
        assert_eq!(lem.lemmatize("co₂s", Some(Pos::Noun), &none), "co₂");
        assert_eq!(lem.lemmatize("ぁs", Some(Pos::Noun), &none), "ぁ");
        assert_eq!(lem.lemmatize("ぁぁed", Some(Pos::Verb), &none), "ぁぁ");
        assert_eq!(lem.lemmatize("café", None, &none), "café");
        assert_eq!(undouble("co₂₂"), None);
        assert_eq!(undouble("stopp").as_deref(), Some("stop"));
    }

    #[test]
    fn phrases_and_empty_untouched() {
        let lem = RuleLemmatizer::new();
        let none = dict(&[]);
        assert_eq!(lem.lemmatize("", Some(Pos::Verb), &none), "");
        assert_eq!(lem.lemmatize("listen-to", Some(Pos::Verb), &none), "listen-to");
    }
}
