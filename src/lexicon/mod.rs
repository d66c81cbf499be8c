//! Lexicon: word → structured entry, plus lemmatization.
//!
//! The normalizer consumes the lexicon through the [`Lexicon`] trait so a
//! caller can inject any implementation (a fake in tests, a WordNet-backed
//! one in production). [`LexiconTable`] is the default implementation: a
//! hash table loaded from TOML, with the English lexicon compiled into the
//! binary with `include_str!`.
//!
//! ```text
//! english.toml ──parse──→ LexiconToml ──merge──→ HashMap<word, LexiconEntry>
//!                                                      │
//!                    lookup / lookup_subword / lemmatize ┘
//! ```
//!
//! The table is populated once and never mutated during normalization, so a
//! single `Arc<dyn Lexicon>` can be shared by any number of normalizers.

pub mod entry;
pub mod error;
pub mod lemma;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

pub use entry::{Category, LexiconEntry, Number, Person, Pos, Proximity, SubwordMatch, Valence};
pub use error::{LexiconError, LexiconResult};
pub use lemma::RuleLemmatizer;

/// Longest collocation (in hyphen segments) considered when joining tokens.
const MAX_COLLOCATION_WINDOW: usize = 3;

/// Read-only lexical knowledge consumed by the normalizer.
///
/// Only `lookup` and `lemmatize` are required; the subword queries and the
/// collocation-aware tokenizer have default implementations built on them.
pub trait Lexicon: Send + Sync {
    /// Exact lookup of a lowercased word or hyphen-joined collocation.
    fn lookup(&self, word: &str) -> Option<&LexiconEntry>;

    /// Lemmatize a single token. Phrases are returned unchanged.
    fn lemmatize(&self, word: &str, pos: Option<Pos>) -> String;

    /// Whether a hyphen-joined phrase is a known multi-word unit.
    fn is_collocation(&self, phrase: &str) -> bool {
        self.lookup(&phrase.to_lowercase())
            .is_some_and(|entry| entry.collocation)
    }

    /// Split a hyphen-joined phrase into tokens, greedily re-joining known
    /// collocations (longest match first).
    fn tokens(&self, phrase: &str) -> Vec<String> {
        let parts: Vec<&str> = phrase.split('-').filter(|p| !p.is_empty()).collect();
        let mut tokens = Vec::with_capacity(parts.len());
        let mut i = 0;
        while i < parts.len() {
            let max = MAX_COLLOCATION_WINDOW.min(parts.len() - i);
            let joined = (2..=max).rev().find_map(|window| {
                let candidate = parts[i..i + window].join("-");
                self.is_collocation(&candidate).then_some((candidate, window))
            });
            match joined {
                Some((candidate, window)) => {
                    tokens.push(candidate);
                    i += window;
                }
                None => {
                    tokens.push(parts[i].to_string());
                    i += 1;
                }
            }
        }
        tokens
    }

    /// Find the first token of `phrase` that carries a facet of `category`,
    /// trying the exact token before its noun lemma.
    ///
    /// Returns the facet value (the canonical relation or category name) and
    /// the lexicon key that matched.
    fn lookup_subword(&self, phrase: &str, category: Category) -> Option<SubwordMatch> {
        for token in self.tokens(phrase) {
            let lower = token.to_lowercase();
            let lemma = self.lemmatize(&lower, Some(Pos::Noun));
            for key in [lower.as_str(), lemma.as_str()] {
                if let Some(entry) = self.lookup(key) {
                    if let Some(relation) = entry.facet(category) {
                        return Some(SubwordMatch {
                            relation: relation.to_string(),
                            term: entry.word.clone(),
                        });
                    }
                }
            }
        }
        None
    }

    /// Like [`lookup_subword`](Self::lookup_subword) but only reports the
    /// matched term.
    fn lookup_subword_class(&self, phrase: &str, category: Category) -> Option<String> {
        self.lookup_subword(phrase, category).map(|m| m.term)
    }
}

// ── TOML schema ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LexiconToml {
    lexicon: LexiconMeta,
    #[serde(default)]
    pronouns: HashMap<String, PronounSpec>,
    #[serde(default)]
    deictics: HashMap<String, DeicticSpec>,
    #[serde(default)]
    kinship: HashMap<String, String>,
    #[serde(default)]
    activities: HashMap<String, String>,
    #[serde(default)]
    conditions: HashMap<String, String>,
    #[serde(default)]
    containers: HashMap<String, String>,
    #[serde(default)]
    professions: HashMap<String, String>,
    #[serde(default)]
    verbs: HashMap<String, Valence>,
    #[serde(default)]
    categories: HashMap<String, String>,
    #[serde(default)]
    collocations: CollocationSpec,
}

#[derive(Debug, Deserialize)]
struct LexiconMeta {
    id: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PronounSpec {
    person: Person,
    #[serde(default)]
    number: Option<Number>,
    #[serde(default)]
    possessive: bool,
}

#[derive(Debug, Deserialize)]
struct DeicticSpec {
    proximity: Proximity,
    #[serde(default)]
    number: Option<Number>,
}

#[derive(Debug, Default, Deserialize)]
struct CollocationSpec {
    #[serde(default)]
    phrases: Vec<String>,
}

// ── Bundled lexicon ─────────────────────────────────────────────────────

const ENGLISH_TOML: &str = include_str!("../../data/lexicon/english.toml");

// ── LexiconTable ────────────────────────────────────────────────────────

/// Hash-table lexicon loaded from TOML.
#[derive(Debug, Clone)]
pub struct LexiconTable {
    id: String,
    language: Option<String>,
    version: Option<String>,
    entries: HashMap<String, LexiconEntry>,
    lemmatizer: RuleLemmatizer,
}

impl LexiconTable {
    /// An empty lexicon. Useful as a base for hand-built test lexicons.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: None,
            version: None,
            entries: HashMap::new(),
            lemmatizer: RuleLemmatizer::new(),
        }
    }

    /// The bundled English lexicon.
    pub fn english() -> LexiconResult<Self> {
        Self::from_toml_str(ENGLISH_TOML, "bundled:english")
    }

    /// Load a lexicon from a TOML file on disk.
    pub fn load(path: &Path) -> LexiconResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LexiconError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parse a lexicon from TOML text. `source_name` only labels errors.
    pub fn from_toml_str(toml_str: &str, source_name: &str) -> LexiconResult<Self> {
        let parsed: LexiconToml = toml::from_str(toml_str).map_err(|e| LexiconError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

        let mut table = Self::empty(parsed.lexicon.id);
        table.language = parsed.lexicon.language;
        table.version = parsed.lexicon.version;

        for (word, spec) in parsed.pronouns {
            if let Some(entry) = table.entry_mut(&word) {
                entry.person = Some(spec.person);
                entry.number = spec.number.or(entry.number);
                entry.possessive = spec.possessive;
            }
        }
        for (word, spec) in parsed.deictics {
            if let Some(entry) = table.entry_mut(&word) {
                entry.proximity = Some(spec.proximity);
                entry.number = spec.number.or(entry.number);
            }
        }
        for (category, words) in [
            (Category::Kinship, parsed.kinship),
            (Category::Activity, parsed.activities),
            (Category::Condition, parsed.conditions),
            (Category::Container, parsed.containers),
            (Category::Profession, parsed.professions),
        ] {
            for (word, value) in words {
                if let Some(entry) = table.entry_mut(&word) {
                    *entry.facet_mut(category) = Some(value.trim().to_lowercase());
                }
            }
        }
        for (word, valence) in parsed.verbs {
            if let Some(entry) = table.entry_mut(&word) {
                entry.valence = Some(valence);
            }
        }
        for (word, category) in parsed.categories {
            if let Some(entry) = table.entry_mut(&word) {
                entry.category = Some(category.trim().to_lowercase());
            }
        }
        for phrase in parsed.collocations.phrases {
            if let Some(entry) = table.entry_mut(&phrase) {
                entry.collocation = true;
            }
        }

        table.fill_default_categories();

        tracing::info!(
            lexicon = %table.id,
            source = source_name,
            entries = table.entries.len(),
            "lexicon loaded"
        );
        Ok(table)
    }

    /// Insert or replace an entry, keyed by its lowercased word.
    pub fn insert(&mut self, mut entry: LexiconEntry) {
        let key = normalize_key(&entry.word);
        entry.word = key.clone();
        self.entries.insert(key, entry);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get or create the entry for a word. Returns `None` (and logs) for
    /// keys that normalize to nothing.
    fn entry_mut(&mut self, word: &str) -> Option<&mut LexiconEntry> {
        let key = normalize_key(word);
        if key.is_empty() {
            tracing::warn!(lexicon = %self.id, word, "skipping empty lexicon key");
            return None;
        }
        Some(
            self.entries
                .entry(key.clone())
                .or_insert_with(|| LexiconEntry::new(key)),
        )
    }

    /// Domain terms without an explicit NLP category get their domain's
    /// default one, so the typer can still classify them.
    fn fill_default_categories(&mut self) {
        for entry in self.entries.values_mut() {
            if entry.category.is_some() {
                continue;
            }
            let domain = Category::ALL
                .into_iter()
                .find(|c| entry.facet(*c).is_some());
            entry.category = domain.map(|c| c.default_nlp_category().to_string());
        }
    }
}

impl Lexicon for LexiconTable {
    fn lookup(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(word)
    }

    fn lemmatize(&self, word: &str, pos: Option<Pos>) -> String {
        self.lemmatizer
            .lemmatize(word, pos, |w| self.entries.contains_key(w))
    }
}

/// Lowercase, trim, and hyphen-join whitespace inside a lexicon key.
fn normalize_key(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> LexiconTable {
        LexiconTable::english().unwrap()
    }

    #[test]
    fn bundled_lexicon_parses() {
        let lex = english();
        assert_eq!(lex.id(), "english");
        assert_eq!(lex.language(), Some("en"));
        assert!(lex.len() > 100);
    }

    #[test]
    fn pronoun_and_deictic_facets() {
        let lex = english();
        let my = lex.lookup("my").unwrap();
        assert_eq!(my.person, Some(Person::First));
        assert!(my.possessive);
        assert!(my.denotes_person());

        let those = lex.lookup("those").unwrap();
        assert_eq!(those.proximity, Some(Proximity::Far));
        assert_eq!(those.number, Some(Number::Plural));
    }

    #[test]
    fn domain_terms_get_default_category() {
        let lex = english();
        assert_eq!(lex.lookup("mother").unwrap().category.as_deref(), Some("noun.person"));
        assert_eq!(lex.lookup("bag").unwrap().category.as_deref(), Some("noun.artifact"));
        // Explicit categories win over domain defaults.
        assert_eq!(lex.lookup("hat").unwrap().category.as_deref(), Some("noun.artifact"));
    }

    #[test]
    fn subword_lookup_finds_kinship_term() {
        let lex = english();
        let m = lex.lookup_subword("my-mom", Category::Kinship).unwrap();
        assert_eq!(m.relation, "mother");
        assert_eq!(m.term, "mom");

        let plural = lex.lookup_subword("my-sisters", Category::Kinship).unwrap();
        assert_eq!(plural.term, "sister");

        assert!(lex.lookup_subword("my-car", Category::Kinship).is_none());
        assert_eq!(
            lex.lookup_subword_class("in-my-bag", Category::Container).as_deref(),
            Some("bag")
        );
    }

    #[test]
    fn tokens_join_collocations() {
        let lex = english();
        assert_eq!(lex.tokens("next-to-the-sofa"), vec!["next-to", "the", "sofa"]);
        assert_eq!(lex.tokens("in-front-of-me"), vec!["in-front-of", "me"]);
        assert_eq!(lex.tokens("the-bag"), vec!["the", "bag"]);
        assert!(lex.tokens("").is_empty());
        assert!(lex.is_collocation("ice-cream"));
        assert!(!lex.is_collocation("ice"));
    }

    #[test]
    fn lemmatize_uses_table_as_dictionary() {
        let lex = english();
        assert_eq!(lex.lemmatize("hated", Some(Pos::Verb)), "hat");
        assert_eq!(lex.lemmatize("likes", Some(Pos::Verb)), "like");
        assert_eq!(lex.lemmatize("is", Some(Pos::Verb)), "be");
        assert_eq!(lex.lemmatize("dogs", Some(Pos::Noun)), "dog");
    }

    #[test]
    fn hand_built_lexicon() {
        let mut lex = LexiconTable::empty("test");
        let mut entry = LexiconEntry::new("Auntie");
        entry.kinship = Some("aunt".into());
        lex.insert(entry);
        assert_eq!(lex.len(), 1);
        assert!(lex.lookup("auntie").is_some());
        assert_eq!(
            lex.lookup_subword("our-auntie", Category::Kinship).unwrap().relation,
            "aunt"
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = LexiconTable::from_toml_str("[kinship]\nmom = 3", "inline").unwrap_err();
        assert!(matches!(err, LexiconError::Parse { .. }));
    }
}
