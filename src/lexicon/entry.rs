//! Lexicon entry model: one record per word, carrying zero or more facets.

use serde::{Deserialize, Serialize};

/// Grammatical person of a pronoun or possessive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    First,
    Second,
    Third,
}

/// Deictic proximity: "this"/"here" vs "that"/"there".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    Near,
    Far,
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Singular,
    Plural,
}

/// Part-of-speech hint for the lemmatizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pos {
    Verb,
    Noun,
}

/// Verb valence: how strongly a verb expresses sentiment or certainty.
///
/// Either axis may be absent; an absent axis means "no evidence", which is
/// different from an explicit neutral value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Valence {
    #[serde(default)]
    pub sentiment: Option<f32>,
    #[serde(default)]
    pub certainty: Option<f32>,
}

/// Semantic domains that carry a rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Kinship,
    Activity,
    Condition,
    Container,
    Profession,
}

impl Category {
    /// All domain categories, in rewrite-rule priority order.
    pub const ALL: [Category; 5] = [
        Category::Kinship,
        Category::Activity,
        Category::Condition,
        Category::Container,
        Category::Profession,
    ];

    /// The NLP category assigned to a term of this domain when the lexicon
    /// gives none explicitly.
    pub fn default_nlp_category(self) -> &'static str {
        match self {
            Self::Kinship | Self::Profession => "noun.person",
            Self::Activity => "noun.act",
            Self::Condition => "noun.feeling",
            Self::Container => "noun.artifact",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kinship => write!(f, "kinship"),
            Self::Activity => write!(f, "activity"),
            Self::Condition => write!(f, "condition"),
            Self::Container => write!(f, "container"),
            Self::Profession => write!(f, "profession"),
        }
    }
}

/// A single lexicon record keyed by its lowercased word or lemma.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LexiconEntry {
    /// The lowercased key (hyphen-joined for collocations).
    pub word: String,
    pub person: Option<Person>,
    /// Whether the word is a possessive determiner ("my", "your").
    pub possessive: bool,
    pub number: Option<Number>,
    pub proximity: Option<Proximity>,
    /// Kinship relation name ("mom" → "mother").
    pub kinship: Option<String>,
    /// Activity name ("football" → "sport").
    pub activity: Option<String>,
    /// Condition/feeling name ("glad" → "happy").
    pub condition: Option<String>,
    /// Container category ("bag" → "container").
    pub container: Option<String>,
    /// Profession name ("developer" → "programmer").
    pub profession: Option<String>,
    pub valence: Option<Valence>,
    /// WordNet-style dotted category ("noun.artifact", "modal.ability").
    pub category: Option<String>,
    /// Whether the word is a multi-word collocation.
    pub collocation: bool,
}

impl LexiconEntry {
    /// Create an empty entry for a word.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    /// The value of a domain facet, if the entry carries it.
    pub fn facet(&self, category: Category) -> Option<&str> {
        match category {
            Category::Kinship => self.kinship.as_deref(),
            Category::Activity => self.activity.as_deref(),
            Category::Condition => self.condition.as_deref(),
            Category::Container => self.container.as_deref(),
            Category::Profession => self.profession.as_deref(),
        }
    }

    /// Mutable access to a domain facet slot.
    pub fn facet_mut(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::Kinship => &mut self.kinship,
            Category::Activity => &mut self.activity,
            Category::Condition => &mut self.condition,
            Category::Container => &mut self.container,
            Category::Profession => &mut self.profession,
        }
    }

    /// Pronouns and possessives denote a person.
    pub fn denotes_person(&self) -> bool {
        self.person.is_some()
    }

    pub fn is_preposition(&self) -> bool {
        self.category_prefix() == Some("preposition")
    }

    pub fn is_modal(&self) -> bool {
        self.category_prefix() == Some("modal")
    }

    /// Modals plus the do-support auxiliaries.
    pub fn is_auxiliary(&self) -> bool {
        self.is_modal() || self.category.as_deref() == Some("auxiliary")
    }

    fn category_prefix(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(|c| c.split('.').next().unwrap_or(c))
    }
}

/// Result of a subword lookup: the canonical name from the matching entry
/// and the lexicon key that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubwordMatch {
    /// Canonical relation/category name carried by the entry.
    pub relation: String,
    /// The lexicon key that matched inside the phrase.
    pub term: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefix_checks() {
        let mut can = LexiconEntry::new("can");
        can.category = Some("modal.ability".into());
        assert!(can.is_modal());
        assert!(can.is_auxiliary());
        assert!(!can.is_preposition());

        let mut did = LexiconEntry::new("did");
        did.category = Some("auxiliary".into());
        assert!(did.is_auxiliary());
        assert!(!did.is_modal());

        let mut to = LexiconEntry::new("to");
        to.category = Some("preposition.direction".into());
        assert!(to.is_preposition());
    }

    #[test]
    fn facet_round_trip() {
        let mut entry = LexiconEntry::new("mom");
        *entry.facet_mut(Category::Kinship) = Some("mother".into());
        assert_eq!(entry.facet(Category::Kinship), Some("mother"));
        assert_eq!(entry.facet(Category::Activity), None);
    }
}
