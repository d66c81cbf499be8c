//! Triple data model: raw upstream triples, the in-flight working triple,
//! typed slots, perspective, and the finalized result.
//!
//! While a triple is being rewritten every slot is a plain string in which
//! multi-word phrases are hyphen-joined (`my-best-friend`). The hyphens mark
//! the phrase boundaries the rewrite rules operate on, so every stage keeps
//! them intact; only finalization trims stray leading/trailing ones.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::dialogue::UtteranceType;

static RE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_]+").unwrap());

static RE_REPEATED_DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

// ── Perspective ─────────────────────────────────────────────────────────

/// Perspective values already known upstream (e.g. from a scoring model or
/// an LLM extractor). Every axis is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPerspective {
    #[serde(default)]
    pub sentiment: Option<f32>,
    #[serde(default)]
    pub certainty: Option<f32>,
    #[serde(default)]
    pub polarity: Option<f32>,
    #[serde(default)]
    pub emotion: Option<f32>,
}

/// The epistemic/affective stance attached to a finalized triple.
///
/// Sentiment and emotion lie in [-1, 1], certainty in [0, 1], and polarity
/// is exactly -1 (denied) or 1 (affirmed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    pub sentiment: f32,
    pub certainty: f32,
    pub polarity: f32,
    pub emotion: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            sentiment: 0.0,
            certainty: 1.0,
            polarity: 1.0,
            emotion: 0.0,
        }
    }
}

impl Perspective {
    pub fn is_negated(&self) -> bool {
        self.polarity < 0.0
    }
}

// ── Raw and working triples ─────────────────────────────────────────────

/// A triple as delivered by an upstream extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTriple {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub predicate: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub perspective: Option<PartialPerspective>,
}

impl RawTriple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            perspective: None,
        }
    }

    pub fn with_perspective(mut self, perspective: PartialPerspective) -> Self {
        self.perspective = Some(perspective);
        self
    }

    /// Bring every slot into the hyphen-joined internal convention.
    pub fn canonical(self) -> Self {
        Self {
            subject: canonical_phrase(&self.subject),
            predicate: canonical_phrase(&self.predicate),
            object: canonical_phrase(&self.object),
            perspective: self.perspective,
        }
    }

    /// The plain-string slots as a working triple.
    pub fn working(&self) -> Triple {
        Triple::new(&self.subject, &self.predicate, &self.object)
    }
}

/// The in-flight triple. Every cascade stage takes one by value and returns
/// a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..self
        }
    }

    pub fn with_predicate(self, predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            ..self
        }
    }

    pub fn with_object(self, object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            ..self
        }
    }

    /// Strip leading/trailing hyphens from every slot.
    pub fn trimmed(self) -> Self {
        Self {
            subject: trim_dashes(&self.subject),
            predicate: trim_dashes(&self.predicate),
            object: trim_dashes(&self.object),
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

// ── Typed slots ─────────────────────────────────────────────────────────

/// A finalized slot: label plus an ordered set of type tags.
///
/// `types == None` means no type could be inferred and resolution is left
/// to downstream type inference; `Some(empty)` is an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedLabel {
    pub label: String,
    #[serde(rename = "type")]
    pub types: Option<IndexSet<String>>,
}

impl TypedLabel {
    pub fn new(label: impl Into<String>, types: Option<IndexSet<String>>) -> Self {
        Self {
            label: label.into(),
            types,
        }
    }

    /// Whether the slot carries the given tag.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.as_ref().is_some_and(|t| t.contains(tag))
    }
}

/// A slot before or after typing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    Typed(TypedLabel),
    Raw(String),
}

impl Slot {
    pub fn label(&self) -> &str {
        match self {
            Self::Raw(label) => label,
            Self::Typed(typed) => &typed.label,
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Self::Typed(_))
    }

    /// The typed label; raw slots become untyped labels.
    pub fn into_typed(self) -> TypedLabel {
        match self {
            Self::Typed(typed) => typed,
            Self::Raw(label) => TypedLabel::new(label, None),
        }
    }
}

impl From<&str> for Slot {
    fn from(label: &str) -> Self {
        Self::Raw(label.to_string())
    }
}

impl From<String> for Slot {
    fn from(label: String) -> Self {
        Self::Raw(label)
    }
}

// ── FinalTriple ─────────────────────────────────────────────────────────

/// A fully normalized, typed, perspective-annotated triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalTriple {
    pub subject: TypedLabel,
    pub predicate: TypedLabel,
    pub object: TypedLabel,
    pub perspective: Perspective,
    pub utterance_type: UtteranceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue_act: Option<String>,
}

impl FinalTriple {
    /// The slot labels as a plain triple.
    pub fn labels(&self) -> Triple {
        Triple::new(&self.subject.label, &self.predicate.label, &self.object.label)
    }
}

// ── Phrase helpers ──────────────────────────────────────────────────────

/// Remove leading and trailing hyphens.
pub fn trim_dashes(phrase: &str) -> String {
    phrase.trim_matches('-').to_string()
}

/// Join non-empty parts with hyphens.
pub fn join_phrase<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// NFC-normalize, turn whitespace/underscores into hyphens, and collapse
/// runs of hyphens.
pub fn canonical_phrase(phrase: &str) -> String {
    let composed: String = phrase.trim().nfc().collect();
    let dashed = RE_SEPARATORS.replace_all(&composed, "-");
    RE_REPEATED_DASH.replace_all(&dashed, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_phrase_hyphenates() {
        assert_eq!(canonical_phrase("my best  friend"), "my-best-friend");
        assert_eq!(canonical_phrase("listen_to"), "listen-to");
        assert_eq!(canonical_phrase("be--from"), "be-from");
        assert_eq!(canonical_phrase(""), "");
        // Decomposed é becomes the composed code point.
        assert_eq!(canonical_phrase("cafe\u{301}"), "caf\u{e9}");
    }

    #[test]
    fn trimmed_strips_outer_dashes_only() {
        let t = Triple::new("-lenka-", "be-from-", "-new-york").trimmed();
        assert_eq!(t, Triple::new("lenka", "be-from", "new-york"));
    }

    #[test]
    fn join_skips_empty_parts() {
        assert_eq!(join_phrase(&["have", "", "mother"]), "have-mother");
        assert_eq!(join_phrase(&["", ""]), "");
    }

    #[test]
    fn typed_label_json_uses_type_key() {
        let mut types = IndexSet::new();
        types.insert("person".to_string());
        let label = TypedLabel::new("Lenka", Some(types));
        let json = serde_json::to_value(&label).unwrap();
        assert_eq!(json["label"], "Lenka");
        assert_eq!(json["type"][0], "person");
        assert!(label.has_type("person"));
    }

    #[test]
    fn slot_deserializes_both_shapes() {
        let raw: Slot = serde_json::from_str(r#""cats""#).unwrap();
        assert_eq!(raw, Slot::Raw("cats".into()));
        let typed: Slot = serde_json::from_str(r#"{"label":"cats","type":null}"#).unwrap();
        assert!(typed.is_typed());
        assert_eq!(typed.label(), "cats");
    }
}
