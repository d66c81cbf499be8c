//! Dialogue context: who is talking to whom in the current utterance.
//!
//! The normalizer never mutates the context. Its only job is to let
//! first/second-person pronouns and possessives resolve to the two concrete
//! participants, which is why a context that cannot tell them apart is the
//! one fatal input of the whole cascade.

pub mod pronoun;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use pronoun::{PronounForm, classify_pronoun, resolve};

// ── Errors ──────────────────────────────────────────────────────────────

/// Caller contract violations in the dialogue context.
#[derive(Debug, Error, Diagnostic)]
pub enum DialogueError {
    #[error("dialogue participants are not distinct: human and agent are both \"{name}\"")]
    #[diagnostic(
        code(triple_norm::dialogue::indistinct_participants),
        help(
            "Second-person pronouns resolve to whichever participant is not speaking, \
             so the human and the agent need different names."
        )
    )]
    IndistinctParticipants { name: String },

    #[error("speaker \"{speaker}\" is neither the human \"{human}\" nor the agent \"{agent}\"")]
    #[diagnostic(
        code(triple_norm::dialogue::unknown_speaker),
        help("Set the speaker to one of the two dialogue participants.")
    )]
    UnknownSpeaker {
        speaker: String,
        human: String,
        agent: String,
    },
}

pub type DialogueResult<T> = std::result::Result<T, DialogueError>;

// ── Utterance metadata ──────────────────────────────────────────────────

/// Whether the utterance asserts something or asks about it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtteranceType {
    #[default]
    Statement,
    Question,
}

impl std::fmt::Display for UtteranceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Statement => write!(f, "STATEMENT"),
            Self::Question => write!(f, "QUESTION"),
        }
    }
}

// ── DialogueContext ─────────────────────────────────────────────────────

/// The two named participants and which of them uttered the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueContext {
    speaker: String,
    human: String,
    agent: String,
}

impl DialogueContext {
    /// Build a context, validating that the participants are distinct and
    /// that the speaker is one of them.
    pub fn new(
        speaker: impl Into<String>,
        human: impl Into<String>,
        agent: impl Into<String>,
    ) -> DialogueResult<Self> {
        let ctx = Self {
            speaker: speaker.into(),
            human: human.into(),
            agent: agent.into(),
        };
        ctx.interlocutor()?;
        Ok(ctx)
    }

    /// The human speaks to the agent.
    pub fn human_speaking(human: impl Into<String>, agent: impl Into<String>) -> DialogueResult<Self> {
        let human = human.into();
        Self::new(human.clone(), human, agent)
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn human(&self) -> &str {
        &self.human
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// The participant who is not speaking.
    pub fn interlocutor(&self) -> DialogueResult<&str> {
        pronoun::interlocutor(&self.speaker, &self.human, &self.agent)
    }

    /// Resolve a first/second-person pronoun to a participant name.
    pub fn resolve(&self, word: &str) -> DialogueResult<String> {
        resolve(word, &self.speaker, &self.human, &self.agent)
    }

    /// The same participants with the other one speaking.
    pub fn swapped(&self) -> Self {
        let speaker = if self.speaker == self.human {
            self.agent.clone()
        } else {
            self.human.clone()
        };
        Self {
            speaker,
            human: self.human.clone(),
            agent: self.agent.clone(),
        }
    }
}

#[derive(Deserialize)]
struct DialogueContextWire {
    speaker: String,
    human: String,
    agent: String,
}

impl<'de> Deserialize<'de> for DialogueContext {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = DialogueContextWire::deserialize(deserializer)?;
        Self::new(wire.speaker, wire.human, wire.agent).map_err(serde::de::Error::custom)
    }
}

// ── UtteranceContext ────────────────────────────────────────────────────

/// Everything the normalizer knows about the utterance besides the triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceContext {
    #[serde(flatten)]
    pub dialogue: DialogueContext,
    #[serde(default)]
    pub utterance_type: UtteranceType,
    /// Dialogue-act tag from the upstream classifier, carried through untouched.
    #[serde(default)]
    pub dialogue_act: Option<String>,
}

impl UtteranceContext {
    pub fn statement(dialogue: DialogueContext) -> Self {
        Self {
            dialogue,
            utterance_type: UtteranceType::Statement,
            dialogue_act: None,
        }
    }

    pub fn question(dialogue: DialogueContext) -> Self {
        Self {
            dialogue,
            utterance_type: UtteranceType::Question,
            dialogue_act: None,
        }
    }

    pub fn with_dialogue_act(mut self, act: impl Into<String>) -> Self {
        self.dialogue_act = Some(act.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_validates_participants() {
        assert!(DialogueContext::new("Lenka", "Lenka", "Leolani").is_ok());
        assert!(matches!(
            DialogueContext::new("Lenka", "Lenka", "Lenka"),
            Err(DialogueError::IndistinctParticipants { .. })
        ));
        assert!(matches!(
            DialogueContext::new("Bram", "Lenka", "Leolani"),
            Err(DialogueError::UnknownSpeaker { .. })
        ));
    }

    #[test]
    fn interlocutor_and_swap() {
        let ctx = DialogueContext::human_speaking("Lenka", "Leolani").unwrap();
        assert_eq!(ctx.interlocutor().unwrap(), "Leolani");
        let swapped = ctx.swapped();
        assert_eq!(swapped.speaker(), "Leolani");
        assert_eq!(swapped.interlocutor().unwrap(), "Lenka");
    }

    #[test]
    fn deserialize_rejects_invalid_context() {
        let ok: Result<DialogueContext, _> =
            serde_json::from_str(r#"{"speaker":"Lenka","human":"Lenka","agent":"Leolani"}"#);
        assert!(ok.is_ok());
        let bad: Result<DialogueContext, _> =
            serde_json::from_str(r#"{"speaker":"Lenka","human":"Lenka","agent":"Lenka"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn utterance_context_json_shape() {
        let json = r#"{"speaker":"Lenka","human":"Lenka","agent":"Leolani","utterance_type":"QUESTION"}"#;
        let ctx: UtteranceContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.utterance_type, UtteranceType::Question);
        assert_eq!(ctx.dialogue.speaker(), "Lenka");
        assert!(ctx.dialogue_act.is_none());
    }
}
