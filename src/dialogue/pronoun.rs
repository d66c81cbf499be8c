//! First/second-person pronoun resolution relative to two interlocutors.
//!
//! "I" is whoever is speaking, "you" is whoever is not. Third-person and
//! unknown words pass through unchanged: they need coreference, which is a
//! downstream concern.

use super::{DialogueError, DialogueResult};

/// First-person forms, including contractions already split upstream.
const FIRST_PERSON: &[&str] = &[
    "i", "me", "my", "mine", "myself", "i'm", "i've", "i'd", "i'll",
];

/// Second-person forms.
const SECOND_PERSON: &[&str] = &[
    "you", "your", "yours", "yourself", "you're", "you've", "you'd", "you'll",
];

/// Which participant a pronoun points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PronounForm {
    /// Refers to the speaker.
    First,
    /// Refers to the interlocutor.
    Second,
}

/// Classify a word as a first/second-person form (case-insensitive).
pub fn classify_pronoun(word: &str) -> Option<PronounForm> {
    let lower = word.trim().to_lowercase();
    if FIRST_PERSON.contains(&lower.as_str()) {
        Some(PronounForm::First)
    } else if SECOND_PERSON.contains(&lower.as_str()) {
        Some(PronounForm::Second)
    } else {
        None
    }
}

/// Resolve `word` to a participant name.
///
/// First person → `speaker`; second person → the participant that is not
/// `speaker`; anything else → `word` unchanged. Only second-person
/// resolution can fail, and only when the participants are indistinct or
/// the speaker is neither of them.
pub fn resolve(word: &str, speaker: &str, human: &str, agent: &str) -> DialogueResult<String> {
    match classify_pronoun(word) {
        Some(PronounForm::First) => Ok(speaker.to_string()),
        Some(PronounForm::Second) => interlocutor(speaker, human, agent).map(str::to_string),
        None => Ok(word.to_string()),
    }
}

/// The participant of `{human, agent}` that is not `speaker`.
pub(crate) fn interlocutor<'a>(speaker: &str, human: &'a str, agent: &'a str) -> DialogueResult<&'a str> {
    if human == agent {
        return Err(DialogueError::IndistinctParticipants {
            name: human.to_string(),
        });
    }
    if speaker == human {
        Ok(agent)
    } else if speaker == agent {
        Ok(human)
    } else {
        Err(DialogueError::UnknownSpeaker {
            speaker: speaker.to_string(),
            human: human.to_string(),
            agent: agent.to_string(),
        })
    }
}
