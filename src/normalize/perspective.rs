//! Perspective extraction from the final predicate.

use super::predicate::correct;
use crate::lexicon::{Lexicon, Pos, Valence};
use crate::triple::{PartialPerspective, Perspective};

/// Predicate segment that negates the statement.
const NEGATION: &str = "not";

/// Evidence gathered from scanning the predicate segments.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Evidence {
    sentiment: Option<f32>,
    certainty: Option<f32>,
    negated: bool,
}

/// Derive the perspective of a finalized predicate, merged with whatever
/// the upstream extractor already knew.
///
/// Sentiment: scan, else upstream, else 0. Emotion: upstream, else 0.
/// Certainty: scan, else upstream, else 1. Polarity: -1 when the predicate
/// contains `not` or upstream said so, else 1.
pub fn extract(predicate: &str, upstream: Option<PartialPerspective>, lexicon: &dyn Lexicon) -> Perspective {
    let upstream = upstream.unwrap_or_default();
    let evidence = scan(predicate, lexicon);

    let negated = evidence.negated || upstream.polarity.is_some_and(|p| p < 0.0);
    Perspective {
        sentiment: evidence
            .sentiment
            .or(upstream.sentiment)
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0),
        certainty: evidence
            .certainty
            .or(upstream.certainty)
            .unwrap_or(1.0)
            .clamp(0.0, 1.0),
        polarity: if negated { -1.0 } else { 1.0 },
        emotion: upstream.emotion.unwrap_or(0.0).clamp(-1.0, 1.0),
    }
}

/// First valence found per axis wins; a literal `not` sets the negation
/// flag once.
fn scan(predicate: &str, lexicon: &dyn Lexicon) -> Evidence {
    let mut evidence = Evidence::default();
    for segment in predicate.split('-').filter(|s| !s.is_empty()) {
        let segment = segment.to_lowercase();
        if segment == NEGATION {
            if !evidence.negated {
                tracing::trace!(predicate, "negation segment");
                evidence.negated = true;
            }
            continue;
        }
        let Some(valence) = valence_of(&segment, lexicon) else {
            continue;
        };
        if evidence.sentiment.is_none() {
            evidence.sentiment = valence.sentiment;
        }
        if evidence.certainty.is_none() {
            evidence.certainty = valence.certainty;
        }
    }
    evidence
}

/// Valence of a segment, its verb lemma, or the corrected lemma.
fn valence_of(segment: &str, lexicon: &dyn Lexicon) -> Option<Valence> {
    let lemma = lexicon.lemmatize(segment, Some(Pos::Verb));
    [segment, lemma.as_str(), correct(&lemma)]
        .into_iter()
        .find_map(|key| lexicon.lookup(key).and_then(|entry| entry.valence))
}
