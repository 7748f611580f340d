//! Feedback Text Analysis
//!
//! Rule-based sentiment scoring for the optional free-text feedback attached
//! to a submission. Only annotates logged interactions; the ASD confusion
//! trigger has its own marker check in the evaluator.

use serde::{Deserialize, Serialize};

const NEGATIVE_MARKERS: [&str; 15] = [
    "confus",
    "difficult",
    "hard",
    "don't understand",
    "unclear",
    "frustrated",
    "impossible",
    "wrong",
    "bad",
    "hate",
    "terrible",
    "not clear",
    "too hard",
    "can't",
    "cannot",
];

const POSITIVE_MARKERS: [&str; 12] = [
    "easy",
    "fun",
    "like",
    "good",
    "great",
    "understand",
    "clear",
    "enjoy",
    "love",
    "helpful",
    "excellent",
    "perfect",
];

const CONFUSION_SENTIMENT_THRESHOLD: f64 = -0.3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSignal {
    /// Sentiment in [-1.0, 1.0]; 0.0 when the text carries no markers.
    pub sentiment_score: f64,
    pub confusion_flag: bool,
}

/// Scores feedback by counting marker hits: (positive - negative) over the
/// total. Note "don't understand" also contains "understand", so the two
/// cancel rather than reading as confusion on their own; the explicit
/// "confus" marker is what tips such feedback negative in practice.
pub fn analyze_feedback(text: &str) -> FeedbackSignal {
    if text.trim().is_empty() {
        return FeedbackSignal::default();
    }

    let lower = text.to_lowercase();
    let negative = NEGATIVE_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();
    let positive = POSITIVE_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();

    if negative + positive == 0 {
        return FeedbackSignal::default();
    }

    let sentiment_score = (positive as f64 - negative as f64) / (positive + negative) as f64;
    FeedbackSignal {
        sentiment_score,
        confusion_flag: sentiment_score < CONFUSION_SENTIMENT_THRESHOLD,
    }
}
