//! Common Types and Thresholds
//!
//! Shared data structures used across the well-being layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Number of recent outcomes kept in the rolling window
pub const OUTCOME_WINDOW: usize = 5;

/// Consecutive wrong answers that trigger an ADHD break
pub const ADHD_CONSECUTIVE_WRONG: u32 = 3;

/// Wrong answers inside the rolling window that trigger an ADHD break
pub const ADHD_WRONG_IN_WINDOW: usize = 4;

/// Consecutive wrong answers on a reading task that enable dyslexia support
pub const DYSLEXIA_CONSECUTIVE_WRONG: u32 = 2;

/// Seconds on a hard question before dyslexia support is considered
pub const DYSLEXIA_SLOW_SECONDS: f64 = 60.0;

/// Seconds of deliberation that suggest freezing rather than guessing
pub const CALM_SLOW_SECONDS: f64 = 90.0;

/// Freezing only counts when the learner is not in an error spiral
pub const CALM_MAX_CONSECUTIVE_WRONG: u32 = 2;

/// Case-insensitive markers in free-text feedback that signal confusion
pub const CONFUSION_MARKERS: [&str; 2] = ["confus", "don't understand"];

// ==================== Learner Traits ====================

/// Self-reported neurodiversity tag that selects which rule sets apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LearnerTrait {
    #[serde(rename = "ADHD")]
    Adhd,
    Dyslexia,
    #[serde(rename = "ASD")]
    Asd,
    Other,
}

impl LearnerTrait {
    /// Parses a single profile tag. Unknown tags map to `None` so they can
    /// never match a trigger rule.
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "adhd" => Some(Self::Adhd),
            "dyslexia" => Some(Self::Dyslexia),
            "asd" | "autism" => Some(Self::Asd),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Normalizes a profile's tag list into a trait set, dropping unknowns.
    pub fn parse_tags<'a, I>(tags: I) -> BTreeSet<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tags.into_iter().filter_map(Self::parse_tag).collect()
    }
}

// ==================== Activities ====================

/// Activity kinds from the activity framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    ImageToWord,
    InstructionToImage,
    OneStepInstruction,
    TwoStepSequence,
    Counting,
    VisualAddition,
    Pattern,
    Comparison,
    LogicChoice,
    SequenceOrdering,
    FocusFilter,
}

impl ActivityType {
    /// Reading-heavy tasks where repeated errors point at decoding trouble.
    pub fn is_reading_task(self) -> bool {
        matches!(
            self,
            Self::ImageToWord | Self::InstructionToImage | Self::OneStepInstruction
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One graded answer, produced by the caller and consumed immediately by the
/// trigger evaluator. Never persisted by this crate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub time_taken_seconds: f64,
    pub activity_type: ActivityType,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_text: Option<String>,
}

// ==================== Support Modes ====================

/// A UI/behavioral adaptation activated by the trigger engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SupportMode {
    #[serde(rename = "ADHD_BREAK")]
    AdhdBreak,
    #[serde(rename = "DYSLEXIA_SUPPORT")]
    DyslexiaSupport,
    #[serde(rename = "ASD_CALM")]
    CalmMode,
}

/// Which ADHD rule fired the pending break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakReason {
    #[serde(rename = "consecutive_wrong")]
    ConsecutiveWrong,
    #[serde(rename = "wrong_in_last_5")]
    WrongInLastFive,
}

/// The set of currently active support modes.
///
/// `AdhdBreak` is only present while a break is pending; `DyslexiaSupport`
/// and `CalmMode` latch for the rest of the session once activated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveModes {
    set: BTreeSet<SupportMode>,
}

impl ActiveModes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, mode: SupportMode) -> bool {
        self.set.contains(&mode)
    }

    pub fn activate(&mut self, mode: SupportMode) {
        self.set.insert(mode);
    }

    pub fn deactivate(&mut self, mode: SupportMode) {
        self.set.remove(&mode);
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SupportMode> + '_ {
        self.set.iter().copied()
    }
}
