//! # neuropath-wellbeing - Adaptive Support Trigger Engine
//!
//! Pure, session-scoped logic behind NeuroPath's Well-Being Layer: after
//! every submitted answer it decides whether the learner should be offered a
//! break, reading support, or a calmer layout, based on their self-reported
//! traits and a rolling window of recent outcomes.
//!
//! ## Module structure
//!
//! - [`types`] - traits, activity kinds, support modes, thresholds
//! - [`recorder`] - Outcome Recorder: consecutive-wrong counter + last-five window
//! - [`evaluator`] - Trigger Evaluator: ordered per-trait rule sets
//! - [`session`] - Mode Controller: per-session state machine and reports
//! - [`feedback`] - rule-based sentiment/confusion scoring of free-text feedback
//!
//! ## Usage example
//!
//! ```rust
//! use neuropath_wellbeing::{ActivityType, AnswerOutcome, Difficulty, SupportSession};
//!
//! let mut session = SupportSession::from_tags(["ADHD"]);
//! let miss = AnswerOutcome {
//!     is_correct: false,
//!     time_taken_seconds: 8.0,
//!     activity_type: ActivityType::Counting,
//!     difficulty: Difficulty::Easy,
//!     feedback_text: None,
//! };
//!
//! session.on_answer_submitted(&miss);
//! session.on_answer_submitted(&miss);
//! let report = session.on_answer_submitted(&miss);
//! assert!(report.break_pending);
//! ```

pub mod evaluator;
pub mod feedback;
pub mod recorder;
pub mod session;
pub mod types;

pub use evaluator::{evaluate, TriggerContext, TriggerDecision};
pub use feedback::{analyze_feedback, FeedbackSignal};
pub use recorder::RollingState;
pub use session::{SessionSnapshot, SubmissionReport, SupportSession};
pub use types::{
    ActiveModes, ActivityType, AnswerOutcome, BreakReason, Difficulty, LearnerTrait, SupportMode,
};
