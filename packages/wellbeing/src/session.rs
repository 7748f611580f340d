//! Mode Controller
//!
//! Session-scoped support state: owns the rolling answer window, the active
//! mode set, and the pending-break flag. Constructed fresh per activity
//! session; nothing here is persisted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::evaluator::{evaluate, TriggerContext};
use crate::recorder::RollingState;
use crate::types::{ActiveModes, AnswerOutcome, BreakReason, LearnerTrait, SupportMode};

#[derive(Clone, Debug)]
pub struct SupportSession {
    traits: BTreeSet<LearnerTrait>,
    rolling: RollingState,
    modes: ActiveModes,
    break_pending: bool,
    break_reason: Option<BreakReason>,
}

/// What the presentation layer gets back after each submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    pub active_modes: ActiveModes,
    pub fired_modes: Vec<SupportMode>,
    pub break_pending: bool,
    pub break_reason: Option<BreakReason>,
    pub consecutive_wrong: u32,
    pub wrong_in_window: usize,
}

/// Point-in-time view of the session, without submission-specific fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub active_modes: ActiveModes,
    pub break_pending: bool,
    pub break_reason: Option<BreakReason>,
}

impl SupportSession {
    pub fn new(traits: BTreeSet<LearnerTrait>) -> Self {
        Self {
            traits,
            rolling: RollingState::new(),
            modes: ActiveModes::new(),
            break_pending: false,
            break_reason: None,
        }
    }

    /// Builds a session straight from profile tag strings; unknown tags are
    /// dropped, so a learner with no recognizable tags never triggers.
    pub fn from_tags<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::new(LearnerTrait::parse_tags(tags))
    }

    /// Records one graded answer and runs the trigger rules against the
    /// updated state. At most one new activation happens per track; an ADHD
    /// break firing resets the rolling window so the next answer starts a
    /// fresh one.
    pub fn on_answer_submitted(&mut self, outcome: &AnswerOutcome) -> SubmissionReport {
        self.rolling.record(outcome.is_correct);

        let decision = evaluate(&TriggerContext {
            traits: &self.traits,
            rolling: &self.rolling,
            outcome,
            modes: &self.modes,
            break_pending: self.break_pending,
        });

        let consecutive_wrong = self.rolling.consecutive_wrong();
        let wrong_in_window = self.rolling.wrong_in_window();

        for mode in &decision.fired {
            self.modes.activate(*mode);
        }
        if decision.break_fired() {
            self.break_pending = true;
            self.break_reason = decision.break_reason;
            self.rolling.reset();
        }

        SubmissionReport {
            active_modes: self.modes.clone(),
            fired_modes: decision.fired,
            break_pending: self.break_pending,
            break_reason: self.break_reason,
            consecutive_wrong,
            wrong_in_window,
        }
    }

    /// Ends a pending break: progression unblocks, the ADHD rolling state is
    /// cleared, and latched modes stay latched. Returns false when no break
    /// was pending.
    pub fn on_break_complete(&mut self) -> bool {
        if !self.break_pending {
            return false;
        }
        self.break_pending = false;
        self.break_reason = None;
        self.modes.deactivate(SupportMode::AdhdBreak);
        self.rolling.reset();
        true
    }

    pub fn active_modes(&self) -> &ActiveModes {
        &self.modes
    }

    pub fn break_pending(&self) -> bool {
        self.break_pending
    }

    pub fn break_reason(&self) -> Option<BreakReason> {
        self.break_reason
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_modes: self.modes.clone(),
            break_pending: self.break_pending,
            break_reason: self.break_reason,
        }
    }
}
