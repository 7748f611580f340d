//! Trigger Evaluator
//!
//! Ordered per-trait rule sets (ADHD, Dyslexia, ASD) applied after the
//! recorder has folded in the current submission. The three tracks gate
//! independent UI affordances, so each is evaluated on its own: a single
//! submission may activate several modes at once.

use std::collections::BTreeSet;

use crate::recorder::RollingState;
use crate::types::{
    ActiveModes, AnswerOutcome, BreakReason, LearnerTrait, SupportMode, ADHD_CONSECUTIVE_WRONG,
    ADHD_WRONG_IN_WINDOW, CALM_MAX_CONSECUTIVE_WRONG, CALM_SLOW_SECONDS, CONFUSION_MARKERS,
    DYSLEXIA_CONSECUTIVE_WRONG, DYSLEXIA_SLOW_SECONDS,
};

/// Inputs for one evaluation pass. `rolling` must already reflect the
/// submission being judged.
#[derive(Debug)]
pub struct TriggerContext<'a> {
    pub traits: &'a BTreeSet<LearnerTrait>,
    pub rolling: &'a RollingState,
    pub outcome: &'a AnswerOutcome,
    pub modes: &'a ActiveModes,
    pub break_pending: bool,
}

/// What fired on this submission, in evaluation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerDecision {
    pub fired: Vec<SupportMode>,
    pub break_reason: Option<BreakReason>,
}

impl TriggerDecision {
    pub fn break_fired(&self) -> bool {
        self.fired.contains(&SupportMode::AdhdBreak)
    }
}

pub fn evaluate(ctx: &TriggerContext<'_>) -> TriggerDecision {
    let mut decision = TriggerDecision::default();

    if ctx.traits.contains(&LearnerTrait::Adhd) && !ctx.break_pending {
        if let Some(reason) = adhd_break_reason(ctx.rolling) {
            decision.fired.push(SupportMode::AdhdBreak);
            decision.break_reason = Some(reason);
        }
    }

    if ctx.traits.contains(&LearnerTrait::Dyslexia)
        && !ctx.modes.is_active(SupportMode::DyslexiaSupport)
        && dyslexia_support_needed(ctx.rolling, ctx.outcome)
    {
        decision.fired.push(SupportMode::DyslexiaSupport);
    }

    if ctx.traits.contains(&LearnerTrait::Asd)
        && !ctx.modes.is_active(SupportMode::CalmMode)
        && calm_mode_needed(ctx.rolling, ctx.outcome)
    {
        decision.fired.push(SupportMode::CalmMode);
    }

    decision
}

/// ADHD track: an error spiral or a mostly-wrong recent window both call for
/// a break. The streak rule wins when both hold, matching the reported
/// reason ordering of the source behavior.
fn adhd_break_reason(rolling: &RollingState) -> Option<BreakReason> {
    if rolling.consecutive_wrong() >= ADHD_CONSECUTIVE_WRONG {
        Some(BreakReason::ConsecutiveWrong)
    } else if rolling.wrong_in_window() >= ADHD_WRONG_IN_WINDOW {
        Some(BreakReason::WrongInLastFive)
    } else {
        None
    }
}

/// Dyslexia track: repeated misses on reading tasks, or a long struggle on a
/// hard question.
fn dyslexia_support_needed(rolling: &RollingState, outcome: &AnswerOutcome) -> bool {
    if outcome.activity_type.is_reading_task()
        && rolling.consecutive_wrong() >= DYSLEXIA_CONSECUTIVE_WRONG
    {
        return true;
    }

    outcome.time_taken_seconds > DYSLEXIA_SLOW_SECONDS
        && outcome.difficulty == crate::types::Difficulty::Hard
}

/// ASD track: explicit confusion in the feedback text, or freezing (very
/// slow answers without an error spiral).
fn calm_mode_needed(rolling: &RollingState, outcome: &AnswerOutcome) -> bool {
    if let Some(text) = outcome.feedback_text.as_deref() {
        if mentions_confusion(text) {
            return true;
        }
    }

    outcome.time_taken_seconds > CALM_SLOW_SECONDS
        && rolling.consecutive_wrong() < CALM_MAX_CONSECUTIVE_WRONG
}

pub fn mentions_confusion(text: &str) -> bool {
    let lower = text.to_lowercase();
    CONFUSION_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use crate::types::{ActivityType, Difficulty};

    use super::*;

    fn outcome(is_correct: bool) -> AnswerOutcome {
        AnswerOutcome {
            is_correct,
            time_taken_seconds: 10.0,
            activity_type: ActivityType::Counting,
            difficulty: Difficulty::Easy,
            feedback_text: None,
        }
    }

    fn traits(list: &[LearnerTrait]) -> BTreeSet<LearnerTrait> {
        list.iter().copied().collect()
    }

    fn ctx<'a>(
        traits: &'a BTreeSet<LearnerTrait>,
        rolling: &'a RollingState,
        outcome: &'a AnswerOutcome,
        modes: &'a ActiveModes,
    ) -> TriggerContext<'a> {
        TriggerContext {
            traits,
            rolling,
            outcome,
            modes,
            break_pending: false,
        }
    }

    #[test]
    fn test_adhd_streak_fires_break() {
        let traits = traits(&[LearnerTrait::Adhd]);
        let mut rolling = RollingState::new();
        for _ in 0..3 {
            rolling.record(false);
        }
        let out = outcome(false);
        let modes = ActiveModes::new();

        let decision = evaluate(&ctx(&traits, &rolling, &out, &modes));
        assert_eq!(decision.fired, vec![SupportMode::AdhdBreak]);
        assert_eq!(decision.break_reason, Some(BreakReason::ConsecutiveWrong));
    }

    #[test]
    fn test_adhd_window_rule_reports_window_reason() {
        let traits = traits(&[LearnerTrait::Adhd]);
        let mut rolling = RollingState::new();
        // wrong, wrong, right, wrong, wrong: streak of 2, four wrong in window.
        for is_correct in [false, false, true, false, false] {
            rolling.record(is_correct);
        }
        let out = outcome(false);
        let modes = ActiveModes::new();

        let decision = evaluate(&ctx(&traits, &rolling, &out, &modes));
        assert_eq!(decision.break_reason, Some(BreakReason::WrongInLastFive));
    }

    #[test]
    fn test_no_trait_means_no_trigger() {
        let traits = traits(&[LearnerTrait::Other]);
        let mut rolling = RollingState::new();
        for _ in 0..5 {
            rolling.record(false);
        }
        let out = outcome(false);
        let modes = ActiveModes::new();

        let decision = evaluate(&ctx(&traits, &rolling, &out, &modes));
        assert!(decision.fired.is_empty());
    }

    #[test]
    fn test_pending_break_suppresses_adhd_track() {
        let traits = traits(&[LearnerTrait::Adhd]);
        let mut rolling = RollingState::new();
        for _ in 0..4 {
            rolling.record(false);
        }
        let out = outcome(false);
        let modes = ActiveModes::new();
        let mut context = ctx(&traits, &rolling, &out, &modes);
        context.break_pending = true;

        assert!(evaluate(&context).fired.is_empty());
    }

    #[test]
    fn test_dyslexia_reading_task_rule() {
        let traits = traits(&[LearnerTrait::Dyslexia]);
        let mut rolling = RollingState::new();
        rolling.record(false);
        rolling.record(false);
        let mut out = outcome(false);
        out.activity_type = ActivityType::ImageToWord;
        let modes = ActiveModes::new();

        let decision = evaluate(&ctx(&traits, &rolling, &out, &modes));
        assert_eq!(decision.fired, vec![SupportMode::DyslexiaSupport]);

        // Same misses on a non-reading task do not qualify.
        out.activity_type = ActivityType::Pattern;
        assert!(evaluate(&ctx(&traits, &rolling, &out, &modes)).fired.is_empty());
    }

    #[test]
    fn test_dyslexia_slow_hard_rule() {
        let traits = traits(&[LearnerTrait::Dyslexia]);
        let rolling = RollingState::new();
        let mut out = outcome(true);
        out.time_taken_seconds = 75.0;
        out.difficulty = Difficulty::Hard;
        let modes = ActiveModes::new();

        let decision = evaluate(&ctx(&traits, &rolling, &out, &modes));
        assert_eq!(decision.fired, vec![SupportMode::DyslexiaSupport]);

        out.difficulty = Difficulty::Medium;
        assert!(evaluate(&ctx(&traits, &rolling, &out, &modes)).fired.is_empty());
    }

    #[test]
    fn test_latched_mode_does_not_refire() {
        let traits = traits(&[LearnerTrait::Dyslexia]);
        let mut rolling = RollingState::new();
        rolling.record(false);
        rolling.record(false);
        let mut out = outcome(false);
        out.activity_type = ActivityType::OneStepInstruction;
        let mut modes = ActiveModes::new();
        modes.activate(SupportMode::DyslexiaSupport);

        assert!(evaluate(&ctx(&traits, &rolling, &out, &modes)).fired.is_empty());
    }

    #[test]
    fn test_calm_mode_on_confused_feedback() {
        let traits = traits(&[LearnerTrait::Asd]);
        let rolling = RollingState::new();
        let mut out = outcome(true);
        out.feedback_text = Some("I'm really Confused by this one".to_string());
        let modes = ActiveModes::new();

        let decision = evaluate(&ctx(&traits, &rolling, &out, &modes));
        assert_eq!(decision.fired, vec![SupportMode::CalmMode]);
    }

    #[test]
    fn test_calm_mode_on_freezing_but_not_error_spiral() {
        let traits = traits(&[LearnerTrait::Asd]);
        let mut out = outcome(true);
        out.time_taken_seconds = 120.0;
        let modes = ActiveModes::new();

        let rolling = RollingState::new();
        assert_eq!(
            evaluate(&ctx(&traits, &rolling, &out, &modes)).fired,
            vec![SupportMode::CalmMode]
        );

        // Two or more consecutive misses read as struggling, not freezing.
        let mut spiraling = RollingState::new();
        spiraling.record(false);
        spiraling.record(false);
        out.is_correct = false;
        assert!(evaluate(&ctx(&traits, &spiraling, &out, &modes)).fired.is_empty());
    }

    #[test]
    fn test_multi_trait_learner_fires_independent_tracks() {
        let traits = traits(&[LearnerTrait::Adhd, LearnerTrait::Dyslexia]);
        let mut rolling = RollingState::new();
        for _ in 0..3 {
            rolling.record(false);
        }
        let mut out = outcome(false);
        out.activity_type = ActivityType::ImageToWord;
        let modes = ActiveModes::new();

        let decision = evaluate(&ctx(&traits, &rolling, &out, &modes));
        assert_eq!(
            decision.fired,
            vec![SupportMode::AdhdBreak, SupportMode::DyslexiaSupport]
        );
    }

    #[test]
    fn test_confusion_markers() {
        assert!(mentions_confusion("this is CONFUSING"));
        assert!(mentions_confusion("I don't understand the question"));
        assert!(!mentions_confusion("too easy"));
    }
}
