//! Outcome Recorder
//!
//! Rolling per-session answer state: a consecutive-wrong counter and a
//! bounded window of the last five outcomes (true = wrong, most recent last).

use serde::{Deserialize, Serialize};

use crate::types::OUTCOME_WINDOW;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingState {
    consecutive_wrong: u32,
    last_five: Vec<bool>,
}

impl RollingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one graded answer into the state. A correct answer clears the
    /// consecutive-wrong counter; either way the window keeps at most the
    /// previous four entries plus the new flag.
    pub fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.consecutive_wrong = 0;
        } else {
            self.consecutive_wrong += 1;
        }

        if self.last_five.len() >= OUTCOME_WINDOW {
            self.last_five.remove(0);
        }
        self.last_five.push(!is_correct);
    }

    pub fn consecutive_wrong(&self) -> u32 {
        self.consecutive_wrong
    }

    /// Wrong answers among the last five submissions.
    pub fn wrong_in_window(&self) -> usize {
        self.last_five.iter().filter(|wrong| **wrong).count()
    }

    pub fn window(&self) -> &[bool] {
        &self.last_five
    }

    pub fn reset(&mut self) {
        self.consecutive_wrong = 0;
        self.last_five.clear();
    }
}
