use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use parking_lot::RwLock;
use uuid::Uuid;

use neuropath_wellbeing::{AnswerOutcome, SessionSnapshot, SubmissionReport, SupportSession};

use crate::store::FlatFileStore;

/// One hosted well-being session. Sessions are in-memory only: reloading the
/// client or restarting the server discards all rolling state by design.
struct SessionEntry {
    user_id: Option<String>,
    session: SupportSession,
}

#[derive(Default)]
pub struct SessionRegistry {
    inner: RwLock<HashMap<String, SessionEntry>>,
}

pub enum BreakCompletion {
    Unknown,
    NotPending,
    Completed(SessionSnapshot),
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user_id: Option<String>, tags: &[String]) -> (String, SessionSnapshot) {
        let session = SupportSession::from_tags(tags.iter().map(String::as_str));
        let snapshot = session.snapshot();
        let id = Uuid::new_v4().to_string();
        self.inner
            .write()
            .insert(id.clone(), SessionEntry { user_id, session });
        (id, snapshot)
    }

    /// Runs the engine for one submission. None when the session is unknown;
    /// otherwise the owning user (for interaction logging) and the report.
    pub fn submit(
        &self,
        session_id: &str,
        outcome: &AnswerOutcome,
    ) -> Option<(Option<String>, SubmissionReport)> {
        let mut sessions = self.inner.write();
        let entry = sessions.get_mut(session_id)?;
        let report = entry.session.on_answer_submitted(outcome);
        Some((entry.user_id.clone(), report))
    }

    pub fn complete_break(&self, session_id: &str) -> BreakCompletion {
        let mut sessions = self.inner.write();
        let Some(entry) = sessions.get_mut(session_id) else {
            return BreakCompletion::Unknown;
        };
        if entry.session.on_break_complete() {
            BreakCompletion::Completed(entry.session.snapshot())
        } else {
            BreakCompletion::NotPending
        }
    }

    pub fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        self.inner
            .read()
            .get(session_id)
            .map(|entry| entry.session.snapshot())
    }
}

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    store: Arc<FlatFileStore>,
    sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(store: Arc<FlatFileStore>) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            store,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn store(&self) -> Arc<FlatFileStore> {
        Arc::clone(&self.store)
    }

    pub fn sessions(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.sessions)
    }
}

#[cfg(test)]
mod tests {
    use neuropath_wellbeing::{ActivityType, Difficulty};

    use super::*;

    fn miss() -> AnswerOutcome {
        AnswerOutcome {
            is_correct: false,
            time_taken_seconds: 5.0,
            activity_type: ActivityType::Counting,
            difficulty: Difficulty::Easy,
            feedback_text: None,
        }
    }

    #[test]
    fn test_registry_round_trip() {
        let registry = SessionRegistry::new();
        let (id, snapshot) = registry.create(Some("u1".to_string()), &["ADHD".to_string()]);
        assert!(snapshot.active_modes.is_empty());

        for _ in 0..2 {
            registry.submit(&id, &miss());
        }
        let (user_id, report) = registry.submit(&id, &miss()).unwrap();
        assert_eq!(user_id.as_deref(), Some("u1"));
        assert!(report.break_pending);

        match registry.complete_break(&id) {
            BreakCompletion::Completed(snapshot) => assert!(!snapshot.break_pending),
            _ => panic!("expected completed break"),
        }
        assert!(matches!(
            registry.complete_break(&id),
            BreakCompletion::NotPending
        ));
    }

    #[test]
    fn test_unknown_session_ids() {
        let registry = SessionRegistry::new();
        assert!(registry.submit("nope", &miss()).is_none());
        assert!(registry.snapshot("nope").is_none());
        assert!(matches!(
            registry.complete_break("nope"),
            BreakCompletion::Unknown
        ));
    }
}
