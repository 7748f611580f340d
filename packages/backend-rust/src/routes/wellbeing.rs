//! Hosted well-being sessions: the HTTP boundary the presentation layer uses
//! to drive the trigger engine. One session per activity run; session state
//! lives in memory only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use neuropath_wellbeing::{
    analyze_feedback, ActiveModes, ActivityType, AnswerOutcome, BreakReason, Difficulty,
    SessionSnapshot, SubmissionReport, SupportMode,
};

use crate::response::AppError;
use crate::state::{AppState, BreakCompletion};
use crate::store::InteractionRecord;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/submit", post(submit_answer))
        .route("/sessions/:id/break-complete", post(break_complete))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    neurodiversity_tags: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionResponse {
    session_id: String,
    active_modes: ActiveModes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest {
    activity_id: String,
    #[serde(default)]
    answer: Option<String>,
    is_correct: bool,
    time_taken: f64,
    activity_type: ActivityType,
    difficulty: Difficulty,
    #[serde(default)]
    feedback_text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    is_correct: bool,
    active_modes: ActiveModes,
    fired_modes: Vec<SupportMode>,
    break_pending: bool,
    break_reason: Option<BreakReason>,
    consecutive_wrong: u32,
    wrong_in_window: usize,
}

impl SubmitResponse {
    fn from_report(is_correct: bool, report: SubmissionReport) -> Self {
        Self {
            is_correct,
            active_modes: report.active_modes,
            fired_modes: report.fired_modes,
            break_pending: report.break_pending,
            break_reason: report.break_reason,
            consecutive_wrong: report.consecutive_wrong,
            wrong_in_window: report.wrong_in_window,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    session_id: String,
    #[serde(flatten)]
    snapshot: SessionSnapshot,
}

async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let (session_id, snapshot) = state
        .sessions()
        .create(payload.user_id, &payload.neurodiversity_tags);

    tracing::debug!(%session_id, "well-being session started");
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            active_modes: snapshot.active_modes,
        }),
    )
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state
        .sessions()
        .snapshot(&session_id)
        .ok_or_else(|| AppError::not_found("Session not found"))?;
    Ok(Json(SessionResponse {
        session_id,
        snapshot,
    }))
}

async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.activity_id.trim().is_empty() {
        return Err(AppError::validation("activityId is required"));
    }
    if !payload.time_taken.is_finite() || payload.time_taken < 0.0 {
        return Err(AppError::validation("timeTaken must be a non-negative number"));
    }

    let outcome = AnswerOutcome {
        is_correct: payload.is_correct,
        time_taken_seconds: payload.time_taken,
        activity_type: payload.activity_type,
        difficulty: payload.difficulty,
        feedback_text: payload.feedback_text.clone(),
    };

    let (user_id, report) = state
        .sessions()
        .submit(&session_id, &outcome)
        .ok_or_else(|| AppError::not_found("Session not found"))?;

    log_interaction(&state, user_id, session_id, &payload, &report);

    Ok(Json(SubmitResponse::from_report(
        payload.is_correct,
        report,
    )))
}

async fn break_complete(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match state.sessions().complete_break(&session_id) {
        BreakCompletion::Completed(snapshot) => Ok(Json(SessionResponse {
            session_id,
            snapshot,
        })),
        BreakCompletion::NotPending => Err(AppError::conflict("No break is pending")),
        BreakCompletion::Unknown => Err(AppError::not_found("Session not found")),
    }
}

/// Fire-and-forget analytics: the interaction log must never block or fail a
/// submission, so the write happens on a blocking task and only warns.
fn log_interaction(
    state: &AppState,
    user_id: Option<String>,
    session_id: String,
    payload: &SubmitRequest,
    report: &SubmissionReport,
) {
    let signal = payload
        .feedback_text
        .as_deref()
        .map(analyze_feedback)
        .unwrap_or_default();

    let break_triggered = report.fired_modes.contains(&SupportMode::AdhdBreak);
    let record = InteractionRecord {
        user_id,
        session_id,
        activity_id: payload.activity_id.clone(),
        answer: payload.answer.clone(),
        is_correct: payload.is_correct,
        time_taken: payload.time_taken,
        feedback_text: payload.feedback_text.clone(),
        sentiment_score: payload
            .feedback_text
            .is_some()
            .then_some(signal.sentiment_score),
        confusion_flag: payload.feedback_text.is_some().then_some(signal.confusion_flag),
        support_modes: report.fired_modes.clone(),
        break_triggered,
        break_reason: report.break_reason.filter(|_| break_triggered),
        consecutive_wrong: report.consecutive_wrong,
        wrong_in_last5: report.wrong_in_window,
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    };

    let store = state.store();
    tokio::task::spawn_blocking(move || {
        if let Err(err) = store.append_interaction(&record) {
            tracing::warn!(error = %err, "failed to record interaction");
        }
    });
}
