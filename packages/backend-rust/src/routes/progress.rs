use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::response::AppError;
use crate::state::AppState;
use crate::store::ProgressRecord;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upsert))
        .route("/:user_id", get(for_user))
        .route("/:user_id/summary", get(summary))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertRequest {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    module_id: String,
    #[serde(default)]
    activity_id: String,
    #[serde(default = "default_status")]
    status: String,
}

fn default_status() -> String {
    "completed".to_string()
}

#[derive(Serialize)]
struct ProgressResponse {
    progress: ProgressRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    overall_accuracy: f64,
    attempts: usize,
}

async fn upsert(
    State(state): State<AppState>,
    Json(payload): Json<UpsertRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.user_id.is_empty() || payload.module_id.is_empty() || payload.activity_id.is_empty()
    {
        return Err(AppError::validation(
            "userId, moduleId, and activityId are required",
        ));
    }

    let progress = state
        .store()
        .upsert_completion(
            &payload.user_id,
            &payload.module_id,
            &payload.activity_id,
            &payload.status,
        )
        .map_err(|err| {
            tracing::error!(error = %err, "failed to persist progress");
            AppError::internal("failed to persist progress")
        })?;

    Ok(Json(ProgressResponse { progress }))
}

async fn for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    Json(ProgressResponse {
        progress: state.store().progress_for(&user_id),
    })
}

/// Attempt/accuracy rollup over the interaction log.
async fn summary(State(state): State<AppState>, Path(user_id): Path<String>) -> impl IntoResponse {
    let interactions = state.store().interactions_for(Some(&user_id));
    let attempts = interactions.len();
    let correct = interactions.iter().filter(|i| i.is_correct).count();
    let overall_accuracy = if attempts > 0 {
        correct as f64 / attempts as f64
    } else {
        0.0
    };

    Json(SummaryResponse {
        overall_accuracy,
        attempts,
    })
}
