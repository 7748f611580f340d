//! Read-only content endpoints: modules, activities, and badges.

use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::{Json, Router};
use axum::routing::get;
use serde::{Deserialize, Serialize};

use crate::content::{self, ActivityDef, BadgeDef, ModuleDef};
use crate::response::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/modules", get(list_modules))
        .route("/modules/:id/activities", get(module_activities))
        .route("/activities", get(list_activities))
        .route("/activities/next", get(next_activity))
        .route("/badges", get(list_badges))
}

#[derive(Serialize)]
struct ModulesResponse {
    modules: &'static [ModuleDef],
}

#[derive(Serialize)]
struct ActivitiesResponse {
    activities: Vec<&'static ActivityDef>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgesResponse {
    badges: &'static [BadgeDef],
    total_stars: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivitiesQuery {
    module_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextActivityQuery {
    module_id: String,
    after: Option<String>,
}

async fn list_modules() -> impl IntoResponse {
    Json(ModulesResponse {
        modules: content::modules(),
    })
}

async fn list_activities(Query(query): Query<ActivitiesQuery>) -> impl IntoResponse {
    let activities = match query.module_id.as_deref() {
        Some(module_id) => content::activities_for_module(module_id),
        None => content::activities().iter().collect(),
    };
    Json(ActivitiesResponse { activities })
}

async fn module_activities(Path(module_id): Path<String>) -> impl IntoResponse {
    Json(ActivitiesResponse {
        activities: content::activities_for_module(&module_id),
    })
}

/// Sequential "what comes next" within a module; 404 once the module is
/// finished so the client can show its completion screen.
async fn next_activity(
    Query(query): Query<NextActivityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let activity = content::next_in_module(&query.module_id, query.after.as_deref())
        .ok_or_else(|| AppError::not_found("No more activities in this module"))?;
    Ok(Json(activity))
}

async fn list_badges() -> impl IntoResponse {
    Json(BadgesResponse {
        badges: content::badges(),
        total_stars: content::compute_stars(),
    })
}
