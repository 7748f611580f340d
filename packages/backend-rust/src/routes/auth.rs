use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{generate_token, hash_password, verify_password};
use crate::response::AppError;
use crate::state::AppState;
use crate::store::UserRecord;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    neurodiversity_tags: Vec<String>,
    #[serde(default)]
    age: Option<u32>,
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Account shape returned to clients; the password hash never leaves the
/// store file.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SafeUser {
    id: String,
    name: String,
    email: String,
    neurodiversity_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<u32>,
    #[serde(rename = "type")]
    user_type: String,
}

impl From<UserRecord> for SafeUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            neurodiversity_tags: record.neurodiversity_tags,
            age: record.age,
            user_type: record.user_type,
        }
    }
}

#[derive(Serialize)]
struct AuthResponse {
    token: String,
    user: SafeUser,
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(AppError::validation(
            "name, email, and password are required",
        ));
    }

    let record = UserRecord {
        id: format!("user_{}", Uuid::new_v4()),
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
        password_hash: hash_password(&payload.password)?,
        neurodiversity_tags: payload.neurodiversity_tags,
        age: payload.age,
        user_type: "student".to_string(),
    };

    let inserted = state
        .store()
        .try_insert_user(record.clone())
        .map_err(|err| {
            tracing::error!(error = %err, "failed to persist user");
            AppError::internal("failed to persist user")
        })?;
    if !inserted {
        return Err(AppError::conflict("User already exists"));
    }

    let token = generate_token(&record.id);
    tracing::info!(user_id = %record.id, "registered new learner");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: record.into(),
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .store()
        .find_user_by_email(payload.email.trim())
        .filter(|user| verify_password(&payload.password, &user.password_hash))
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    let token = generate_token(&user.id);
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
