use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_health_root() {
    let (app, _data_dir) = common::create_test_app();

    let response = app.oneshot(common::get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_live() {
    let (app, _data_dir) = common::create_test_app();

    let response = app.oneshot(common::get("/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_modules() {
    let (app, _data_dir) = common::create_test_app();

    let response = app.oneshot(common::get("/api/modules")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let modules = body["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 3);
    assert_eq!(modules[0]["id"], "module-1");
    assert_eq!(modules[0]["activitiesCompleted"], 4);
}

#[tokio::test]
async fn test_activities_filtered_by_module() {
    let (app, _data_dir) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::get("/api/activities?moduleId=module-2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let activities = body["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 2);
    assert!(activities
        .iter()
        .all(|activity| activity["moduleId"] == "module-2"));

    let response = app
        .oneshot(common::get("/api/modules/module-1/activities"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["activities"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_next_activity_walks_the_module() {
    let (app, _data_dir) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::get("/api/activities/next?moduleId=module-1"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["id"], "activity-1-1");

    let response = app
        .clone()
        .oneshot(common::get(
            "/api/activities/next?moduleId=module-1&after=activity-1-1",
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["id"], "activity-1-2");

    let response = app
        .oneshot(common::get(
            "/api/activities/next?moduleId=module-1&after=activity-1-2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_badges_and_stars() {
    let (app, _data_dir) = common::create_test_app();

    let response = app.oneshot(common::get("/api/badges")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["badges"].as_array().unwrap().len(), 6);
    assert_eq!(body["totalStars"], 36);
}

#[tokio::test]
async fn test_register_login_round_trip() {
    let (app, _data_dir) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/auth/register",
            json!({
                "name": "Maya",
                "email": "maya@example.com",
                "password": "hunter2",
                "neurodiversityTags": ["ADHD"],
                "age": 9
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "maya@example.com");
    assert_eq!(body["user"]["type"], "student");
    assert!(body["user"].get("passwordHash").is_none());

    // Same email again conflicts.
    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/auth/register",
            json!({
                "name": "Maya",
                "email": "maya@example.com",
                "password": "hunter2"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/auth/login",
            json!({ "email": "maya@example.com", "password": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(common::post_json(
            "/api/auth/login",
            json!({ "email": "maya@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_requires_fields() {
    let (app, _data_dir) = common::create_test_app();

    let response = app
        .oneshot(common::post_json(
            "/api/auth/register",
            json!({ "name": "Maya" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "name, email, and password are required");
}

#[tokio::test]
async fn test_progress_upsert_and_fetch() {
    let (app, _data_dir) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/progress",
            json!({
                "userId": "user-1",
                "moduleId": "module-1",
                "activityId": "activity-1-1"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["progress"]["completions"][0]["status"], "completed");

    // Re-submitting the same activity overwrites rather than duplicates.
    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/progress",
            json!({
                "userId": "user-1",
                "moduleId": "module-1",
                "activityId": "activity-1-1",
                "status": "in-progress"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::get("/api/progress/user-1"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    let completions = body["progress"]["completions"].as_array().unwrap();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0]["status"], "in-progress");

    let response = app
        .oneshot(common::get("/api/progress/user-2"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(body["progress"]["completions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_progress_validation() {
    let (app, _data_dir) = common::create_test_app();

    let response = app
        .oneshot(common::post_json(
            "/api/progress",
            json!({ "userId": "user-1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_with_no_interactions() {
    let (app, _data_dir) = common::create_test_app();

    let response = app
        .oneshot(common::get("/api/progress/user-1/summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["attempts"], 0);
    assert_eq!(body["overallAccuracy"], 0.0);
}

#[tokio::test]
async fn test_404_fallback() {
    let (app, _data_dir) = common::create_test_app();

    let response = app
        .oneshot(common::get("/nonexistent/path"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Route not found");
}
