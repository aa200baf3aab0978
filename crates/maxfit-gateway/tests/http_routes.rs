//! HTTP contract of the gated dashboard and the profile API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use maxfit_gateway::app_state::AppState;
use maxfit_gateway::config;
use maxfit_gateway::router::build_router;
use maxfit_gateway::store::{MemoryProgramStore, MemoryUserStore, UserStore};

const CONFIG: &str = r#"
version: 1
access:
  rules:
    - { route: "/dashboard/ai-assistant", min_tier: premium }
    - { route: "/dashboard/workout-plan", min_tier: basic }
assistant:
  workflows: { english: "wf-en", urdu: "wf-ur" }
  voices:
    urdu: { male: "Asad", female: "Hina" }
users:
  - { email: "free@x.io", token: "tok-free", first_name: "Fay", last_name: "Free", plan: free }
  - email: "prem@x.io"
    token: "tok-prem"
    first_name: "Hina"
    last_name: "Khan"
    language: urdu
    plan: premium
    gender: female
"#;

const PROGRAMS: &str = r#"{
  "prem@x.io": [
    { "id": "old", "createdAt": "2025-01-01T00:00:00Z",
      "workoutPlan": { "overview": "Strength base", "weeklySchedule": [
        { "day": "Mon", "workoutType": "Strength", "duration": "45 min",
          "exercises": [ { "name": "Squat", "sets": { "$numberInt": "5" } } ] } ] } },
    { "id": "new", "createdAt": "2025-02-01T00:00:00Z",
      "workoutPlan": { "overview": "Engine", "weeklySchedule": [
        { "day": "Tue", "workoutType": "Running", "duration": "30 min", "exercises": [] } ] },
      "dietPlan": { "mealPlan": {
        "breakfast": { "calories": 400 }, "lunch": { "calories": { "$numberInt": "600" } },
        "dinner": { "calories": 500 }, "snacks": [ { "snack": "Nuts", "calories": 150 } ] } } }
  ]
}"#;

fn app_with_users() -> (Router, Arc<MemoryUserStore>) {
    let cfg = config::load_from_str(CONFIG).unwrap();
    let users = Arc::new(MemoryUserStore::from_seeds(&cfg.users));
    let programs = Arc::new(MemoryProgramStore::from_json(PROGRAMS).unwrap());
    let state = AppState::with_stores(cfg, users.clone(), programs).unwrap();
    (build_router(state), users)
}

fn app() -> Router {
    app_with_users().0
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().uri(uri);
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    b.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut b = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    b.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn free_user_redirected_from_assistant() {
    let res = app()
        .oneshot(get("/dashboard/ai-assistant", Some("tok-free")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/dashboard");
}

#[tokio::test]
async fn plan_upgrade_applies_to_the_next_request() {
    let (app, users) = app_with_users();
    let res = app
        .clone()
        .oneshot(get("/dashboard/ai-assistant", Some("tok-free")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let user = users.find_by_email("free@x.io").await.unwrap().unwrap();
    users.set_plan(&user.id, "premium").await.unwrap();

    let res = app
        .oneshot(get("/dashboard/ai-assistant", Some("tok-free")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["workflowId"], "wf-en");
}

#[tokio::test]
async fn premium_user_gets_call_config() {
    let res = app()
        .oneshot(get("/dashboard/ai-assistant", Some("tok-prem")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v = json_body(res).await;
    assert_eq!(v["workflowId"], "wf-ur");
    assert_eq!(v["voice"]["voiceId"], "Hina");
    assert_eq!(v["variableValues"]["name"], "Hina Khan");
}

#[tokio::test]
async fn signed_out_redirected_then_unauthorized_at_fallback() {
    let res = app()
        .oneshot(get("/dashboard/nutrition-plan", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = app()
        .oneshot(get("/dashboard", Some("bogus")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await["code"], "AUTH_FAILED");
}

#[tokio::test]
async fn dashboard_summary_lists_sections() {
    let res = app()
        .oneshot(get("/dashboard", Some("tok-free")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v = json_body(res).await;
    assert_eq!(v["user"]["tier"], "free");
    let sections = v["sections"].as_array().unwrap();
    let assistant = sections
        .iter()
        .find(|s| s["route"] == "/dashboard/ai-assistant")
        .unwrap();
    assert_eq!(assistant["allowed"], false);
    assert_eq!(assistant["requiredTier"], "premium");
    let nutrition = sections
        .iter()
        .find(|s| s["route"] == "/dashboard/nutrition-plan")
        .unwrap();
    assert_eq!(nutrition["allowed"], true);
    assert_eq!(nutrition["requiredTier"], Value::Null);
}

#[tokio::test]
async fn workout_listing_normalizes_and_filters() {
    let res = app()
        .oneshot(get("/dashboard/workout-plan", Some("tok-prem")))
        .await
        .unwrap();
    let v = json_body(res).await;
    let ids: Vec<&str> = v["programs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["new", "old"]);
    let old = &v["programs"][1];
    assert_eq!(
        old["workoutPlan"]["weeklySchedule"][0]["exercises"][0]["sets"],
        5
    );
    assert_eq!(old["stats"]["workoutType"], "strength");
    assert_eq!(old["stats"]["avgDuration"], 45);

    let res = app()
        .oneshot(get("/dashboard/workout-plan?type=cardio", Some("tok-prem")))
        .await
        .unwrap();
    let v = json_body(res).await;
    assert_eq!(v["programs"].as_array().unwrap().len(), 1);
    assert_eq!(v["programs"][0]["id"], "new");

    let res = app()
        .oneshot(get("/dashboard/workout-plan?type=yoga", Some("tok-prem")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nutrition_listing_sums_calories() {
    let res = app()
        .oneshot(get("/dashboard/nutrition-plan", Some("tok-prem")))
        .await
        .unwrap();
    let v = json_body(res).await;
    let programs = v["programs"].as_array().unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0]["dailyCalories"], 1650);
    assert_eq!(programs[0]["snackCalories"], 150);
    assert_eq!(
        programs[0]["dietPlan"]["mealPlan"]["lunch"]["calories"],
        600
    );
}

#[tokio::test]
async fn profile_update_happy_path() {
    let res = app()
        .oneshot(post_json(
            "/api/users/update-name",
            Some("tok-free"),
            json!({
                "email": "free@x.io",
                "firstName": " Farah ",
                "lastName": "Ali ",
                "language": "arabic"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v = json_body(res).await;
    assert_eq!(v["success"], true);
    assert_eq!(v["message"], "Profile updated successfully");
    assert_eq!(v["user"]["firstName"], "Farah");
    assert_eq!(v["user"]["lastName"], "Ali");
    assert_eq!(v["user"]["language"], "arabic");
}

#[tokio::test]
async fn profile_update_validation() {
    let res = app()
        .oneshot(post_json(
            "/api/users/update-name",
            Some("tok-free"),
            json!({ "email": "free@x.io" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(res).await["error"],
        "Email, first name, last name, and language are required"
    );

    let res = app()
        .oneshot(post_json(
            "/api/users/update-name",
            Some("tok-free"),
            json!({
                "email": "free@x.io",
                "firstName": "F",
                "lastName": "L",
                "language": "klingon"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(res).await["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid language."));
}

#[tokio::test]
async fn profile_update_requires_own_session() {
    let body = json!({
        "email": "prem@x.io",
        "firstName": "F",
        "lastName": "L",
        "language": "english"
    });

    let res = app()
        .oneshot(post_json("/api/users/update-name", None, body.clone()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app()
        .oneshot(post_json("/api/users/update-name", Some("tok-free"), body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn metrics_count_gate_decisions() {
    let app = app();
    app.clone()
        .oneshot(get("/dashboard/ai-assistant", Some("tok-free")))
        .await
        .unwrap();
    app.clone()
        .oneshot(get("/dashboard/ai-assistant", Some("tok-prem")))
        .await
        .unwrap();

    let res = app.oneshot(get("/metrics", None)).await.unwrap();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(
        text.contains("maxfit_gate_decisions_total{outcome=\"allow\"} 1"),
        "{text}"
    );
    assert!(
        text.contains("maxfit_gate_decisions_total{outcome=\"deny\",reason=\"plan\"} 1"),
        "{text}"
    );
}
