//! HTTP tests driving the router in-process with `oneshot`.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use haven::bootstrap::seed_demo_user;
use haven::{build_router, AppState};
use haven_core::{MemoryStore, MoodEvent, RecommendationEngine, UserId};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot()

const DEMO: &str = "/api/users/default-user";

struct TestApp {
    store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        haven_core::logging::init_test();
        let store = Arc::new(MemoryStore::new());
        seed_demo_user(store.as_ref()).unwrap();
        let state = AppState::new(store.clone(), RecommendationEngine::default());
        Self {
            store,
            router: build_router(state, false),
        }
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, None)).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::POST, uri, Some(body))).await
    }
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

// ============================================
// Basics
// ============================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_and_fetch_user() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/users", json!({"username": "sam", "name": "Sam"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app.get(&format!("/api/users/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sam");
}

#[tokio::test]
async fn test_unknown_user_is_404() {
    let app = TestApp::new();
    for uri in [
        "/api/users/ghost",
        "/api/users/ghost/stats",
        "/api/users/ghost/hobbies/suggestions",
        "/api/users/ghost/mood",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["code"], "USER_NOT_FOUND", "{}", uri);
    }
}

// ============================================
// Mood
// ============================================

#[tokio::test]
async fn test_mood_validation() {
    let app = TestApp::new();
    let (status, body) = app.post(&format!("{}/mood", DEMO), json!({"mood": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, _) = app
        .post(&format!("{}/mood", DEMO), json!({"notes": "no score"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.post(&format!("{}/mood", DEMO), json!({"mood": 4})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood"], 4);
    assert_eq!(body["userId"], "default-user");
}

#[tokio::test]
async fn test_mood_list_newest_first_with_limit() {
    let app = TestApp::new();
    let now = Utc::now();
    for (i, score) in [1u8, 2, 3].iter().enumerate() {
        app.store
            .insert_mood_event(MoodEvent {
                id: format!("m{}", i),
                user_id: UserId::from("default-user"),
                mood_score: *score,
                notes: None,
                timestamp: now - Duration::hours(3 - i as i64),
            })
            .unwrap();
    }

    let (status, body) = app.get(&format!("{}/mood?limit=2", DEMO)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["m2", "m1"]);
}

#[tokio::test]
async fn test_mood_range_requires_both_dates() {
    let app = TestApp::new();
    let (status, body) = app
        .get(&format!("{}/mood/range?startDate=2025-01-01T00:00:00Z", DEMO))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Start date and end date are required");

    let (status, _) = app
        .get(&format!(
            "{}/mood/range?startDate=yesterday&endDate=2025-01-02T00:00:00Z",
            DEMO
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .get(&format!(
            "{}/mood/range?startDate=2025-01-01T00:00:00Z&endDate=2025-01-02T00:00:00Z",
            DEMO
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

// ============================================
// Journal
// ============================================

#[tokio::test]
async fn test_journal_lifecycle() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            &format!("{}/journal", DEMO),
            json!({"content": "Long day", "emotions": ["tired"]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();
    let entry_uri = format!("{}/journal/{}", DEMO, id);

    let (status, body) = app
        .send(request(
            Method::PUT,
            &entry_uri,
            Some(json!({"emotions": ["tired", "calm"]})),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Long day");
    assert_eq!(body["emotions"], json!(["tired", "calm"]));

    let (status, body) = app.send(request(Method::DELETE, &entry_uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = app.get(&entry_uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_empty_journal_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .post(&format!("{}/journal", DEMO), json!({"content": "   "}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================
// Hobbies, stats and suggestions
// ============================================

#[tokio::test]
async fn test_hobby_lifecycle() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            &format!("{}/hobbies", DEMO),
            json!({
                "name": "Music Therapy",
                "category": "Sound Healing",
                "frequency": "weekly",
                "enjoymentLevel": 4
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isActive"], true);
    let uri = format!("{}/hobbies/{}", DEMO, body["id"].as_str().unwrap());

    let (status, body) = app
        .send(request(Method::PATCH, &uri, Some(json!({"isActive": false}))))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);

    let (status, _) = app.send(request(Method::DELETE, &uri, None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(request(Method::DELETE, &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_totals() {
    let app = TestApp::new();
    for mood in [3, 4, 5] {
        app.post(&format!("{}/mood", DEMO), json!({"mood": mood})).await;
    }
    for content in ["one", "two"] {
        app.post(&format!("{}/journal", DEMO), json!({"content": content}))
            .await;
    }
    app.post(
        &format!("{}/breathing", DEMO),
        json!({"duration": 5, "completed": true}),
    )
    .await;

    let (status, body) = app.get(&format!("{}/stats", DEMO)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalSessions"], 6);
    assert_eq!(body["moodTotal"], 3);
    assert_eq!(body["journalTotal"], 2);
    assert_eq!(body["breathingTotal"], 1);
    assert_eq!(body["hobbyTotal"], 0);
    assert_eq!(body["currentStreak"], 1);
}

#[tokio::test]
async fn test_suggestions_in_crisis() {
    let app = TestApp::new();
    for _ in 0..14 {
        app.post(&format!("{}/mood", DEMO), json!({"mood": 1})).await;
    }

    let (status, body) = app.get(&format!("{}/hobbies/suggestions", DEMO)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moodContext"], "crisis");
    assert_eq!(body["averageMood"], 1.0);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.iter().all(|s| s["crisisSupport"] == true));
    assert_eq!(body["supportResources"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_suggestions_exclude_adopted_hobby() {
    let app = TestApp::new();
    for mood in [5, 4, 5] {
        app.post(&format!("{}/mood", DEMO), json!({"mood": mood})).await;
    }
    app.post(
        &format!("{}/hobbies", DEMO),
        json!({
            "name": "music therapy",
            "category": "Sound Healing",
            "frequency": "daily",
            "enjoymentLevel": 5
        }),
    )
    .await;

    let (status, body) = app.get(&format!("{}/hobbies/suggestions", DEMO)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moodContext"], "good");
    let names: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 6);
    assert!(!names.contains(&"Music Therapy"));
    assert!(body["supportResources"].as_array().unwrap().is_empty());
}
