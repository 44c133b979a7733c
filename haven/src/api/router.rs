//! Route table

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{breathing, health, hobbies, insights, journal, mood, users};
use super::state::AppState;

/// Build the application router.
///
/// `cors_permissive` opens the API to any origin, for a browser client
/// served from a different port during development.
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let api = Router::new()
        // Users
        .route("/api/users", post(users::create_user))
        .route("/api/users/{user_id}", get(users::get_user))
        // Mood
        .route(
            "/api/users/{user_id}/mood",
            post(mood::record_mood).get(mood::list_moods),
        )
        .route("/api/users/{user_id}/mood/range", get(mood::mood_range))
        // Journal
        .route(
            "/api/users/{user_id}/journal",
            post(journal::create_entry).get(journal::list_entries),
        )
        .route(
            "/api/users/{user_id}/journal/{id}",
            get(journal::get_entry)
                .put(journal::update_entry)
                .delete(journal::delete_entry),
        )
        // Breathing
        .route(
            "/api/users/{user_id}/breathing",
            post(breathing::record_session).get(breathing::list_sessions),
        )
        // Hobbies
        .route(
            "/api/users/{user_id}/hobbies",
            get(hobbies::list_hobbies).post(hobbies::create_hobby),
        )
        .route(
            "/api/users/{user_id}/hobbies/suggestions",
            get(insights::hobby_suggestions),
        )
        .route(
            "/api/users/{user_id}/hobbies/{id}",
            patch(hobbies::update_hobby).delete(hobbies::delete_hobby),
        )
        // Progress
        .route("/api/users/{user_id}/stats", get(insights::user_stats));

    let app = Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
