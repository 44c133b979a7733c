//! Derived views: progress stats and activity suggestions

use axum::{
    extract::{Path, State},
    response::Json,
};
use haven_core::{RecommendationReport, UserId, UserStatsSnapshot};

use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/users/{user_id}/stats
pub async fn user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserStatsSnapshot>> {
    let stats = state
        .for_user(UserId::new(user_id), "user stats", |store, engine, user| {
            engine.stats_for_user(store, user)
        })
        .await?;
    Ok(Json(stats))
}

/// GET /api/users/{user_id}/hobbies/suggestions
pub async fn hobby_suggestions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<RecommendationReport>> {
    let report = state
        .for_user(
            UserId::new(user_id),
            "hobby suggestions",
            |store, engine, user| engine.recommend_for_user(store, user),
        )
        .await?;
    Ok(Json(report))
}
