use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use haven_core::store::take_recent;
use haven_core::{ActivityEvent, EventLog, NewBreathingSession, UserId};

use super::ListQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/users/{user_id}/breathing
pub async fn record_session(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<NewBreathingSession>, JsonRejection>,
) -> ApiResult<Json<ActivityEvent>> {
    let Json(session) = body?;
    let event = state
        .for_user(UserId::new(user_id), "breathing session", move |store, _, user| {
            store.record_breathing_session(user, session)
        })
        .await?;
    Ok(Json(event))
}

/// GET /api/users/{user_id}/breathing
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ActivityEvent>>> {
    let Query(query) = query?;
    let events = state
        .for_user(UserId::new(user_id), "breathing sessions", move |store, _, user| {
            Ok(take_recent(store.list_activity_events(user)?, query.limit))
        })
        .await?;
    Ok(Json(events))
}
