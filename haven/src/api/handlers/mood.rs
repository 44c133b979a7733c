//! Mood check-in handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use chrono::{DateTime, Utc};
use haven_core::store::take_recent;
use haven_core::{EventLog, MoodEvent, NewMoodEvent, UserId};
use serde::Deserialize;

use super::ListQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// POST /api/users/{user_id}/mood
pub async fn record_mood(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<NewMoodEvent>, JsonRejection>,
) -> ApiResult<Json<MoodEvent>> {
    let Json(entry) = body?;
    let event = state
        .for_user(UserId::new(user_id), "mood entry", move |store, _, user| {
            store.record_mood(user, entry)
        })
        .await?;
    Ok(Json(event))
}

/// GET /api/users/{user_id}/mood
pub async fn list_moods(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<MoodEvent>>> {
    let Query(query) = query?;
    let events = state
        .for_user(UserId::new(user_id), "mood entries", move |store, _, user| {
            Ok(take_recent(store.list_mood_events(user)?, query.limit))
        })
        .await?;
    Ok(Json(events))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RangeQuery {
    fn bounds(&self) -> ApiResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (Some(start), Some(end)) = (&self.start_date, &self.end_date) else {
            return Err(ApiError::InvalidInput(
                "Start date and end date are required".to_string(),
            ));
        };
        Ok((parse_date(start)?, parse_date(end)?))
    }
}

fn parse_date(value: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::InvalidInput(format!("invalid date {:?}: {}", value, e)))
}

/// GET /api/users/{user_id}/mood/range?startDate=&endDate=
pub async fn mood_range(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<MoodEvent>>> {
    let Query(query) = query?;
    let (start, end) = query.bounds()?;
    let events = state
        .for_user(
            UserId::new(user_id),
            "mood entries for date range",
            move |store, _, user| store.list_mood_events_between(user, start, end),
        )
        .await?;
    Ok(Json(events))
}
