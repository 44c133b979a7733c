//! Journal handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use haven_core::store::take_recent;
use haven_core::{Error, EventLog, JournalEvent, JournalUpdate, NewJournalEntry, UserId};
use serde::Serialize;

use super::ListQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

const ENTRY: &str = "journal entry";

/// POST /api/users/{user_id}/journal
pub async fn create_entry(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<NewJournalEntry>, JsonRejection>,
) -> ApiResult<Json<JournalEvent>> {
    let Json(entry) = body?;
    let event = state
        .for_user(UserId::new(user_id), ENTRY, move |store, _, user| {
            store.create_journal_entry(user, entry)
        })
        .await?;
    Ok(Json(event))
}

/// GET /api/users/{user_id}/journal
pub async fn list_entries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<JournalEvent>>> {
    let Query(query) = query?;
    let events = state
        .for_user(UserId::new(user_id), "journal entries", move |store, _, user| {
            Ok(take_recent(store.list_journal_events(user)?, query.limit))
        })
        .await?;
    Ok(Json(events))
}

/// GET /api/users/{user_id}/journal/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
) -> ApiResult<Json<JournalEvent>> {
    let event = state
        .for_user(UserId::new(user_id), ENTRY, move |store, _, user| {
            store
                .get_journal_entry(user, &id)?
                .ok_or_else(|| Error::not_found(ENTRY, id))
        })
        .await?;
    Ok(Json(event))
}

/// PUT /api/users/{user_id}/journal/{id}
pub async fn update_entry(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    body: Result<Json<JournalUpdate>, JsonRejection>,
) -> ApiResult<Json<JournalEvent>> {
    let Json(update) = body?;
    let event = state
        .for_user(UserId::new(user_id), ENTRY, move |store, _, user| {
            store
                .update_journal_entry(user, &id, update)?
                .ok_or_else(|| Error::not_found(ENTRY, id))
        })
        .await?;
    Ok(Json(event))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// DELETE /api/users/{user_id}/journal/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
) -> ApiResult<Json<DeleteResponse>> {
    state
        .for_user(UserId::new(user_id), ENTRY, move |store, _, user| {
            if store.delete_journal_entry(user, &id)? {
                Ok(())
            } else {
                Err(Error::not_found(ENTRY, id))
            }
        })
        .await?;
    Ok(Json(DeleteResponse { success: true }))
}
