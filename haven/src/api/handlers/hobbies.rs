//! Adopted-hobby handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use haven_core::{AdoptedHobby, Error, EventLog, HobbyUpdate, NewHobby, UserId};

use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/users/{user_id}/hobbies
pub async fn list_hobbies(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<AdoptedHobby>>> {
    let hobbies = state
        .for_user(UserId::new(user_id), "hobbies", |store, _, user| {
            store.list_adopted_hobbies(user)
        })
        .await?;
    Ok(Json(hobbies))
}

/// POST /api/users/{user_id}/hobbies
pub async fn create_hobby(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<NewHobby>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AdoptedHobby>)> {
    let Json(hobby) = body?;
    let hobby = state
        .for_user(UserId::new(user_id), "hobby", move |store, _, user| {
            store.create_hobby(user, hobby)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(hobby)))
}

/// PATCH /api/users/{user_id}/hobbies/{id}
pub async fn update_hobby(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    body: Result<Json<HobbyUpdate>, JsonRejection>,
) -> ApiResult<Json<AdoptedHobby>> {
    let Json(update) = body?;
    let hobby = state
        .for_user(UserId::new(user_id), "hobby", move |store, _, user| {
            store
                .update_hobby(user, &id, update)?
                .ok_or_else(|| Error::not_found("hobby", id))
        })
        .await?;
    Ok(Json(hobby))
}

/// DELETE /api/users/{user_id}/hobbies/{id}
pub async fn delete_hobby(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state
        .for_user(UserId::new(user_id), "hobby", move |store, _, user| {
            if store.delete_hobby(user, &id)? {
                Ok(())
            } else {
                Err(Error::not_found("hobby", id))
            }
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
