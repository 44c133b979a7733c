//! Account handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use haven_core::{Error, NewUser, User, UserId};

use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(new_user) = body?;
    let user = state
        .run("user", move |store, _| store.create_user(new_user))
        .await?;
    tracing::info!(user = %user.id, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = state
        .run("user info", move |store, _| {
            let id = UserId::new(user_id);
            store
                .get_user(&id)?
                .ok_or_else(|| Error::not_found("user", id.as_str()))
        })
        .await?;
    Ok(Json(user))
}
