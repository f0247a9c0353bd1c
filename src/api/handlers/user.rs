use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::api::validation::{plain_path_segment, FieldError, Validator};
use crate::domain::{self, users};
use crate::models::user::UserFields;
use crate::models::SearchRequest;
use crate::registry::PassthroughHeaders;

/// The user routes address `/user/{username}/{context}` upstream
fn user_path(username: &str, context: &str) -> ApiResult<()> {
    plain_path_segment("username", username)?;
    plain_path_segment("context", context)
}

/// Profile-style bodies are forwarded untouched but must be objects
fn object_body(body: Value) -> ApiResult<Value> {
    if body.is_object() {
        Ok(body)
    } else {
        Err(ApiError::from(FieldError::new("body", "body must be a JSON object")))
    }
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<UserFields>,
) -> ApiResult<Json<Value>> {
    info!("Creating user");

    // 1. Input validation
    Validator::new()
        .non_empty("username", &body.username)
        .non_empty("context", &body.context)
        .non_empty("password", &body.password)
        .finish()?;

    // 2. Build payload and dispatch
    Ok(Json(users::create_user(&state.general, &headers, &body).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn user_info_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    Ok(Json(state.general.user(&headers).info(&username, &context).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_user_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<UserFields>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    info!("Updating user");
    Ok(Json(
        users::update_user(&state.general, &headers, &username, &context, &body).await?,
    ))
}

#[tracing::instrument(skip(state, headers))]
pub async fn delete_user_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    Ok(Json(state.general.user(&headers).delete(&username, &context).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<Json<Value>> {
    let query = domain::build_query(body);
    Ok(Json(state.general.user(&headers).list(&query).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn lock_user_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    info!("Locking user");
    Ok(Json(state.general.user(&headers).lock(&username, &context).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn unlock_user_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    info!("Unlocking user");
    Ok(Json(state.general.user(&headers).unlock(&username, &context).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn copy_user_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    let body = object_body(body)?;
    Ok(Json(state.general.user(&headers).copy(&username, &context, body).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_profile_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    let body = object_body(body)?;
    Ok(Json(
        state
            .general
            .user(&headers)
            .profile_update(&username, &context, body)
            .await?,
    ))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_service_profile_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    let body = object_body(body)?;
    Ok(Json(
        state
            .general
            .user(&headers)
            .service_profile_update(&username, &context, body)
            .await?,
    ))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_billing_limit_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    let body = object_body(body)?;
    Ok(Json(
        state
            .general
            .user(&headers)
            .billing_limit_update(&username, &context, body)
            .await?,
    ))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_billing_term_handler(
    Path((username, context)): Path<(String, String)>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    user_path(&username, &context)?;
    let body = object_body(body)?;
    Ok(Json(
        state
            .general
            .user(&headers)
            .billing_term_update(&username, &context, body)
            .await?,
    ))
}
