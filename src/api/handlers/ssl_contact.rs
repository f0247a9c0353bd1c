use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::api::validation::{numeric_path_id, Validator};
use crate::domain::{self, contacts};
use crate::models::ssl_contact::SslContactFields;
use crate::models::SearchRequest;
use crate::registry::PassthroughHeaders;

#[tracing::instrument(skip(state, headers, body))]
pub async fn create_ssl_contact_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<SslContactFields>,
) -> ApiResult<Json<Value>> {
    info!("Creating SSL contact");

    // 1. Input validation
    Validator::new()
        .non_empty("city", &body.city)
        .non_empty("state", &body.state)
        .non_empty("title", &body.title)
        .non_empty("street_no", &body.street_no)
        .non_empty("fname", &body.fname)
        .non_empty("lname", &body.lname)
        .non_empty("pcode", &body.pcode)
        .finish()?;

    // 2. Build payload and dispatch
    Ok(Json(contacts::create_ssl_contact(&state.ssl, &headers, &body).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn ssl_contact_info_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    numeric_path_id("id", &id)?;
    Ok(Json(state.ssl.ssl_contact(&headers).info(&id).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_ssl_contact_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<SslContactFields>,
) -> ApiResult<Json<Value>> {
    info!("Updating SSL contact");
    numeric_path_id("id", &id)?;
    Ok(Json(contacts::update_ssl_contact(&state.ssl, &headers, &id, &body).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn delete_ssl_contact_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    numeric_path_id("id", &id)?;
    Ok(Json(state.ssl.ssl_contact(&headers).delete(&id).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn list_ssl_contacts_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<Json<Value>> {
    let query = domain::build_query(body);
    Ok(Json(state.ssl.ssl_contact(&headers).list(&query).await?))
}
