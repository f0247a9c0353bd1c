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
use crate::models::contact::ContactFields;
use crate::models::SearchRequest;
use crate::registry::PassthroughHeaders;

pub const CONTACT_TYPES: &[&str] = &["PERSON", "ORG", "ROLE"];

fn validate_create(body: &ContactFields) -> ApiResult<()> {
    Validator::new()
        .one_of("type", &body.contact_type, CONTACT_TYPES)
        .non_empty("city", &body.city)
        .non_empty("country", &body.country)
        .non_empty("pcode", &body.pcode)
        .non_empty("lname", &body.lname)
        .finish()
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn create_contact_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<ContactFields>,
) -> ApiResult<Json<Value>> {
    info!("Creating contact");

    // 1. Input validation
    validate_create(&body)?;

    // 2. Build payload and dispatch
    Ok(Json(contacts::create_contact(&state.general, &headers, &body).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn contact_info_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    numeric_path_id("id", &id)?;
    Ok(Json(state.general.contact(&headers).info(&id).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_contact_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<ContactFields>,
) -> ApiResult<Json<Value>> {
    info!("Updating contact");

    // 1. Input validation
    numeric_path_id("id", &id)?;
    if body.contact_type.is_present() {
        Validator::new()
            .one_of("type", &body.contact_type, CONTACT_TYPES)
            .finish()?;
    }

    // 2. Fetch, patch and submit
    Ok(Json(contacts::update_contact(&state.general, &headers, &id, &body).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn delete_contact_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    numeric_path_id("id", &id)?;
    Ok(Json(state.general.contact(&headers).delete(&id).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn list_contacts_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<Json<Value>> {
    let query = domain::build_query(body);
    info!(filters = query.filters.len(), "Searching contacts");
    Ok(Json(state.general.contact(&headers).list(&query).await?))
}
