use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::api::validation::{numeric_path_id, Validator};
use crate::domain::certificates::{self, OrderMode};
use crate::domain;
use crate::models::certificate::CertificateFields;
use crate::models::SearchRequest;
use crate::registry::PassthroughHeaders;

fn validate_order(body: &CertificateFields) -> ApiResult<()> {
    Validator::new()
        .non_empty("name", &body.name)
        .numeric_id("sslcontact_id", &body.sslcontact_id)
        .finish()
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn create_certificate_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<CertificateFields>,
) -> ApiResult<Json<Value>> {
    info!("Ordering certificate");

    // 1. Input validation
    validate_order(&body)?;

    // 2. Resolve contact, generate CSR and order
    Ok(Json(
        certificates::create_certificate(&state.ssl, &headers, &body, OrderMode::Standard).await?,
    ))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn create_certificate_realtime_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<CertificateFields>,
) -> ApiResult<Json<Value>> {
    info!("Ordering certificate (realtime)");

    validate_order(&body)?;

    Ok(Json(
        certificates::create_certificate(&state.ssl, &headers, &body, OrderMode::Realtime).await?,
    ))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn prepare_order_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<CertificateFields>,
) -> ApiResult<Json<Value>> {
    info!("Preparing certificate order");

    Validator::new().non_empty("name", &body.name).finish()?;

    Ok(Json(certificates::prepare_order(&state.ssl, &headers, &body).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn certificate_info_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    numeric_path_id("id", &id)?;
    Ok(Json(state.ssl.certificate(&headers).info(&id).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn delete_certificate_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    numeric_path_id("id", &id)?;
    Ok(Json(state.ssl.certificate(&headers).delete(&id).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn list_certificates_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<Json<Value>> {
    let query = domain::build_query(body);
    Ok(Json(state.ssl.certificate(&headers).list(&query).await?))
}
