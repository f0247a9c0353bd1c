use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::api::validation::{fqdn_path, Validator};
use crate::domain::research;
use crate::models::research::DomainListFields;
use crate::registry::PassthroughHeaders;

#[tracing::instrument(skip(state, headers))]
pub async fn whois_single_handler(
    Path(domain): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    fqdn_path("domain", &domain)?;
    Ok(Json(state.general.whois(&headers).single(&domain).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn whois_multi_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<DomainListFields>,
) -> ApiResult<Json<Value>> {
    Validator::new().non_empty_list("domains", &body.domains).finish()?;

    let domains = body.domains.into_option().unwrap_or_default();
    Ok(Json(research::whois_multi(&state.general, &headers, &domains).await?))
}
