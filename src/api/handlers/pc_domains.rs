// Valuation and research lookups. These go to the pcdomains identity and
// never carry the caller's registry headers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::api::validation::{fqdn_path, plain_path_segment, Validator};
use crate::domain::research;
use crate::models::research::{DomainListFields, EstimationFields, KeywordFields, ESTIMATION_CURRENCIES};
use crate::registry::PassthroughHeaders;

#[tracing::instrument(skip(state, body))]
pub async fn estimation_handler(
    State(state): State<AppState>,
    Json(body): Json<EstimationFields>,
) -> ApiResult<Json<Value>> {
    Validator::new()
        .non_empty_list("domains", &body.domains)
        .one_of("currency", &body.currency, ESTIMATION_CURRENCIES)
        .finish()?;

    Ok(Json(research::estimate(&state.pc_domains, &body).await?))
}

#[tracing::instrument(skip(state))]
pub async fn alexa_handler(
    Path(domain): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    fqdn_path("domain", &domain)?;
    let headers = PassthroughHeaders::none();
    Ok(Json(state.pc_domains.pc_domains(&headers).alexa(&domain).await?))
}

#[tracing::instrument(skip(state, body))]
pub async fn keyword_handler(
    State(state): State<AppState>,
    Json(body): Json<KeywordFields>,
) -> ApiResult<Json<Value>> {
    Validator::new()
        .non_empty_list("keywords", &body.keywords)
        .finish()?;

    Ok(Json(research::keyword(&state.pc_domains, &body).await?))
}

#[tracing::instrument(skip(state))]
pub async fn meta_handler(
    Path(domain): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    fqdn_path("domain", &domain)?;
    let headers = PassthroughHeaders::none();
    Ok(Json(state.pc_domains.pc_domains(&headers).meta(&domain).await?))
}

#[tracing::instrument(skip(state))]
pub async fn sistrix_handler(
    Path((domain, country)): Path<(String, String)>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    fqdn_path("domain", &domain)?;
    plain_path_segment("country", &country)?;
    let headers = PassthroughHeaders::none();
    Ok(Json(
        state
            .pc_domains
            .pc_domains(&headers)
            .sistrix(&domain, &country)
            .await?,
    ))
}

#[tracing::instrument(skip(state, body))]
pub async fn majestic_handler(
    State(state): State<AppState>,
    Json(body): Json<DomainListFields>,
) -> ApiResult<Json<Value>> {
    Validator::new()
        .non_empty_list("domains", &body.domains)
        .finish()?;

    let domains = body.domains.into_option().unwrap_or_default();
    Ok(Json(research::majestic(&state.pc_domains, domains).await?))
}

#[tracing::instrument(skip(state))]
pub async fn smu_check_handler(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    plain_path_segment("username", &username)?;
    let headers = PassthroughHeaders::none();
    Ok(Json(state.pc_domains.pc_domains(&headers).smu_check(&username).await?))
}

#[tracing::instrument(skip(state))]
pub async fn wayback_handler(
    Path(domain): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    fqdn_path("domain", &domain)?;
    let headers = PassthroughHeaders::none();
    Ok(Json(state.pc_domains.pc_domains(&headers).wayback(&domain).await?))
}
