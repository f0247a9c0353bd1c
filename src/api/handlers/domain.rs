use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::api::utils::is_fqdn;
use crate::api::validation::{fqdn_path, Validator};
use crate::domain::{self, domains};
use crate::models::domain::DomainFields;
use crate::models::{Patch, SearchRequest};
use crate::registry::PassthroughHeaders;

pub const MIN_NAMESERVERS: usize = 2;
pub const MAX_NAMESERVERS: usize = 4;

/// Create and transfer need a name. Nameservers and contact are optional.
fn validate_order(body: &DomainFields) -> ApiResult<()> {
    let mut validator = Validator::new();
    validator.fqdn("name", &body.name);
    check_supplied(&mut validator, body);
    validator.finish()
}

/// Update and restore only check what was supplied
fn validate_patch(body: &DomainFields) -> ApiResult<()> {
    let mut validator = Validator::new();
    check_supplied(&mut validator, body);
    validator.finish()
}

fn check_supplied(validator: &mut Validator, body: &DomainFields) {
    validator.optional_numeric_id("contact_id", &body.contact_id);
    if body.nameservers.is_present() {
        validator.list_len("nameservers", &body.nameservers, MIN_NAMESERVERS, MAX_NAMESERVERS);
        validate_hosts(validator, &body.nameservers);
    }
}

fn validate_hosts(validator: &mut Validator, nameservers: &Patch<Vec<String>>) {
    for host in nameservers.as_option().into_iter().flatten() {
        if !is_fqdn(host) {
            validator.push("nameservers", format!("{} is not a valid host name", host));
        }
    }
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn create_domain_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<DomainFields>,
) -> ApiResult<Json<Value>> {
    info!("Creating domain");

    // 1. Input validation
    validate_order(&body)?;

    // 2. Resolve contact, build payload and dispatch
    Ok(Json(domains::create_domain(&state.general, &headers, &body).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn transfer_domain_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<DomainFields>,
) -> ApiResult<Json<Value>> {
    info!("Transferring domain");

    validate_order(&body)?;

    Ok(Json(domains::transfer_domain(&state.general, &headers, &body).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn domain_info_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    fqdn_path("name", &name)?;
    Ok(Json(state.general.domain(&headers).info(&name).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_domain_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<DomainFields>,
) -> ApiResult<Json<Value>> {
    info!("Updating domain");

    // 1. Input validation
    fqdn_path("name", &name)?;
    validate_patch(&body)?;

    // 2. Fetch, patch and submit
    Ok(Json(domains::update_domain(&state.general, &headers, &name, &body).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn list_domains_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<Json<Value>> {
    let query = domain::build_query(body);
    info!(filters = query.filters.len(), "Searching domains");
    Ok(Json(state.general.domain(&headers).list(&query).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn create_authinfo1_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    fqdn_path("name", &name)?;
    Ok(Json(state.general.domain(&headers).auth_info1_create(&name).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn delete_authinfo1_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    fqdn_path("name", &name)?;
    Ok(Json(state.general.domain(&headers).auth_info1_delete(&name).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn create_authinfo2_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    fqdn_path("name", &name)?;
    Ok(Json(state.general.domain(&headers).auth_info2_create(&name).await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn renew_domain_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    info!("Renewing domain");
    fqdn_path("name", &name)?;
    Ok(Json(domains::renew_domain(&state.general, &headers, &name).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn restore_domain_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<DomainFields>,
) -> ApiResult<Json<Value>> {
    info!("Restoring domain");

    // 1. Input validation
    fqdn_path("name", &name)?;
    validate_patch(&body)?;

    // 2. Resolve contact and dispatch
    Ok(Json(domains::restore_domain(&state.general, &headers, &name, &body).await?))
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn restore_list_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<Json<Value>> {
    let query = domain::build_query(body);
    Ok(Json(state.general.domain(&headers).restore_list(&query).await?))
}
