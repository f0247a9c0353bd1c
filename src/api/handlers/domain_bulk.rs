use axum::{extract::State, Extension, Json};
use serde_json::Value;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::api::utils::is_fqdn;
use crate::api::validation::Validator;
use crate::domain::bulk;
use crate::models::domain::BulkDomainFields;
use crate::registry::PassthroughHeaders;

fn validate(body: &BulkDomainFields) -> ApiResult<()> {
    let mut validator = Validator::new();
    validator
        .non_empty_list("domains", &body.domains)
        .optional_numeric_id("ownerc_contact_id", &body.ownerc_contact_id);

    for (index, item) in body.domains.as_option().into_iter().flatten().enumerate() {
        if !item.name.as_option().map_or(false, |name| is_fqdn(name)) {
            validator.push(
                &format!("domains[{}].name", index),
                "name must be a fully qualified domain name",
            );
        }
        validator.optional_numeric_id(
            &format!("domains[{}].ownerc_contact_id", index),
            &item.ownerc_contact_id,
        );
    }

    validator.finish()
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn bulk_update_domains_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<BulkDomainFields>,
) -> ApiResult<Json<Value>> {
    info!("Processing bulk domain update");

    // 1. Input validation
    validate(&body)?;

    // 2. Fetch and patch every item, then one batch call
    Ok(Json(bulk::bulk_update_domains(&state.general, &headers, &body).await?))
}
