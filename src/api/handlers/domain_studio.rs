use axum::{extract::State, Extension, Json};
use serde_json::Value;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::api::validation::Validator;
use crate::domain::research;
use crate::models::research::DomainStudioFields;
use crate::registry::PassthroughHeaders;

#[tracing::instrument(skip(state, headers, body))]
pub async fn domain_studio_search_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
    Json(body): Json<DomainStudioFields>,
) -> ApiResult<Json<Value>> {
    info!("Domain studio search");

    Validator::new()
        .non_empty("searchToken", &body.search_token)
        .finish()?;

    Ok(Json(research::domain_studio_search(&state.general, &headers, &body).await?))
}
