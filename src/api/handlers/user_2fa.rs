use axum::{extract::State, Extension, Json};
use serde_json::Value;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::api::utils::is_six_digit_token;
use crate::api::validation::FieldError;
use crate::registry::headers::HEADER_2FA_TOKEN;
use crate::registry::PassthroughHeaders;

#[tracing::instrument(skip(state, headers))]
pub async fn token_config_info_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    Ok(Json(state.general.user_2fa(&headers).token_config_info().await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn token_config_create_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    info!("Creating 2FA token configuration");
    Ok(Json(state.general.user_2fa(&headers).token_config_create().await?))
}

/// The one-time password travels to the registry in its passthrough header
#[tracing::instrument(skip(state, headers))]
pub async fn activate_2fa_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    info!("Activating 2FA");

    // 1. Input validation
    if !headers.get(HEADER_2FA_TOKEN).map_or(false, is_six_digit_token) {
        return Err(ApiError::from(FieldError::new(
            HEADER_2FA_TOKEN,
            format!("{} must be a six digit token", HEADER_2FA_TOKEN),
        )));
    }

    // 2. Dispatch
    Ok(Json(state.general.user_2fa(&headers).token_config_activate().await?))
}

#[tracing::instrument(skip(state, headers))]
pub async fn deactivate_2fa_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<PassthroughHeaders>,
) -> ApiResult<Json<Value>> {
    info!("Deactivating 2FA");
    Ok(Json(state.general.user_2fa(&headers).token_config_delete().await?))
}
