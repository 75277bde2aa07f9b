//! Form schema handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Map, Value};

use noticeflow_entity::form::FormDefinition;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /forms/{step_key}
pub async fn get_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(step_key): Path<String>,
) -> Result<Json<ApiResponse<FormDefinition>>, ApiError> {
    let form = state.form_service.active_schema(&step_key).await?;
    Ok(Json(ApiResponse::ok("Form schema", form)))
}

/// POST /forms/{step_key}/validate
pub async fn validate_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(step_key): Path<String>,
    Json(submission): Json<Map<String, Value>>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .form_service
        .validate_submission(&step_key, &submission)
        .await?;
    Ok(Json(ApiResponse::message("Submission is valid")))
}
