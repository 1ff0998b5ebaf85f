use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::config::AppState;
use crate::server::response::{ErrorBody, ResponseError, ResponseResult};
use crate::store::Record;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_handler,
        list_nurses_handler,
        find_by_name_handler,
        find_by_user_handler,
        login_handler
    ),
    components(schemas(Record, LoginBody, LoginResponse, ErrorBody)),
    tags(
        (name = "nurses", description = "Nurse directory API")
    )
)]
pub struct NurseApi;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginBody {
    pub user: Option<String>,
    pub pw: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/v1/api",
    responses(
        (status = 200, description = "Service is up"),
    )
)]
pub async fn health_check_handler() -> ResponseResult {
    ResponseResult::Health
}

/// List every nurse in the directory.
#[utoipa::path(
    get,
    path = "/nurse",
    responses(
        (status = 200, description = "All nurses in source order", body = [Record]),
        (status = 404, description = "The directory is empty or unavailable", body = ErrorBody),
    )
)]
#[debug_handler]
pub async fn list_nurses_handler(
    State(state): State<Arc<AppState>>,
) -> Result<ResponseResult, ResponseError> {
    let records = state.service.list_all().await;
    if records.is_empty() {
        return Err(ResponseError::NotFound("No nurses found".to_string()));
    }

    Ok(ResponseResult::Nurses(records))
}

/// Find a nurse by display name.
#[utoipa::path(
    get,
    path = "/nurse/name/{name}",
    params(
        ("name" = String, Path, description = "Display name, matched ignoring case")
    ),
    responses(
        (status = 200, description = "First nurse with that name", body = Record),
        (status = 404, description = "No nurse has that name", body = ErrorBody),
    )
)]
#[debug_handler]
pub async fn find_by_name_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<ResponseResult, ResponseError> {
    let record = state.service.find_by_name(&name).await?;

    Ok(ResponseResult::Nurse(record))
}

/// Find a nurse by login identifier.
#[utoipa::path(
    get,
    path = "/nurse/user/{user}",
    params(
        ("user" = String, Path, description = "Login identifier, matched ignoring case")
    ),
    responses(
        (status = 200, description = "First nurse with that user", body = Record),
        (status = 404, description = "No nurse has that user", body = ErrorBody),
    )
)]
#[debug_handler]
pub async fn find_by_user_handler(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Result<ResponseResult, ResponseError> {
    let record = state.service.find_by_user(&user).await?;

    Ok(ResponseResult::Nurse(record))
}

/// Check a user and password against the directory.
#[utoipa::path(
    post,
    path = "/nurse/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Credentials are valid", body = LoginResponse),
        (status = 400, description = "User or password missing", body = ErrorBody),
        (status = 401, description = "Wrong user or password", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    )
)]
#[debug_handler]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<ResponseResult, ResponseError> {
    let Json(body) = body.map_err(|err| {
        log::debug!("rejected login body: {}", err);
        ResponseError::BadRequest("User and password are required".to_string())
    })?;

    let user = body.user.unwrap_or_default();
    let pw = body.pw.unwrap_or_default();
    state.service.authenticate(&user, &pw).await?;

    Ok(ResponseResult::SignedIn(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
    }))
}
