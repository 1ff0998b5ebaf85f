use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::query;
use crate::server::handlers::LoginResponse;
use crate::store::{self, Record, RecordCollection};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ResponseError {
    InternalServerError,
    NotFound(String),
    Unauthorized(String),
    BadRequest(String),
}

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response<Body> {
        let (status, error) = match self {
            ResponseError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ResponseError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ResponseError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ResponseError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<query::Error> for ResponseError {
    fn from(err: query::Error) -> Self {
        match err {
            query::Error::NotFound => ResponseError::NotFound("Nurse not found".to_string()),
            query::Error::InvalidInput => {
                ResponseError::BadRequest("User and password are required".to_string())
            }
            query::Error::InvalidCredentials => {
                ResponseError::Unauthorized("Invalid username or password".to_string())
            }
            query::Error::StoreUnavailable(err) => {
                log::log!(
                    unavailable_level(&err),
                    "login failed, record store is unavailable: {}",
                    err
                );
                ResponseError::InternalServerError
            }
        }
    }
}

/// Read and decode failures are already logged at error level by the
/// diagnostics sink, a missing source only at debug.
fn unavailable_level(err: &store::Error) -> log::Level {
    match err {
        store::Error::MissingSource(_) => log::Level::Error,
        _ => log::Level::Debug,
    }
}

pub enum ResponseResult {
    Health,
    Nurse(Record),
    Nurses(RecordCollection),
    SignedIn(LoginResponse),
}

impl IntoResponse for ResponseResult {
    fn into_response(self) -> Response<Body> {
        match self {
            ResponseResult::Health => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "status": "success",
                    "message": "nurse directory is working"
                })),
            )
                .into_response(),
            ResponseResult::Nurse(record) => (StatusCode::OK, Json(record)).into_response(),
            ResponseResult::Nurses(records) => (StatusCode::OK, Json(records)).into_response(),
            ResponseResult::SignedIn(body) => (StatusCode::OK, Json(body)).into_response(),
        }
    }
}
