use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// Body sent for requests that match no route.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Ruta no encontrada";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("resource not found")]
    NotFound,
    #[error("route not found")]
    RouteNotFound,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ErrorBody {
    Code { code: &'static str },
    Message { message: &'static str },
}

impl ApiError {
    pub fn bad_request(detail: impl Display) -> Self {
        Self::BadRequest(detail.to_string())
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::NotFound | ApiError::RouteNotFound => "not_found",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::RouteNotFound => ErrorBody::Message {
                message: ROUTE_NOT_FOUND_MESSAGE,
            },
            _ => ErrorBody::Code { code: self.code() },
        }
    }
}

/// Detail stays in the logs; clients only see the error code.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(code = self.code(), error = %self, "request rejected");
        (self.status(), Json(self.body())).into_response()
    }
}
