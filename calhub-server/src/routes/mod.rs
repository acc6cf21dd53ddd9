pub mod calendars;
pub mod events;
pub mod headers;
pub mod settings;
pub mod users;

use axum::{
    Json,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use calhub_core::CalHubError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Converts errors to HTTP responses.
///
/// `CalHubError`s map onto their status codes; anything else is a 500.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<CalHubError>() {
            Some(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            Some(CalHubError::Auth(_)) => StatusCode::UNAUTHORIZED,
            Some(CalHubError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Some(CalHubError::Conflict { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// 404 for a path or method the protocol doesn't serve.
pub fn route_not_found(method: &Method, uri: &Uri) -> AppError {
    CalHubError::not_found("Route", format!("{} {}", method, uri.path())).into()
}

/// Router fallback for unknown paths.
pub async fn fallback(method: Method, uri: Uri) -> AppError {
    route_not_found(&method, &uri)
}

/// 201 with a plain-text body.
pub fn created(body: impl Into<String>) -> Response {
    (StatusCode::CREATED, body.into()).into_response()
}

/// 200 with a plain-text body.
pub fn ok_text(body: impl Into<String>) -> Response {
    (StatusCode::OK, body.into()).into_response()
}
