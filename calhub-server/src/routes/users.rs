//! User registration and lookup

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
};
use calhub_core::{CalHubError, User};
use tracing::info;

use crate::routes::headers::{self, PASSWORD};
use crate::routes::{AppError, created, route_not_found};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/users/{username}", any(dispatch))
}

async fn dispatch(
    method: Method,
    uri: Uri,
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    match method {
        Method::POST => create_user(&state, &username, &headers).await,
        Method::GET => get_user(&state, &username, &headers).await,
        _ => Err(route_not_found(&method, &uri)),
    }
}

/// POST /users/{username} - Register a new user
async fn create_user(
    state: &AppState,
    username: &str,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let password = headers::optional(headers, PASSWORD)?;

    let mut index = state.write().await;
    let Some(password) = password else {
        // a taken name still reports the conflict
        if index.has_username(username) {
            return Err(CalHubError::conflict("User", username).into());
        }
        return Err(CalHubError::MissingField(PASSWORD).into());
    };

    index.add_user(User::new(username, password))?;
    info!(username, "Created user");

    Ok(created(format!("User {username} created")))
}

/// GET /users/{username} - Fetch a user's calendars and settings
async fn get_user(
    state: &AppState,
    username: &str,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let password = headers::optional(headers, PASSWORD)?;

    let index = state.read().await;
    let user = index
        .user_by_name(username)
        .ok_or_else(|| CalHubError::not_found("User", username))?;

    match password {
        Some(password) if user.password_matches(password) => Ok(Json(user.view()).into_response()),
        Some(_) => Err(CalHubError::auth("wrong password").into()),
        None => Err(CalHubError::auth("missing password").into()),
    }
}
