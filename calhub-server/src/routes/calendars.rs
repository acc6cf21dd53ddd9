//! Calendar endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
};
use calhub_core::{CalHubError, Calendar, EventFilter, Identifier};
use tracing::info;

use crate::routes::headers::{self, AFTER, BEFORE, Credentials, NAME};
use crate::routes::{AppError, created, ok_text, route_not_found};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar", any(dispatch_collection))
        .route("/calendar/{id}", any(dispatch_item))
}

async fn dispatch_collection(
    method: Method,
    uri: Uri,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    match method {
        Method::POST => create_calendar(&state, &headers).await,
        _ => Err(route_not_found(&method, &uri)),
    }
}

async fn dispatch_item(
    method: Method,
    uri: Uri,
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if method != Method::GET && method != Method::DELETE {
        return Err(route_not_found(&method, &uri));
    }

    let calendar_id = headers::path_id(&id)?;
    let credentials = Credentials::from_headers(&headers)?;

    if method == Method::GET {
        let filter = EventFilter::from_args(
            headers::optional(&headers, BEFORE)?,
            headers::optional(&headers, AFTER)?,
        )?;
        list_events(&state, &credentials, calendar_id, &filter).await
    } else {
        delete_calendar(&state, &credentials, calendar_id).await
    }
}

/// POST /calendar - Create a calendar for the authenticated user
async fn create_calendar(state: &AppState, headers: &HeaderMap) -> Result<Response, AppError> {
    let credentials = Credentials::from_headers(headers)?;
    let name = headers::optional(headers, NAME)?;

    let mut index = state.write().await;
    let user_id = credentials.authenticate(&index)?;
    let user = index
        .user_for_mut(user_id)
        .ok_or_else(|| CalHubError::not_found("User", user_id))?;

    let calendar = Calendar::new(name);
    let calendar_id = calendar.id();
    user.add_calendar(calendar);
    info!(username = %credentials.username, %calendar_id, "Created calendar");

    Ok(created(calendar_id.to_string()))
}

/// DELETE /calendar/{id} - Remove one of the user's calendars
async fn delete_calendar(
    state: &AppState,
    credentials: &Credentials,
    calendar_id: Identifier,
) -> Result<Response, AppError> {
    let mut index = state.write().await;
    let user_id = credentials.authenticate(&index)?;
    let user = index
        .user_for_mut(user_id)
        .ok_or_else(|| CalHubError::not_found("User", user_id))?;

    if !user.remove_calendar(calendar_id) {
        return Err(CalHubError::not_found("Calendar", calendar_id).into());
    }
    info!(username = %credentials.username, %calendar_id, "Deleted calendar");

    Ok(ok_text(format!("Calendar {calendar_id} deleted")))
}

/// GET /calendar/{id} - List a calendar's events, optionally filtered
async fn list_events(
    state: &AppState,
    credentials: &Credentials,
    calendar_id: Identifier,
    filter: &EventFilter,
) -> Result<Response, AppError> {
    let index = state.read().await;
    let user_id = credentials.authenticate(&index)?;
    let calendar = index
        .user_for(user_id)
        .and_then(|user| user.calendar(calendar_id))
        .ok_or_else(|| CalHubError::not_found("Calendar", calendar_id))?;

    Ok(Json(calendar.events_matching(filter)).into_response())
}
