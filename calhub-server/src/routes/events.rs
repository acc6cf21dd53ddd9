//! Event endpoints
//!
//! Events are created with POST on the calendar path, removed with DELETE on
//! the event path, and edited by any other method on the event path (PATCH
//! in practice). Listing goes through `GET /calendar/{id}`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
};
use calhub_core::{CalHubError, CalHubResult, Calendar, Event, Identifier, UserIndex};
use chrono::NaiveDateTime;
use tracing::info;

use crate::routes::headers::{self, Credentials, END, START};
use crate::routes::{AppError, created, ok_text, route_not_found};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/event/{calendar_id}", any(dispatch_collection))
        .route("/event/{calendar_id}/{event_id}", any(dispatch_item))
}

async fn dispatch_collection(
    method: Method,
    uri: Uri,
    State(state): State<AppState>,
    Path(calendar_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if method != Method::POST {
        return Err(route_not_found(&method, &uri));
    }

    let calendar_id = headers::path_id(&calendar_id)?;
    let credentials = Credentials::from_headers(&headers)?;
    create_event(&state, &credentials, calendar_id, &headers).await
}

async fn dispatch_item(
    method: Method,
    uri: Uri,
    State(state): State<AppState>,
    Path((calendar_id, event_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if matches!(method, Method::GET | Method::HEAD | Method::POST) {
        return Err(route_not_found(&method, &uri));
    }

    let calendar_id = headers::path_id(&calendar_id)?;
    let event_id = headers::path_id(&event_id)?;
    let credentials = Credentials::from_headers(&headers)?;

    if method == Method::DELETE {
        delete_event(&state, &credentials, calendar_id, event_id).await
    } else {
        edit_event(&state, &credentials, calendar_id, event_id, &headers).await
    }
}

fn check_order(start: NaiveDateTime, end: NaiveDateTime) -> CalHubResult<()> {
    if start < end {
        Ok(())
    } else {
        Err(CalHubError::validation(format!(
            "Event start {start} must be before its end {end}"
        )))
    }
}

/// The authenticated user's calendar with the given id.
fn owned_calendar<'a>(
    index: &'a mut UserIndex,
    credentials: &Credentials,
    calendar_id: Identifier,
) -> CalHubResult<&'a mut Calendar> {
    let user_id = credentials.authenticate(index)?;
    index
        .user_for_mut(user_id)
        .and_then(|user| user.calendar_mut(calendar_id))
        .ok_or_else(|| CalHubError::not_found("Calendar", calendar_id))
}

/// POST /event/{calendar_id} - Create an event
async fn create_event(
    state: &AppState,
    credentials: &Credentials,
    calendar_id: Identifier,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let start = headers::required_timestamp(headers, START)?;
    let end = headers::required_timestamp(headers, END)?;
    check_order(start, end)?;
    let patch = headers::event_patch(headers)?;

    let mut index = state.write().await;
    let calendar = owned_calendar(&mut index, credentials, calendar_id)?;

    let event = Event::new(start, end).patched(&patch);
    let event_id = event.id();
    calendar.add_event(event);
    info!(username = %credentials.username, %calendar_id, %event_id, "Created event");

    Ok(created(event_id.to_string()))
}

/// DELETE /event/{calendar_id}/{event_id} - Remove an event
async fn delete_event(
    state: &AppState,
    credentials: &Credentials,
    calendar_id: Identifier,
    event_id: Identifier,
) -> Result<Response, AppError> {
    let mut index = state.write().await;
    let calendar = owned_calendar(&mut index, credentials, calendar_id)?;

    if calendar.remove_event(event_id).is_none() {
        return Err(CalHubError::not_found("Event", event_id).into());
    }
    info!(username = %credentials.username, %calendar_id, %event_id, "Deleted event");

    Ok(ok_text(format!("Event {event_id} deleted")))
}

/// PATCH /event/{calendar_id}/{event_id} - Replace an event's fields
///
/// Headers that are absent keep the event's current value.
async fn edit_event(
    state: &AppState,
    credentials: &Credentials,
    calendar_id: Identifier,
    event_id: Identifier,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let patch = headers::event_patch(headers)?;

    let mut index = state.write().await;
    let calendar = owned_calendar(&mut index, credentials, calendar_id)?;
    let current = calendar
        .event(event_id)
        .ok_or_else(|| CalHubError::not_found("Event", event_id))?;

    let edited = current.patched(&patch);
    check_order(edited.start(), edited.end())?;

    calendar.replace_event(edited.clone());
    info!(username = %credentials.username, %calendar_id, %event_id, "Edited event");

    Ok(Json(edited).into_response())
}
