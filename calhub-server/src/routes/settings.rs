//! Per-user display settings

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
};
use calhub_core::{CalHubError, UserSettings};
use tracing::info;

use crate::routes::headers::{self, Credentials, SHOW_WEEK_NUMBER, TIMEZONE, TWENTY_FOUR_HOUR};
use crate::routes::{AppError, route_not_found};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/settings", any(dispatch))
}

async fn dispatch(
    method: Method,
    uri: Uri,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if method != Method::GET && method != Method::PATCH {
        return Err(route_not_found(&method, &uri));
    }

    let credentials = Credentials::from_headers(&headers)?;

    if method == Method::GET {
        let index = state.read().await;
        let user_id = credentials.authenticate(&index)?;
        let user = index
            .user_for(user_id)
            .ok_or_else(|| CalHubError::not_found("User", user_id))?;
        return Ok(Json(user.settings().clone()).into_response());
    }

    let timezone = headers::optional(&headers, TIMEZONE)?;
    let twenty_four_hour = headers::optional(&headers, TWENTY_FOUR_HOUR)?
        .map(|v| headers::parse_bool(TWENTY_FOUR_HOUR, v))
        .transpose()?;
    let show_week_number = headers::optional(&headers, SHOW_WEEK_NUMBER)?
        .map(|v| headers::parse_bool(SHOW_WEEK_NUMBER, v))
        .transpose()?;

    let mut index = state.write().await;
    let user_id = credentials.authenticate(&index)?;
    let user = index
        .user_for_mut(user_id)
        .ok_or_else(|| CalHubError::not_found("User", user_id))?;

    // Apply to a copy so a bad timezone leaves the stored settings alone
    let mut settings: UserSettings = user.settings().clone();
    if let Some(timezone) = timezone {
        settings.set_timezone(timezone)?;
    }
    if let Some(value) = twenty_four_hour {
        settings.twenty_four_hour = value;
    }
    if let Some(value) = show_week_number {
        settings.show_week_number = value;
    }
    *user.settings_mut() = settings.clone();
    info!(username = %credentials.username, "Updated settings");

    Ok(Json(settings).into_response())
}
