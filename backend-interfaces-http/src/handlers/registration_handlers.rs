use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::registration_commands;
use backend_application::queries::registration_queries;
use backend_application::AppState;
use backend_domain::{EventId, Registration, RegistrationRequest, RosterEntry};

use crate::error::HttpError;
use crate::middleware::{authorize, authorize_scanner};

pub async fn create_registration(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<u64>,
    Json(payload): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<Registration>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let created =
        registration_commands::register_for_event(&state, EventId(event_id), payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_registrations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<u64>,
) -> Result<Json<Vec<RosterEntry>>, HttpError> {
    if !authorize_scanner(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let roster = registration_queries::list_event_roster(&state, EventId(event_id)).await?;
    Ok(Json(roster))
}
