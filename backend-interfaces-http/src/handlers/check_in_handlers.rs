use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use backend_application::commands::check_in_commands;
use backend_application::AppState;
use backend_domain::EntryClassification;

use crate::error::HttpError;
use crate::middleware::authorize_scanner;

#[derive(Deserialize)]
pub struct TicketScan {
    pub ticket_id: String,
}

#[derive(Serialize)]
pub struct CheckInResponse {
    pub status: &'static str,
    pub message: String,
    pub holder_name: String,
    pub classification: EntryClassification,
    pub scan_count: u32,
}

pub async fn check_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(scan): Json<TicketScan>,
) -> Result<Json<CheckInResponse>, HttpError> {
    if !authorize_scanner(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let result = check_in_commands::check_in(&state, &scan.ticket_id).await?;
    Ok(Json(CheckInResponse {
        status: "success",
        message: result.status_line(),
        holder_name: result.holder_name,
        classification: result.classification,
        scan_count: result.scan_count,
    }))
}
