use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use axum::Json;

use backend_application::queries::ticket_queries::{self, IssuedTicket};
use backend_application::AppState;
use backend_domain::{EventId, UserId};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((event_id, user_id)): Path<(u64, u64)>,
) -> Result<Json<IssuedTicket>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let issued = ticket_queries::issue_ticket(&state, EventId(event_id), UserId(user_id)).await?;
    Ok(Json(issued))
}

pub async fn get_ticket_qr(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(ticket_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let image = ticket_queries::render_ticket(&state, &ticket_id)?;
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(state.ticket_renderer.content_type()),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400, immutable"),
    );
    Ok((headers, image))
}
