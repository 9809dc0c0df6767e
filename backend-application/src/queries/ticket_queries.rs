use tracing::error;

use crate::{AppError, AppState};
use backend_domain::{EventId, TicketId, UserId};

#[derive(Debug, Clone, serde::Serialize)]
pub struct IssuedTicket {
    pub ticket_id: String,
    pub qr_url: String,
}

/// Issues the ticket of an existing registration. Tickets are derived, so
/// issuing twice yields the same identifier.
pub async fn issue_ticket(
    state: &AppState,
    event_id: EventId,
    user_id: UserId,
) -> Result<IssuedTicket, AppError> {
    let registration = state
        .registration_repo
        .find_by_pair(event_id, user_id)
        .await
        .map_err(|err| {
            state.metrics.record_store_error();
            error!("failed to look up registration for ticket: {}", err);
            AppError::from_store(err, event_id, user_id)
        })?
        .ok_or(AppError::RegistrationNotFound { event_id, user_id })?;

    let ticket_id = registration.ticket_id().encode();
    let qr_url = format!(
        "{}/v1/tickets/{}/qr",
        state.config.public_base_url.trim_end_matches('/'),
        ticket_id
    );
    Ok(IssuedTicket { ticket_id, qr_url })
}

/// Renders a well-formed ticket string as an image.
pub fn render_ticket(state: &AppState, raw_ticket: &str) -> Result<Vec<u8>, AppError> {
    let ticket = TicketId::decode(raw_ticket)?;
    state
        .ticket_renderer
        .render(&ticket.encode())
        .map_err(|err| {
            error!("failed to render ticket {}: {}", ticket, err);
            AppError::Internal(err)
        })
}
