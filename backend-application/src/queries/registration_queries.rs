use tracing::error;

use crate::{AppError, AppState};
use backend_domain::{EventId, RosterEntry};

pub async fn list_event_roster(
    state: &AppState,
    event_id: EventId,
) -> Result<Vec<RosterEntry>, AppError> {
    let registrations = state
        .registration_repo
        .list_by_event(event_id)
        .await
        .map_err(|err| {
            state.metrics.record_store_error();
            error!("failed to list registrations for event {}: {}", event_id, err);
            AppError::Internal(anyhow::anyhow!("registration store unavailable: {}", err))
        })?;

    let mut roster = Vec::with_capacity(registrations.len());
    for registration in registrations {
        let holder_name = state
            .holder_directory
            .find_holder(registration.user_id)
            .await
            .map_err(|err| {
                state.metrics.record_store_error();
                error!("holder lookup failed for user {}: {}", registration.user_id, err);
                AppError::Internal(err)
            })?
            .map(|holder| holder.full_name);
        roster.push(RosterEntry {
            ticket_id: registration.ticket_id().encode(),
            holder_name,
            registration,
        });
    }
    Ok(roster)
}
