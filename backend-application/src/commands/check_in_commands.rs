use anyhow::anyhow;
use tracing::{error, info, warn};

use backend_domain::{CheckInResult, EntryClassification, TicketId};

use crate::{AppError, AppState};

/// Validates a scanned ticket and records one entry.
///
/// The registration and its holder are both resolved before anything is
/// mutated, so a scan that fails never touches a counter. Every later scan of
/// a valid ticket succeeds as a re-entry.
pub async fn check_in(state: &AppState, raw_ticket: &str) -> Result<CheckInResult, AppError> {
    let ticket = TicketId::decode(raw_ticket).map_err(|err| {
        state.metrics.record_malformed_ticket();
        warn!("rejected malformed ticket '{}': {}", raw_ticket, err);
        AppError::MalformedTicket(err)
    })?;
    let TicketId { event_id, user_id } = ticket;

    let registration = state
        .registration_repo
        .find_by_pair(event_id, user_id)
        .await
        .map_err(|err| store_failure(state, err, ticket))?;
    let Some(registration) = registration else {
        state.metrics.record_unknown_ticket();
        warn!("no registration for ticket {}", ticket);
        return Err(AppError::RegistrationNotFound { event_id, user_id });
    };

    let holder = state
        .holder_directory
        .find_holder(user_id)
        .await
        .map_err(|err| {
            state.metrics.record_store_error();
            error!("holder lookup failed for user {}: {}", user_id, err);
            AppError::Internal(err)
        })?
        .ok_or_else(|| {
            error!("registration {} references unknown holder", ticket);
            AppError::Internal(anyhow!("no holder record for user {}", user_id))
        })?;

    let updated = state
        .registration_repo
        .increment_scan_count(&registration)
        .await
        .map_err(|err| store_failure(state, err, ticket))?;

    let classification = EntryClassification::from_scan_count(updated.scan_count);
    state.metrics.record_check_in(classification);

    let result = CheckInResult {
        holder_name: holder.full_name,
        classification,
        scan_count: updated.scan_count,
    };
    info!("ticket {} checked in: {}", ticket, result.status_line());
    Ok(result)
}

fn store_failure(state: &AppState, err: backend_domain::StoreError, ticket: TicketId) -> AppError {
    let app_err = AppError::from_store(err, ticket.event_id, ticket.user_id);
    match &app_err {
        AppError::RegistrationNotFound { .. } => {
            state.metrics.record_unknown_ticket();
            warn!("registration for ticket {} vanished during check-in", ticket);
        }
        _ => {
            state.metrics.record_store_error();
            error!("store failure during check-in of {}: {}", ticket, app_err);
        }
    }
    app_err
}
