use tracing::{error, info};

use crate::{AppError, AppState};
use backend_domain::{
    EventId, NewRegistration, ParticipationDetails, ParticipationType, Registration,
    RegistrationRequest, UserId,
};

const MAX_TEXT_LEN: usize = 200;
const MAX_TEAM_MEMBERS_LEN: usize = 1000;
// Identifiers are persisted as signed 64-bit integers.
const MAX_STORED_ID: u64 = i64::MAX as u64;

pub async fn register_for_event(
    state: &AppState,
    event_id: EventId,
    payload: RegistrationRequest,
) -> Result<Registration, AppError> {
    let user_id = UserId(payload.user_id);
    check_id_range(event_id, user_id)?;
    let details = normalize_details(payload)?;

    let holder = state
        .holder_directory
        .find_holder(user_id)
        .await
        .map_err(|err| {
            state.metrics.record_store_error();
            error!("holder lookup failed for user {}: {}", user_id, err);
            AppError::Internal(err)
        })?;
    if holder.is_none() {
        return Err(AppError::BadRequest(format!("unknown user {}", user_id)));
    }

    let created = state
        .registration_repo
        .create(NewRegistration {
            event_id,
            user_id,
            details,
        })
        .await
        .map_err(|err| {
            let app_err = AppError::from_store(err, event_id, user_id);
            match &app_err {
                AppError::DuplicateRegistration { .. } => {
                    state.metrics.record_duplicate_registration();
                    info!("user {} already registered for event {}", user_id, event_id);
                }
                _ => {
                    state.metrics.record_store_error();
                    error!("failed to create registration: {}", app_err);
                }
            }
            app_err
        })?;

    state.metrics.record_registration();
    info!("user {} registered for event {}", user_id, event_id);
    Ok(created)
}

fn check_id_range(event_id: EventId, user_id: UserId) -> Result<(), AppError> {
    if event_id.0 > MAX_STORED_ID {
        return Err(AppError::BadRequest(format!(
            "event_id {} is out of range",
            event_id
        )));
    }
    if user_id.0 > MAX_STORED_ID {
        return Err(AppError::BadRequest(format!(
            "user_id {} is out of range",
            user_id
        )));
    }
    Ok(())
}

fn normalize_details(payload: RegistrationRequest) -> Result<ParticipationDetails, AppError> {
    let participation_type = ParticipationType::parse(&payload.participation_type).ok_or_else(|| {
        AppError::BadRequest(format!(
            "invalid participation_type '{}', expected Solo, Duo or Group",
            payload.participation_type.trim()
        ))
    })?;
    let participation_category =
        normalize_optional_text(Some(payload.participation_category)).ok_or_else(|| {
            AppError::BadRequest("participation_category must not be empty".to_string())
        })?;
    if participation_category.len() > MAX_TEXT_LEN {
        return Err(AppError::BadRequest(
            "participation_category is too long".to_string(),
        ));
    }
    let team_name = normalize_optional_text(payload.team_name);
    if team_name.as_ref().is_some_and(|name| name.len() > MAX_TEXT_LEN) {
        return Err(AppError::BadRequest("team_name is too long".to_string()));
    }
    let team_members = normalize_optional_text(payload.team_members);
    if team_members
        .as_ref()
        .is_some_and(|members| members.len() > MAX_TEAM_MEMBERS_LEN)
    {
        return Err(AppError::BadRequest("team_members is too long".to_string()));
    }

    Ok(ParticipationDetails {
        participation_type,
        participation_category,
        team_name,
        team_members,
    })
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
