use backend_domain::{EventId, StoreError, TicketDecodeError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("malformed ticket: {0}")]
    MalformedTicket(#[from] TicketDecodeError),
    #[error("no registration for event {event_id} and user {user_id}")]
    RegistrationNotFound { event_id: EventId, user_id: UserId },
    #[error("user {user_id} is already registered for event {event_id}")]
    DuplicateRegistration { event_id: EventId, user_id: UserId },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Maps a store failure for the given pair. `Duplicate` and `Missing`
    /// keep their meaning; everything else is operational.
    pub fn from_store(err: StoreError, event_id: EventId, user_id: UserId) -> Self {
        match err {
            StoreError::Duplicate => AppError::DuplicateRegistration { event_id, user_id },
            StoreError::Missing => AppError::RegistrationNotFound { event_id, user_id },
            StoreError::Unavailable(err) => AppError::Internal(err),
        }
    }
}
