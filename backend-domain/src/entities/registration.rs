// Registration entity
// Binds one user to one event and tracks entry scans

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EventId, ParticipationType, TicketId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationDetails {
    pub participation_type: ParticipationType,
    pub participation_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub event_id: EventId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub details: ParticipationDetails,
    pub scan_count: u32,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn ticket_id(&self) -> TicketId {
        TicketId::new(self.event_id, self.user_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
    pub details: ParticipationDetails,
}

impl NewRegistration {
    pub fn into_registration(self, registered_at: DateTime<Utc>) -> Registration {
        Registration {
            event_id: self.event_id,
            user_id: self.user_id,
            details: self.details,
            scan_count: 0,
            registered_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegistrationRequest {
    pub user_id: u64,
    pub participation_type: String,
    pub participation_category: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_members: Option<String>,
}

/// Roster line shown to administrators for one event.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub ticket_id: String,
    pub holder_name: Option<String>,
    #[serde(flatten)]
    pub registration: Registration,
}
