// Ticket identifier value object
// Wire form: TAG-<event_id>-<user_id>, e.g. "CP-12-7"

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TicketDecodeError;
use crate::value_objects::{EventId, UserId};

pub const TICKET_TAG: &str = "CP";
pub const TICKET_DELIMITER: char = '-';

/// Identifies one registration by its (event, user) pair.
///
/// Never stored: it is recomputed from the registration whenever a ticket is
/// issued, and parsed back with [`TicketId::decode`] at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId {
    pub event_id: EventId,
    pub user_id: UserId,
}

impl TicketId {
    pub fn new(event_id: EventId, user_id: UserId) -> Self {
        Self { event_id, user_id }
    }

    pub fn encode(&self) -> String {
        format!(
            "{}{}{}{}{}",
            TICKET_TAG, TICKET_DELIMITER, self.event_id.0, TICKET_DELIMITER, self.user_id.0
        )
    }

    /// Strict inverse of [`TicketId::encode`]. Any input that `encode` could
    /// not have produced is rejected as a whole.
    pub fn decode(raw: &str) -> Result<Self, TicketDecodeError> {
        let segments = raw.split(TICKET_DELIMITER).collect::<Vec<_>>();
        let [tag, event, user] = segments.as_slice() else {
            return Err(TicketDecodeError::SegmentCount(segments.len()));
        };
        if *tag != TICKET_TAG {
            return Err(TicketDecodeError::Tag((*tag).to_string()));
        }
        let event_id = parse_segment(event)?;
        let user_id = parse_segment(user)?;
        Ok(Self::new(EventId(event_id), UserId(user_id)))
    }
}

// u64::from_str accepts a leading '+', which encode never emits.
fn parse_segment(segment: &str) -> Result<u64, TicketDecodeError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TicketDecodeError::Segment(segment.to_string()));
    }
    segment
        .parse::<u64>()
        .map_err(|_| TicketDecodeError::Segment(segment.to_string()))
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for TicketId {
    type Err = TicketDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
