// Participation type value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipationType {
    Solo,
    Duo,
    Group,
}

impl ParticipationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationType::Solo => "Solo",
            ParticipationType::Duo => "Duo",
            ParticipationType::Group => "Group",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "solo" => Some(ParticipationType::Solo),
            "duo" => Some(ParticipationType::Duo),
            "group" => Some(ParticipationType::Group),
            _ => None,
        }
    }

    pub fn is_team(&self) -> bool {
        !matches!(self, ParticipationType::Solo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_trimmed() {
        assert_eq!(ParticipationType::parse(" GROUP "), Some(ParticipationType::Group));
        assert_eq!(ParticipationType::parse("duo"), Some(ParticipationType::Duo));
        assert_eq!(ParticipationType::parse("Solo"), Some(ParticipationType::Solo));
        assert_eq!(ParticipationType::parse("trio"), None);
    }

    #[test]
    fn parse_accepts_own_labels() {
        for kind in [ParticipationType::Solo, ParticipationType::Duo, ParticipationType::Group] {
            assert_eq!(ParticipationType::parse(kind.as_str()), Some(kind));
        }
    }
}
