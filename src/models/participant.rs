//! Participation models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::user::PublicUserProfile;

/// Participation kind enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationKind {
    Joined,
    Interested,
}

impl ParticipationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joined => "joined",
            Self::Interested => "interested",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "joined" => Some(Self::Joined),
            "interested" => Some(Self::Interested),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParticipationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for POST /api/events/{id}/participate.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ParticipateRequest {
    /// "joined" or "interested".
    #[serde(rename = "type")]
    pub kind: ParticipationKind,
}

/// A participation record, optionally joined with the user's profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantInfo {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub participation_type: ParticipationKind,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(ParticipationKind::parse("joined"), Some(ParticipationKind::Joined));
        assert_eq!(
            ParticipationKind::parse("interested"),
            Some(ParticipationKind::Interested)
        );
        assert_eq!(ParticipationKind::parse("maybe"), None);
    }

    #[test]
    fn test_participate_request_uses_type_field() {
        let req: ParticipateRequest = serde_json::from_str(r#"{"type":"interested"}"#).unwrap();
        assert_eq!(req.kind, ParticipationKind::Interested);

        assert!(serde_json::from_str::<ParticipateRequest>(r#"{"type":"maybe"}"#).is_err());
    }
}
