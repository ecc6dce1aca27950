//! Destination (event) domain models and DTOs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::participant::{ParticipantInfo, ParticipationKind};
use crate::models::user::PublicUserProfile;

/// Event status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Past,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Past => "past",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "past" => Some(Self::Past),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All-day events count as running until the end of their scheduled date.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time")
}

/// The moment an event is scheduled for, with the all-day rule applied.
pub fn scheduled_moment(date: NaiveDate, time: Option<NaiveTime>) -> NaiveDateTime {
    date.and_time(time.unwrap_or_else(end_of_day))
}

/// Whether an event's scheduled moment is strictly before `now`.
///
/// The same rule the sweep's bulk UPDATE applies in SQL; used on the cancel
/// path to reject cancelling events that have already elapsed.
pub fn has_elapsed(date: NaiveDate, time: Option<NaiveTime>, now: NaiveDateTime) -> bool {
    scheduled_moment(date, time) < now
}

/// Request to create a destination event.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDestinationRequest {
    pub place_name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub google_place_id: Option<String>,
    pub place_type: Option<String>,
    pub rating: Option<f64>,
    pub scheduled_date: NaiveDate,
    /// Absent means an all-day event.
    pub scheduled_time: Option<NaiveTime>,
}

/// A destination event as returned by list/detail endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DestinationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub place_name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub google_place_id: Option<String>,
    pub place_type: Option<String>,
    pub rating: Option<f64>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: Option<NaiveTime>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::destination::Model> for DestinationResponse {
    fn from(m: crate::entity::destination::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            place_name: m.place_name,
            address: m.address,
            latitude: m.latitude,
            longitude: m.longitude,
            google_place_id: m.google_place_id,
            place_type: m.place_type,
            rating: m.rating,
            scheduled_date: m.scheduled_date,
            scheduled_time: m.scheduled_time,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

/// List entry for /api/destinations: the event plus the caller's relationship
/// to it and the organizer's display name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DestinationSummary {
    #[serde(flatten)]
    pub destination: DestinationResponse,
    pub is_organizer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participation_type: Option<ParticipationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
}

/// Detail response for a single destination with organizer and participants.
#[derive(Debug, Serialize, ToSchema)]
pub struct DestinationDetail {
    #[serde(flatten)]
    pub destination: DestinationResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<PublicUserProfile>,
    pub participants: Vec<ParticipantInfo>,
    pub joined: Vec<ParticipantInfo>,
    pub interested: Vec<ParticipantInfo>,
    pub joined_count: usize,
    pub interested_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_status_round_trip() {
        for status in [EventStatus::Active, EventStatus::Past, EventStatus::Cancelled] {
            assert_eq!(EventStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EventStatus::parse("done"), None);
    }

    #[test]
    fn test_all_day_event_runs_until_end_of_day() {
        let moment = scheduled_moment(date(2026, 3, 10), None);
        assert_eq!(moment, date(2026, 3, 10).and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_yesterday_all_day_has_elapsed() {
        let now = date(2026, 3, 11).and_hms_opt(9, 0, 0).unwrap();
        assert!(has_elapsed(date(2026, 3, 10), None, now));
    }

    #[test]
    fn test_today_all_day_has_not_elapsed() {
        let now = date(2026, 3, 10).and_hms_opt(18, 0, 0).unwrap();
        assert!(!has_elapsed(date(2026, 3, 10), None, now));
    }

    #[test]
    fn test_tomorrow_afternoon_has_not_elapsed() {
        let now = date(2026, 3, 10).and_hms_opt(9, 0, 0).unwrap();
        assert!(!has_elapsed(date(2026, 3, 11), Some(time(14, 0)), now));
    }

    #[test]
    fn test_earlier_today_has_elapsed() {
        let now = date(2026, 3, 10).and_hms_opt(15, 30, 0).unwrap();
        assert!(has_elapsed(date(2026, 3, 10), Some(time(14, 0)), now));
    }

    #[test]
    fn test_exact_moment_has_not_elapsed() {
        // Strictly-before comparison: the scheduled second itself is not past.
        let now = date(2026, 3, 10).and_hms_opt(14, 0, 0).unwrap();
        assert!(!has_elapsed(date(2026, 3, 10), Some(time(14, 0)), now));
    }
}
