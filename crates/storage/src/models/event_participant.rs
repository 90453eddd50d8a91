use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::InvitationStatus;
use crate::repository::Record;
use crate::store::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Waitlisted,
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventParticipant {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub invitation_status: InvitationStatus,
    pub registration_status: RegistrationStatus,
    pub handicap_index: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventParticipant {
    /// Counts towards the field: accepted and not withdrawn.
    pub fn is_playing(&self) -> bool {
        self.invitation_status == InvitationStatus::Accepted
            && self.registration_status != RegistrationStatus::Withdrawn
    }
}

impl Record for EventParticipant {
    const TABLE: Table = Table {
        name: "event_participants",
        columns: &[
            "id",
            "event_id",
            "user_id",
            "invitation_status",
            "registration_status",
            "handicap_index",
            "created_at",
            "updated_at",
        ],
    };
    const REQUIRED: &'static [&'static str] = &["event_id", "user_id"];

    fn id(&self) -> Uuid {
        self.id
    }
}
