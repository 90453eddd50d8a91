use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::Record;
use crate::store::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Admin,
    Organizer,
    Player,
}

impl ParticipantRole {
    pub fn can_manage(self) -> bool {
        matches!(self, Self::Admin | Self::Organizer)
    }
}

/// Participation state, independent of the invitation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesParticipant {
    pub id: Uuid,
    pub series_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRole,
    pub status: ParticipantStatus,
    pub invitation_status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeriesParticipant {
    /// Accepted admins and organizers may manage the series. Being inactive
    /// does not revoke that.
    pub fn is_manager(&self) -> bool {
        self.role.can_manage() && self.invitation_status == InvitationStatus::Accepted
    }
}

impl Record for SeriesParticipant {
    const TABLE: Table = Table {
        name: "series_participants",
        columns: &[
            "id",
            "series_id",
            "user_id",
            "role",
            "status",
            "invitation_status",
            "created_at",
            "updated_at",
        ],
    };
    const REQUIRED: &'static [&'static str] = &["series_id", "user_id", "role"];

    fn id(&self) -> Uuid {
        self.id
    }
}
