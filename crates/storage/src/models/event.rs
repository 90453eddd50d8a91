use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::Record;
use crate::store::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    StrokePlay,
    Stableford,
    MatchPlay,
    Scramble,
    BestBall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    /// Absent for standalone events
    pub series_id: Option<Uuid>,
    pub course_id: Uuid,
    pub tee_set_id: Option<Uuid>,
    pub name: String,
    pub event_date: NaiveDate,
    pub format: EventFormat,
    pub status: EventStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Event {
    const TABLE: Table = Table {
        name: "events",
        columns: &[
            "id",
            "series_id",
            "course_id",
            "tee_set_id",
            "name",
            "event_date",
            "format",
            "status",
            "created_by",
            "created_at",
            "updated_at",
        ],
    };
    const REQUIRED: &'static [&'static str] =
        &["course_id", "name", "event_date", "format", "created_by"];

    fn id(&self) -> Uuid {
        self.id
    }
}
