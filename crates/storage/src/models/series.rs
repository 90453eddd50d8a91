use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::Record;
use crate::store::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl SeriesStatus {
    /// `upcoming → active → completed`, and cancellation from either open
    /// state. Terminal states accept nothing but themselves.
    pub fn can_transition_to(self, next: SeriesStatus) -> bool {
        use SeriesStatus::*;
        self == next
            || matches!(
                (self, next),
                (Upcoming, Active) | (Active, Completed) | (Upcoming | Active, Cancelled)
            )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoringType {
    Gross,
    Net,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: SeriesStatus,
    pub scoring_type: ScoringType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Series {
    const TABLE: Table = Table {
        name: "series",
        columns: &[
            "id",
            "name",
            "description",
            "status",
            "scoring_type",
            "start_date",
            "end_date",
            "created_by",
            "created_at",
            "updated_at",
        ],
    };
    const REQUIRED: &'static [&'static str] = &["name", "status", "scoring_type", "created_by"];

    fn id(&self) -> Uuid {
        self.id
    }
}
