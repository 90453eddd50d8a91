use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::Record;
use crate::store::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    /// Strokes per hole in hole order
    #[serde(default)]
    pub hole_scores: Vec<i32>,
    pub course_handicap: Option<i32>,
    pub submitted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scorecard {
    pub fn gross(&self) -> i32 {
        self.hole_scores.iter().sum()
    }
}

impl Record for Scorecard {
    const TABLE: Table = Table {
        name: "scorecards",
        columns: &[
            "id",
            "event_id",
            "user_id",
            "hole_scores",
            "course_handicap",
            "submitted",
            "created_at",
            "updated_at",
        ],
    };
    const REQUIRED: &'static [&'static str] = &["event_id", "user_id"];

    fn id(&self) -> Uuid {
        self.id
    }
}
