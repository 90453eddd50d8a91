use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::Record;
use crate::store::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeeSet {
    pub id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub course_rating: Decimal,
    pub slope_rating: i32,
    pub par: i32,
    pub yardage: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for TeeSet {
    const TABLE: Table = Table {
        name: "tee_sets",
        columns: &[
            "id",
            "course_id",
            "name",
            "color",
            "course_rating",
            "slope_rating",
            "par",
            "yardage",
            "created_at",
            "updated_at",
        ],
    };
    const REQUIRED: &'static [&'static str] =
        &["course_id", "name", "course_rating", "slope_rating", "par"];

    fn id(&self) -> Uuid {
        self.id
    }
}
