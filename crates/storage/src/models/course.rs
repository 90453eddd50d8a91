use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::Record;
use crate::store::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub holes: i32,
    pub par: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Course {
    const TABLE: Table = Table {
        name: "courses",
        columns: &[
            "id",
            "name",
            "city",
            "region",
            "country",
            "holes",
            "par",
            "created_by",
            "created_at",
            "updated_at",
        ],
    };
    const REQUIRED: &'static [&'static str] = &["name", "holes", "par", "created_by"];

    fn id(&self) -> Uuid {
        self.id
    }
}
