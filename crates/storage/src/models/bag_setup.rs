use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::Record;
use crate::store::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BagSetup {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub clubs: Vec<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for BagSetup {
    const TABLE: Table = Table {
        name: "bag_setups",
        columns: &[
            "id",
            "user_id",
            "name",
            "description",
            "clubs",
            "is_default",
            "created_at",
            "updated_at",
        ],
    };
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");
    const REQUIRED: &'static [&'static str] = &["user_id", "name"];

    fn id(&self) -> Uuid {
        self.id
    }
}
