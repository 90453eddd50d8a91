use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::Record;
use crate::store::Table;

/// Keyed by the auth provider's user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub display_name: String,
    pub handicap_index: Option<Decimal>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Profile {
    const TABLE: Table = Table {
        name: "profiles",
        columns: &[
            "id",
            "display_name",
            "handicap_index",
            "is_admin",
            "created_at",
            "updated_at",
        ],
    };
    const OWNER_COLUMN: Option<&'static str> = Some("id");
    const REQUIRED: &'static [&'static str] = &["id", "display_name"];

    fn id(&self) -> Uuid {
        self.id
    }
}
