use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::ScoringType;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Shared by tied complete cards; absent for incomplete cards
    pub position: Option<u32>,
    pub user_id: Uuid,
    pub gross: i32,
    pub net: Option<i32>,
    pub to_par: Option<i32>,
    pub holes_played: usize,
    pub submitted: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub event_id: Uuid,
    pub course_id: Uuid,
    pub scoring_type: ScoringType,
    pub holes: i32,
    pub par: i32,
    pub entries: Vec<LeaderboardEntry>,
}
