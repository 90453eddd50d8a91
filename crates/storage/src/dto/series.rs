use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::ListFilter;
use crate::models::{
    InvitationStatus, ParticipantRole, ParticipantStatus, ScoringType, SeriesStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_series_dates"))]
pub struct CreateSeriesRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[serde(default = "default_status")]
    pub status: SeriesStatus,

    #[serde(default = "default_scoring_type")]
    pub scoring_type: ScoringType,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeriesRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub status: Option<SeriesStatus>,

    pub scoring_type: Option<ScoringType>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SeriesFilter {
    pub status: Option<SeriesStatus>,
    pub scoring_type: Option<ScoringType>,
}

impl ListFilter for SeriesFilter {
    const KEYS: &'static [&'static str] = &["status", "scoringType"];
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteSeriesParticipantRequest {
    pub user_id: Uuid,

    #[serde(default = "default_role")]
    pub role: ParticipantRole,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeriesParticipantRequest {
    pub role: Option<ParticipantRole>,
    pub status: Option<ParticipantStatus>,
    pub invitation_status: Option<InvitationStatus>,
}

impl UpdateSeriesParticipantRequest {
    /// True when the request touches nothing but the invitation answer.
    pub fn is_invitation_answer(&self) -> bool {
        self.role.is_none() && self.status.is_none() && self.invitation_status.is_some()
    }
}

fn default_status() -> SeriesStatus {
    SeriesStatus::Upcoming
}

fn default_scoring_type() -> ScoringType {
    ScoringType::Gross
}

fn default_role() -> ParticipantRole {
    ParticipantRole::Player
}

fn validate_series_dates(req: &CreateSeriesRequest) -> Result<(), ValidationError> {
    match (req.start_date, req.end_date) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::new("invalid_dates")
            .with_message("End date must be on or after start date".into())),
        _ => Ok(()),
    }
}
