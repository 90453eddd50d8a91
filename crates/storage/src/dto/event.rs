use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::ListFilter;
use super::validate_handicap_index;
use crate::models::{EventFormat, EventStatus, InvitationStatus, RegistrationStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub series_id: Option<Uuid>,

    pub course_id: Uuid,

    pub tee_set_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    pub event_date: NaiveDate,

    #[serde(default = "default_format")]
    pub format: EventFormat,

    #[serde(default = "default_status")]
    pub status: EventStatus,
}

/// An event cannot be moved to another series or course once created.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub tee_set_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub event_date: Option<NaiveDate>,

    pub format: Option<EventFormat>,

    pub status: Option<EventStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    pub series_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub status: Option<EventStatus>,
}

impl ListFilter for EventFilter {
    const KEYS: &'static [&'static str] = &["seriesId", "courseId", "status"];
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddEventParticipantRequest {
    pub user_id: Uuid,

    #[validate(custom(function = "validate_handicap_index"))]
    pub handicap_index: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventParticipantRequest {
    pub invitation_status: Option<InvitationStatus>,

    pub registration_status: Option<RegistrationStatus>,

    #[validate(custom(function = "validate_handicap_index"))]
    pub handicap_index: Option<Decimal>,
}

impl UpdateEventParticipantRequest {
    /// Changes a participant may make on their own entry: answering the
    /// invitation and withdrawing.
    pub fn is_self_service(&self) -> bool {
        self.handicap_index.is_none()
            && matches!(
                self.registration_status,
                None | Some(RegistrationStatus::Withdrawn)
            )
    }
}

fn default_format() -> EventFormat {
    EventFormat::StrokePlay
}

fn default_status() -> EventStatus {
    EventStatus::Scheduled
}
