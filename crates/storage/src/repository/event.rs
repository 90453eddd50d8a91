use serde_json::json;
use uuid::Uuid;

use super::base::{Repository, filter, filters_from, to_row};
use super::course::CourseRepository;
use super::series::SeriesRepository;
use super::tee_set::TeeSetRepository;
use crate::context::Caller;
use crate::dto::common::PaginationParams;
use crate::dto::event::{
    AddEventParticipantRequest, CreateEventRequest, EventFilter, UpdateEventParticipantRequest,
    UpdateEventRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{Event, EventParticipant, InvitationStatus, RegistrationStatus};
use crate::store::RecordStore;

/// Repository for events and their rosters
pub struct EventRepository<'a> {
    store: &'a dyn RecordStore,
    caller: &'a Caller,
    records: Repository<'a, Event>,
    participants: Repository<'a, EventParticipant>,
}

impl<'a> EventRepository<'a> {
    pub fn new(store: &'a dyn RecordStore, caller: &'a Caller) -> Self {
        Self {
            store,
            caller,
            records: Repository::new(store, caller),
            participants: Repository::new(store, caller),
        }
    }

    pub async fn list(
        &self,
        filter: &EventFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Event>, i64)> {
        self.records
            .list(None, filters_from(filter)?, pagination)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        self.records.find_by_id(id).await
    }

    /// Create an event after resolving the series, course, and tee set it
    /// references. A dangling reference is a validation error.
    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        if let Some(series_id) = req.series_id {
            referenced(
                SeriesRepository::new(self.store, self.caller)
                    .find_by_id(series_id)
                    .await,
                "series",
            )?;
        }
        referenced(
            CourseRepository::new(self.store, self.caller)
                .find_by_id(req.course_id)
                .await,
            "course",
        )?;
        if let Some(tee_set_id) = req.tee_set_id {
            self.check_tee_set(req.course_id, tee_set_id).await?;
        }

        let mut row = to_row(req)?;
        row.insert("created_by".to_string(), json!(self.caller.user_id));
        self.records.create_row(row).await
    }

    pub async fn update(&self, id: Uuid, req: &UpdateEventRequest) -> Result<Event> {
        let existing = self.records.find_by_id(id).await?;
        if let Some(tee_set_id) = req.tee_set_id {
            self.check_tee_set(existing.course_id, tee_set_id).await?;
        }
        self.records.update(id, req).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.records.delete(id).await
    }

    pub async fn participants(&self, event_id: Uuid) -> Result<Vec<EventParticipant>> {
        self.participants
            .find_all(filter("event_id", event_id)?)
            .await
    }

    pub async fn find_participant(&self, event_id: Uuid, id: Uuid) -> Result<EventParticipant> {
        let participant = self.participants.find_by_id(id).await?;
        if participant.event_id != event_id {
            return Err(StorageError::NotFound);
        }
        Ok(participant)
    }

    pub async fn entry_of(&self, event_id: Uuid, user_id: Uuid) -> Result<Option<EventParticipant>> {
        let mut filters = filter("event_id", event_id)?;
        filters.insert("user_id".to_string(), json!(user_id));
        self.participants.find_one(filters).await
    }

    /// Add a user to the event roster.
    ///
    /// `invitation_status` is decided by the caller: pending for an invite by
    /// an organizer, accepted for self-registration.
    pub async fn add_participant(
        &self,
        event_id: Uuid,
        req: &AddEventParticipantRequest,
        invitation_status: InvitationStatus,
    ) -> Result<EventParticipant> {
        self.records.find_by_id(event_id).await?;

        if self.entry_of(event_id, req.user_id).await?.is_some() {
            return Err(StorageError::validation(
                "user is already on this event's roster",
            ));
        }

        let mut row = to_row(req)?;
        row.insert("event_id".to_string(), json!(event_id));
        row.insert("invitation_status".to_string(), json!(invitation_status));
        row.insert(
            "registration_status".to_string(),
            json!(RegistrationStatus::Registered),
        );
        self.participants.create_row(row).await
    }

    pub async fn update_participant(
        &self,
        event_id: Uuid,
        id: Uuid,
        req: &UpdateEventParticipantRequest,
    ) -> Result<EventParticipant> {
        self.find_participant(event_id, id).await?;
        self.participants.update(id, req).await
    }

    async fn check_tee_set(&self, course_id: Uuid, tee_set_id: Uuid) -> Result<()> {
        let tee_set = referenced(
            TeeSetRepository::new(self.store, self.caller)
                .find_by_id(tee_set_id)
                .await,
            "tee set",
        )?;
        if tee_set.course_id != course_id {
            return Err(StorageError::validation(
                "tee set does not belong to the event's course",
            ));
        }
        Ok(())
    }
}

fn referenced<T>(lookup: Result<T>, what: &str) -> Result<T> {
    lookup.map_err(|e| match e {
        StorageError::NotFound => StorageError::validation(format!("{} does not exist", what)),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::course::{CreateCourseRequest, TeeSetInput};
    use crate::models::{EventFormat, EventStatus};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    async fn course(store: &MemoryStore, caller: &Caller) -> Uuid {
        CourseRepository::new(store, caller)
            .create(&CreateCourseRequest {
                name: "Pine Valley".to_string(),
                city: None,
                region: Some("NJ".to_string()),
                country: Some("US".to_string()),
                holes: 18,
                par: 70,
            })
            .await
            .unwrap()
            .id
    }

    fn event(course_id: Uuid) -> CreateEventRequest {
        CreateEventRequest {
            series_id: None,
            course_id,
            tee_set_id: None,
            name: "Monthly Medal".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            format: EventFormat::StrokePlay,
            status: EventStatus::Scheduled,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_dangling_references() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = EventRepository::new(&store, &caller);

        assert!(matches!(
            repo.create(&event(Uuid::new_v4())).await,
            Err(StorageError::Validation(msg)) if msg.contains("course")
        ));

        let course_id = course(&store, &caller).await;
        let in_missing_series = CreateEventRequest {
            series_id: Some(Uuid::new_v4()),
            ..event(course_id)
        };
        assert!(matches!(
            repo.create(&in_missing_series).await,
            Err(StorageError::Validation(msg)) if msg.contains("series")
        ));
    }

    #[tokio::test]
    async fn test_tee_set_must_belong_to_course() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let here = course(&store, &caller).await;
        let elsewhere = course(&store, &caller).await;
        let foreign = TeeSetRepository::new(&store, &caller)
            .replace_for_course(
                elsewhere,
                &[TeeSetInput {
                    name: "Blue".to_string(),
                    color: Some("blue".to_string()),
                    course_rating: Decimal::new(720, 1),
                    slope_rating: 128,
                    par: 70,
                    yardage: None,
                }],
            )
            .await
            .unwrap()
            .remove(0);

        let req = CreateEventRequest {
            tee_set_id: Some(foreign.id),
            ..event(here)
        };
        let repo = EventRepository::new(&store, &caller);
        assert!(matches!(
            repo.create(&req).await,
            Err(StorageError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_roster_sub_lifecycle() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let course_id = course(&store, &caller).await;
        let repo = EventRepository::new(&store, &caller);
        let created = repo.create(&event(course_id)).await.unwrap();
        assert_eq!(created.created_by, caller.user_id);

        let player = Uuid::new_v4();
        let entry = repo
            .add_participant(
                created.id,
                &AddEventParticipantRequest {
                    user_id: player,
                    handicap_index: Some(Decimal::new(181, 1)),
                },
                InvitationStatus::Pending,
            )
            .await
            .unwrap();
        assert!(!entry.is_playing());

        let accepted = repo
            .update_participant(
                created.id,
                entry.id,
                &UpdateEventParticipantRequest {
                    invitation_status: Some(InvitationStatus::Accepted),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(accepted.is_playing());
        assert_eq!(accepted.handicap_index, Some(Decimal::new(181, 1)));

        let withdrawn = repo
            .update_participant(
                created.id,
                entry.id,
                &UpdateEventParticipantRequest {
                    registration_status: Some(RegistrationStatus::Withdrawn),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!withdrawn.is_playing());
        assert_eq!(withdrawn.invitation_status, InvitationStatus::Accepted);
    }
}
