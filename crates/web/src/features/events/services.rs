use storage::{
    context::Caller,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        event::{
            AddEventParticipantRequest, CreateEventRequest, EventFilter,
            UpdateEventParticipantRequest, UpdateEventRequest,
        },
        leaderboard::LeaderboardResponse,
        scorecard::SubmitScorecardRequest,
    },
    error::{Result, StorageError},
    models::{Event, EventParticipant, InvitationStatus, ScoringType, Scorecard},
    repository::{
        course::CourseRepository, event::EventRepository, scorecard::ScorecardRepository,
        series::SeriesRepository,
    },
    services::leaderboard::build_leaderboard,
    store::RecordStore,
};
use uuid::Uuid;

use crate::features::access;

pub async fn list_events(
    store: &dyn RecordStore,
    caller: &Caller,
    filter: &EventFilter,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<Event>> {
    let (events, total) = EventRepository::new(store, caller)
        .list(filter, pagination)
        .await?;
    Ok(PaginatedResponse::new(events, pagination, total))
}

pub async fn get_event(store: &dyn RecordStore, caller: &Caller, id: Uuid) -> Result<Event> {
    EventRepository::new(store, caller).find_by_id(id).await
}

/// Anyone may run a standalone event; events inside a series need a
/// series manager.
pub async fn create_event(
    store: &dyn RecordStore,
    caller: &Caller,
    req: &CreateEventRequest,
) -> Result<Event> {
    if let Some(series_id) = req.series_id {
        access::require_series_manager(store, caller, series_id)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => StorageError::validation("series does not exist"),
                other => other,
            })?;
    }
    EventRepository::new(store, caller).create(req).await
}

pub async fn update_event(
    store: &dyn RecordStore,
    caller: &Caller,
    id: Uuid,
    req: &UpdateEventRequest,
) -> Result<Event> {
    let repo = EventRepository::new(store, caller);
    let event = repo.find_by_id(id).await?;
    access::require_event_manager(store, caller, &event).await?;
    repo.update(id, req).await
}

pub async fn delete_event(store: &dyn RecordStore, caller: &Caller, id: Uuid) -> Result<()> {
    let repo = EventRepository::new(store, caller);
    let event = repo.find_by_id(id).await?;
    access::require_event_manager(store, caller, &event).await?;
    repo.delete(id).await
}

pub async fn list_participants(
    store: &dyn RecordStore,
    caller: &Caller,
    event_id: Uuid,
) -> Result<Vec<EventParticipant>> {
    let repo = EventRepository::new(store, caller);
    repo.find_by_id(event_id).await?;
    repo.participants(event_id).await
}

/// Self-registration is accepted straight away. Adding someone else is an
/// organizer's invitation and starts out pending.
pub async fn add_participant(
    store: &dyn RecordStore,
    caller: &Caller,
    event_id: Uuid,
    req: &AddEventParticipantRequest,
) -> Result<EventParticipant> {
    let repo = EventRepository::new(store, caller);
    let event = repo.find_by_id(event_id).await?;

    let invitation = if req.user_id == caller.user_id {
        InvitationStatus::Accepted
    } else {
        access::require_event_manager(store, caller, &event).await?;
        InvitationStatus::Pending
    };

    repo.add_participant(event_id, req, invitation).await
}

pub async fn update_participant(
    store: &dyn RecordStore,
    caller: &Caller,
    event_id: Uuid,
    participant_id: Uuid,
    req: &UpdateEventParticipantRequest,
) -> Result<EventParticipant> {
    let repo = EventRepository::new(store, caller);
    let event = repo.find_by_id(event_id).await?;
    let participant = repo.find_participant(event_id, participant_id).await?;

    let own_entry = participant.user_id == caller.user_id && req.is_self_service();
    if !own_entry && !access::is_event_manager(store, caller, &event).await? {
        tracing::warn!(user_id = %caller.user_id, %event_id, %participant_id, "roster change refused");
        return Err(StorageError::forbidden(
            "Only event organizers may change this participant",
        ));
    }

    repo.update_participant(event_id, participant_id, req).await
}

pub async fn list_scorecards(
    store: &dyn RecordStore,
    caller: &Caller,
    event_id: Uuid,
) -> Result<Vec<Scorecard>> {
    get_event(store, caller, event_id).await?;
    ScorecardRepository::new(store, caller)
        .list_for_event(event_id)
        .await
}

/// Store the caller's own card. Only accepted, non-withdrawn participants
/// may submit, and a card never has more holes than the course.
pub async fn submit_scorecard(
    store: &dyn RecordStore,
    caller: &Caller,
    event_id: Uuid,
    req: &SubmitScorecardRequest,
) -> Result<Scorecard> {
    let events = EventRepository::new(store, caller);
    let event = events.find_by_id(event_id).await?;

    let playing = events
        .entry_of(event_id, caller.user_id)
        .await?
        .is_some_and(|entry| entry.is_playing());
    if !playing {
        tracing::warn!(user_id = %caller.user_id, %event_id, "scorecard from non-participant");
        return Err(StorageError::forbidden(
            "Only accepted participants may submit a scorecard",
        ));
    }

    let course = CourseRepository::new(store, caller)
        .find_by_id(event.course_id)
        .await?;
    if req.hole_scores.len() > usize::try_from(course.holes).unwrap_or(0) {
        return Err(StorageError::validation(format!(
            "holeScores: the course has {} holes",
            course.holes
        )));
    }

    ScorecardRepository::new(store, caller)
        .submit(event_id, caller.user_id, req)
        .await
}

/// Standings of an event. Standalone events score gross.
pub async fn get_leaderboard(
    store: &dyn RecordStore,
    caller: &Caller,
    event_id: Uuid,
) -> Result<LeaderboardResponse> {
    let events = EventRepository::new(store, caller);
    let event = events.find_by_id(event_id).await?;
    let course = CourseRepository::new(store, caller)
        .find_by_id(event.course_id)
        .await?;

    let scoring_type = match event.series_id {
        Some(series_id) => {
            SeriesRepository::new(store, caller)
                .find_by_id(series_id)
                .await?
                .scoring_type
        }
        None => ScoringType::Gross,
    };

    let participants = events.participants(event_id).await?;
    let scorecards = ScorecardRepository::new(store, caller)
        .list_for_event(event_id)
        .await?;

    Ok(build_leaderboard(
        &event,
        &course,
        scoring_type,
        &participants,
        &scorecards,
    ))
}
