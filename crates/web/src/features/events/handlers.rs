use axum::extract::{Extension, State};
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
    models::{Event, EventParticipant, Scorecard},
};
use uuid::Uuid;

use crate::AppState;
use crate::envelope::{ApiResponse, Deleted};
use crate::error::WebResult;
use crate::extract::{ListQuery, PathParam, ValidJson};

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventFilter, PaginationParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Events", body = PaginatedResponse<Event>),
        (status = 400, description = "Invalid filter or pagination"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ListQuery { filter, pagination }: ListQuery<EventFilter>,
) -> WebResult<ApiResponse<PaginatedResponse<Event>>> {
    let page = services::list_events(state.store(), &caller, &filter, &pagination).await?;

    Ok(ApiResponse::ok(page))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Event>> {
    let event = services::get_event(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(event))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation error or unknown reference"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Series organizer access required")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidJson(req): ValidJson<CreateEventRequest>,
) -> WebResult<ApiResponse<Event>> {
    let event = services::create_event(state.store(), &caller, &req).await?;

    Ok(ApiResponse::created(event))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = UpdateEventRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Event organizer access required"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
    ValidJson(req): ValidJson<UpdateEventRequest>,
) -> WebResult<ApiResponse<Event>> {
    let event = services::update_event(state.store(), &caller, id, &req).await?;

    Ok(ApiResponse::ok(event))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event deleted", body = Deleted),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Event organizer access required"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Deleted>> {
    services::delete_event(state.store(), &caller, id).await?;

    Ok(ApiResponse::deleted())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/participants",
    params(("id" = Uuid, Path, description = "Event id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event roster", body = Vec<EventParticipant>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn list_participants(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Vec<EventParticipant>>> {
    let roster = services::list_participants(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(roster))
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/participants",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = AddEventParticipantRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Registered, or invited when adding someone else", body = EventParticipant),
        (status = 400, description = "Validation error or already registered"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Event organizer access required"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn add_participant(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
    ValidJson(req): ValidJson<AddEventParticipantRequest>,
) -> WebResult<ApiResponse<EventParticipant>> {
    let participant = services::add_participant(state.store(), &caller, id, &req).await?;

    Ok(ApiResponse::created(participant))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/participants/{participantId}",
    params(
        ("id" = Uuid, Path, description = "Event id"),
        ("participantId" = Uuid, Path, description = "Participant id")
    ),
    request_body = UpdateEventParticipantRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Participant updated", body = EventParticipant),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not allowed to change this participant"),
        (status = 404, description = "Participant not found")
    ),
    tag = "events"
)]
pub async fn update_participant(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam((id, participant_id)): PathParam<(Uuid, Uuid)>,
    ValidJson(req): ValidJson<UpdateEventParticipantRequest>,
) -> WebResult<ApiResponse<EventParticipant>> {
    let participant =
        services::update_participant(state.store(), &caller, id, participant_id, &req).await?;

    Ok(ApiResponse::ok(participant))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/scorecards",
    params(("id" = Uuid, Path, description = "Event id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Scorecards of the event", body = Vec<Scorecard>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn list_scorecards(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Vec<Scorecard>>> {
    let cards = services::list_scorecards(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(cards))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/scorecards",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = SubmitScorecardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Scorecard stored", body = Scorecard),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not playing in this event"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn submit_scorecard(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
    ValidJson(req): ValidJson<SubmitScorecardRequest>,
) -> WebResult<ApiResponse<Scorecard>> {
    let card = services::submit_scorecard(state.store(), &caller, id, &req).await?;

    Ok(ApiResponse::ok(card))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/leaderboard",
    params(("id" = Uuid, Path, description = "Event id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event standings", body = LeaderboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<LeaderboardResponse>> {
    let leaderboard = services::get_leaderboard(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(leaderboard))
}
