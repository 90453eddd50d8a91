use axum::extract::{Extension, State};
use storage::{
    context::Caller,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        series::{
            CreateSeriesRequest, InviteSeriesParticipantRequest, SeriesFilter,
            UpdateSeriesParticipantRequest, UpdateSeriesRequest,
        },
    },
    models::{Series, SeriesParticipant},
};
use uuid::Uuid;

use crate::AppState;
use crate::envelope::{ApiResponse, Deleted};
use crate::error::WebResult;
use crate::extract::{ListQuery, PathParam, ValidJson};

use super::services;

#[utoipa::path(
    get,
    path = "/api/series",
    params(SeriesFilter, PaginationParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Series", body = PaginatedResponse<Series>),
        (status = 400, description = "Invalid filter or pagination"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "series"
)]
pub async fn list_series(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ListQuery { filter, pagination }: ListQuery<SeriesFilter>,
) -> WebResult<ApiResponse<PaginatedResponse<Series>>> {
    let page = services::list_series(state.store(), &caller, &filter, &pagination).await?;

    Ok(ApiResponse::ok(page))
}

#[utoipa::path(
    get,
    path = "/api/series/{id}",
    params(("id" = Uuid, Path, description = "Series id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Series found", body = Series),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Series not found")
    ),
    tag = "series"
)]
pub async fn get_series(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Series>> {
    let series = services::get_series(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(series))
}

#[utoipa::path(
    post,
    path = "/api/series",
    request_body = CreateSeriesRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Series created; the caller joins as admin", body = Series),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "series"
)]
pub async fn create_series(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidJson(req): ValidJson<CreateSeriesRequest>,
) -> WebResult<ApiResponse<Series>> {
    let series = services::create_series(state.store(), &caller, &req).await?;

    Ok(ApiResponse::created(series))
}

#[utoipa::path(
    put,
    path = "/api/series/{id}",
    params(("id" = Uuid, Path, description = "Series id")),
    request_body = UpdateSeriesRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Series updated", body = Series),
        (status = 400, description = "Validation error or invalid status change"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Series organizer access required"),
        (status = 404, description = "Series not found")
    ),
    tag = "series"
)]
pub async fn update_series(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
    ValidJson(req): ValidJson<UpdateSeriesRequest>,
) -> WebResult<ApiResponse<Series>> {
    let series = services::update_series(state.store(), &caller, id, &req).await?;

    Ok(ApiResponse::ok(series))
}

#[utoipa::path(
    delete,
    path = "/api/series/{id}",
    params(("id" = Uuid, Path, description = "Series id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Series deleted", body = Deleted),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Series organizer access required"),
        (status = 404, description = "Series not found")
    ),
    tag = "series"
)]
pub async fn delete_series(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Deleted>> {
    services::delete_series(state.store(), &caller, id).await?;

    Ok(ApiResponse::deleted())
}

#[utoipa::path(
    get,
    path = "/api/series/{id}/participants",
    params(("id" = Uuid, Path, description = "Series id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Series roster", body = Vec<SeriesParticipant>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Series not found")
    ),
    tag = "series"
)]
pub async fn list_participants(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Vec<SeriesParticipant>>> {
    let roster = services::list_participants(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(roster))
}

#[utoipa::path(
    post,
    path = "/api/series/{id}/participants",
    params(("id" = Uuid, Path, description = "Series id")),
    request_body = InviteSeriesParticipantRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Invitation created", body = SeriesParticipant),
        (status = 400, description = "Validation error or already a participant"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Series organizer access required"),
        (status = 404, description = "Series not found")
    ),
    tag = "series"
)]
pub async fn invite_participant(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
    ValidJson(req): ValidJson<InviteSeriesParticipantRequest>,
) -> WebResult<ApiResponse<SeriesParticipant>> {
    let participant = services::invite_participant(state.store(), &caller, id, &req).await?;

    Ok(ApiResponse::created(participant))
}

#[utoipa::path(
    put,
    path = "/api/series/{id}/participants/{participantId}",
    params(
        ("id" = Uuid, Path, description = "Series id"),
        ("participantId" = Uuid, Path, description = "Participant id")
    ),
    request_body = UpdateSeriesParticipantRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Participant updated", body = SeriesParticipant),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not allowed to change this participant"),
        (status = 404, description = "Participant not found")
    ),
    tag = "series"
)]
pub async fn update_participant(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam((id, participant_id)): PathParam<(Uuid, Uuid)>,
    ValidJson(req): ValidJson<UpdateSeriesParticipantRequest>,
) -> WebResult<ApiResponse<SeriesParticipant>> {
    let participant =
        services::update_participant(state.store(), &caller, id, participant_id, &req).await?;

    Ok(ApiResponse::ok(participant))
}
