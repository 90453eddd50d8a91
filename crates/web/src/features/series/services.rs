use storage::{
    context::Caller,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        series::{
            CreateSeriesRequest, InviteSeriesParticipantRequest, SeriesFilter,
            UpdateSeriesParticipantRequest, UpdateSeriesRequest,
        },
    },
    error::{Result, StorageError},
    models::{Series, SeriesParticipant},
    repository::series::SeriesRepository,
    store::RecordStore,
};
use uuid::Uuid;

use crate::features::access;

pub async fn list_series(
    store: &dyn RecordStore,
    caller: &Caller,
    filter: &SeriesFilter,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<Series>> {
    let (series, total) = SeriesRepository::new(store, caller)
        .list(filter, pagination)
        .await?;
    Ok(PaginatedResponse::new(series, pagination, total))
}

pub async fn get_series(store: &dyn RecordStore, caller: &Caller, id: Uuid) -> Result<Series> {
    SeriesRepository::new(store, caller).find_by_id(id).await
}

pub async fn create_series(
    store: &dyn RecordStore,
    caller: &Caller,
    req: &CreateSeriesRequest,
) -> Result<Series> {
    let series = SeriesRepository::new(store, caller).create(req).await?;
    tracing::info!(series_id = %series.id, created_by = %caller.user_id, "series created");
    Ok(series)
}

pub async fn update_series(
    store: &dyn RecordStore,
    caller: &Caller,
    id: Uuid,
    req: &UpdateSeriesRequest,
) -> Result<Series> {
    access::require_series_manager(store, caller, id).await?;
    SeriesRepository::new(store, caller).update(id, req).await
}

pub async fn delete_series(store: &dyn RecordStore, caller: &Caller, id: Uuid) -> Result<()> {
    access::require_series_manager(store, caller, id).await?;
    SeriesRepository::new(store, caller).delete(id).await
}

pub async fn list_participants(
    store: &dyn RecordStore,
    caller: &Caller,
    series_id: Uuid,
) -> Result<Vec<SeriesParticipant>> {
    let repo = SeriesRepository::new(store, caller);
    repo.find_by_id(series_id).await?;
    repo.participants(series_id).await
}

pub async fn invite_participant(
    store: &dyn RecordStore,
    caller: &Caller,
    series_id: Uuid,
    req: &InviteSeriesParticipantRequest,
) -> Result<SeriesParticipant> {
    access::require_series_manager(store, caller, series_id).await?;
    SeriesRepository::new(store, caller)
        .invite(series_id, req)
        .await
}

/// Managers may change anything; an invitee may only answer their own
/// invitation.
pub async fn update_participant(
    store: &dyn RecordStore,
    caller: &Caller,
    series_id: Uuid,
    participant_id: Uuid,
    req: &UpdateSeriesParticipantRequest,
) -> Result<SeriesParticipant> {
    let repo = SeriesRepository::new(store, caller);
    let participant = repo.find_participant(series_id, participant_id).await?;

    let answering_own = participant.user_id == caller.user_id && req.is_invitation_answer();
    if !answering_own && !access::is_series_manager(store, caller, series_id).await? {
        tracing::warn!(user_id = %caller.user_id, %series_id, %participant_id, "roster change refused");
        return Err(StorageError::forbidden(
            "Only series organizers may change this participant",
        ));
    }

    repo.update_participant(series_id, participant_id, req).await
}
