//! Authorization checks for mutations the row-level policies do not cover.

use storage::{
    context::Caller,
    error::{Result, StorageError},
    models::{Event, Series},
    repository::{profile::ProfileRepository, series::SeriesRepository},
    store::RecordStore,
};
use uuid::Uuid;

pub async fn is_site_admin(store: &dyn RecordStore, caller: &Caller) -> Result<bool> {
    ProfileRepository::new(store, caller)
        .is_site_admin(caller.user_id)
        .await
}

pub async fn require_site_admin(store: &dyn RecordStore, caller: &Caller) -> Result<()> {
    if is_site_admin(store, caller).await? {
        return Ok(());
    }
    tracing::warn!(user_id = %caller.user_id, "site admin required");
    Err(StorageError::forbidden("Administrator access required"))
}

/// Accepted series admins and organizers, or a site admin.
pub async fn is_series_manager(
    store: &dyn RecordStore,
    caller: &Caller,
    series_id: Uuid,
) -> Result<bool> {
    let membership = SeriesRepository::new(store, caller)
        .membership(series_id, caller.user_id)
        .await?;
    if membership.is_some_and(|m| m.is_manager()) {
        return Ok(true);
    }
    is_site_admin(store, caller).await
}

/// Resolve the series (404 when unknown) and check the caller manages it.
pub async fn require_series_manager(
    store: &dyn RecordStore,
    caller: &Caller,
    series_id: Uuid,
) -> Result<Series> {
    let series = SeriesRepository::new(store, caller)
        .find_by_id(series_id)
        .await?;
    if is_series_manager(store, caller, series.id).await? {
        return Ok(series);
    }
    tracing::warn!(user_id = %caller.user_id, %series_id, "series manager required");
    Err(StorageError::forbidden("Series organizer access required"))
}

/// The event creator, a manager of its series, or a site admin.
pub async fn is_event_manager(
    store: &dyn RecordStore,
    caller: &Caller,
    event: &Event,
) -> Result<bool> {
    if event.created_by == caller.user_id {
        return Ok(true);
    }
    match event.series_id {
        Some(series_id) => is_series_manager(store, caller, series_id).await,
        None => is_site_admin(store, caller).await,
    }
}

pub async fn require_event_manager(
    store: &dyn RecordStore,
    caller: &Caller,
    event: &Event,
) -> Result<()> {
    if is_event_manager(store, caller, event).await? {
        return Ok(());
    }
    tracing::warn!(user_id = %caller.user_id, event_id = %event.id, "event manager required");
    Err(StorageError::forbidden("Event organizer access required"))
}
