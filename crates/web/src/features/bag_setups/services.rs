use storage::{
    context::Caller,
    dto::{
        bag_setup::{BagSetupFilter, CreateBagSetupRequest, UpdateBagSetupRequest},
        common::{PaginatedResponse, PaginationParams},
    },
    error::{Result, StorageError},
    models::BagSetup,
    repository::bag_setup::BagSetupRepository,
    store::RecordStore,
};
use uuid::Uuid;

pub async fn list_bag_setups(
    store: &dyn RecordStore,
    caller: &Caller,
    filter: &BagSetupFilter,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<BagSetup>> {
    let (setups, total) = BagSetupRepository::new(store, caller)
        .list(filter, pagination)
        .await?;
    Ok(PaginatedResponse::new(setups, pagination, total))
}

/// Bag setups of other users read as missing.
pub async fn get_bag_setup(store: &dyn RecordStore, caller: &Caller, id: Uuid) -> Result<BagSetup> {
    let setup = BagSetupRepository::new(store, caller).find_by_id(id).await?;
    if setup.user_id != caller.user_id {
        return Err(StorageError::NotFound);
    }
    Ok(setup)
}

pub async fn create_bag_setup(
    store: &dyn RecordStore,
    caller: &Caller,
    req: &CreateBagSetupRequest,
) -> Result<BagSetup> {
    BagSetupRepository::new(store, caller).create(req).await
}

pub async fn update_bag_setup(
    store: &dyn RecordStore,
    caller: &Caller,
    id: Uuid,
    req: &UpdateBagSetupRequest,
) -> Result<BagSetup> {
    get_bag_setup(store, caller, id).await?;
    BagSetupRepository::new(store, caller).update(id, req).await
}

pub async fn delete_bag_setup(store: &dyn RecordStore, caller: &Caller, id: Uuid) -> Result<()> {
    get_bag_setup(store, caller, id).await?;
    BagSetupRepository::new(store, caller).delete(id).await
}

pub async fn set_default_bag_setup(
    store: &dyn RecordStore,
    caller: &Caller,
    id: Uuid,
) -> Result<BagSetup> {
    BagSetupRepository::new(store, caller)
        .set_default(caller.user_id, id)
        .await
}
