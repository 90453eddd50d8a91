use storage::{
    context::Caller,
    dto::profile::{CreateProfileRequest, UpdateProfileRequest},
    error::Result,
    models::Profile,
    repository::profile::ProfileRepository,
    store::RecordStore,
};

pub async fn get_own_profile(store: &dyn RecordStore, caller: &Caller) -> Result<Profile> {
    ProfileRepository::new(store, caller).find_own().await
}

pub async fn create_own_profile(
    store: &dyn RecordStore,
    caller: &Caller,
    req: &CreateProfileRequest,
) -> Result<Profile> {
    ProfileRepository::new(store, caller).create_own(req).await
}

pub async fn update_own_profile(
    store: &dyn RecordStore,
    caller: &Caller,
    req: &UpdateProfileRequest,
) -> Result<Profile> {
    ProfileRepository::new(store, caller).update_own(req).await
}
