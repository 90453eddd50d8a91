use serde_json::{Value, json};
use uuid::Uuid;

use super::base::{Repository, to_row};
use crate::context::Caller;
use crate::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use crate::error::{Result, StorageError};
use crate::models::Profile;
use crate::store::RecordStore;

pub struct ProfileRepository<'a> {
    records: Repository<'a, Profile>,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(store: &'a dyn RecordStore, caller: &'a Caller) -> Self {
        Self {
            records: Repository::new(store, caller),
        }
    }

    /// Profile of the caller
    pub async fn find_own(&self) -> Result<Profile> {
        self.records.find_by_id(self.records.caller().user_id).await
    }

    /// Create the caller's profile. New profiles are never admins.
    pub async fn create_own(&self, req: &CreateProfileRequest) -> Result<Profile> {
        let mut row = to_row(req)?;
        row.insert("id".to_string(), json!(self.records.caller().user_id));
        row.insert("is_admin".to_string(), Value::Bool(false));
        self.records.create_row(row).await
    }

    pub async fn update_own(&self, req: &UpdateProfileRequest) -> Result<Profile> {
        self.records
            .update(self.records.caller().user_id, req)
            .await
    }

    /// Site administrators may manage courses and any series or event.
    /// A user without a profile is not an admin.
    pub async fn is_site_admin(&self, user_id: Uuid) -> Result<bool> {
        match self.records.find_by_id(user_id).await {
            Ok(profile) => Ok(profile.is_admin),
            Err(StorageError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
