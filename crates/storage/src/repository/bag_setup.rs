use serde_json::{Value, json};
use uuid::Uuid;

use super::base::{Repository, filter, filters_from, to_row};
use crate::context::Caller;
use crate::dto::bag_setup::{BagSetupFilter, CreateBagSetupRequest, UpdateBagSetupRequest};
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::BagSetup;
use crate::store::{Filters, RecordStore, Row};

/// Repository for a user's bag setups
pub struct BagSetupRepository<'a> {
    records: Repository<'a, BagSetup>,
}

impl<'a> BagSetupRepository<'a> {
    pub fn new(store: &'a dyn RecordStore, caller: &'a Caller) -> Self {
        Self {
            records: Repository::new(store, caller),
        }
    }

    /// List the caller's bag setups
    pub async fn list(
        &self,
        filter: &BagSetupFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<BagSetup>, i64)> {
        let owner = self.records.caller().user_id;
        self.records
            .list(Some(owner), filters_from(filter)?, pagination)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<BagSetup> {
        self.records.find_by_id(id).await
    }

    /// Create a bag setup owned by the caller.
    ///
    /// A new default first clears the owner's existing defaults, then inserts
    /// with the flag set, following the same ordering as [`Self::set_default`].
    pub async fn create(&self, req: &CreateBagSetupRequest) -> Result<BagSetup> {
        let owner = self.records.caller().user_id;
        let mut row = to_row(req)?;
        row.insert("user_id".to_string(), json!(owner));

        if req.is_default {
            self.clear_defaults(owner).await?;
        }

        self.records.create_row(row).await
    }

    /// Update a bag setup. Setting `isDefault: true` applies the other fields
    /// first and then runs [`Self::set_default`].
    pub async fn update(&self, id: Uuid, req: &UpdateBagSetupRequest) -> Result<BagSetup> {
        if req.is_default != Some(true) {
            return self.records.update(id, req).await;
        }

        let fields = UpdateBagSetupRequest {
            is_default: None,
            ..req.clone()
        };
        let updated = self.records.update(id, &fields).await?;
        self.set_default(updated.user_id, id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.records.delete(id).await
    }

    /// Make `id` the single default bag setup of `owner`.
    ///
    /// Two store writes: every current default of the owner is cleared, then
    /// the target is flagged. Nothing spans the two, so a failure after the
    /// first leaves the owner with zero defaults, never two. Concurrent calls
    /// for the same owner are not serialized and may interleave.
    pub async fn set_default(&self, owner: Uuid, id: Uuid) -> Result<BagSetup> {
        let mut target = filter("id", id)?;
        target.insert("user_id".to_string(), json!(owner));

        if self.records.find_one(target.clone()).await?.is_none() {
            return Err(StorageError::NotFound);
        }

        let cleared = self.clear_defaults(owner).await?;
        tracing::debug!(%owner, cleared, "cleared default bag setups");

        let mut flag = Row::new();
        flag.insert("is_default".to_string(), Value::Bool(true));
        let updated = self.records.update_where(target, flag).await?;

        let default = updated.into_iter().next().ok_or_else(|| {
            // the target vanished between phases
            tracing::warn!(%owner, %id, "bag setup removed while setting default");
            StorageError::NotFound
        })?;
        tracing::debug!(%owner, %id, "default bag setup set");

        Ok(default)
    }

    async fn clear_defaults(&self, owner: Uuid) -> Result<usize> {
        let defaults = Filters::from([
            ("user_id".to_string(), json!(owner)),
            ("is_default".to_string(), Value::Bool(true)),
        ]);
        let mut unset = Row::new();
        unset.insert("is_default".to_string(), Value::Bool(false));

        Ok(self.records.update_where(defaults, unset).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::repository::Record;

    fn bag(name: &str, is_default: bool) -> CreateBagSetupRequest {
        CreateBagSetupRequest {
            name: name.to_string(),
            description: None,
            clubs: vec!["Driver".to_string(), "7 Iron".to_string()],
            is_default,
        }
    }

    async fn defaults_of(store: &MemoryStore, owner: Uuid) -> Vec<Uuid> {
        store
            .rows(&BagSetup::TABLE)
            .await
            .into_iter()
            .filter(|row| row["user_id"] == json!(owner) && row["is_default"] == json!(true))
            .map(|row| row["id"].as_str().unwrap().parse().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_set_default_leaves_exactly_one() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = BagSetupRepository::new(&store, &caller);

        let first = repo.create(&bag("Summer", true)).await.unwrap();
        let second = repo.create(&bag("Winter", false)).await.unwrap();
        let third = repo.create(&bag("Links", false)).await.unwrap();

        let chosen = repo.set_default(caller.user_id, third.id).await.unwrap();
        assert!(chosen.is_default);
        assert_eq!(defaults_of(&store, caller.user_id).await, vec![third.id]);

        repo.set_default(caller.user_id, second.id).await.unwrap();
        assert_eq!(defaults_of(&store, caller.user_id).await, vec![second.id]);
        assert!(!repo.find_by_id(first.id).await.unwrap().is_default);
    }

    #[tokio::test]
    async fn test_creating_a_default_replaces_the_previous_one() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = BagSetupRepository::new(&store, &caller);

        let old = repo.create(&bag("Old", true)).await.unwrap();
        let new = repo.create(&bag("New", true)).await.unwrap();

        assert_eq!(defaults_of(&store, caller.user_id).await, vec![new.id]);
        assert!(!repo.find_by_id(old.id).await.unwrap().is_default);
    }

    #[tokio::test]
    async fn test_update_to_default_goes_through_set_default() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = BagSetupRepository::new(&store, &caller);

        repo.create(&bag("Old", true)).await.unwrap();
        let other = repo.create(&bag("Other", false)).await.unwrap();

        let updated = repo
            .update(
                other.id,
                &UpdateBagSetupRequest {
                    name: Some("Renamed".to_string()),
                    is_default: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert!(updated.is_default);
        assert_eq!(defaults_of(&store, caller.user_id).await, vec![other.id]);
    }

    #[tokio::test]
    async fn test_other_owners_defaults_are_untouched() {
        let store = MemoryStore::new();
        let alice = Caller::new(Uuid::new_v4());
        let bob = Caller::new(Uuid::new_v4());

        let bobs = BagSetupRepository::new(&store, &bob)
            .create(&bag("Bob's", true))
            .await
            .unwrap();
        let alices = BagSetupRepository::new(&store, &alice);
        let mine = alices.create(&bag("Mine", false)).await.unwrap();
        alices.set_default(alice.user_id, mine.id).await.unwrap();

        assert_eq!(defaults_of(&store, bob.user_id).await, vec![bobs.id]);
    }

    #[tokio::test]
    async fn test_set_default_for_foreign_record_writes_nothing() {
        let store = MemoryStore::new();
        let alice = Caller::new(Uuid::new_v4());
        let bob = Caller::new(Uuid::new_v4());

        let alices = BagSetupRepository::new(&store, &alice);
        let own = alices.create(&bag("Own", true)).await.unwrap();
        let bobs = BagSetupRepository::new(&store, &bob)
            .create(&bag("Bob's", false))
            .await
            .unwrap();
        let writes = store.mutation_count();

        let err = alices.set_default(alice.user_id, bobs.id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
        assert_eq!(store.mutation_count(), writes);
        assert_eq!(defaults_of(&store, alice.user_id).await, vec![own.id]);
    }

    #[tokio::test]
    async fn test_failure_between_phases_leaves_zero_defaults() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = BagSetupRepository::new(&store, &caller);

        repo.create(&bag("Current", true)).await.unwrap();
        let next = repo.create(&bag("Next", false)).await.unwrap();

        // allow the clearing write, fail the flagging write
        store.fail_writes_after(1).await;
        let err = repo.set_default(caller.user_id, next.id).await.unwrap_err();

        assert!(matches!(err, StorageError::Database(_)));
        assert!(defaults_of(&store, caller.user_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_cannot_move_identity_or_owner() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = BagSetupRepository::new(&store, &caller);
        let created = repo.create(&bag("Mine", false)).await.unwrap();

        let generic: Repository<'_, BagSetup> = Repository::new(&store, &caller);
        let hostile = json!({
            "id": Uuid::new_v4(),
            "userId": Uuid::new_v4(),
            "createdAt": "2001-01-01T00:00:00Z",
            "name": "Renamed",
        });
        let updated = generic.update(created.id, &hostile).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, created.user_id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_the_caller_for_any_filter() {
        let store = MemoryStore::new();
        let alice = Caller::new(Uuid::new_v4());
        let bob = Caller::new(Uuid::new_v4());
        let alices = BagSetupRepository::new(&store, &alice);
        let bobs = BagSetupRepository::new(&store, &bob);

        alices.create(&bag("A1", true)).await.unwrap();
        alices.create(&bag("Shared", false)).await.unwrap();
        bobs.create(&bag("Shared", true)).await.unwrap();

        let filters = [
            BagSetupFilter::default(),
            BagSetupFilter {
                is_default: Some(true),
                name: None,
            },
            BagSetupFilter {
                is_default: None,
                name: Some("Shared".to_string()),
            },
            BagSetupFilter {
                is_default: Some(false),
                name: Some("Shared".to_string()),
            },
        ];
        for filter in &filters {
            let (found, total) = alices
                .list(filter, &PaginationParams::default())
                .await
                .unwrap();
            assert_eq!(found.len() as i64, total);
            assert!(found.iter().all(|b| b.user_id == alice.user_id));
        }

        // an explicit owner filter is overridden by the caller
        let generic: Repository<'_, BagSetup> = Repository::new(&store, &alice);
        let sneaky = filters_from(&json!({ "userId": bob.user_id })).unwrap();
        let (found, _) = generic
            .list(Some(alice.user_id), sneaky, &PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|b| b.user_id == alice.user_id));
    }

    #[tokio::test]
    async fn test_create_then_read_back() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = BagSetupRepository::new(&store, &caller);
        let req = CreateBagSetupRequest {
            description: Some("Firm fairways".to_string()),
            ..bag("Links", false)
        };

        let created = repo.create(&req).await.unwrap();
        let read = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(read, created);
        assert_eq!(read.name, req.name);
        assert_eq!(read.description, req.description);
        assert_eq!(read.clubs, req.clubs);
        assert_eq!(read.user_id, caller.user_id);
        assert!(!read.is_default);
    }

    #[tokio::test]
    async fn test_create_requires_owner() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let generic: Repository<'_, BagSetup> = Repository::new(&store, &caller);

        let err = generic
            .create(&json!({ "name": "Orphan", "isDefault": false }))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Validation(msg) if msg.contains("userId")));
        assert_eq!(store.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = BagSetupRepository::new(&store, &caller);

        assert!(matches!(
            repo.find_by_id(Uuid::new_v4()).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(StorageError::NotFound)
        ));
    }
}
