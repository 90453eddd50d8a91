use serde_json::json;
use uuid::Uuid;

use super::base::{Repository, filter, filters_from, to_row};
use crate::context::Caller;
use crate::dto::common::PaginationParams;
use crate::dto::series::{
    CreateSeriesRequest, InviteSeriesParticipantRequest, SeriesFilter, UpdateSeriesParticipantRequest,
    UpdateSeriesRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{
    InvitationStatus, ParticipantRole, ParticipantStatus, Series, SeriesParticipant,
};
use crate::store::RecordStore;

/// Repository for series and their rosters
pub struct SeriesRepository<'a> {
    records: Repository<'a, Series>,
    participants: Repository<'a, SeriesParticipant>,
}

impl<'a> SeriesRepository<'a> {
    pub fn new(store: &'a dyn RecordStore, caller: &'a Caller) -> Self {
        Self {
            records: Repository::new(store, caller),
            participants: Repository::new(store, caller),
        }
    }

    pub async fn list(
        &self,
        filter: &SeriesFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Series>, i64)> {
        self.records
            .list(None, filters_from(filter)?, pagination)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Series> {
        self.records.find_by_id(id).await
    }

    /// Create a series; the creator joins it as an accepted, active admin.
    pub async fn create(&self, req: &CreateSeriesRequest) -> Result<Series> {
        let creator = self.records.caller().user_id;
        let mut row = to_row(req)?;
        row.insert("created_by".to_string(), json!(creator));
        let series = self.records.create_row(row).await?;

        self.insert_participant(
            series.id,
            creator,
            ParticipantRole::Admin,
            InvitationStatus::Accepted,
        )
        .await?;

        Ok(series)
    }

    /// Update a series, enforcing the status lifecycle.
    pub async fn update(&self, id: Uuid, req: &UpdateSeriesRequest) -> Result<Series> {
        let existing = self.records.find_by_id(id).await?;

        if let Some(next) = req.status
            && !existing.status.can_transition_to(next)
        {
            return Err(StorageError::validation(format!(
                "cannot move series from {:?} to {:?}",
                existing.status, next
            )));
        }

        let start = req.start_date.or(existing.start_date);
        let end = req.end_date.or(existing.end_date);
        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            return Err(StorageError::validation(
                "End date must be on or after start date",
            ));
        }

        self.records.update(id, req).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.records.delete(id).await
    }

    pub async fn participants(&self, series_id: Uuid) -> Result<Vec<SeriesParticipant>> {
        self.participants
            .find_all(filter("series_id", series_id)?)
            .await
    }

    pub async fn find_participant(&self, series_id: Uuid, id: Uuid) -> Result<SeriesParticipant> {
        let participant = self.participants.find_by_id(id).await?;
        if participant.series_id != series_id {
            return Err(StorageError::NotFound);
        }
        Ok(participant)
    }

    pub async fn membership(
        &self,
        series_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SeriesParticipant>> {
        let mut filters = filter("series_id", series_id)?;
        filters.insert("user_id".to_string(), json!(user_id));
        self.participants.find_one(filters).await
    }

    /// Invite a user; the invitation starts out pending.
    pub async fn invite(
        &self,
        series_id: Uuid,
        req: &InviteSeriesParticipantRequest,
    ) -> Result<SeriesParticipant> {
        self.records.find_by_id(series_id).await?;

        if self.membership(series_id, req.user_id).await?.is_some() {
            return Err(StorageError::validation(
                "user is already part of this series",
            ));
        }

        self.insert_participant(series_id, req.user_id, req.role, InvitationStatus::Pending)
            .await
    }

    pub async fn update_participant(
        &self,
        series_id: Uuid,
        id: Uuid,
        req: &UpdateSeriesParticipantRequest,
    ) -> Result<SeriesParticipant> {
        self.find_participant(series_id, id).await?;
        self.participants.update(id, req).await
    }

    async fn insert_participant(
        &self,
        series_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
        invitation_status: InvitationStatus,
    ) -> Result<SeriesParticipant> {
        self.participants
            .create(&json!({
                "seriesId": series_id,
                "userId": user_id,
                "role": role,
                "status": ParticipantStatus::Active,
                "invitationStatus": invitation_status,
            }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScoringType, SeriesStatus};
    use crate::store::MemoryStore;

    fn new_series(name: &str) -> CreateSeriesRequest {
        CreateSeriesRequest {
            name: name.to_string(),
            description: None,
            status: SeriesStatus::Upcoming,
            scoring_type: ScoringType::Net,
            start_date: None,
            end_date: None,
        }
    }

    #[tokio::test]
    async fn test_creator_becomes_admin() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = SeriesRepository::new(&store, &caller);

        let series = repo.create(&new_series("Winter League")).await.unwrap();
        let roster = repo.participants(series.id).await.unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].user_id, caller.user_id);
        assert!(roster[0].is_manager());
        assert_eq!(series.created_by, caller.user_id);
    }

    #[tokio::test]
    async fn test_status_lifecycle_is_enforced() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = SeriesRepository::new(&store, &caller);
        let series = repo.create(&new_series("Summer Cup")).await.unwrap();

        let skip = UpdateSeriesRequest {
            status: Some(SeriesStatus::Completed),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(series.id, &skip).await,
            Err(StorageError::Validation(_))
        ));

        for next in [SeriesStatus::Active, SeriesStatus::Completed] {
            let step = UpdateSeriesRequest {
                status: Some(next),
                ..Default::default()
            };
            assert_eq!(repo.update(series.id, &step).await.unwrap().status, next);
        }
    }

    #[tokio::test]
    async fn test_status_and_invitation_are_independent() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = SeriesRepository::new(&store, &caller);
        let series = repo.create(&new_series("Club Champs")).await.unwrap();

        let invited = repo
            .invite(
                series.id,
                &InviteSeriesParticipantRequest {
                    user_id: Uuid::new_v4(),
                    role: ParticipantRole::Player,
                },
            )
            .await
            .unwrap();
        assert_eq!(invited.invitation_status, InvitationStatus::Pending);

        let accepted = repo
            .update_participant(
                series.id,
                invited.id,
                &UpdateSeriesParticipantRequest {
                    invitation_status: Some(InvitationStatus::Accepted),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let inactive = repo
            .update_participant(
                series.id,
                invited.id,
                &UpdateSeriesParticipantRequest {
                    status: Some(ParticipantStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(accepted.status, ParticipantStatus::Active);
        assert_eq!(inactive.invitation_status, InvitationStatus::Accepted);
        assert_eq!(inactive.status, ParticipantStatus::Inactive);
    }

    #[tokio::test]
    async fn test_duplicate_invitation_is_rejected() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = SeriesRepository::new(&store, &caller);
        let series = repo.create(&new_series("Spring Swing")).await.unwrap();

        let again = InviteSeriesParticipantRequest {
            user_id: caller.user_id,
            role: ParticipantRole::Player,
        };
        assert!(matches!(
            repo.invite(series.id, &again).await,
            Err(StorageError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_participant_of_other_series_is_not_found() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = SeriesRepository::new(&store, &caller);
        let one = repo.create(&new_series("One")).await.unwrap();
        let two = repo.create(&new_series("Two")).await.unwrap();
        let member = repo.participants(one.id).await.unwrap().remove(0);

        assert!(matches!(
            repo.find_participant(two.id, member.id).await,
            Err(StorageError::NotFound)
        ));
    }
}
