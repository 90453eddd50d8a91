use serde_json::json;
use uuid::Uuid;

use super::base::{Repository, filter, to_row};
use crate::context::Caller;
use crate::dto::scorecard::SubmitScorecardRequest;
use crate::error::Result;
use crate::models::Scorecard;
use crate::store::RecordStore;

pub struct ScorecardRepository<'a> {
    records: Repository<'a, Scorecard>,
}

impl<'a> ScorecardRepository<'a> {
    pub fn new(store: &'a dyn RecordStore, caller: &'a Caller) -> Self {
        Self {
            records: Repository::new(store, caller),
        }
    }

    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Scorecard>> {
        self.records.find_all(filter("event_id", event_id)?).await
    }

    /// Store the card of `user_id` for `event_id`, replacing the scores of an
    /// earlier submission.
    pub async fn submit(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        req: &SubmitScorecardRequest,
    ) -> Result<Scorecard> {
        let mut key = filter("event_id", event_id)?;
        key.insert("user_id".to_string(), json!(user_id));

        match self.records.find_one(key).await? {
            Some(existing) => self.records.update(existing.id, req).await,
            None => {
                let mut row = to_row(req)?;
                row.insert("event_id".to_string(), json!(event_id));
                row.insert("user_id".to_string(), json!(user_id));
                self.records.create_row(row).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_resubmission_replaces_scores() {
        let store = MemoryStore::new();
        let caller = Caller::new(Uuid::new_v4());
        let repo = ScorecardRepository::new(&store, &caller);
        let event_id = Uuid::new_v4();

        let first = repo
            .submit(
                event_id,
                caller.user_id,
                &SubmitScorecardRequest {
                    hole_scores: vec![4, 5],
                    course_handicap: Some(10),
                    submitted: false,
                },
            )
            .await
            .unwrap();
        let second = repo
            .submit(
                event_id,
                caller.user_id,
                &SubmitScorecardRequest {
                    hole_scores: vec![4, 5, 3],
                    course_handicap: Some(10),
                    submitted: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.gross(), 12);
        assert!(second.submitted);
        assert_eq!(repo.list_for_event(event_id).await.unwrap().len(), 1);
    }
}
