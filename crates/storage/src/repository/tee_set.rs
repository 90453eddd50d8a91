use serde_json::json;
use uuid::Uuid;

use super::base::{Repository, filter, to_row};
use super::course::CourseRepository;
use crate::context::Caller;
use crate::dto::course::TeeSetInput;
use crate::error::Result;
use crate::models::TeeSet;
use crate::store::RecordStore;

pub struct TeeSetRepository<'a> {
    records: Repository<'a, TeeSet>,
}

impl<'a> TeeSetRepository<'a> {
    pub fn new(store: &'a dyn RecordStore, caller: &'a Caller) -> Self {
        Self {
            records: Repository::new(store, caller),
        }
    }

    pub async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<TeeSet>> {
        let mut tee_sets = self.records.find_all(filter("course_id", course_id)?).await?;
        tee_sets.sort_by(|a, b| b.course_rating.cmp(&a.course_rating));
        Ok(tee_sets)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<TeeSet> {
        self.records.find_by_id(id).await
    }

    /// Replace every tee set of a course: delete all, then insert each.
    ///
    /// The course is resolved before any write, so an unknown course fails
    /// with `NotFound` and leaves the table untouched. There is no
    /// transaction around the delete and the inserts; a failure part way
    /// leaves a subset of the new sets, never a mix of old and new.
    pub async fn replace_for_course(
        &self,
        course_id: Uuid,
        tee_sets: &[TeeSetInput],
    ) -> Result<Vec<TeeSet>> {
        CourseRepository::new(self.records.store(), self.records.caller())
            .find_by_id(course_id)
            .await?;

        let removed = self
            .records
            .delete_where(filter("course_id", course_id)?)
            .await?;
        tracing::debug!(%course_id, removed, "removed tee sets");

        let mut created = Vec::with_capacity(tee_sets.len());
        for input in tee_sets {
            let mut row = to_row(input)?;
            row.insert("course_id".to_string(), json!(course_id));
            created.push(self.records.create_row(row).await?);
        }
        tracing::debug!(%course_id, inserted = created.len(), "inserted tee sets");

        Ok(created)
    }
}
