use serde_json::json;
use uuid::Uuid;

use super::base::{Repository, filter, filters_from, to_row};
use crate::context::Caller;
use crate::dto::common::PaginationParams;
use crate::dto::course::{CourseFilter, CreateCourseRequest, UpdateCourseRequest};
use crate::error::{Result, StorageError};
use crate::models::{Course, Event, TeeSet};
use crate::store::RecordStore;

pub struct CourseRepository<'a> {
    records: Repository<'a, Course>,
    tee_sets: Repository<'a, TeeSet>,
    events: Repository<'a, Event>,
}

impl<'a> CourseRepository<'a> {
    pub fn new(store: &'a dyn RecordStore, caller: &'a Caller) -> Self {
        Self {
            records: Repository::new(store, caller),
            tee_sets: Repository::new(store, caller),
            events: Repository::new(store, caller),
        }
    }

    pub async fn list(
        &self,
        filter: &CourseFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Course>, i64)> {
        self.records
            .list(None, filters_from(filter)?, pagination)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Course> {
        self.records.find_by_id(id).await
    }

    pub async fn create(&self, req: &CreateCourseRequest) -> Result<Course> {
        let mut row = to_row(req)?;
        row.insert(
            "created_by".to_string(),
            json!(self.records.caller().user_id),
        );
        self.records.create_row(row).await
    }

    pub async fn update(&self, id: Uuid, req: &UpdateCourseRequest) -> Result<Course> {
        self.records.update(id, req).await
    }

    /// Delete a course and its tee sets. A course that events still play is
    /// kept and the delete fails with a validation error.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.records.find_by_id(id).await?;

        if self.events.find_one(filter("course_id", id)?).await?.is_some() {
            return Err(StorageError::validation(
                "course is still used by events",
            ));
        }

        let removed = self.tee_sets.delete_where(filter("course_id", id)?).await?;
        tracing::debug!(course_id = %id, removed, "removed tee sets with course");

        self.records.delete(id).await
    }
}
