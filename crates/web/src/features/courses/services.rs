use storage::{
    context::Caller,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        course::{CourseFilter, CreateCourseRequest, ReplaceTeeSetsRequest, UpdateCourseRequest},
    },
    error::Result,
    models::{Course, TeeSet},
    repository::{course::CourseRepository, tee_set::TeeSetRepository},
    store::RecordStore,
};
use uuid::Uuid;

use crate::features::access;

pub async fn list_courses(
    store: &dyn RecordStore,
    caller: &Caller,
    filter: &CourseFilter,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<Course>> {
    let (courses, total) = CourseRepository::new(store, caller)
        .list(filter, pagination)
        .await?;
    Ok(PaginatedResponse::new(courses, pagination, total))
}

pub async fn get_course(store: &dyn RecordStore, caller: &Caller, id: Uuid) -> Result<Course> {
    CourseRepository::new(store, caller).find_by_id(id).await
}

pub async fn create_course(
    store: &dyn RecordStore,
    caller: &Caller,
    req: &CreateCourseRequest,
) -> Result<Course> {
    access::require_site_admin(store, caller).await?;
    CourseRepository::new(store, caller).create(req).await
}

pub async fn update_course(
    store: &dyn RecordStore,
    caller: &Caller,
    id: Uuid,
    req: &UpdateCourseRequest,
) -> Result<Course> {
    access::require_site_admin(store, caller).await?;
    CourseRepository::new(store, caller).update(id, req).await
}

pub async fn delete_course(store: &dyn RecordStore, caller: &Caller, id: Uuid) -> Result<()> {
    access::require_site_admin(store, caller).await?;
    CourseRepository::new(store, caller).delete(id).await
}

pub async fn list_tee_sets(
    store: &dyn RecordStore,
    caller: &Caller,
    course_id: Uuid,
) -> Result<Vec<TeeSet>> {
    get_course(store, caller, course_id).await?;
    TeeSetRepository::new(store, caller)
        .list_for_course(course_id)
        .await
}

/// Admin check first, then course lookup, then the writes.
pub async fn replace_tee_sets(
    store: &dyn RecordStore,
    caller: &Caller,
    course_id: Uuid,
    req: &ReplaceTeeSetsRequest,
) -> Result<Vec<TeeSet>> {
    access::require_site_admin(store, caller).await?;
    TeeSetRepository::new(store, caller)
        .replace_for_course(course_id, &req.tee_sets)
        .await
}
