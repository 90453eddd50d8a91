use axum::extract::{Extension, State};
use storage::{
    context::Caller,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        course::{CourseFilter, CreateCourseRequest, ReplaceTeeSetsRequest, UpdateCourseRequest},
    },
    models::{Course, TeeSet},
};
use uuid::Uuid;

use crate::AppState;
use crate::envelope::{ApiResponse, Deleted};
use crate::error::WebResult;
use crate::extract::{ListQuery, PathParam, ValidJson};

use super::services;

#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilter, PaginationParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Courses", body = PaginatedResponse<Course>),
        (status = 400, description = "Invalid filter or pagination"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ListQuery { filter, pagination }: ListQuery<CourseFilter>,
) -> WebResult<ApiResponse<PaginatedResponse<Course>>> {
    let page = services::list_courses(state.store(), &caller, &filter, &pagination).await?;

    Ok(ApiResponse::ok(page))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Course>> {
    let course = services::get_course(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(course))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required")
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidJson(req): ValidJson<CreateCourseRequest>,
) -> WebResult<ApiResponse<Course>> {
    let course = services::create_course(state.store(), &caller, &req).await?;

    Ok(ApiResponse::created(course))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
    ValidJson(req): ValidJson<UpdateCourseRequest>,
) -> WebResult<ApiResponse<Course>> {
    let course = services::update_course(state.store(), &caller, id, &req).await?;

    Ok(ApiResponse::ok(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Course and its tee sets deleted", body = Deleted),
        (status = 400, description = "Course is still used by events"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Deleted>> {
    services::delete_course(state.store(), &caller, id).await?;

    Ok(ApiResponse::deleted())
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/tees",
    params(("id" = Uuid, Path, description = "Course id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tee sets, hardest rating first", body = Vec<TeeSet>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn list_tee_sets(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Vec<TeeSet>>> {
    let tee_sets = services::list_tee_sets(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(tee_sets))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}/tees",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = ReplaceTeeSetsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tee sets replaced", body = Vec<TeeSet>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn replace_tee_sets(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
    ValidJson(req): ValidJson<ReplaceTeeSetsRequest>,
) -> WebResult<ApiResponse<Vec<TeeSet>>> {
    let tee_sets = services::replace_tee_sets(state.store(), &caller, id, &req).await?;

    Ok(ApiResponse::ok(tee_sets))
}
