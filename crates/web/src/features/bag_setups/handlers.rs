use axum::extract::{Extension, State};
use storage::{
    context::Caller,
    dto::{
        bag_setup::{BagSetupFilter, CreateBagSetupRequest, UpdateBagSetupRequest},
        common::{PaginatedResponse, PaginationParams},
    },
    models::BagSetup,
};
use uuid::Uuid;

use crate::AppState;
use crate::envelope::{ApiResponse, Deleted};
use crate::error::WebResult;
use crate::extract::{ListQuery, PathParam, ValidJson};

use super::services;

#[utoipa::path(
    get,
    path = "/api/bag-setups",
    params(BagSetupFilter, PaginationParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bag setups of the caller", body = PaginatedResponse<BagSetup>),
        (status = 400, description = "Invalid filter or pagination"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "bag-setups"
)]
pub async fn list_bag_setups(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ListQuery { filter, pagination }: ListQuery<BagSetupFilter>,
) -> WebResult<ApiResponse<PaginatedResponse<BagSetup>>> {
    let page = services::list_bag_setups(state.store(), &caller, &filter, &pagination).await?;

    Ok(ApiResponse::ok(page))
}

#[utoipa::path(
    get,
    path = "/api/bag-setups/{id}",
    params(("id" = Uuid, Path, description = "Bag setup id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bag setup found", body = BagSetup),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Bag setup not found")
    ),
    tag = "bag-setups"
)]
pub async fn get_bag_setup(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<BagSetup>> {
    let setup = services::get_bag_setup(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(setup))
}

#[utoipa::path(
    post,
    path = "/api/bag-setups",
    request_body = CreateBagSetupRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Bag setup created", body = BagSetup),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "bag-setups"
)]
pub async fn create_bag_setup(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidJson(req): ValidJson<CreateBagSetupRequest>,
) -> WebResult<ApiResponse<BagSetup>> {
    let setup = services::create_bag_setup(state.store(), &caller, &req).await?;

    Ok(ApiResponse::created(setup))
}

#[utoipa::path(
    put,
    path = "/api/bag-setups/{id}",
    params(("id" = Uuid, Path, description = "Bag setup id")),
    request_body = UpdateBagSetupRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bag setup updated", body = BagSetup),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Bag setup not found")
    ),
    tag = "bag-setups"
)]
pub async fn update_bag_setup(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
    ValidJson(req): ValidJson<UpdateBagSetupRequest>,
) -> WebResult<ApiResponse<BagSetup>> {
    let setup = services::update_bag_setup(state.store(), &caller, id, &req).await?;

    Ok(ApiResponse::ok(setup))
}

#[utoipa::path(
    delete,
    path = "/api/bag-setups/{id}",
    params(("id" = Uuid, Path, description = "Bag setup id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bag setup deleted", body = Deleted),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Bag setup not found")
    ),
    tag = "bag-setups"
)]
pub async fn delete_bag_setup(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<Deleted>> {
    services::delete_bag_setup(state.store(), &caller, id).await?;

    Ok(ApiResponse::deleted())
}

#[utoipa::path(
    post,
    path = "/api/bag-setups/{id}/default",
    params(("id" = Uuid, Path, description = "Bag setup id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bag setup is now the caller's only default", body = BagSetup),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Bag setup not found")
    ),
    tag = "bag-setups"
)]
pub async fn set_default_bag_setup(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<Uuid>,
) -> WebResult<ApiResponse<BagSetup>> {
    let setup = services::set_default_bag_setup(state.store(), &caller, id).await?;

    Ok(ApiResponse::ok(setup))
}
