use axum::extract::{Extension, State};
use storage::{
    context::Caller,
    dto::profile::{CreateProfileRequest, UpdateProfileRequest},
    models::Profile,
};

use crate::AppState;
use crate::envelope::ApiResponse;
use crate::error::WebResult;
use crate::extract::ValidJson;

use super::services;

#[utoipa::path(
    get,
    path = "/api/profiles/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the caller", body = Profile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile yet")
    ),
    tag = "profiles"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> WebResult<ApiResponse<Profile>> {
    let profile = services::get_own_profile(state.store(), &caller).await?;

    Ok(ApiResponse::ok(profile))
}

#[utoipa::path(
    post,
    path = "/api/profiles/me",
    request_body = CreateProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 400, description = "Validation error or profile already exists"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profiles"
)]
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidJson(req): ValidJson<CreateProfileRequest>,
) -> WebResult<ApiResponse<Profile>> {
    let profile = services::create_own_profile(state.store(), &caller, &req).await?;

    Ok(ApiResponse::created(profile))
}

#[utoipa::path(
    put,
    path = "/api/profiles/me",
    request_body = UpdateProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile yet")
    ),
    tag = "profiles"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ValidJson(req): ValidJson<UpdateProfileRequest>,
) -> WebResult<ApiResponse<Profile>> {
    let profile = services::update_own_profile(state.store(), &caller, &req).await?;

    Ok(ApiResponse::ok(profile))
}
