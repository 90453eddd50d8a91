//! Extractors that reject with the error envelope instead of axum's plain
//! text rejections.

use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use storage::dto::common::{ListFilter, PaginationParams, check_list_keys};
use validator::Validate;

use crate::error::WebError;

/// JSON body that has passed its `validator` rules.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Filter and pagination of a list endpoint. Query keys that neither part
/// knows are rejected.
pub struct ListQuery<F> {
    pub filter: F,
    pub pagination: PaginationParams,
}

#[async_trait]
impl<F, S> FromRequestParts<S> for ListQuery<F>
where
    F: DeserializeOwned + ListFilter + Send,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let QueryParams(pairs) =
            QueryParams::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        check_list_keys::<F>(pairs.iter().map(|(key, _)| key.as_str()))?;

        let QueryParams(filter) = QueryParams::<F>::from_request_parts(parts, state).await?;
        let QueryParams(pagination) =
            QueryParams::<PaginationParams>::from_request_parts(parts, state).await?;
        Ok(Self { filter, pagination })
    }
}

pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}
