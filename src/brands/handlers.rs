use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::dto::{BrandList, IdList};
use super::repo::{self, Brand, BrandPatch, NewBrand};
use crate::error::ApiError;
use crate::pagination::Pagination;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Brand>, ApiError> {
    let brand = repo::get(&state.db, id).await?;
    Ok(Json(brand))
}

#[instrument(skip(state, payload))]
pub async fn get_list(
    State(state): State<AppState>,
    payload: Result<Json<IdList>, JsonRejection>,
) -> Result<Json<BrandList>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_request())?;
    let mut brand_list = Vec::with_capacity(input.id_list.len());
    for id in input.id_list {
        brand_list.push(repo::get(&state.db, id).await?);
    }
    Ok(Json(BrandList { brand_list }))
}

#[instrument(skip(state))]
pub async fn get_page(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<BrandList>, ApiError> {
    let brand_list = repo::get_page(&state.db, p.offset, p.limit).await?;
    Ok(Json(BrandList { brand_list }))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewBrand>, JsonRejection>,
) -> Result<Json<Brand>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_request())?;
    let brand = repo::create(&state.db, &input).await?;
    Ok(Json(brand))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<BrandPatch>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(patch) = payload.map_err(|_| ApiError::bad_request())?;
    repo::update(&state.db, id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    repo::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
