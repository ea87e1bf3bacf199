use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::dto::{CategoryList, CreateCategory, IdList};
use super::repo::{self, Category, CategoryPatch};
use crate::error::ApiError;
use crate::pagination::Pagination;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ApiError> {
    let category = repo::get(&state.db, id).await?;
    Ok(Json(category))
}

#[instrument(skip(state, payload))]
pub async fn get_list(
    State(state): State<AppState>,
    payload: Result<Json<IdList>, JsonRejection>,
) -> Result<Json<CategoryList>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_request())?;
    let mut category_list = Vec::with_capacity(input.id_list.len());
    for id in input.id_list {
        category_list.push(repo::get(&state.db, id).await?);
    }
    Ok(Json(CategoryList { category_list }))
}

#[instrument(skip(state))]
pub async fn get_page(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<CategoryList>, ApiError> {
    let category_list = repo::get_page(&state.db, p.offset, p.limit).await?;
    Ok(Json(CategoryList { category_list }))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategory>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_request())?;
    let category = repo::create(&state.db, &input.name).await?;
    Ok(Json(category))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CategoryPatch>, JsonRejection>,
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
