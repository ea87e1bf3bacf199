use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::dto::{CreateFood, FoodList, FoodPage, FoodWithNutrient, IdList, UpdateFood};
use super::repo;
use super::services;
use super::view::{self, FoodDetails};
use crate::error::ApiError;
use crate::pagination::Pagination;
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateFood>, JsonRejection>,
) -> Result<Json<FoodWithNutrient>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_request())?;
    let (food, nutrient) = services::create_with_nutrient(&state.db, input).await?;
    Ok(Json(FoodWithNutrient { food, nutrient }))
}

#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FoodDetails>, ApiError> {
    let details = view::food_details(&state.db, id).await?;
    Ok(Json(details))
}

#[instrument(skip(state, payload))]
pub async fn get_list(
    State(state): State<AppState>,
    payload: Result<Json<IdList>, JsonRejection>,
) -> Result<Json<FoodList>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_request())?;
    let mut food_list = Vec::with_capacity(input.id_list.len());
    for id in input.id_list {
        let (food, nutrient) = services::get_with_nutrient(&state.db, id).await?;
        food_list.push(FoodWithNutrient { food, nutrient });
    }
    Ok(Json(FoodList { food_list }))
}

#[instrument(skip(state))]
pub async fn get_page(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<FoodPage>, ApiError> {
    let food_list = repo::get_page(&state.db, p.offset, p.limit).await?;
    Ok(Json(FoodPage { food_list }))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateFood>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_request())?;
    services::update_with_nutrient(&state.db, id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    services::delete_with_nutrient(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
