use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::dto::{IdList, NutrientList};
use super::repo::{self, Nutrient, NutrientFacts};
use crate::error::ApiError;
use crate::pagination::Pagination;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Nutrient>, ApiError> {
    let nutrient = repo::get(&state.db, id).await?;
    Ok(Json(nutrient))
}

#[instrument(skip(state, payload))]
pub async fn get_list(
    State(state): State<AppState>,
    payload: Result<Json<IdList>, JsonRejection>,
) -> Result<Json<NutrientList>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_request())?;
    let mut nutrient_list = Vec::with_capacity(input.id_list.len());
    for id in input.id_list {
        nutrient_list.push(repo::get(&state.db, id).await?);
    }
    Ok(Json(NutrientList { nutrient_list }))
}

#[instrument(skip(state))]
pub async fn get_page(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<NutrientList>, ApiError> {
    let nutrient_list = repo::get_page(&state.db, p.offset, p.limit).await?;
    Ok(Json(NutrientList { nutrient_list }))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<NutrientFacts>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(facts) = payload.map_err(|_| ApiError::bad_request())?;
    repo::update(&state.db, id, &facts).await?;
    Ok(StatusCode::NO_CONTENT)
}
