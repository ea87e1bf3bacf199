use sqlx::{PgPool, Postgres, Transaction};

use super::dto::{CreateFood, UpdateFood};
use super::repo::{self, Food};
use crate::error::StoreError;
use crate::nutrients::{self, repo::Nutrient};
use crate::tx;

/// Creates a food and its nutrient row as one atomic unit. A failure on
/// either insert leaves no trace of the other.
pub async fn create_with_nutrient(
    db: &PgPool,
    input: CreateFood,
) -> Result<(Food, Nutrient), StoreError> {
    let (new_food, facts) = input.split();
    tx::run(db, move |tx: &mut Transaction<'static, Postgres>| {
        Box::pin(async move {
            let food = repo::create(&mut **tx, &new_food).await?;
            let nutrient = nutrients::repo::create(&mut **tx, food.id, &facts).await?;
            Ok((food, nutrient))
        })
    })
    .await
}

/// Sparse-merges the food row and its nutrient row in one transaction.
/// A missing live row on either side aborts the whole pair.
pub async fn update_with_nutrient(
    db: &PgPool,
    id: i64,
    input: UpdateFood,
) -> Result<(), StoreError> {
    let (patch, facts) = input.split();
    tx::run(db, move |tx: &mut Transaction<'static, Postgres>| {
        Box::pin(async move {
            repo::update(&mut **tx, id, &patch).await?;
            nutrients::repo::update_by_food(&mut **tx, id, &facts).await?;
            Ok(())
        })
    })
    .await
}

/// Soft-deletes a food together with its nutrient row. Idempotent: a
/// second call affects nothing and succeeds.
pub async fn delete_with_nutrient(db: &PgPool, id: i64) -> Result<u64, StoreError> {
    tx::run(db, move |tx: &mut Transaction<'static, Postgres>| {
        Box::pin(async move {
            let affected = repo::delete(&mut **tx, id).await?;
            nutrients::repo::delete_by_food(&mut **tx, id).await?;
            Ok(affected)
        })
    })
    .await
}

/// A food plus its nutrient row, for the list endpoint. A live food with
/// no live nutrient is a broken invariant, not a "not found".
pub async fn get_with_nutrient(db: &PgPool, id: i64) -> Result<(Food, Nutrient), StoreError> {
    let food = repo::get(db, id).await?;
    let nutrient = match nutrients::repo::get_by_food(db, food.id).await {
        Err(StoreError::NotFound) => {
            return Err(StoreError::Inconsistent("food without nutrient"))
        }
        other => other?,
    };
    Ok((food, nutrient))
}
