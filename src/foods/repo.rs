use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;

use crate::error::StoreError;

/// A food always owns exactly one live nutrient row; writes that touch the
/// pair go through `services`, never through this repo alone.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Food {
    pub id: i64,
    pub category_id: i64,
    pub brand_id: i64,
    pub name: String,
    pub weight: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Debug)]
pub struct NewFood {
    pub category_id: i64,
    pub brand_id: i64,
    pub name: String,
    pub weight: f64,
}

/// Sparse update input: zero values mean "not provided".
#[derive(Debug, Default)]
pub struct FoodPatch {
    pub category_id: i64,
    pub brand_id: i64,
    pub name: String,
    pub weight: f64,
}

pub async fn get(db: impl PgExecutor<'_>, id: i64) -> Result<Food, StoreError> {
    sqlx::query_as::<_, Food>(
        r#"
        SELECT id, category_id, brand_id, name, weight, created_at, updated_at, deleted_at
        FROM foods
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(StoreError::NotFound)
}

pub async fn get_page(
    db: impl PgExecutor<'_>,
    offset: i64,
    limit: i64,
) -> Result<Vec<Food>, StoreError> {
    let rows = sqlx::query_as::<_, Food>(
        r#"
        SELECT id, category_id, brand_id, name, weight, created_at, updated_at, deleted_at
        FROM foods
        WHERE deleted_at IS NULL
        ORDER BY id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(db: impl PgExecutor<'_>, new: &NewFood) -> Result<Food, StoreError> {
    let row = sqlx::query_as::<_, Food>(
        r#"
        INSERT INTO foods (category_id, brand_id, name, weight)
        VALUES ($1, $2, $3, $4)
        RETURNING id, category_id, brand_id, name, weight, created_at, updated_at, deleted_at
        "#,
    )
    .bind(new.category_id)
    .bind(new.brand_id)
    .bind(&new.name)
    .bind(new.weight)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update(db: impl PgExecutor<'_>, id: i64, patch: &FoodPatch) -> Result<(), StoreError> {
    let res = sqlx::query(
        r#"
        UPDATE foods
        SET category_id = COALESCE(NULLIF($2, 0), category_id),
            brand_id = COALESCE(NULLIF($3, 0), brand_id),
            name = COALESCE(NULLIF($4, ''), name),
            weight = COALESCE(NULLIF($5, 0), weight),
            updated_at = now()
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(patch.category_id)
    .bind(patch.brand_id)
    .bind(&patch.name)
    .bind(patch.weight)
    .execute(db)
    .await?;
    if res.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

/// Soft delete of the food row only; 0 rows affected is not an error.
pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<u64, StoreError> {
    let res = sqlx::query(
        r#"
        UPDATE foods
        SET deleted_at = now()
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(res.rows_affected())
}
