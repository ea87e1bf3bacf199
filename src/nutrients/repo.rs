use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;

use crate::error::StoreError;

/// Macro/calorie record owned 1:1 by a food row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Nutrient {
    pub id: i64,
    pub food_id: i64,
    pub carbohydrate: f32,
    pub protein: f32,
    pub saturated_fat: f32,
    pub unsaturated_fat: f32,
    pub trans_fat: f32,
    pub per_weight: i32,
    pub calorie: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

/// Macro/calorie payload shared by create and the sparse update. On update,
/// zero values mean "not provided"; `food_id` is never patchable.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NutrientFacts {
    #[serde(default)]
    pub carbohydrate: f32,
    #[serde(default)]
    pub protein: f32,
    #[serde(default)]
    pub saturated_fat: f32,
    #[serde(default)]
    pub unsaturated_fat: f32,
    #[serde(default)]
    pub trans_fat: f32,
    #[serde(default)]
    pub per_weight: i32,
    #[serde(default)]
    pub calorie: i64,
}

const COLUMNS: &str = "id, food_id, carbohydrate, protein, saturated_fat, unsaturated_fat, \
                       trans_fat, per_weight, calorie, created_at, updated_at, deleted_at";

pub async fn get(db: impl PgExecutor<'_>, id: i64) -> Result<Nutrient, StoreError> {
    sqlx::query_as::<_, Nutrient>(&format!(
        "SELECT {COLUMNS} FROM nutrients WHERE id = $1 AND deleted_at IS NULL"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(StoreError::NotFound)
}

pub async fn get_by_food(db: impl PgExecutor<'_>, food_id: i64) -> Result<Nutrient, StoreError> {
    sqlx::query_as::<_, Nutrient>(&format!(
        "SELECT {COLUMNS} FROM nutrients WHERE food_id = $1 AND deleted_at IS NULL"
    ))
    .bind(food_id)
    .fetch_optional(db)
    .await?
    .ok_or(StoreError::NotFound)
}

pub async fn get_page(
    db: impl PgExecutor<'_>,
    offset: i64,
    limit: i64,
) -> Result<Vec<Nutrient>, StoreError> {
    let rows = sqlx::query_as::<_, Nutrient>(&format!(
        "SELECT {COLUMNS} FROM nutrients WHERE deleted_at IS NULL \
         ORDER BY id ASC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(
    db: impl PgExecutor<'_>,
    food_id: i64,
    facts: &NutrientFacts,
) -> Result<Nutrient, StoreError> {
    let row = sqlx::query_as::<_, Nutrient>(&format!(
        "INSERT INTO nutrients \
             (food_id, carbohydrate, protein, saturated_fat, unsaturated_fat, \
              trans_fat, per_weight, calorie) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {COLUMNS}"
    ))
    .bind(food_id)
    .bind(facts.carbohydrate)
    .bind(facts.protein)
    .bind(facts.saturated_fat)
    .bind(facts.unsaturated_fat)
    .bind(facts.trans_fat)
    .bind(facts.per_weight)
    .bind(facts.calorie)
    .fetch_one(db)
    .await?;
    Ok(row)
}

const SPARSE_SET: &str = "carbohydrate = COALESCE(NULLIF($2, 0), carbohydrate), \
     protein = COALESCE(NULLIF($3, 0), protein), \
     saturated_fat = COALESCE(NULLIF($4, 0), saturated_fat), \
     unsaturated_fat = COALESCE(NULLIF($5, 0), unsaturated_fat), \
     trans_fat = COALESCE(NULLIF($6, 0), trans_fat), \
     per_weight = COALESCE(NULLIF($7, 0), per_weight), \
     calorie = COALESCE(NULLIF($8, 0), calorie), \
     updated_at = now()";

async fn sparse_update(
    db: impl PgExecutor<'_>,
    key_column: &str,
    key: i64,
    facts: &NutrientFacts,
) -> Result<u64, StoreError> {
    let res = sqlx::query(&format!(
        "UPDATE nutrients SET {SPARSE_SET} WHERE {key_column} = $1 AND deleted_at IS NULL"
    ))
    .bind(key)
    .bind(facts.carbohydrate)
    .bind(facts.protein)
    .bind(facts.saturated_fat)
    .bind(facts.unsaturated_fat)
    .bind(facts.trans_fat)
    .bind(facts.per_weight)
    .bind(facts.calorie)
    .execute(db)
    .await?;
    Ok(res.rows_affected())
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    facts: &NutrientFacts,
) -> Result<(), StoreError> {
    if sparse_update(db, "id", id, facts).await? == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

pub async fn update_by_food(
    db: impl PgExecutor<'_>,
    food_id: i64,
    facts: &NutrientFacts,
) -> Result<(), StoreError> {
    if sparse_update(db, "food_id", food_id, facts).await? == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

/// Soft-deletes the nutrient owned by `food_id`; 0 rows is not an error.
pub async fn delete_by_food(db: impl PgExecutor<'_>, food_id: i64) -> Result<u64, StoreError> {
    let res = sqlx::query(
        r#"
        UPDATE nutrients
        SET deleted_at = now()
        WHERE food_id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(food_id)
    .execute(db)
    .await?;
    Ok(res.rows_affected())
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::foods::repo::{self as foods_repo, NewFood};

    async fn seed_food(pool: &PgPool) -> anyhow::Result<i64> {
        let food = foods_repo::create(
            pool,
            &NewFood {
                category_id: 1,
                brand_id: 1,
                name: "oatmeal".into(),
                weight: 40.0,
            },
        )
        .await?;
        Ok(food.id)
    }

    fn oatmeal_facts() -> NutrientFacts {
        NutrientFacts {
            carbohydrate: 27.0,
            protein: 5.0,
            saturated_fat: 0.5,
            unsaturated_fat: 2.0,
            trans_fat: 0.1,
            per_weight: 40,
            calorie: 150,
        }
    }

    #[sqlx::test]
    async fn create_then_lookup_by_food(pool: PgPool) -> anyhow::Result<()> {
        let food_id = seed_food(&pool).await?;
        let nutrient = create(&pool, food_id, &oatmeal_facts()).await?;
        assert_eq!(nutrient.food_id, food_id);
        assert_eq!(nutrient.calorie, 150);

        let got = get_by_food(&pool, food_id).await?;
        assert_eq!(got.id, nutrient.id);

        let by_id = get(&pool, nutrient.id).await?;
        assert_eq!(by_id.food_id, food_id);
        Ok(())
    }

    #[sqlx::test]
    async fn update_merges_only_non_zero_fields(pool: PgPool) -> anyhow::Result<()> {
        let food_id = seed_food(&pool).await?;
        let nutrient = create(&pool, food_id, &oatmeal_facts()).await?;

        update(
            &pool,
            nutrient.id,
            &NutrientFacts {
                protein: 9.0,
                ..Default::default()
            },
        )
        .await?;

        let got = get(&pool, nutrient.id).await?;
        assert_eq!(got.protein, 9.0);
        assert_eq!(got.carbohydrate, 27.0);
        assert_eq!(got.calorie, 150);
        assert_eq!(got.food_id, food_id);
        assert_eq!(got.created_at, nutrient.created_at);
        Ok(())
    }

    #[sqlx::test]
    async fn update_missing_row_is_not_found(pool: PgPool) -> anyhow::Result<()> {
        let err = update(&pool, 4242, &oatmeal_facts()).await.unwrap_err();
        assert!(matches!(err, crate::error::StoreError::NotFound));
        Ok(())
    }

    #[sqlx::test]
    async fn page_excludes_deleted_rows(pool: PgPool) -> anyhow::Result<()> {
        let first = seed_food(&pool).await?;
        let second = seed_food(&pool).await?;
        create(&pool, first, &oatmeal_facts()).await?;
        create(&pool, second, &oatmeal_facts()).await?;

        assert_eq!(delete_by_food(&pool, first).await?, 1);

        let page = get_page(&pool, 0, 10).await?;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].food_id, second);
        Ok(())
    }
}
