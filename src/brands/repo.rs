use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;

use crate::error::StoreError;

/// A brand may reference a category, but the link is informational only;
/// nothing forces the category to exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub img_src: String,
    pub category_id: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct NewBrand {
    pub name: String,
    #[serde(default)]
    pub img_src: String,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Sparse update input: zero values mean "not provided". A category link
/// can therefore be changed but never cleared through update.
#[derive(Debug, Default, Deserialize)]
pub struct BrandPatch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub img_src: String,
    #[serde(default)]
    pub category_id: i64,
}

pub async fn get(db: impl PgExecutor<'_>, id: i64) -> Result<Brand, StoreError> {
    sqlx::query_as::<_, Brand>(
        r#"
        SELECT id, name, img_src, category_id, created_at, updated_at, deleted_at
        FROM brands
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
) -> Result<Vec<Brand>, StoreError> {
    let rows = sqlx::query_as::<_, Brand>(
        r#"
        SELECT id, name, img_src, category_id, created_at, updated_at, deleted_at
        FROM brands
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

pub async fn create(db: impl PgExecutor<'_>, new: &NewBrand) -> Result<Brand, StoreError> {
    let row = sqlx::query_as::<_, Brand>(
        r#"
        INSERT INTO brands (name, img_src, category_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, img_src, category_id, created_at, updated_at, deleted_at
        "#,
    )
    .bind(&new.name)
    .bind(&new.img_src)
    .bind(new.category_id)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update(db: impl PgExecutor<'_>, id: i64, patch: &BrandPatch) -> Result<(), StoreError> {
    let res = sqlx::query(
        r#"
        UPDATE brands
        SET name = COALESCE(NULLIF($2, ''), name),
            img_src = COALESCE(NULLIF($3, ''), img_src),
            category_id = COALESCE(NULLIF($4, 0), category_id),
            updated_at = now()
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(&patch.name)
    .bind(&patch.img_src)
    .bind(patch.category_id)
    .execute(db)
    .await?;
    if res.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

/// Soft delete; 0 rows affected is not an error.
pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<u64, StoreError> {
    let res = sqlx::query(
        r#"
        UPDATE brands
        SET deleted_at = now()
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(res.rows_affected())
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    fn acme() -> NewBrand {
        NewBrand {
            name: "acme".into(),
            img_src: "https://img.example/acme.png".into(),
            category_id: None,
        }
    }

    #[sqlx::test]
    async fn create_without_category_link(pool: PgPool) -> anyhow::Result<()> {
        let brand = create(&pool, &acme()).await?;
        assert_eq!(brand.name, "acme");
        assert_eq!(brand.category_id, None);

        let got = get(&pool, brand.id).await?;
        assert_eq!(got.id, brand.id);
        assert_eq!(got.img_src, "https://img.example/acme.png");
        Ok(())
    }

    #[sqlx::test]
    async fn update_merges_only_non_zero_fields(pool: PgPool) -> anyhow::Result<()> {
        let brand = create(&pool, &acme()).await?;

        update(
            &pool,
            brand.id,
            &BrandPatch {
                img_src: "https://img.example/acme-v2.png".into(),
                ..Default::default()
            },
        )
        .await?;

        let got = get(&pool, brand.id).await?;
        assert_eq!(got.name, "acme");
        assert_eq!(got.img_src, "https://img.example/acme-v2.png");
        assert_eq!(got.category_id, None);
        assert_eq!(got.created_at, brand.created_at);
        Ok(())
    }

    #[sqlx::test]
    async fn update_can_set_but_not_clear_category(pool: PgPool) -> anyhow::Result<()> {
        let brand = create(&pool, &acme()).await?;

        update(
            &pool,
            brand.id,
            &BrandPatch {
                category_id: 7,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(get(&pool, brand.id).await?.category_id, Some(7));

        // Zero means "not provided", so the link survives.
        update(&pool, brand.id, &BrandPatch::default()).await?;
        assert_eq!(get(&pool, brand.id).await?.category_id, Some(7));
        Ok(())
    }

    #[sqlx::test]
    async fn delete_is_idempotent_and_hides_the_row(pool: PgPool) -> anyhow::Result<()> {
        let brand = create(&pool, &acme()).await?;

        assert_eq!(delete(&pool, brand.id).await?, 1);
        assert!(matches!(
            get(&pool, brand.id).await,
            Err(StoreError::NotFound)
        ));
        assert_eq!(delete(&pool, brand.id).await?, 0);

        let page = get_page(&pool, 0, 10).await?;
        assert!(page.is_empty());
        Ok(())
    }
}
