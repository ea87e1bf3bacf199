use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;

use crate::error::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

/// Sparse update input: an empty name means "not provided".
#[derive(Debug, Default, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: String,
}

pub async fn get(db: impl PgExecutor<'_>, id: i64) -> Result<Category, StoreError> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, created_at, updated_at, deleted_at
        FROM categories
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
) -> Result<Vec<Category>, StoreError> {
    let rows = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, created_at, updated_at, deleted_at
        FROM categories
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

pub async fn create(db: impl PgExecutor<'_>, name: &str) -> Result<Category, StoreError> {
    let row = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (name)
        VALUES ($1)
        RETURNING id, name, created_at, updated_at, deleted_at
        "#,
    )
    .bind(name)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    patch: &CategoryPatch,
) -> Result<(), StoreError> {
    let res = sqlx::query(
        r#"
        UPDATE categories
        SET name = COALESCE(NULLIF($2, ''), name),
            updated_at = now()
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(&patch.name)
    .execute(db)
    .await?;
    if res.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

/// Soft delete. Returns the number of rows marked; 0 means the id was
/// already deleted or never existed, which is not an error.
pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<u64, StoreError> {
    let res = sqlx::query(
        r#"
        UPDATE categories
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

    #[sqlx::test]
    async fn create_assigns_identity_and_timestamps(pool: PgPool) -> anyhow::Result<()> {
        let cat = create(&pool, "grains").await?;
        assert!(cat.id >= 1);
        assert_eq!(cat.name, "grains");
        assert!(cat.deleted_at.is_none());

        let got = get(&pool, cat.id).await?;
        assert_eq!(got.id, cat.id);
        assert_eq!(got.name, "grains");
        Ok(())
    }

    #[sqlx::test]
    async fn update_merges_only_non_zero_fields(pool: PgPool) -> anyhow::Result<()> {
        let cat = create(&pool, "grains").await?;

        update(
            &pool,
            cat.id,
            &CategoryPatch {
                name: "cereals".into(),
            },
        )
        .await?;
        let got = get(&pool, cat.id).await?;
        assert_eq!(got.name, "cereals");
        assert_eq!(got.created_at, cat.created_at);
        assert!(got.updated_at >= cat.updated_at);

        // An empty name is "not provided" and leaves the row as it was.
        update(&pool, cat.id, &CategoryPatch::default()).await?;
        let got = get(&pool, cat.id).await?;
        assert_eq!(got.name, "cereals");
        Ok(())
    }

    #[sqlx::test]
    async fn update_missing_row_is_not_found(pool: PgPool) -> anyhow::Result<()> {
        let err = update(&pool, 4242, &CategoryPatch { name: "x".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
        Ok(())
    }

    #[sqlx::test]
    async fn delete_hides_row_from_reads_and_is_idempotent(pool: PgPool) -> anyhow::Result<()> {
        let cat = create(&pool, "grains").await?;

        assert_eq!(delete(&pool, cat.id).await?, 1);
        assert!(matches!(get(&pool, cat.id).await, Err(StoreError::NotFound)));

        // Already deleted: no rows affected, still not an error.
        assert_eq!(delete(&pool, cat.id).await?, 0);
        assert_eq!(delete(&pool, 4242).await?, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn page_orders_by_id_and_skips_deleted(pool: PgPool) -> anyhow::Result<()> {
        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d", "e"] {
            ids.push(create(&pool, name).await?.id);
        }

        let page = get_page(&pool, 0, 2).await?;
        assert_eq!(page.iter().map(|c| c.id).collect::<Vec<_>>(), &ids[..2]);

        let empty = get_page(&pool, 10, 2).await?;
        assert!(empty.is_empty());

        delete(&pool, ids[0]).await?;
        let page = get_page(&pool, 0, 5).await?;
        assert_eq!(page.iter().map(|c| c.id).collect::<Vec<_>>(), &ids[1..]);
        Ok(())
    }
}
