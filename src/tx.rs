use std::future::Future;
use std::pin::Pin;

use sqlx::{PgPool, Postgres, Transaction};

use crate::error::StoreError;

/// Future returned by a unit of work while it borrows the session.
pub type TxFuture<'t, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 't>>;

/// Runs `work` inside a single transaction: commits when it returns `Ok`,
/// rolls back and propagates the error otherwise. Writes that must land
/// together go through one `run` call on the same session.
pub async fn run<T, F>(db: &PgPool, work: F) -> Result<T, StoreError>
where
    F: for<'t> FnOnce(&'t mut Transaction<'static, Postgres>) -> TxFuture<'t, T>,
{
    let mut tx = db.begin().await?;
    match work(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tx.rollback().await.ok();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::{PgPool, Postgres, Transaction};

    use super::run;
    use crate::error::StoreError;

    #[sqlx::test]
    async fn commits_all_writes_on_success(pool: PgPool) -> anyhow::Result<()> {
        run(&pool, |tx: &mut Transaction<'static, Postgres>| {
            Box::pin(async move {
                sqlx::query("INSERT INTO categories (name) VALUES ($1)")
                    .bind("grains")
                    .execute(&mut **tx)
                    .await?;
                sqlx::query("INSERT INTO categories (name) VALUES ($1)")
                    .bind("dairy")
                    .execute(&mut **tx)
                    .await?;
                Ok(())
            })
        })
        .await?;

        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM categories")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 2);
        Ok(())
    }

    #[sqlx::test]
    async fn rolls_back_every_write_on_failure(pool: PgPool) -> anyhow::Result<()> {
        let result: Result<(), StoreError> = run(&pool, |tx: &mut Transaction<'static, Postgres>| {
            Box::pin(async move {
                sqlx::query("INSERT INTO categories (name) VALUES ($1)")
                    .bind("doomed")
                    .execute(&mut **tx)
                    .await?;
                Err(StoreError::Inconsistent("forced failure"))
            })
        })
        .await;

        assert!(matches!(result, Err(StoreError::Inconsistent(_))));
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM categories")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 0);
        Ok(())
    }
}
