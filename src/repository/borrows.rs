//! Borrow logs repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{borrow_log::BOOK_UNAVAILABLE, BorrowLog, NewBorrow},
};

use super::BorrowStore;

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowStore for BorrowsRepository {
    async fn list(&self) -> AppResult<Vec<BorrowLog>> {
        let logs = sqlx::query_as::<_, BorrowLog>("SELECT * FROM borrow_logs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(logs)
    }

    async fn borrow(&self, borrow: &NewBorrow) -> AppResult<BorrowLog> {
        let mut tx = self.pool.begin().await?;

        // The row lock taken here serializes concurrent borrows of the same
        // book; a second borrower of the last copy sees stock = 0 and no row.
        let decremented = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE books
            SET stock = stock - 1, updated_at = NOW()
            WHERE id = $1 AND stock > 0
            RETURNING id
            "#,
        )
        .bind(borrow.book_id)
        .fetch_optional(&mut *tx)
        .await?;

        if decremented.is_none() {
            tx.rollback().await?;
            return Err(AppError::BadRequest(BOOK_UNAVAILABLE.to_string()));
        }

        let log = sqlx::query_as::<_, BorrowLog>(
            r#"
            INSERT INTO borrow_logs (user_id, book_id, borrow_date, latitude, longitude, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&borrow.user_id)
        .bind(borrow.book_id)
        .bind(borrow.borrow_date)
        .bind(borrow.latitude)
        .bind(borrow.longitude)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(log)
    }
}
