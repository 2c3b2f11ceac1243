//! Borrow requests repository (`book_user` table)

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{BorrowStatus, WaitingCount},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Per-book count of waiting requests, most requested first
    pub async fn waiting_counts(&self, limit: i64) -> AppResult<Vec<WaitingCount>> {
        let counts = sqlx::query_as::<_, WaitingCount>(
            r#"
            SELECT bu.book_id, COUNT(bu.user_id) AS count_waiting
            FROM book_user bu
            JOIN books b ON b.id = bu.book_id
            WHERE bu.status = $1
            GROUP BY bu.book_id
            ORDER BY count_waiting DESC, bu.book_id ASC
            LIMIT $2
            "#,
        )
        .bind(i16::from(BorrowStatus::Waiting))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Ids of books the user has requests for with the given status
    pub async fn book_ids_for_user(&self, user_id: i32, status: BorrowStatus) -> AppResult<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT DISTINCT book_id
            FROM book_user
            WHERE user_id = $1 AND status = $2
            ORDER BY book_id
            "#,
        )
        .bind(user_id)
        .bind(i16::from(status))
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
