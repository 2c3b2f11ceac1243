//! Repository layer for database operations

pub mod books;
pub mod borrows;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookQuery, BorrowStatus, WaitingCount},
};

pub use memory::MemoryStore;

/// Read access to books and borrow requests.
///
/// Every method is one independent round trip; callers joining results of
/// several calls must tolerate data moving in between.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Run a listing query, returning the requested page and the total match count
    async fn find_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)>;

    /// Books with at least one waiting request, most requested first,
    /// ties by ascending book id, at most `limit` entries
    async fn waiting_counts(&self, limit: i64) -> AppResult<Vec<WaitingCount>>;

    /// Distinct ids of books the user has requests for in `status`
    async fn book_ids_for_user(&self, user_id: i32, status: BorrowStatus) -> AppResult<Vec<i32>>;

    /// Check that the backing store answers
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn find_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.books.find(query).await
    }

    async fn waiting_counts(&self, limit: i64) -> AppResult<Vec<WaitingCount>> {
        self.borrows.waiting_counts(limit).await
    }

    async fn book_ids_for_user(&self, user_id: i32, status: BorrowStatus) -> AppResult<Vec<i32>> {
        self.borrows.book_ids_for_user(user_id, status).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
