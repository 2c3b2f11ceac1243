//! Waitlist ranking: books ordered by how many users are waiting for them.
//!
//! Two independent store calls joined here by book id: the per-book waiting
//! counts, then the book rows for the top ids. They are not run in one
//! transaction, so a request can be added or approved in between; a book
//! whose count is no longer known is reported with a count of zero.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, BookColumn, BookQuery, OrderBy, PageWindow, PagedResult, Predicate, RankedBook,
        WaitingCount,
    },
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct WaitlistAggregator {
    store: Arc<dyn CatalogStore>,
}

impl WaitlistAggregator {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Top `limit` books by number of waiting requests
    pub async fn rank_by_waitlist(&self, limit: i64) -> AppResult<PagedResult<RankedBook>> {
        self.ranked_page(limit, 1).await
    }

    /// Page `page` of the top `limit` books, `limit` books per page
    pub async fn ranked_page(&self, limit: i64, page: i64) -> AppResult<PagedResult<RankedBook>> {
        if limit < 1 {
            return Err(AppError::Validation(format!("limit must be >= 1, got {}", limit)));
        }
        let window = PageWindow::new(page, limit)?;

        let counts = self.store.waiting_counts(limit).await?;
        if counts.is_empty() {
            return Ok(PagedResult::empty(window));
        }

        let ids = counts.iter().map(|c| c.book_id).collect();
        let query = BookQuery::ordered(
            vec![Predicate::In { column: BookColumn::Id, ids }],
            OrderBy::asc(BookColumn::Id),
            window,
        );
        let (books, total) = self.store.find_books(&query).await?;

        Ok(PagedResult::new(attach_counts(books, &counts), total, window))
    }
}

/// Pair each book with its count and put them back in ranking order
fn attach_counts(books: Vec<Book>, counts: &[WaitingCount]) -> Vec<RankedBook> {
    let rank: HashMap<i32, (usize, i64)> = counts
        .iter()
        .enumerate()
        .map(|(position, c)| (c.book_id, (position, c.count_waiting)))
        .collect();

    let mut ranked: Vec<(usize, RankedBook)> = books
        .into_iter()
        .map(|book| match rank.get(&book.id) {
            Some(&(position, waiting_count)) => (position, RankedBook { book, waiting_count }),
            None => {
                tracing::warn!(book_id = book.id, "No waiting count for ranked book, using 0");
                (usize::MAX, RankedBook { book, waiting_count: 0 })
            }
        })
        .collect();
    ranked.sort_by_key(|(position, _)| *position);

    ranked.into_iter().map(|(_, book)| book).collect()
}
