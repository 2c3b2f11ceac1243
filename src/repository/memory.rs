//! In-process catalog store.
//!
//! Evaluates the same [`BookQuery`] descriptors as the PostgreSQL repository
//! over plain vectors. Used by the test suites and for local demos without a
//! database.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{
        Book, BookColumn, BookQuery, BorrowRecord, BorrowStatus, OrderBy, Predicate,
        SortDirection, WaitingCount,
    },
};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    books: Vec<Book>,
    borrows: Vec<BorrowRecord>,
}

impl MemoryStore {
    pub fn new(books: Vec<Book>, borrows: Vec<BorrowRecord>) -> Self {
        Self { books, borrows }
    }
}

/// Integer value of a column, for membership tests
fn column_id(book: &Book, column: BookColumn) -> Option<i32> {
    match column {
        BookColumn::Id => Some(book.id),
        BookColumn::TotalPage => book.total_page,
        BookColumn::CategoryId => book.category_id,
        BookColumn::OfficeId => book.office_id,
        BookColumn::CountView => Some(book.count_view),
        _ => None,
    }
}

/// Text rendering of a column, as `CAST(column AS TEXT)` would give it
fn column_text(book: &Book, column: BookColumn) -> Option<String> {
    match column {
        BookColumn::Title => Some(book.title.clone()),
        BookColumn::Description => book.description.clone(),
        BookColumn::Author => book.author.clone(),
        BookColumn::Code => book.code.clone(),
        BookColumn::PublishDate => book.publish_date.map(|d| d.to_string()),
        BookColumn::AvgStar => Some(book.avg_star.to_string()),
        BookColumn::CreatedAt => Some(book.created_at.to_string()),
        other => column_id(book, other).map(|v| v.to_string()),
    }
}

fn compare_column(a: &Book, b: &Book, column: BookColumn) -> Ordering {
    match column {
        BookColumn::Id => a.id.cmp(&b.id),
        BookColumn::Title => a.title.cmp(&b.title),
        BookColumn::Description => a.description.cmp(&b.description),
        BookColumn::Author => a.author.cmp(&b.author),
        BookColumn::Code => a.code.cmp(&b.code),
        BookColumn::PublishDate => a.publish_date.cmp(&b.publish_date),
        BookColumn::AvgStar => a.avg_star.total_cmp(&b.avg_star),
        BookColumn::TotalPage => a.total_page.cmp(&b.total_page),
        BookColumn::CategoryId => a.category_id.cmp(&b.category_id),
        BookColumn::OfficeId => a.office_id.cmp(&b.office_id),
        BookColumn::CountView => a.count_view.cmp(&b.count_view),
        BookColumn::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn matches(book: &Book, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::In { column, ids } => {
            column_id(book, *column).is_some_and(|value| ids.contains(&value))
        }
        Predicate::Contains { columns, needle } => {
            let needle = needle.to_lowercase();
            columns.iter().any(|column| {
                column_text(book, *column)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        }
    }
}

fn compare(a: &Book, b: &Book, order: &[OrderBy]) -> Ordering {
    order
        .iter()
        .map(|o| {
            let ord = compare_column(a, b, o.column);
            match o.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let mut found: Vec<&Book> = self
            .books
            .iter()
            .filter(|book| query.predicates.iter().all(|p| matches(book, p)))
            .collect();
        found.sort_by(|a, b| compare(a, b, &query.order));

        let total = found.len() as i64;
        let page = found
            .into_iter()
            .skip(query.window.offset() as usize)
            .take(query.window.page_size as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn waiting_counts(&self, limit: i64) -> AppResult<Vec<WaitingCount>> {
        let mut per_book: BTreeMap<i32, i64> = BTreeMap::new();
        for record in &self.borrows {
            let known = self.books.iter().any(|b| b.id == record.book_id);
            if record.status == BorrowStatus::Waiting && known {
                *per_book.entry(record.book_id).or_default() += 1;
            }
        }

        let mut counts: Vec<WaitingCount> = per_book
            .into_iter()
            .map(|(book_id, count_waiting)| WaitingCount { book_id, count_waiting })
            .collect();
        // BTreeMap iteration is already by ascending id, so a stable sort keeps the tie-break
        counts.sort_by(|a, b| b.count_waiting.cmp(&a.count_waiting));
        counts.truncate(limit.max(0) as usize);

        Ok(counts)
    }

    async fn book_ids_for_user(&self, user_id: i32, status: BorrowStatus) -> AppResult<Vec<i32>> {
        let mut ids: Vec<i32> = self
            .borrows
            .iter()
            .filter(|r| r.user_id == user_id && r.status == status)
            .map(|r| r.book_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
