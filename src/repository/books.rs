//! Books repository: renders a [`BookQuery`] into SQL and runs it.

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::AppResult,
    models::{Book, BookQuery, Predicate},
};

const BOOK_COLUMNS: &str = "id, title, description, author, code, publish_date, avg_star, \
                            total_page, category_id, office_id, count_view, created_at";

/// Escape LIKE wildcards so the keyword matches literally
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_where(builder: &mut QueryBuilder<'static, Postgres>, predicates: &[Predicate]) {
    builder.push(" WHERE 1=1");

    for predicate in predicates {
        match predicate {
            Predicate::In { column, ids } => {
                builder
                    .push(" AND ")
                    .push(column.as_sql())
                    .push(" = ANY(")
                    .push_bind(ids.clone())
                    .push(")");
            }
            Predicate::Contains { columns, needle } => {
                if columns.is_empty() {
                    builder.push(" AND FALSE");
                    continue;
                }
                let pattern = format!("%{}%", escape_like(needle));
                builder.push(" AND (");
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        builder.push(" OR ");
                    }
                    builder
                        .push("CAST(")
                        .push(column.as_sql())
                        .push(" AS TEXT) ILIKE ")
                        .push_bind(pattern.clone());
                }
                builder.push(")");
            }
        }
    }
}

fn count_query(query: &BookQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM books");
    push_where(&mut builder, &query.predicates);
    builder
}

fn select_query(query: &BookQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM books", BOOK_COLUMNS));
    push_where(&mut builder, &query.predicates);

    for (i, order) in query.order.iter().enumerate() {
        builder.push(if i == 0 { " ORDER BY " } else { ", " });
        builder
            .push(order.column.as_sql())
            .push(" ")
            .push(order.direction.as_sql());
    }

    builder
        .push(" LIMIT ")
        .push_bind(query.window.page_size)
        .push(" OFFSET ")
        .push_bind(query.window.offset());
    builder
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Run a listing query and count every row it matches
    pub async fn find(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        tracing::debug!(?query, "Running book query");

        let mut count = count_query(query);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        if total <= query.window.offset() {
            return Ok((Vec::new(), total));
        }

        let mut select = select_query(query);
        let books = select
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }
}
