//! Book model and the closed set of book columns usable in queries

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book row from the `books` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub code: Option<String>,
    pub publish_date: Option<NaiveDate>,
    /// Average review rating
    pub avg_star: f64,
    pub total_page: Option<i32>,
    pub category_id: Option<i32>,
    /// Branch office holding the book
    pub office_id: Option<i32>,
    pub count_view: i32,
    pub created_at: DateTime<Utc>,
}

/// Book decorated with the number of users currently waiting for it.
///
/// Only produced by the waitlist ranking; the count is computed on read.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RankedBook {
    #[serde(flatten)]
    pub book: Book,
    pub waiting_count: i64,
}

/// Physical columns of the `books` table.
///
/// Registries and requests name columns through this enum, so only these
/// identifiers can ever be written into SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookColumn {
    Id,
    Title,
    Description,
    Author,
    Code,
    PublishDate,
    AvgStar,
    TotalPage,
    CategoryId,
    OfficeId,
    CountView,
    CreatedAt,
}

impl BookColumn {
    pub fn as_sql(&self) -> &'static str {
        match self {
            BookColumn::Id => "id",
            BookColumn::Title => "title",
            BookColumn::Description => "description",
            BookColumn::Author => "author",
            BookColumn::Code => "code",
            BookColumn::PublishDate => "publish_date",
            BookColumn::AvgStar => "avg_star",
            BookColumn::TotalPage => "total_page",
            BookColumn::CategoryId => "category_id",
            BookColumn::OfficeId => "office_id",
            BookColumn::CountView => "count_view",
            BookColumn::CreatedAt => "created_at",
        }
    }
}

impl FromStr for BookColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(BookColumn::Id),
            "title" => Ok(BookColumn::Title),
            "description" => Ok(BookColumn::Description),
            "author" => Ok(BookColumn::Author),
            "code" => Ok(BookColumn::Code),
            "publish_date" => Ok(BookColumn::PublishDate),
            "avg_star" => Ok(BookColumn::AvgStar),
            "total_page" => Ok(BookColumn::TotalPage),
            "category_id" => Ok(BookColumn::CategoryId),
            "office_id" => Ok(BookColumn::OfficeId),
            "count_view" => Ok(BookColumn::CountView),
            "created_at" => Ok(BookColumn::CreatedAt),
            other => Err(format!("unknown book column '{}'", other)),
        }
    }
}

impl std::fmt::Display for BookColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}
