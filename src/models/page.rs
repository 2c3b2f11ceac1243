//! Paginated results and homepage sections

use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

use super::book::{Book, RankedBook};
use super::query::PageWindow;

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PagedResult<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub items: Vec<T>,
    /// Total number of matching rows, independent of the page requested
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: i64,
    pub page_size: i64,
}

impl<T> PagedResult<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, total: i64, window: PageWindow) -> Self {
        Self {
            items,
            total,
            page: window.page,
            page_size: window.page_size,
        }
    }

    pub fn empty(window: PageWindow) -> Self {
        Self::new(Vec::new(), 0, window)
    }
}

/// Canonical homepage views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSection {
    Latest,
    View,
    Rating,
    Waiting,
}

impl BookSection {
    /// Homepage order
    pub const ALL: [BookSection; 4] = [
        BookSection::Latest,
        BookSection::View,
        BookSection::Rating,
        BookSection::Waiting,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            BookSection::Latest => "latest",
            BookSection::View => "view",
            BookSection::Rating => "rating",
            BookSection::Waiting => "waiting",
        }
    }
}

impl FromStr for BookSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookSection::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| format!("unknown book section '{}'", s))
    }
}

/// Listing of a single section; the waiting section carries counts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionListing {
    Books(PagedResult<Book>),
    Ranked(PagedResult<RankedBook>),
}

impl SectionListing {
    /// Items of the page, without pagination metadata
    pub fn into_items(self) -> SectionItems {
        match self {
            SectionListing::Books(page) => SectionItems::Books(page.items),
            SectionListing::Ranked(page) => SectionItems::Ranked(page.items),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionItems {
    Books(Vec<Book>),
    Ranked(Vec<RankedBook>),
}

/// Homepage block: one canonical view with its display title
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HomeSection {
    pub key: String,
    pub title: String,
    #[schema(value_type = Vec<Object>)]
    pub data: SectionItems,
}
