//! Search criteria as received from callers, and the explicit query
//! descriptor they are translated into before anything touches storage.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::book::BookColumn;
use crate::error::{AppError, AppResult};

/// Sort direction, read in any case (`asc`, `DESC`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(format!("unknown sort direction '{}', expected asc or desc", s))
        }
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Free-text part of a search
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct KeywordSearch {
    pub keyword: Option<String>,
    /// Restrict the keyword to this column instead of every searchable one
    pub field: Option<String>,
}

/// Requested ordering, by logical sort key
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SortSpec {
    pub field: Option<String>,
    pub order_by: Option<SortDirection>,
}

/// Book search request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchCriteria {
    /// Filter type (e.g. `category`, `office`) to accepted ids
    #[serde(default)]
    #[schema(value_type = Object, example = json!({"category": [3]}))]
    pub conditions: IndexMap<String, Vec<i32>>,
    #[serde(default)]
    pub search: Option<KeywordSearch>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    /// 1-indexed page number (default: 1)
    #[serde(default)]
    pub page: Option<i64>,
}

/// One restriction on the books table. Predicates in a query are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Column value is one of `ids`
    In { column: BookColumn, ids: Vec<i32> },
    /// Any of `columns` contains `needle`, ignoring case
    Contains { columns: Vec<BookColumn>, needle: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: BookColumn,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(column: BookColumn) -> Self {
        Self { column, direction: SortDirection::Asc }
    }

    pub fn desc(column: BookColumn) -> Self {
        Self { column, direction: SortDirection::Desc }
    }
}

/// 1-indexed page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub page_size: i64,
}

impl PageWindow {
    pub fn new(page: i64, page_size: i64) -> AppResult<Self> {
        if page < 1 {
            return Err(AppError::Validation(format!("page must be >= 1, got {}", page)));
        }
        if page_size < 1 {
            return Err(AppError::Validation(format!(
                "page size must be >= 1, got {}",
                page_size
            )));
        }
        // Rejects pages whose offset would not fit in an i64
        (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| AppError::Validation(format!("page {} is out of range", page)))?;
        Ok(Self { page, page_size })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Complete description of one book listing query, executed once by a store
#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    pub predicates: Vec<Predicate>,
    pub order: Vec<OrderBy>,
    pub window: PageWindow,
}

impl BookQuery {
    /// Orders by `primary`, then by id so pages never overlap on ties
    pub fn ordered(predicates: Vec<Predicate>, primary: OrderBy, window: PageWindow) -> Self {
        let mut order = vec![primary];
        if primary.column != BookColumn::Id {
            order.push(OrderBy::asc(BookColumn::Id));
        }
        Self { predicates, order, window }
    }
}
