//! Data models for the bookshelf server

pub mod book;
pub mod borrow;
pub mod page;
pub mod query;

// Re-export commonly used types
pub use book::{Book, BookColumn, RankedBook};
pub use borrow::{BorrowRecord, BorrowStatus, WaitingCount};
pub use page::{BookSection, HomeSection, PagedResult, SectionItems, SectionListing};
pub use query::{BookQuery, OrderBy, PageWindow, Predicate, SearchCriteria, SortDirection};
