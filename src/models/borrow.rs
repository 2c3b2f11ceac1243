//! Borrow requests linking users to books (`book_user` table)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Status of a borrow request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum BorrowStatus {
    /// User is queued for a book that is currently unavailable
    Waiting = 1,
    Approved = 2,
    Rejected = 3,
    Returned = 4,
}

impl From<BorrowStatus> for i16 {
    fn from(s: BorrowStatus) -> Self {
        s as i16
    }
}

/// One borrow request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub user_id: i32,
    pub book_id: i32,
    pub status: BorrowStatus,
}

/// Number of waiting requests for one book
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct WaitingCount {
    pub book_id: i32,
    pub count_waiting: i64,
}
