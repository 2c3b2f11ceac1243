//! User-related book listings

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Book, BorrowStatus, PagedResult},
    AppState,
};

use super::books::PageParams;

/// Books a user has borrow requests for, by request status
#[utoipa::path(
    get,
    path = "/users/{id}/books/{status}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("status" = BorrowStatus, Path, description = "waiting, approved, rejected or returned"),
        PageParams
    ),
    responses(
        (status = 200, description = "Books of the user", body = PagedResult<Book>),
        (status = 400, description = "Invalid status or page", body = crate::error::ErrorResponse)
    )
)]
pub async fn user_books(
    State(state): State<AppState>,
    Path((user_id, status)): Path<(i32, BorrowStatus)>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PagedResult<Book>>> {
    params.validate()?;

    let page = state
        .services
        .books
        .books_of_user(user_id, status, params.page.unwrap_or(1))
        .await?;
    Ok(Json(page))
}
