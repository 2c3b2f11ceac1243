//! Book listing endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Book, HomeSection, PagedResult, RankedBook, SearchCriteria, SectionListing},
    AppState,
};

/// Page selection
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (default: 1)
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<i64>,
}

/// Size of the waitlist ranking
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WaitingParams {
    /// Number of books to rank (default: configured page size)
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

/// Search books with filters, keyword, sort and pagination
#[utoipa::path(
    post,
    path = "/books/search",
    tag = "books",
    request_body = SearchCriteria,
    responses(
        (status = 200, description = "Matching books", body = PagedResult<Book>),
        (status = 400, description = "Unknown sort key, field or invalid page", body = crate::error::ErrorResponse),
        (status = 503, description = "Storage unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> AppResult<Json<PagedResult<Book>>> {
    let page = state.services.books.search(&criteria).await?;
    Ok(Json(page))
}

/// Homepage sections: latest, most viewed, top rated, most waited for
#[utoipa::path(
    get,
    path = "/books/home",
    tag = "books",
    responses(
        (status = 200, description = "Homepage sections", body = Vec<HomeSection>),
        (status = 503, description = "Storage unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<Vec<HomeSection>>> {
    let sections = state.services.homepage.home_sections().await?;
    Ok(Json(sections))
}

/// One homepage section, paginated
#[utoipa::path(
    get,
    path = "/books/sections/{key}",
    tag = "books",
    params(
        ("key" = String, Path, description = "Section key: latest, view, rating or waiting"),
        PageParams
    ),
    responses(
        (status = 200, description = "Section page; waiting items carry waiting_count", body = Object),
        (status = 404, description = "Unknown section", body = crate::error::ErrorResponse)
    )
)]
pub async fn section(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<SectionListing>> {
    params.validate()?;

    let listing = state
        .services
        .homepage
        .section(&key, params.page.unwrap_or(1))
        .await?;
    Ok(Json(listing))
}

/// Books ranked by number of users waiting for them
#[utoipa::path(
    get,
    path = "/books/waiting",
    tag = "books",
    params(WaitingParams),
    responses(
        (status = 200, description = "Ranked books", body = PagedResult<RankedBook>),
        (status = 400, description = "Invalid limit", body = crate::error::ErrorResponse)
    )
)]
pub async fn waiting(
    State(state): State<AppState>,
    Query(params): Query<WaitingParams>,
) -> AppResult<Json<PagedResult<RankedBook>>> {
    params.validate()?;

    let limit = params
        .limit
        .unwrap_or_else(|| state.services.books.default_page_size());
    let ranked = state.services.waitlist.rank_by_waitlist(limit).await?;
    Ok(Json(ranked))
}
