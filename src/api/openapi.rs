//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "Book sharing catalog search REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::search_books,
        books::home,
        books::section,
        books::waiting,
        // Users
        users::user_books,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::RankedBook,
            crate::models::book::BookColumn,
            crate::models::borrow::BorrowStatus,
            crate::models::page::HomeSection,
            crate::models::query::SearchCriteria,
            crate::models::query::KeywordSearch,
            crate::models::query::SortSpec,
            crate::models::query::SortDirection,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book search and homepage listings"),
        (name = "users", description = "Per-user book listings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
