//! Bookshelf server
//!
//! Book sharing catalog backend: filtered and sorted book search, homepage
//! listings and a ranking of books by how many users are waiting for them,
//! served as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
