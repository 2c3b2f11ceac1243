//! Business logic services

pub mod books;
pub mod homepage;
pub mod waitlist;

use std::sync::Arc;

use crate::{config::AppConfig, repository::CatalogStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn CatalogStore>,
    pub books: books::BookQueryService,
    pub waitlist: waitlist::WaitlistAggregator,
    pub homepage: homepage::HomepageService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>, config: &AppConfig) -> Self {
        let catalog = Arc::new(config.catalog.clone());
        let books = books::BookQueryService::new(store.clone(), catalog.clone(), config.paginate);
        let waitlist = waitlist::WaitlistAggregator::new(store.clone());
        let homepage = homepage::HomepageService::new(
            books.clone(),
            waitlist.clone(),
            catalog,
            config.paginate,
        );

        Self {
            store,
            books,
            waitlist,
            homepage,
        }
    }
}
