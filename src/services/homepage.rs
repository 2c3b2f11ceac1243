//! Homepage composition from the canonical book views

use std::sync::Arc;

use crate::{
    config::{CatalogConfig, PaginateConfig},
    error::{AppError, AppResult},
    models::{BookColumn, BookSection, HomeSection, SectionListing},
};

use super::{books::BookQueryService, waitlist::WaitlistAggregator};

#[derive(Clone)]
pub struct HomepageService {
    books: BookQueryService,
    waitlist: WaitlistAggregator,
    catalog: Arc<CatalogConfig>,
    paginate: PaginateConfig,
}

impl HomepageService {
    pub fn new(
        books: BookQueryService,
        waitlist: WaitlistAggregator,
        catalog: Arc<CatalogConfig>,
        paginate: PaginateConfig,
    ) -> Self {
        Self { books, waitlist, catalog, paginate }
    }

    /// All four sections, first page of each, `book_home_limit` books apiece
    pub async fn home_sections(&self) -> AppResult<Vec<HomeSection>> {
        let mut sections = Vec::with_capacity(BookSection::ALL.len());
        for section in BookSection::ALL {
            let listing = self.listing(section, self.paginate.book_home_limit, 1).await?;
            sections.push(HomeSection {
                key: section.key().to_string(),
                title: self.catalog.title(section.key()),
                data: listing.into_items(),
            });
        }
        Ok(sections)
    }

    /// One section by key, with the default page size
    pub async fn section(&self, key: &str, page: i64) -> AppResult<SectionListing> {
        let section: BookSection = key.parse().map_err(AppError::NotFound)?;
        self.listing(section, self.paginate.default, page).await
    }

    async fn listing(&self, section: BookSection, limit: i64, page: i64) -> AppResult<SectionListing> {
        let column = match section {
            BookSection::Latest => BookColumn::CreatedAt,
            BookSection::View => BookColumn::CountView,
            BookSection::Rating => BookColumn::AvgStar,
            BookSection::Waiting => {
                let ranked = self.waitlist.ranked_page(limit, page).await?;
                return Ok(SectionListing::Ranked(ranked));
            }
        };
        let books = self.books.ordered_by(column, limit, page).await?;
        Ok(SectionListing::Books(books))
    }
}
