//! Book listing service: criteria translation, search and fixed-order views

use std::sync::Arc;

use crate::{
    config::{CatalogConfig, PaginateConfig},
    error::AppResult,
    models::{
        Book, BookColumn, BookQuery, BorrowStatus, OrderBy, PageWindow, PagedResult, Predicate,
        SearchCriteria,
    },
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct BookQueryService {
    store: Arc<dyn CatalogStore>,
    catalog: Arc<CatalogConfig>,
    paginate: PaginateConfig,
}

impl BookQueryService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        catalog: Arc<CatalogConfig>,
        paginate: PaginateConfig,
    ) -> Self {
        Self { store, catalog, paginate }
    }

    /// Translate search criteria into a query descriptor.
    ///
    /// Condition types missing from the filter registry and empty id sets
    /// are dropped. An unknown sort key or keyword field is an error.
    pub fn build_query(&self, criteria: &SearchCriteria) -> AppResult<BookQuery> {
        let mut predicates = Vec::new();

        for (filter_type, ids) in &criteria.conditions {
            if ids.is_empty() {
                continue;
            }
            match self.catalog.filter_column(filter_type) {
                Some(column) => predicates.push(Predicate::In { column, ids: ids.clone() }),
                None => tracing::debug!(filter_type = %filter_type, "Ignoring unknown filter type"),
            }
        }

        if let Some(search) = &criteria.search {
            let keyword = search.keyword.as_deref().map(str::trim).unwrap_or_default();
            if !keyword.is_empty() {
                let columns = match search.field.as_deref().filter(|f| !f.is_empty()) {
                    Some(field) => vec![self.catalog.search_column(field)?],
                    None => self.catalog.search_fields.clone(),
                };
                predicates.push(Predicate::Contains { columns, needle: keyword.to_string() });
            }
        }

        let sort = criteria.sort.as_ref();
        let column = match sort.and_then(|s| s.field.as_deref()).filter(|f| !f.is_empty()) {
            Some(key) => self.catalog.sort_column(key)?,
            None => BookColumn::CreatedAt,
        };
        let direction = sort.and_then(|s| s.order_by).unwrap_or_default();

        let window = PageWindow::new(criteria.page.unwrap_or(1), self.paginate.default)?;

        Ok(BookQuery::ordered(predicates, OrderBy { column, direction }, window))
    }

    /// Filtered, sorted, paginated book search
    pub async fn search(&self, criteria: &SearchCriteria) -> AppResult<PagedResult<Book>> {
        let query = self.build_query(criteria)?;
        self.run(query).await
    }

    /// Every book ordered by one column, descending, without filters
    pub async fn ordered_by(
        &self,
        column: BookColumn,
        page_size: i64,
        page: i64,
    ) -> AppResult<PagedResult<Book>> {
        let window = PageWindow::new(page, page_size)?;
        self.run(BookQuery::ordered(vec![], OrderBy::desc(column), window))
            .await
    }

    /// Books the user has borrow requests for in `status`, newest first
    pub async fn books_of_user(
        &self,
        user_id: i32,
        status: BorrowStatus,
        page: i64,
    ) -> AppResult<PagedResult<Book>> {
        let window = PageWindow::new(page, self.paginate.default)?;
        let ids = self.store.book_ids_for_user(user_id, status).await?;
        if ids.is_empty() {
            return Ok(PagedResult::empty(window));
        }

        let predicates = vec![Predicate::In { column: BookColumn::Id, ids }];
        self.run(BookQuery::ordered(predicates, OrderBy::desc(BookColumn::CreatedAt), window))
            .await
    }

    async fn run(&self, query: BookQuery) -> AppResult<PagedResult<Book>> {
        let (items, total) = self.store.find_books(&query).await?;
        Ok(PagedResult::new(items, total, query.window))
    }

    pub fn default_page_size(&self) -> i64 {
        self.paginate.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{
            query::{KeywordSearch, SortSpec},
            SortDirection,
        },
        repository::{
            memory::fixtures::{book, in_category, waiting},
            MemoryStore, MockCatalogStore,
        },
    };

    fn service_with(store: MemoryStore, page_size: i64) -> BookQueryService {
        BookQueryService::new(
            Arc::new(store),
            Arc::new(CatalogConfig::default()),
            PaginateConfig { default: page_size, book_home_limit: 4 },
        )
    }

    fn dune_store() -> MemoryStore {
        MemoryStore::new(
            vec![
                in_category(book(1, "Dune"), 3),
                in_category(book(2, "Dune 2"), 5),
                in_category(book(3, "Neuromancer"), 3),
            ],
            vec![],
        )
    }

    fn keyword(keyword: &str) -> Option<KeywordSearch> {
        Some(KeywordSearch { keyword: Some(keyword.to_string()), field: None })
    }

    fn ids(page: &PagedResult<Book>) -> Vec<i32> {
        page.items.iter().map(|b| b.id).collect()
    }

    #[tokio::test]
    async fn test_category_and_keyword_are_combined() {
        let criteria = SearchCriteria {
            conditions: [("category".to_string(), vec![3])].into_iter().collect(),
            search: keyword("dune"),
            sort: Some(SortSpec { field: Some("latest".to_string()), order_by: None }),
            page: Some(1),
        };

        let page = service_with(dune_store(), 10).search(&criteria).await.unwrap();
        assert_eq!(ids(&page), vec![1]);
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_ids_within_one_filter_type_are_alternatives() {
        let criteria = SearchCriteria {
            conditions: [("category".to_string(), vec![3, 5])].into_iter().collect(),
            ..Default::default()
        };

        let page = service_with(dune_store(), 10).search(&criteria).await.unwrap();
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_unknown_filter_type_is_ignored() {
        let service = service_with(dune_store(), 10);
        let with_unknown = SearchCriteria {
            conditions: [
                ("category".to_string(), vec![3]),
                ("publisher".to_string(), vec![42]),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };
        let without = SearchCriteria {
            conditions: [("category".to_string(), vec![3])].into_iter().collect(),
            ..Default::default()
        };

        let a = service.search(&with_unknown).await.unwrap();
        let b = service.search(&without).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(
            service.build_query(&with_unknown).unwrap(),
            service.build_query(&without).unwrap()
        );
    }

    #[tokio::test]
    async fn test_empty_id_set_does_not_filter() {
        let criteria = SearchCriteria {
            conditions: [("office".to_string(), vec![])].into_iter().collect(),
            ..Default::default()
        };

        let page = service_with(dune_store(), 10).search(&criteria).await.unwrap();
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_unknown_sort_key_fails() {
        let criteria = SearchCriteria {
            sort: Some(SortSpec { field: Some("popularity".to_string()), order_by: None }),
            ..Default::default()
        };

        let err = service_with(dune_store(), 10).search(&criteria).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidSortKey(key) if key == "popularity"));
    }

    #[tokio::test]
    async fn test_keyword_restricted_to_field() {
        let mut store_books = vec![book(1, "Herbert"), book(2, "Dune")];
        store_books[1].author = Some("Frank Herbert".to_string());
        let service = service_with(MemoryStore::new(store_books, vec![]), 10);

        let criteria = SearchCriteria {
            search: Some(KeywordSearch {
                keyword: Some("herbert".to_string()),
                field: Some("author".to_string()),
            }),
            ..Default::default()
        };
        let page = service.search(&criteria).await.unwrap();
        assert_eq!(ids(&page), vec![2]);

        let anywhere = SearchCriteria { search: keyword("herbert"), ..Default::default() };
        assert_eq!(service.search(&anywhere).await.unwrap().total, 2);
    }

    #[test]
    fn test_keyword_field_outside_searchable_set_fails() {
        let criteria = SearchCriteria {
            search: Some(KeywordSearch {
                keyword: Some("3".to_string()),
                field: Some("category_id".to_string()),
            }),
            ..Default::default()
        };

        let err = service_with(dune_store(), 10).build_query(&criteria).unwrap_err();
        assert!(matches!(err, AppError::InvalidSearchField(_)));
    }

    #[test]
    fn test_blank_keyword_adds_no_predicate() {
        let criteria = SearchCriteria { search: keyword("   "), ..Default::default() };
        let query = service_with(dune_store(), 10).build_query(&criteria).unwrap();
        assert!(query.predicates.is_empty());
    }

    #[test]
    fn test_default_order_is_newest_first() {
        let query = service_with(dune_store(), 10)
            .build_query(&SearchCriteria::default())
            .unwrap();
        assert_eq!(query.order[0], OrderBy::desc(BookColumn::CreatedAt));
        assert_eq!(query.window, PageWindow::new(1, 10).unwrap());
    }

    #[tokio::test]
    async fn test_sort_direction_is_honoured() {
        let criteria = SearchCriteria {
            sort: Some(SortSpec {
                field: Some("title".to_string()),
                order_by: Some(SortDirection::Asc),
            }),
            ..Default::default()
        };

        let page = service_with(dune_store(), 10).search(&criteria).await.unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_page_beyond_last_is_empty_with_total() {
        let criteria = SearchCriteria { page: Some(99), ..Default::default() };

        let page = service_with(dune_store(), 10).search(&criteria).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 99);
        assert_eq!(page.page_size, 10);
    }

    #[tokio::test]
    async fn test_total_is_stable_across_pages() {
        let books = (1..=7).map(|id| book(id, &format!("Book {}", id))).collect();
        let service = service_with(MemoryStore::new(books, vec![]), 3);

        let mut seen = Vec::new();
        for page in 1..=4 {
            let criteria = SearchCriteria { page: Some(page), ..Default::default() };
            let result = service.search(&criteria).await.unwrap();
            assert_eq!(result.total, 7);
            assert!(result.items.len() as i64 <= result.page_size);
            seen.extend(ids(&result));
        }
        assert_eq!(seen, vec![7, 6, 5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected() {
        let criteria = SearchCriteria { page: Some(0), ..Default::default() };
        let err = service_with(dune_store(), 10).search(&criteria).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_books_of_user() {
        let store = MemoryStore::new(
            vec![book(1, "Dune"), book(2, "Emma"), book(3, "Ulysses")],
            vec![waiting(7, 1), waiting(7, 3), waiting(8, 2)],
        );
        let service = service_with(store, 10);

        let page = service.books_of_user(7, BorrowStatus::Waiting, 1).await.unwrap();
        assert_eq!(ids(&page), vec![3, 1]);

        let none = service.books_of_user(7, BorrowStatus::Approved, 1).await.unwrap();
        assert!(none.items.is_empty());
        assert_eq!(none.total, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_propagated() {
        let mut store = MockCatalogStore::new();
        store
            .expect_find_books()
            .returning(|_| Err(AppError::StorageUnavailable(sqlx::Error::PoolTimedOut)));

        let service = BookQueryService::new(
            Arc::new(store),
            Arc::new(CatalogConfig::default()),
            PaginateConfig::default(),
        );

        let err = service.search(&SearchCriteria::default()).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
