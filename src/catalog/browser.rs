// Storefront Core - Bookstore catalog, inquiry and quiz client
// Copyright (C) 2025 Storefront Core contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Catalog page state
//!
//! [`CatalogBrowser`] is the books page: filter state, the current page of books,
//! and the category/author option lists. Every state change refetches; nothing
//! is cached between loads.
//!
//! # Load behavior
//! - Books, categories and authors are requested together
//! - If any of the three fails, all lists are emptied and `total_pages` is 1
//! - A failed load is returned to the caller but never leaves stale data behind
//!
//! [`HomeShowcase`] is the landing page: the first 50 books plus active
//! categories, with featured and new releases picked out by flag.

use crate::api::authors::Author;
use crate::api::books::{Book, PagedResult};
use crate::api::categories::Category;
use crate::api::client::StorefrontClient;
use crate::catalog::query::{page_window, CatalogQuery, ALL_SENTINEL};
use crate::error::Result;
use futures_util::future::{try_join, try_join3};

/// Number of books the landing page loads
pub const SHOWCASE_SIZE: u32 = 50;

/// Books page state
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    client: StorefrontClient,
    query: CatalogQuery,
    books: Vec<Book>,
    categories: Vec<Category>,
    authors: Vec<Author>,
    total_pages: u32,
}

impl CatalogBrowser {
    pub fn new(client: StorefrontClient) -> Self {
        Self::with_query(client, CatalogQuery::default())
    }

    /// Start from an existing query, e.g. a category link from the home page
    pub fn with_query(client: StorefrontClient, query: CatalogQuery) -> Self {
        Self {
            client,
            query,
            books: Vec::new(),
            categories: Vec::new(),
            authors: Vec::new(),
            total_pages: 1,
        }
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn current_page(&self) -> u32 {
        self.query.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Page buttons to show around the current page
    pub fn page_window(&self) -> Vec<u32> {
        page_window(self.query.page, self.total_pages)
    }

    /// Fetch the current page together with the filter option lists
    ///
    /// # Errors
    /// Returns the first failure; the state is already reset to empty by then
    pub async fn load(&mut self) -> Result<()> {
        tracing::debug!(page = self.query.page, "loading catalog page");

        let fetched = try_join3(
            self.client.get_books(&self.query),
            self.client.get_categories(),
            self.client.get_authors(),
        )
        .await;

        match fetched {
            Ok((page, categories, authors)) => {
                self.apply_page(page);
                self.categories = categories;
                self.authors = authors;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog load failed, showing empty catalog");
                self.books.clear();
                self.categories.clear();
                self.authors.clear();
                self.total_pages = 1;
                Err(e)
            }
        }
    }

    fn apply_page(&mut self, page: PagedResult<Book>) {
        self.total_pages = page.total_pages(self.query.page_size);
        self.books = page.items;
    }

    /// Submit a search; resets to the first page
    pub async fn search(&mut self, term: &str) -> Result<()> {
        self.query.search_term = Some(term.to_string());
        self.query.page = 1;
        self.load().await
    }

    /// Select a category id, or `all`; resets to the first page
    pub async fn set_category(&mut self, category_id: &str) -> Result<()> {
        self.query.category_id = Some(category_id.to_string());
        self.query.page = 1;
        self.load().await
    }

    /// Select an author id, or `all`; resets to the first page
    pub async fn set_author(&mut self, author_id: &str) -> Result<()> {
        self.query.author_id = Some(author_id.to_string());
        self.query.page = 1;
        self.load().await
    }

    /// Drop all filters and go back to the first page
    pub async fn reset_filters(&mut self) -> Result<()> {
        self.query.search_term = None;
        self.query.category_id = Some(ALL_SENTINEL.to_string());
        self.query.author_id = Some(ALL_SENTINEL.to_string());
        self.query.page = 1;
        self.load().await
    }

    /// Jump to a page; pages past the end are requested as-is
    pub async fn go_to_page(&mut self, page: u32) -> Result<()> {
        self.query.page = page.max(1);
        self.load().await
    }

    /// Next page, if there is one; returns whether the page changed
    pub async fn next_page(&mut self) -> Result<bool> {
        if self.query.page >= self.total_pages {
            return Ok(false);
        }
        self.query.page += 1;
        self.load().await?;
        Ok(true)
    }

    /// Previous page, if there is one; returns whether the page changed
    pub async fn prev_page(&mut self) -> Result<bool> {
        if self.query.page <= 1 {
            return Ok(false);
        }
        self.query.page -= 1;
        self.load().await?;
        Ok(true)
    }
}

/// Landing page content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeShowcase {
    pub books: Vec<Book>,
    pub featured: Vec<Book>,
    pub new_releases: Vec<Book>,
    pub categories: Vec<Category>,
}

impl HomeShowcase {
    /// Fetch the first books and the active categories
    pub async fn load(client: &StorefrontClient) -> Result<Self> {
        let query = CatalogQuery::default().page_size(SHOWCASE_SIZE);
        let (page, categories) = try_join(client.get_books(&query), client.get_categories()).await?;

        Ok(Self::from_books(page.items, categories))
    }

    /// Like [`HomeShowcase::load`], but a failure yields an empty showcase
    pub async fn load_or_empty(client: &StorefrontClient) -> Self {
        match Self::load(client).await {
            Ok(showcase) => showcase,
            Err(e) => {
                tracing::warn!(error = %e, "home showcase load failed");
                Self::default()
            }
        }
    }

    pub fn from_books(books: Vec<Book>, categories: Vec<Category>) -> Self {
        let featured = books.iter().filter(|b| b.is_featured).cloned().collect();
        let new_releases = books.iter().filter(|b| b.is_new_release).cloned().collect();

        Self {
            books,
            featured,
            new_releases,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::storage::SessionStore;

    async fn offline_client() -> StorefrontClient {
        let session = SessionStore::in_memory().await.unwrap();
        // Port 9 (discard) on loopback refuses connections immediately
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9/api")
            .timeout(std::time::Duration::from_secs(2))
            .build();
        StorefrontClient::with_config(session, config).unwrap()
    }

    #[test]
    fn test_showcase_filters_by_flag() {
        let books = vec![
            Book {
                id: 1,
                is_featured: true,
                ..Default::default()
            },
            Book {
                id: 2,
                is_new_release: true,
                ..Default::default()
            },
            Book {
                id: 3,
                is_featured: true,
                is_new_release: true,
                ..Default::default()
            },
        ];

        let showcase = HomeShowcase::from_books(books, Vec::new());
        let ids = |v: &[Book]| v.iter().map(|b| b.id).collect::<Vec<_>>();

        assert_eq!(ids(&showcase.featured), vec![1, 3]);
        assert_eq!(ids(&showcase.new_releases), vec![2, 3]);
        assert_eq!(showcase.books.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_load_resets_state() {
        let mut browser = CatalogBrowser::new(offline_client().await);
        browser.books.push(Book::default());
        browser.total_pages = 7;

        assert!(browser.go_to_page(3).await.is_err());
        assert!(browser.books().is_empty());
        assert!(browser.categories().is_empty());
        assert!(browser.authors().is_empty());
        assert_eq!(browser.total_pages(), 1);
        assert_eq!(browser.current_page(), 3);
    }

    #[tokio::test]
    async fn test_filter_change_resets_page() {
        let mut browser = CatalogBrowser::new(offline_client().await);
        browser.query.page = 4;

        let _ = browser.set_category("2").await;
        assert_eq!(browser.current_page(), 1);
        assert_eq!(browser.query().category_id.as_deref(), Some("2"));

        browser.query.page = 4;
        let _ = browser.search("عربي").await;
        assert_eq!(browser.current_page(), 1);
    }

    #[tokio::test]
    async fn test_prev_on_first_page_is_noop() {
        let mut browser = CatalogBrowser::new(offline_client().await);
        assert!(!browser.prev_page().await.unwrap());
        assert!(!browser.next_page().await.unwrap());
    }

    #[tokio::test]
    async fn test_showcase_load_or_empty() {
        let showcase = HomeShowcase::load_or_empty(&offline_client().await).await;
        assert_eq!(showcase, HomeShowcase::default());
    }
}
