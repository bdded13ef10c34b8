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


//! Book list query parameters and pagination arithmetic

use serde::{Deserialize, Serialize};

/// Filter value meaning "no filter"
pub const ALL_SENTINEL: &str = "all";

/// Storefront page size for the catalog grid
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Maximum number of page buttons shown at once
pub const PAGE_WINDOW: u32 = 5;

/// True for values that must not be sent: absent, blank, or the `all` sentinel
pub fn is_unset(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => {
            let v = v.trim();
            v.is_empty() || v == ALL_SENTINEL
        }
    }
}

/// Query for `GET /Books`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    pub search_term: Option<String>,
    /// Category id as selected in the UI, or `all`
    pub category_id: Option<String>,
    /// Author id as selected in the UI, or `all`
    pub author_id: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: None,
            category_id: None,
            author_id: None,
        }
    }
}

impl CatalogQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn search<S: Into<String>>(mut self, term: S) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn category<S: Into<String>>(mut self, id: S) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn author<S: Into<String>>(mut self, id: S) -> Self {
        self.author_id = Some(id.into());
        self
    }

    /// Query-string pairs; unset filters are omitted entirely
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];

        if !is_unset(self.search_term.as_deref()) {
            if let Some(term) = &self.search_term {
                pairs.push(("searchTerm", term.trim().to_string()));
            }
        }
        if !is_unset(self.category_id.as_deref()) {
            if let Some(id) = &self.category_id {
                pairs.push(("categoryId", id.trim().to_string()));
            }
        }
        if !is_unset(self.author_id.as_deref()) {
            if let Some(id) = &self.author_id {
                pairs.push(("authorId", id.trim().to_string()));
            }
        }

        pairs
    }
}

/// `ceil(total_count / page_size)`; zero when the page size is zero
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Page numbers for the pagination bar
///
/// At most five consecutive pages, starting at
/// `max(1, min(total - 4, current - 2))`.
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    let count = total.min(PAGE_WINDOW);
    let start = (i64::from(total) - 4)
        .min(i64::from(current) - 2)
        .max(1) as u32;
    (0..count).map(|i| start + i).collect()
}
