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


//! Catalog browsing
//!
//! - [`query`] - filter state to query parameters, page arithmetic
//! - [`browser`] - books page and home page state
//! - [`display`] - text and image fallbacks for rendering a book

pub mod browser;
pub mod display;
pub mod query;

pub use browser::{CatalogBrowser, HomeShowcase};
pub use query::{page_window, total_pages, CatalogQuery, ALL_SENTINEL, DEFAULT_PAGE_SIZE};
