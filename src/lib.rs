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


//! Client core for the bookstore storefront
//!
//! - [`api`] - REST client: auth, books, authors, categories, publishers,
//!   inquiries, dashboard, quizzes
//! - [`catalog`] - paged and filtered browsing, display fallbacks, home showcase
//! - [`inquiry`] - WhatsApp inquiry message and links
//! - [`quiz`] - quiz listing, filter options, attempt outcomes
//! - [`storage`] - local session storage (token and user)
//! - [`config`] - TOML settings

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod inquiry;
pub mod quiz;
pub mod storage;

pub use api::StorefrontClient;
pub use config::Settings;
pub use error::{Result, StorefrontError};
pub use storage::SessionStore;
