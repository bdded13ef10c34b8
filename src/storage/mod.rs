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


//! Local persistence
//!
//! The only state kept on this side of the API is the session: the bearer token
//! and the logged-in user. It lives in a small SQLite file so that the CLI keeps
//! its login between invocations.
//!
//! # Usage Example
//! ```no_run
//! use storefront_core::storage::{Database, SessionStore};
//!
//! # async fn example() -> storefront_core::error::Result<()> {
//! let db = Database::new("./storage.db").await?;
//! let session = SessionStore::new(db);
//! let token = session.token().await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod session;

pub use database::Database;
pub use session::{SessionStore, TOKEN_KEY, USER_KEY};
