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


//! Dashboard API
//!
//! # API Endpoints
//! - `GET /Dashboard/stats` - admin counters

use crate::api::client::StorefrontClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Admin dashboard counters
///
/// The well-known counters are typed; anything else the backend adds is kept
/// in `extra` as normalized JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_books: Option<u64>,

    #[serde(default)]
    pub total_authors: Option<u64>,

    #[serde(default)]
    pub total_categories: Option<u64>,

    #[serde(default)]
    pub total_publishers: Option<u64>,

    #[serde(default)]
    pub total_inquiries: Option<u64>,

    #[serde(default)]
    pub pending_inquiries: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardStats {
    /// All counters as `(name, value)` pairs, typed ones first
    pub fn counters(&self) -> Vec<(String, Value)> {
        let typed = [
            ("totalBooks", self.total_books),
            ("totalAuthors", self.total_authors),
            ("totalCategories", self.total_categories),
            ("totalPublishers", self.total_publishers),
            ("totalInquiries", self.total_inquiries),
            ("pendingInquiries", self.pending_inquiries),
        ];

        typed
            .into_iter()
            .filter_map(|(name, v)| v.map(|n| (name.to_string(), Value::from(n))))
            .chain(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect()
    }
}

impl StorefrontClient {
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        self.get("/Dashboard/stats").await
    }
}
