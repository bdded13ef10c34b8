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


//! Categories API
//!
//! The storefront only ever lists active categories.
//!
//! # API Endpoints
//! - `GET /Categories/active`, `GET /Categories/{id}`
//! - `POST /Categories`, `PUT /Categories/{id}`, `DELETE /Categories/{id}` - admin

use crate::api::client::StorefrontClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub name_arabic: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub description_arabic: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default)]
    pub book_count: Option<u32>,
}

impl Category {
    /// Arabic name, then Latin name
    pub fn display_name(&self) -> Option<&str> {
        self.name_arabic
            .as_deref()
            .or(self.name.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// Create/update payload for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_arabic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_arabic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub is_active: bool,
}

impl Default for CategoryInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            name_arabic: None,
            description: None,
            description_arabic: None,
            image_url: None,
            is_active: true,
        }
    }
}

impl StorefrontClient {
    /// Active categories only
    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        self.get("/Categories/active").await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category> {
        self.get(&format!("/Categories/{}", id)).await
    }

    pub async fn create_category(&self, category: &CategoryInput) -> Result<Category> {
        self.post("/Categories", category).await
    }

    pub async fn update_category(&self, id: i64, category: &CategoryInput) -> Result<Value> {
        self.put(&format!("/Categories/{}", id), category).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.delete(&format!("/Categories/{}", id)).await?;
        Ok(())
    }
}
