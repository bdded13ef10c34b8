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


//! Authors API
//!
//! # API Endpoints
//! - `GET /Authors`, `GET /Authors/{id}`
//! - `POST /Authors`, `PUT /Authors/{id}`, `DELETE /Authors/{id}` - admin

use crate::api::client::StorefrontClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub name_arabic: Option<String>,

    #[serde(default)]
    pub biography: Option<String>,

    #[serde(default)]
    pub biography_arabic: Option<String>,

    #[serde(default)]
    pub nationality: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub book_count: Option<u32>,
}

impl Author {
    /// Arabic name, then Latin name
    pub fn display_name(&self) -> Option<&str> {
        self.name_arabic
            .as_deref()
            .or(self.name.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// Create/update payload for an author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_arabic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography_arabic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl StorefrontClient {
    pub async fn get_authors(&self) -> Result<Vec<Author>> {
        self.get("/Authors").await
    }

    pub async fn get_author(&self, id: i64) -> Result<Author> {
        self.get(&format!("/Authors/{}", id)).await
    }

    pub async fn create_author(&self, author: &AuthorInput) -> Result<Author> {
        self.post("/Authors", author).await
    }

    pub async fn update_author(&self, id: i64, author: &AuthorInput) -> Result<Value> {
        self.put(&format!("/Authors/{}", id), author).await
    }

    pub async fn delete_author(&self, id: i64) -> Result<()> {
        self.delete(&format!("/Authors/{}", id)).await?;
        Ok(())
    }
}
