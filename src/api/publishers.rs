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


//! Publishers API
//!
//! # API Endpoints
//! - `GET /Publishers`, `GET /Publishers/{id}`
//! - `POST /Publishers`, `PUT /Publishers/{id}`, `DELETE /Publishers/{id}` - admin

use crate::api::client::StorefrontClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub name_arabic: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherInput {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_arabic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl StorefrontClient {
    pub async fn get_publishers(&self) -> Result<Vec<Publisher>> {
        self.get("/Publishers").await
    }

    pub async fn get_publisher(&self, id: i64) -> Result<Publisher> {
        self.get(&format!("/Publishers/{}", id)).await
    }

    pub async fn create_publisher(&self, publisher: &PublisherInput) -> Result<Publisher> {
        self.post("/Publishers", publisher).await
    }

    pub async fn update_publisher(&self, id: i64, publisher: &PublisherInput) -> Result<Value> {
        self.put(&format!("/Publishers/{}", id), publisher).await
    }

    pub async fn delete_publisher(&self, id: i64) -> Result<()> {
        self.delete(&format!("/Publishers/{}", id)).await?;
        Ok(())
    }
}
