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


//! Book inquiries API
//!
//! An inquiry records that someone asked about a book over WhatsApp. It is not
//! an order: nothing is reserved and no state machine follows it.
//!
//! # API Endpoints
//! - `POST /BookInquiries` - record an inquiry
//! - `GET /BookInquiries?page=&pageSize=` - admin list (default page size 20)
//! - `PUT /BookInquiries/{id}`, `DELETE /BookInquiries/{id}` - admin
//! - `POST /BookInquiries/whatsapp-url` - `{bookId, customerName, ...}` -> server-composed link

use crate::api::books::PagedResult;
use crate::api::client::StorefrontClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default page size of the admin inquiry list
pub const DEFAULT_INQUIRY_PAGE_SIZE: u32 = 20;

/// Who is asking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub customer_name: String,

    #[serde(default)]
    pub customer_phone: String,

    #[serde(default)]
    pub customer_email: String,

    #[serde(default)]
    pub message: String,
}

/// Create/update payload for an inquiry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryInput {
    pub book_id: i64,

    #[serde(flatten)]
    pub contact: CustomerContact,
}

/// Recorded inquiry as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInquiry {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub book_id: Option<i64>,

    #[serde(default)]
    pub book_title: Option<String>,

    #[serde(default)]
    pub customer_name: Option<String>,

    #[serde(default)]
    pub customer_phone: Option<String>,

    #[serde(default)]
    pub customer_email: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Link composed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppLink {
    #[serde(alias = "whatsAppUrl", alias = "whatsappUrl")]
    pub url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StorefrontClient {
    pub async fn create_book_inquiry(&self, inquiry: &InquiryInput) -> Result<BookInquiry> {
        self.post("/BookInquiries", inquiry).await
    }

    pub async fn update_book_inquiry(&self, id: i64, inquiry: &InquiryInput) -> Result<Value> {
        self.put(&format!("/BookInquiries/{}", id), inquiry).await
    }

    pub async fn delete_book_inquiry(&self, id: i64) -> Result<()> {
        self.delete(&format!("/BookInquiries/{}", id)).await?;
        Ok(())
    }

    /// Paged inquiry list for the admin panel
    pub async fn get_book_inquiries(&self, page: u32, page_size: u32) -> Result<PagedResult<BookInquiry>> {
        let query = [("page", page.to_string()), ("pageSize", page_size.to_string())];
        self.get_with_query("/BookInquiries", &query).await
    }

    /// Ask the backend to compose the WhatsApp link for a book
    pub async fn get_whatsapp_url(&self, book_id: i64, customer: &CustomerContact) -> Result<WhatsAppLink> {
        let body = InquiryInput {
            book_id,
            contact: customer.clone(),
        };
        self.post("/BookInquiries/whatsapp-url", &body).await
    }
}
