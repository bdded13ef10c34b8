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


//! Books API
//!
//! # API Endpoints
//! - `GET /Books?page=&pageSize=&searchTerm=&categoryId=&authorId=` - paged list
//! - `GET /Books/{id}`
//! - `GET /Books/featured`, `GET /Books/new-releases`
//! - `GET /Books/category/{id}`, `GET /Books/author/{id}`
//! - `POST /Books`, `PUT /Books/{id}`, `DELETE /Books/{id}` - admin
//! - `PATCH /Books/{id}/stock` - `{quantity}`
//! - `POST /Books/upload-image` - multipart `file` part

use crate::api::client::StorefrontClient;
use crate::catalog::query::{total_pages, CatalogQuery};
use crate::error::{Result, StorefrontError};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;

/// Author, category or publisher as embedded in a book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub name_arabic: Option<String>,
}

/// Additional book image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookImage {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub is_primary: bool,
}

/// Book as listed by the catalog endpoints
///
/// The backend flattens author/category names onto the book in list responses
/// and nests full objects in detail responses; both shapes are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub title_arabic: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub description_arabic: Option<String>,

    #[serde(default)]
    pub isbn: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub stock_quantity: i64,

    #[serde(default)]
    pub is_available: bool,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub is_new_release: bool,

    #[serde(default)]
    pub cover_image_url: Option<String>,

    #[serde(default)]
    pub images: Vec<BookImage>,

    #[serde(default)]
    pub author_id: Option<i64>,

    #[serde(default)]
    pub author_name: Option<String>,

    #[serde(default)]
    pub author_name_arabic: Option<String>,

    #[serde(default)]
    pub category_id: Option<i64>,

    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub category_name_arabic: Option<String>,

    #[serde(default)]
    pub publisher_id: Option<i64>,

    #[serde(default)]
    pub publisher_name: Option<String>,

    #[serde(default)]
    pub author: Option<NamedRef>,

    #[serde(default)]
    pub category: Option<NamedRef>,

    #[serde(default)]
    pub publisher: Option<NamedRef>,
}

impl Book {
    /// Available for display and inquiry iff flagged available and in stock
    ///
    /// Checked only here, at render time; nothing reserves the stock.
    pub fn is_in_stock(&self) -> bool {
        self.is_available && self.stock_quantity > 0
    }
}

/// One page of a paged list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    #[serde(default = "Vec::new", alias = "books")]
    pub items: Vec<T>,

    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub page: Option<u32>,

    #[serde(default)]
    pub page_size: Option<u32>,
}

impl<T> PagedResult<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: None,
            page_size: None,
        }
    }

    /// Page count for the page size that was requested
    ///
    /// Computed locally rather than trusting any count the server sends.
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.total_count, page_size)
    }
}

/// Create/update payload for a book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_arabic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_arabic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    pub price: f64,
    pub stock_quantity: i64,
    pub is_available: bool,
    pub is_featured: bool,
    pub is_new_release: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
}

/// Response of the image upload endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    #[serde(alias = "imageUrl", alias = "filePath")]
    pub url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// MIME type for an upload, from the file extension
fn image_mime(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

impl StorefrontClient {
    /// Paged, filtered book list
    ///
    /// Unset filters (blank or `all`) are left out of the query string.
    /// Asking for a page past the end is passed through to the server.
    pub async fn get_books(&self, query: &CatalogQuery) -> Result<PagedResult<Book>> {
        self.get_with_query("/Books", &query.to_query_pairs()).await
    }

    pub async fn get_book(&self, id: i64) -> Result<Book> {
        self.get(&format!("/Books/{}", id)).await
    }

    pub async fn get_featured_books(&self) -> Result<Vec<Book>> {
        self.get("/Books/featured").await
    }

    pub async fn get_new_releases(&self) -> Result<Vec<Book>> {
        self.get("/Books/new-releases").await
    }

    pub async fn get_books_by_category(&self, category_id: i64) -> Result<Vec<Book>> {
        self.get(&format!("/Books/category/{}", category_id)).await
    }

    pub async fn get_books_by_author(&self, author_id: i64) -> Result<Vec<Book>> {
        self.get(&format!("/Books/author/{}", author_id)).await
    }

    pub async fn create_book(&self, book: &BookInput) -> Result<Book> {
        self.post("/Books", book).await
    }

    pub async fn update_book(&self, id: i64, book: &BookInput) -> Result<Value> {
        self.put(&format!("/Books/{}", id), book).await
    }

    pub async fn delete_book(&self, id: i64) -> Result<()> {
        self.delete(&format!("/Books/{}", id)).await?;
        Ok(())
    }

    /// Set the stock quantity of a book
    pub async fn update_book_stock(&self, id: i64, quantity: i64) -> Result<Value> {
        if quantity < 0 {
            return Err(StorefrontError::invalid_input("Stock quantity cannot be negative"));
        }
        self.patch(&format!("/Books/{}/stock", id), &json!({ "quantity": quantity }))
            .await
    }

    /// Upload an image file from disk
    pub async fn upload_image(&self, path: &Path) -> Result<UploadedImage> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StorefrontError::invalid_input(format!("Invalid file name: {}", path.display())))?
            .to_string();

        self.upload_image_bytes(&file_name, bytes).await
    }

    /// Upload image bytes as the `file` part of a multipart form
    pub async fn upload_image_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(image_mime(file_name))?;
        let form = Form::new().part("file", part);

        self.post_multipart("/Books/upload-image", form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::normalize::deep_camelize;

    #[test]
    fn test_book_from_pascal_case_payload() {
        let raw = json!({
            "Id": 3,
            "Title": "Cities of Salt",
            "TitleArabic": "مدن الملح",
            "Price": 12.5,
            "StockQuantity": 4,
            "IsAvailable": true,
            "IsFeatured": true,
            "Images": [{"ImageUrl": "/uploads/b3.jpg", "IsPrimary": true}],
            "Author": {"Id": 1, "Name": "Abdul Rahman Munif", "NameArabic": "عبد الرحمن منيف"},
            "Unknown": "ignored"
        });

        let book: Book = serde_json::from_value(deep_camelize(raw)).unwrap();

        assert_eq!(book.id, 3);
        assert_eq!(book.title_arabic.as_deref(), Some("مدن الملح"));
        assert_eq!(book.price, Some(12.5));
        assert_eq!(book.images[0].image_url.as_deref(), Some("/uploads/b3.jpg"));
        assert_eq!(book.author.unwrap().name_arabic.as_deref(), Some("عبد الرحمن منيف"));
        assert!(!book.is_new_release);
    }

    #[test]
    fn test_in_stock_requires_both_flags() {
        let mut book = Book {
            is_available: true,
            stock_quantity: 2,
            ..Default::default()
        };
        assert!(book.is_in_stock());

        book.stock_quantity = 0;
        assert!(!book.is_in_stock());

        book.stock_quantity = 5;
        book.is_available = false;
        assert!(!book.is_in_stock());
    }

    #[test]
    fn test_paged_result_accepts_books_alias() {
        let page: PagedResult<Book> =
            serde_json::from_value(json!({"books": [{"id": 1}], "totalCount": 25})).unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages(12), 3);
    }

    #[test]
    fn test_paged_result_missing_fields_default() {
        let page: PagedResult<Book> = serde_json::from_value(json!({})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages(12), 0);
    }

    #[test]
    fn test_book_input_skips_unset_fields() {
        let input = BookInput {
            title: "Season of Migration".to_string(),
            price: 7.0,
            stock_quantity: 3,
            is_available: true,
            category_id: Some(2),
            ..Default::default()
        };

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["title"], "Season of Migration");
        assert_eq!(body["stockQuantity"], 3);
        assert_eq!(body["categoryId"], 2);
        assert!(body.get("authorId").is_none());
    }

    #[test]
    fn test_uploaded_image_aliases() {
        let img: UploadedImage = serde_json::from_value(json!({"imageUrl": "/uploads/x.png", "size": 10})).unwrap();
        assert_eq!(img.url, "/uploads/x.png");
        assert_eq!(img.extra["size"], 10);
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("cover.JPG"), "image/jpeg");
        assert_eq!(image_mime("cover.webp"), "image/webp");
        assert_eq!(image_mime("cover"), "application/octet-stream");
    }
}
