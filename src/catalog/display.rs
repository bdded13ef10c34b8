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


//! Display helpers for books
//!
//! Every text helper falls back Arabic -> Latin -> flat field -> nested object,
//! treating empty strings as missing, and ends in a fixed Arabic placeholder.
//! The same helpers serve list cards, detail views and the inquiry message.

use crate::api::books::{Book, NamedRef};
use url::Url;

pub const UNKNOWN_TITLE: &str = "عنوان غير محدد";
pub const UNKNOWN_AUTHOR: &str = "مؤلف غير محدد";
pub const UNKNOWN_CATEGORY: &str = "تصنيف غير محدد";
pub const UNKNOWN_PUBLISHER: &str = "غير محدد";

/// Shown instead of a price when none is set
pub const PRICE_UNAVAILABLE: &str = "غير متوفر";

/// Jordanian dinar suffix
pub const CURRENCY: &str = "د.أ";

pub const IN_STOCK: &str = "متوفر";
pub const OUT_OF_STOCK: &str = "غير متوفر";

/// Grey 300x400 SVG card with the word "كتاب"
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMzAwIiBoZWlnaHQ9IjQwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KICA8cmVjdCB3aWR0aD0iMzAwIiBoZWlnaHQ9IjQwMCIgZmlsbD0iI2YwZjBmMCIvPgogIDx0ZXh0IHg9IjE1MCIgeT0iMjAwIiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMjAiIGZpbGw9IiM2NjY2NjYiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGR5PSIuM2VtIj7Zhtin2YbYqDwvdGV4dD4KPC9zdmc+";

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn nested_name(r: Option<&NamedRef>) -> Option<&str> {
    r.and_then(|r| non_empty(r.name_arabic.as_ref()).or_else(|| non_empty(r.name.as_ref())))
}

pub fn book_title(book: &Book) -> &str {
    non_empty(book.title_arabic.as_ref())
        .or_else(|| non_empty(book.title.as_ref()))
        .unwrap_or(UNKNOWN_TITLE)
}

pub fn author_name(book: &Book) -> &str {
    non_empty(book.author_name_arabic.as_ref())
        .or_else(|| non_empty(book.author_name.as_ref()))
        .or_else(|| nested_name(book.author.as_ref()))
        .unwrap_or(UNKNOWN_AUTHOR)
}

pub fn category_name(book: &Book) -> &str {
    non_empty(book.category_name_arabic.as_ref())
        .or_else(|| non_empty(book.category_name.as_ref()))
        .or_else(|| nested_name(book.category.as_ref()))
        .unwrap_or(UNKNOWN_CATEGORY)
}

pub fn publisher_name(book: &Book) -> &str {
    non_empty(book.publisher_name.as_ref())
        .or_else(|| nested_name(book.publisher.as_ref()))
        .unwrap_or(UNKNOWN_PUBLISHER)
}

/// Price with the currency suffix, e.g. `5 د.أ`
///
/// A missing or zero price reads as unavailable.
pub fn price_label(book: &Book) -> String {
    match book.price {
        Some(price) if price != 0.0 => format!("{} {}", price, CURRENCY),
        _ => PRICE_UNAVAILABLE.to_string(),
    }
}

pub fn availability_label(book: &Book) -> &'static str {
    if book.is_in_stock() {
        IN_STOCK
    } else {
        OUT_OF_STOCK
    }
}

/// Make a server image path loadable
///
/// Absolute `http(s)` and `data:` URLs pass through. Relative paths such as
/// `/uploads/covers/1.jpg` are resolved against the API origin. Blank input
/// gives `None`.
pub fn fix_image_url(origin: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:") {
        return Some(raw.to_string());
    }

    let path = raw.replace('\\', "/");
    origin
        .join(path.trim_start_matches('/'))
        .ok()
        .map(String::from)
}

/// Cover image, else the first gallery image, else the placeholder
pub fn book_image(origin: &Url, book: &Book) -> String {
    book.cover_image_url
        .as_deref()
        .and_then(|u| fix_image_url(origin, u))
        .or_else(|| {
            book.images
                .first()
                .and_then(|img| img.image_url.as_deref())
                .and_then(|u| fix_image_url(origin, u))
        })
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}
