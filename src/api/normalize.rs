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


//! Response key normalization
//!
//! The backend serializes with PascalCase keys (`TotalCount`, `CoverImageUrl`)
//! on some endpoints and camelCase on others. Every JSON response is passed
//! through [`deep_camelize`] so the rest of the crate only ever sees camelCase.

use serde_json::{Map, Value};

/// Lowercase the first character of a key if it is an ASCII uppercase letter
///
/// Only the first character changes: `ISBN` becomes `iSBN`, `Id` becomes `id`.
pub fn camelize_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut out = String::with_capacity(key.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        _ => key.to_string(),
    }
}

/// Recursively camelize object keys in arrays and objects; scalars pass through
pub fn deep_camelize(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(deep_camelize).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, val) in map {
                out.insert(camelize_key(&key), deep_camelize(val));
            }
            Value::Object(out)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camelize_key() {
        assert_eq!(camelize_key("TotalCount"), "totalCount");
        assert_eq!(camelize_key("id"), "id");
        assert_eq!(camelize_key("ISBN"), "iSBN");
        assert_eq!(camelize_key(""), "");
        assert_eq!(camelize_key("_Private"), "_Private");
        assert_eq!(camelize_key("Élan"), "Élan");
        assert_eq!(camelize_key("عنوان"), "عنوان");
    }

    #[test]
    fn test_deep_camelize_nested() {
        let raw = json!({
            "Items": [
                {"Id": 1, "Author": {"NameArabic": "نجيب"}, "Images": [{"ImageUrl": "/a.jpg"}]}
            ],
            "TotalCount": 1,
            "pageSize": 12
        });

        let normalized = deep_camelize(raw);

        assert_eq!(
            normalized,
            json!({
                "items": [
                    {"id": 1, "author": {"nameArabic": "نجيب"}, "images": [{"imageUrl": "/a.jpg"}]}
                ],
                "totalCount": 1,
                "pageSize": 12
            })
        );
    }

    #[test]
    fn test_string_values_untouched() {
        let normalized = deep_camelize(json!({"Role": "Admin", "Tags": ["Fiction", "History"]}));
        assert_eq!(normalized, json!({"role": "Admin", "tags": ["Fiction", "History"]}));
    }
}
