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


//! WhatsApp message text and links

use crate::api::auth::User;
use crate::api::books::Book;
use crate::catalog::display::{author_name, availability_label, book_title, category_name, price_label};

/// Library WhatsApp number
pub const LIBRARY_PHONE: &str = "+962785462983";

/// Requester name when nobody is logged in
pub const GUEST_NAME: &str = "زائر";

/// Who is asking, as it appears in the message and the inquiry record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Requester {
    pub fn guest() -> Self {
        Self {
            name: GUEST_NAME.to_string(),
            email: String::new(),
            phone: None,
        }
    }

    /// "first last" of the logged-in user, or the guest name
    pub fn from_user(user: Option<&User>) -> Self {
        let Some(user) = user else {
            return Self::guest();
        };

        let phone = user
            .extra
            .get("phoneNumber")
            .and_then(|v| v.as_str())
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string);

        Self {
            name: user.display_name().unwrap_or_else(|| GUEST_NAME.to_string()),
            email: user.email.clone().unwrap_or_default(),
            phone,
        }
    }
}

/// Requester's line in the message
pub fn default_request_line(book: &Book) -> String {
    format!("أريد الاستفسار عن كتاب \"{}\"", book_title(book))
}

/// Full pre-filled message
pub fn compose_message(book: &Book, request_line: &str, requester_name: &str) -> String {
    format!(
        "السلام عليكم ورحمة الله وبركاته\n\
         \n\
         أريد الاستفسار عن الكتاب التالي:\n\
         \n\
         *{title}*\n\
         المؤلف: {author}\n\
         التصنيف: {category}\n\
         السعر: {price}\n\
         المخزون: {stock}\n\
         \n\
         {request}\n\
         \n\
         شكراً لكم\n\
         {name}",
        title = book_title(book),
        author = author_name(book),
        category = category_name(book),
        price = price_label(book),
        stock = availability_label(book),
        request = request_line,
        name = requester_name,
    )
}

/// Phone number as WhatsApp wants it in a link: digits only
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Web and app deep links carrying the same message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLinks {
    /// `https://wa.me/<digits>?text=<enc>`
    pub web_url: String,
    /// `whatsapp://send?phone=<digits>&text=<enc>`
    pub app_url: String,
}

impl WhatsAppLinks {
    pub fn new(phone: &str, message: &str) -> Self {
        let digits = phone_digits(phone);
        let text = urlencoding::encode(message);

        Self {
            web_url: format!("https://wa.me/{}?text={}", digits, text),
            app_url: format!("whatsapp://send?phone={}&text={}", digits, text),
        }
    }
}
