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


//! WhatsApp book inquiries
//!
//! The storefront has no cart. Asking about a book means:
//! 1. Recording a `BookInquiry` through the API (best effort)
//! 2. Composing a pre-filled Arabic message about the book
//! 3. Producing web and app WhatsApp links plus a platform launch plan
//!
//! Step 1 failing never blocks steps 2 and 3.
//!
//! # Usage Example
//! ```no_run
//! use storefront_core::api::StorefrontClient;
//! use storefront_core::inquiry::InquiryComposer;
//! use storefront_core::storage::SessionStore;
//!
//! # async fn example() -> storefront_core::error::Result<()> {
//! let client = StorefrontClient::new(SessionStore::in_memory().await?)?;
//! let book = client.get_book(12).await?;
//!
//! let inquiry = InquiryComposer::new(client).inquire(&book, None).await?;
//! println!("{}", inquiry.links.web_url);
//! # Ok(())
//! # }
//! ```

pub mod launch;
pub mod message;

pub use launch::{LaunchPlan, LaunchStep, LinkOpener, Platform, DEFAULT_APP_FALLBACK_DELAY};
pub use message::{compose_message, Requester, WhatsAppLinks, GUEST_NAME, LIBRARY_PHONE};

use crate::api::books::Book;
use crate::api::client::StorefrontClient;
use crate::api::inquiries::{BookInquiry, CustomerContact, InquiryInput};
use crate::error::Result;
use std::time::Duration;

/// Everything produced for one inquiry
#[derive(Debug, Clone)]
pub struct PreparedInquiry {
    pub requester: Requester,
    pub message: String,
    pub links: WhatsAppLinks,
    pub plan: LaunchPlan,
    /// `None` when recording the inquiry failed
    pub recorded: Option<BookInquiry>,
}

/// Builds inquiries for books
#[derive(Debug, Clone)]
pub struct InquiryComposer {
    client: StorefrontClient,
    library_phone: String,
    fallback_delay: Duration,
}

impl InquiryComposer {
    pub fn new(client: StorefrontClient) -> Self {
        Self {
            client,
            library_phone: LIBRARY_PHONE.to_string(),
            fallback_delay: DEFAULT_APP_FALLBACK_DELAY,
        }
    }

    pub fn with_library_phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.library_phone = phone.into();
        self
    }

    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    pub fn library_phone(&self) -> &str {
        &self.library_phone
    }

    /// Record the inquiry and build the message, links and launch plan
    ///
    /// # Arguments
    /// * `book` - The book being asked about
    /// * `user_agent` - Caller's user agent, used only to pick the launch plan
    ///
    /// # Errors
    /// Only a session storage failure while reading the current user; API
    /// failures while recording are logged and swallowed
    pub async fn inquire(&self, book: &Book, user_agent: Option<&str>) -> Result<PreparedInquiry> {
        let user = self.client.current_user().await?;
        let requester = Requester::from_user(user.as_ref());
        let request_line = message::default_request_line(book);

        let input = InquiryInput {
            book_id: book.id,
            contact: CustomerContact {
                customer_name: requester.name.clone(),
                customer_phone: requester
                    .phone
                    .clone()
                    .unwrap_or_else(|| self.library_phone.clone()),
                customer_email: requester.email.clone(),
                message: request_line.clone(),
            },
        };

        let recorded = match self.client.create_book_inquiry(&input).await {
            Ok(inquiry) => Some(inquiry),
            Err(e) => {
                tracing::warn!(book_id = book.id, error = %e, "could not record inquiry, continuing with link");
                None
            }
        };

        let message = compose_message(book, &request_line, &requester.name);
        let links = WhatsAppLinks::new(&self.library_phone, &message);
        let platform = user_agent.map(Platform::from_user_agent).unwrap_or(Platform::Other);
        let plan = LaunchPlan::for_platform(platform, &links, self.fallback_delay);

        Ok(PreparedInquiry {
            requester,
            message,
            links,
            plan,
            recorded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::storage::SessionStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_inquiry_survives_unreachable_backend() {
        let session = SessionStore::in_memory().await.unwrap();
        session
            .save_session("t", &json!({"firstName": "Omar", "lastName": "Khalil"}))
            .await
            .unwrap();

        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9/api")
            .timeout(Duration::from_secs(2))
            .build();
        let client = StorefrontClient::with_config(session, config).unwrap();

        let book = Book {
            id: 5,
            title: Some("X".to_string()),
            price: Some(5.0),
            ..Default::default()
        };

        let inquiry = InquiryComposer::new(client)
            .inquire(&book, Some("Mozilla/5.0 (iPhone)"))
            .await
            .unwrap();

        assert!(inquiry.recorded.is_none());
        assert_eq!(inquiry.requester.name, "Omar Khalil");
        assert!(inquiry.message.ends_with("شكراً لكم\nOmar Khalil"));
        assert_eq!(inquiry.plan.steps.len(), 2);
        assert_eq!(inquiry.plan.steps[1].url, inquiry.links.web_url);
    }
}
