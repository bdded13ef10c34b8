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


//! Bookstore REST API client
//!
//! `client` holds the transport; every other module adds the endpoints of one
//! backend resource as an `impl StorefrontClient` block together with its models.
//!
//! # Resources
//! - `Auth` - login, logout, customer registration ([`auth`])
//! - `Books` - catalog, admin CRUD, stock, image upload ([`books`])
//! - `Authors`, `Categories`, `Publishers` ([`authors`], [`categories`], [`publishers`])
//! - `BookInquiries` ([`inquiries`])
//! - `Dashboard` ([`dashboard`])
//! - `quizzes` ([`quizzes`])

pub mod auth;
pub mod authors;
pub mod books;
pub mod categories;
pub mod client;
pub mod dashboard;
pub mod inquiries;
pub mod normalize;
pub mod publishers;
pub mod quizzes;

// Re-export commonly used types
pub use auth::{LoginResponse, RegistrationForm, Role, User};
pub use authors::{Author, AuthorInput};
pub use books::{Book, BookImage, BookInput, NamedRef, PagedResult, UploadedImage};
pub use categories::{Category, CategoryInput};
pub use client::{ClientConfig, ClientConfigBuilder, StorefrontClient, DEFAULT_BASE_URL};
pub use dashboard::DashboardStats;
pub use inquiries::{BookInquiry, CustomerContact, InquiryInput, WhatsAppLink};
pub use publishers::{Publisher, PublisherInput};
pub use quizzes::{Quiz, QuizAnswer, QuizFilters, QuizResult};
