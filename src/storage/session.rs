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


//! Local session storage
//!
//! A string key/value store with the same contract as browser local storage.
//! The client keeps exactly two keys here: `token` (bearer token) and `user`
//! (the logged-in user as a JSON blob). Values are read on every call and never
//! cached, so two processes sharing a file see each other's logins and logouts.

use crate::error::{Result, StorefrontError};
use crate::storage::Database;
use serde_json::Value;
use sqlx::SqlitePool;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user object
pub const USER_KEY: &str = "user";

/// Key/value session storage backed by the `LocalStorage` table
#[derive(Debug, Clone)]
pub struct SessionStore {
    db: Database,
}

impl SessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Session store over a fresh in-memory database
    pub async fn in_memory() -> Result<Self> {
        Ok(Self::new(Database::new_in_memory().await?))
    }

    fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }

    /// Read a value, `None` if the key was never set or was removed
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM LocalStorage WHERE key = ?")
                .bind(key)
                .fetch_optional(self.pool())
                .await?;

        Ok(value)
    }

    /// Insert or replace a value
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO LocalStorage (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Remove a value; removing a missing key is not an error
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM LocalStorage WHERE key = ?")
            .bind(key)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Stored bearer token; an empty string counts as absent
    pub async fn token(&self) -> Result<Option<String>> {
        Ok(self.get_item(TOKEN_KEY).await?.filter(|t| !t.is_empty()))
    }

    /// Stored user blob
    ///
    /// A blob that is not valid JSON is reported as `StorageError` rather than
    /// silently treated as logged out.
    pub async fn user_json(&self) -> Result<Option<Value>> {
        match self.get_item(USER_KEY).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|e| {
                    StorefrontError::StorageError(format!("Corrupt user JSON in storage: {}", e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Store token and user together
    pub async fn save_session(&self, token: &str, user: &Value) -> Result<()> {
        self.set_item(TOKEN_KEY, token).await?;
        self.set_item(USER_KEY, &serde_json::to_string(user)?).await?;
        Ok(())
    }

    /// Remove token and user
    pub async fn clear(&self) -> Result<()> {
        self.remove_item(TOKEN_KEY).await?;
        self.remove_item(USER_KEY).await?;
        Ok(())
    }
}
