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


//! Authentication and session state
//!
//! Tokens are issued by the backend; this module only stores and forwards them.
//!
//! # API Endpoints
//! - `POST /Auth/login` - `{email, password}` -> `{token, user}`
//! - `POST /Auth/logout`
//! - `POST /Auth/register-customer` - registration form -> `{token, user}`
//!
//! # Session side effects
//! - A login or registration response carrying a token stores `token` and `user`
//! - Logout clears both, even when the logout request itself fails
//! - `current_user`, `is_authenticated` and `is_admin` read storage on every call

use crate::api::client::StorefrontClient;
use crate::error::{Result, StorefrontError};
use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[a-zA-Z\x{0600}-\x{06FF}\s]+$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref USERNAME_RE: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[+]?[0-9\s\-()]{10,15}$").unwrap();
}

/// Special characters a password must draw at least one of
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Minimum customer age in years
const MINIMUM_AGE: i32 = 13;

/// Accepted gender values
const GENDERS: [&str; 2] = ["ذكر", "أنثى"];

/// User role as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Librarian,
    Customer,
    Other(String),
}

impl Role {
    /// Parse a role string; matching is exact and case-sensitive
    pub fn parse(role: &str) -> Self {
        match role {
            "Admin" => Role::Admin,
            "Librarian" => Role::Librarian,
            "Customer" => Role::Customer,
            other => Role::Other(other.to_string()),
        }
    }

    /// Admins and librarians may use the admin panel
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Librarian)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Librarian => write!(f, "Librarian"),
            Role::Customer => write!(f, "Customer"),
            Role::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Logged-in user as returned by the backend
///
/// Fields the client does not model are kept in `extra` so that a stored user
/// reads back equal to what the server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Numeric or GUID id depending on backend version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn role_kind(&self) -> Option<Role> {
        self.role.as_deref().map(Role::parse)
    }

    /// "first last", trimmed; `None` when neither name is set
    pub fn display_name(&self) -> Option<String> {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        let name = format!("{} {}", first, last).trim().to_string();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Response of login and registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub user: Option<User>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Customer self-registration form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    /// "ذكر" or "أنثى"
    pub gender: String,
    #[serde(default)]
    pub address: String,
}

impl RegistrationForm {
    /// Validate against today's date
    pub fn validate(&self) -> Result<()> {
        self.validate_at(Local::now().date_naive())
    }

    /// Validate all fields, collecting one message per failing field
    ///
    /// Age is the difference of calendar years, as the storefront computes it.
    pub fn validate_at(&self, today: NaiveDate) -> Result<()> {
        let mut errors = BTreeMap::new();
        let mut fail = |field: &str, message: &str| {
            errors.insert(field.to_string(), message.to_string());
        };

        if self.first_name.trim().is_empty() {
            fail("firstName", "الاسم الأول مطلوب");
        } else if !NAME_RE.is_match(&self.first_name) {
            fail("firstName", "الاسم الأول يجب أن يحتوي على أحرف فقط");
        }

        if self.last_name.trim().is_empty() {
            fail("lastName", "الاسم الأخير مطلوب");
        } else if !NAME_RE.is_match(&self.last_name) {
            fail("lastName", "الاسم الأخير يجب أن يحتوي على أحرف فقط");
        }

        if self.email.trim().is_empty() {
            fail("email", "البريد الإلكتروني مطلوب");
        } else if !EMAIL_RE.is_match(&self.email) {
            fail("email", "البريد الإلكتروني غير صحيح");
        }

        if self.username.trim().is_empty() {
            fail("username", "اسم المستخدم مطلوب");
        } else if !USERNAME_RE.is_match(&self.username) {
            fail(
                "username",
                "اسم المستخدم يجب أن يحتوي على أحرف إنجليزية وأرقام وشرطة سفلية فقط",
            );
        }

        if self.password.is_empty() {
            fail("password", "كلمة المرور مطلوبة");
        } else if self.password.chars().count() < 8 {
            fail("password", "كلمة المرور يجب أن تكون 8 أحرف على الأقل");
        } else if !is_strong_password(&self.password) {
            fail(
                "password",
                "كلمة المرور يجب أن تحتوي على حرف كبير وحرف صغير ورقم ورمز خاص",
            );
        }

        if self.confirm_password.is_empty() {
            fail("confirmPassword", "تأكيد كلمة المرور مطلوب");
        } else if self.password != self.confirm_password {
            fail("confirmPassword", "كلمة المرور وتأكيدها غير متطابقين");
        }

        if self.phone_number.trim().is_empty() {
            fail("phoneNumber", "رقم الهاتف مطلوب");
        } else if !PHONE_RE.is_match(&self.phone_number) {
            fail("phoneNumber", "رقم الهاتف غير صحيح");
        }

        if self.date_of_birth.is_empty() {
            fail("dateOfBirth", "تاريخ الميلاد مطلوب");
        } else {
            match NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d") {
                Ok(dob) if today.year() - dob.year() < MINIMUM_AGE => {
                    fail("dateOfBirth", "يجب أن يكون عمرك 13 سنة على الأقل");
                }
                Ok(_) => {}
                Err(_) => fail("dateOfBirth", "تاريخ الميلاد غير صحيح"),
            }
        }

        if self.gender.is_empty() {
            fail("gender", "الجنس مطلوب");
        } else if !GENDERS.contains(&self.gender.as_str()) {
            fail("gender", "الجنس يجب أن يكون ذكر أو أنثى");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StorefrontError::Validation(errors))
        }
    }

    /// Request body: the form with `dateOfBirth` as an ISO timestamp at UTC midnight
    fn to_request_body(&self) -> Result<Value> {
        let mut body = serde_json::to_value(self)?;
        let dob = NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d")
            .map_err(|e| StorefrontError::invalid_input(format!("Invalid date of birth: {}", e)))?;
        body["dateOfBirth"] = Value::String(format!("{}T00:00:00.000Z", dob.format("%Y-%m-%d")));
        Ok(body)
    }
}

/// At least one lower, upper, digit and special; nothing outside that alphabet
fn is_strong_password(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);

    password.chars().count() >= 8
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

impl StorefrontClient {
    /// Log in and store the session
    ///
    /// The session is stored only when the response carries a non-empty token.
    ///
    /// # Errors
    /// `ApiRequestFailed` with status 401 for bad credentials
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response: LoginResponse = self
            .post("/Auth/login", &LoginRequest { email, password })
            .await?;

        self.store_session_from(&response).await?;
        Ok(response)
    }

    /// Log out on the server and clear local session storage
    ///
    /// A failing logout request is logged and ignored; storage is cleared regardless.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.api_call(Method::POST, "/Auth/logout", None).await {
            tracing::warn!(error = %e, "logout request failed, clearing local session anyway");
        }

        self.session().clear().await
    }

    /// Register a customer account
    ///
    /// The form is validated locally first; a `Validation` error means nothing was sent.
    /// On success with a token the new account is logged in.
    pub async fn register_customer(&self, form: &RegistrationForm) -> Result<LoginResponse> {
        form.validate()?;

        let body = form.to_request_body()?;
        let response: LoginResponse = self.post("/Auth/register-customer", &body).await?;

        self.store_session_from(&response).await?;
        Ok(response)
    }

    /// The stored user, if any
    pub async fn current_user(&self) -> Result<Option<User>> {
        match self.session().user_json().await? {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Whether a token is stored; the token is not validated against the server
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session().token().await?.is_some())
    }

    /// True iff the stored user's role is exactly "Admin" or "Librarian"
    ///
    /// The role is read from the raw stored JSON, so a user blob of any other
    /// shape is simply not staff.
    pub async fn is_admin(&self) -> Result<bool> {
        let user = self.session().user_json().await?;
        Ok(user
            .as_ref()
            .and_then(|u| u.get("role"))
            .and_then(Value::as_str)
            .map(Role::parse)
            .is_some_and(|r| r.is_staff()))
    }

    async fn store_session_from(&self, response: &LoginResponse) -> Result<()> {
        if let Some(token) = response.token.as_deref().filter(|t| !t.is_empty()) {
            let user = serde_json::to_value(&response.user)?;
            self.session().save_session(token, &user).await?;
            tracing::debug!(
                role = response.user.as_ref().and_then(|u| u.role.as_deref()).unwrap_or(""),
                "stored session"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "محمد".to_string(),
            last_name: "Ali".to_string(),
            email: "m.ali@example.com".to_string(),
            username: "m_ali_99".to_string(),
            password: "Secret1!x".to_string(),
            confirm_password: "Secret1!x".to_string(),
            phone_number: "+962 79 123 4567".to_string(),
            date_of_birth: "2000-05-17".to_string(),
            gender: "ذكر".to_string(),
            address: String::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!(Role::parse("Admin"), Role::Admin);
        assert_eq!(Role::parse("Librarian"), Role::Librarian);
        assert_eq!(Role::parse("admin"), Role::Other("admin".to_string()));
        assert!(Role::Librarian.is_staff());
        assert!(!Role::Customer.is_staff());
        assert!(!Role::parse("ADMIN").is_staff());
    }

    #[test]
    fn test_user_round_trip_keeps_unknown_fields() {
        let raw = json!({
            "id": "7f1c",
            "firstName": "Sara",
            "email": "sara@example.com",
            "role": "Customer",
            "phoneNumber": "0790000000"
        });

        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.extra["phoneNumber"], "0790000000");
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_display_name() {
        let user = User {
            first_name: Some("Sara".to_string()),
            ..Default::default()
        };
        assert_eq!(user.display_name().as_deref(), Some("Sara"));
        assert_eq!(User::default().display_name(), None);
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate_at(today()).is_ok());
    }

    #[test]
    fn test_invalid_form_collects_field_errors() {
        let form = RegistrationForm {
            first_name: "Sara3".to_string(),
            email: "not-an-email".to_string(),
            username: "bad name".to_string(),
            password: "password1".to_string(),
            confirm_password: "different".to_string(),
            phone_number: "12".to_string(),
            date_of_birth: "2015-01-01".to_string(),
            gender: "other".to_string(),
            ..valid_form()
        };

        let errors = form.validate_at(today()).unwrap_err().validation_errors().unwrap();
        for field in [
            "firstName",
            "email",
            "username",
            "password",
            "confirmPassword",
            "phoneNumber",
            "dateOfBirth",
            "gender",
        ] {
            assert!(errors.contains_key(field), "expected error for {}", field);
        }
        assert!(!errors.contains_key("lastName"));
    }

    #[test]
    fn test_password_rules() {
        assert!(is_strong_password("Abcdef1!"));
        assert!(!is_strong_password("Abcdefg1"));
        assert!(!is_strong_password("abcdef1!"));
        assert!(!is_strong_password("Abcdef1#"));
        assert!(!is_strong_password("Ab1!"));
    }

    #[test]
    fn test_minimum_age_uses_year_difference() {
        let mut form = valid_form();
        form.date_of_birth = "2012-12-31".to_string();
        assert!(form.validate_at(today()).is_ok());

        form.date_of_birth = "2013-01-01".to_string();
        let errors = form.validate_at(today()).unwrap_err().validation_errors().unwrap();
        assert!(errors.contains_key("dateOfBirth"));
    }

    #[test]
    fn test_request_body_date_format() {
        let body = valid_form().to_request_body().unwrap();
        assert_eq!(body["dateOfBirth"], "2000-05-17T00:00:00.000Z");
        assert_eq!(body["confirmPassword"], "Secret1!x");
        assert_eq!(body["phoneNumber"], "+962 79 123 4567");
    }

    #[tokio::test]
    async fn test_is_admin_reads_stored_role() {
        let session = crate::storage::SessionStore::in_memory().await.unwrap();
        let client = StorefrontClient::new(session.clone()).unwrap();

        assert!(!client.is_admin().await.unwrap());
        assert!(!client.is_authenticated().await.unwrap());

        session.save_session("t", &json!({"role": "Librarian"})).await.unwrap();
        assert!(client.is_admin().await.unwrap());

        session.save_session("t", &json!({"role": "Customer"})).await.unwrap();
        assert!(!client.is_admin().await.unwrap());

        session.save_session("t", &json!(null)).await.unwrap();
        assert!(client.is_authenticated().await.unwrap());
        assert_eq!(client.current_user().await.unwrap(), None);
        assert!(!client.is_admin().await.unwrap());
    }

    #[tokio::test]
    async fn test_is_admin_false_for_malformed_user() {
        let session = crate::storage::SessionStore::in_memory().await.unwrap();
        let client = StorefrontClient::new(session.clone()).unwrap();

        session.save_session("t", &json!({"role": 1})).await.unwrap();
        assert!(!client.is_admin().await.unwrap());

        session.save_session("t", &json!("Admin")).await.unwrap();
        assert!(!client.is_admin().await.unwrap());

        session.save_session("t", &json!(["Admin"])).await.unwrap();
        assert!(!client.is_admin().await.unwrap());
    }
}
