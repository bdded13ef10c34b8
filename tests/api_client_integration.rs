//! Integration tests for StorefrontClient against an in-process mock backend
//!
//! The mock answers in PascalCase like the real ASP.NET backend, so every test
//! also exercises key normalization.

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use storefront_core::api::{ClientConfig, CustomerContact, QuizFilters, RegistrationForm, StorefrontClient};
use storefront_core::catalog::{CatalogBrowser, CatalogQuery};
use storefront_core::inquiry::InquiryComposer;
use storefront_core::storage::SessionStore;
use storefront_core::StorefrontError;

const TOKEN: &str = "tok-1";

#[derive(Default)]
struct Seen {
    book_queries: Vec<String>,
    quiz_queries: Vec<String>,
    inquiry_bodies: Vec<Value>,
    register_bodies: Vec<Value>,
    stock_bodies: Vec<Value>,
    upload_headers: Vec<(String, Option<String>)>,
    fail_authors: bool,
}

#[derive(Clone, Default)]
struct Mock {
    seen: Arc<Mutex<Seen>>,
}

impl Mock {
    fn seen(&self) -> std::sync::MutexGuard<'_, Seen> {
        self.seen.lock().unwrap()
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn pascal_user() -> Value {
    json!({
        "Id": 7,
        "FirstName": "Sara",
        "LastName": "Haddad",
        "Email": "sara@example.com",
        "Username": "sara_h",
        "Role": "Admin",
        "PhoneNumber": "0790000000"
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "Secret1!" {
        Json(json!({"Token": TOKEN, "User": pascal_user(), "Message": "ok"})).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"Message": "Invalid credentials"}))).into_response()
    }
}

async fn logout() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
}

async fn register(State(mock): State<Mock>, Json(body): Json<Value>) -> Response {
    mock.seen().register_bodies.push(body);
    Json(json!({"Token": "tok-2", "User": {"Id": 8, "FirstName": "Omar", "Role": "Customer"}})).into_response()
}

async fn books(State(mock): State<Mock>, RawQuery(query): RawQuery) -> Json<Value> {
    mock.seen().book_queries.push(query.unwrap_or_default());
    Json(json!({
        "Items": [
            {"Id": 1, "Title": "X", "AuthorName": "Y", "Price": 5, "StockQuantity": 0, "IsAvailable": true},
            {"Id": 2, "TitleArabic": "مدن الملح", "Price": 12.5, "StockQuantity": 3, "IsAvailable": true, "IsFeatured": true}
        ],
        "TotalCount": 25,
        "Page": 1,
        "PageSize": 12
    }))
}

async fn book(Path(id): Path<i64>) -> Response {
    if id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "الكتاب غير موجود"}))).into_response();
    }
    Json(json!({
        "Id": id,
        "Title": "X",
        "Price": 5,
        "StockQuantity": 0,
        "IsAvailable": true,
        "Author": {"Id": 3, "Name": "Y"}
    }))
    .into_response()
}

async fn delete_book() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn stock(State(mock): State<Mock>, Json(body): Json<Value>) -> Json<Value> {
    mock.seen().stock_bodies.push(body.clone());
    Json(body)
}

async fn upload(State(mock): State<Mock>, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    mock.seen().upload_headers.push((content_type, bearer(&headers)));

    let text = String::from_utf8_lossy(&body);
    if !text.contains("name=\"file\"") {
        return (StatusCode::BAD_REQUEST, "missing file part").into_response();
    }
    Json(json!({"ImageUrl": "/uploads/covers/new.png"})).into_response()
}

async fn categories() -> Json<Value> {
    Json(json!([{"Id": 1, "Name": "Novels", "NameArabic": "روايات", "IsActive": true}]))
}

async fn authors(State(mock): State<Mock>) -> Response {
    if mock.seen().fail_authors {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"title": "Server Error"}))).into_response();
    }
    Json(json!([{"Id": 3, "Name": "Y"}])).into_response()
}

async fn stats(headers: HeaderMap) -> Response {
    if bearer(&headers) != Some(format!("Bearer {}", TOKEN)) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({"TotalBooks": 120, "LowStockBooks": 4})).into_response()
}

async fn create_inquiry(State(mock): State<Mock>, Json(body): Json<Value>) -> Response {
    mock.seen().inquiry_bodies.push(body);
    (StatusCode::SERVICE_UNAVAILABLE, "inquiries offline").into_response()
}

async fn whatsapp_url(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "WhatsAppUrl": format!("https://wa.me/962785462983?text=book-{}", body["bookId"])
    }))
}

async fn quizzes(State(mock): State<Mock>, RawQuery(query): RawQuery) -> Json<Value> {
    mock.seen().quiz_queries.push(query.unwrap_or_default());
    Json(json!({
        "Quizzes": [
            {"Id": 1, "Title": "Fractions", "Subject": "الرياضيات", "PassingScore": 60, "IsActive": true},
            {"Id": 2, "Title": "Plants", "Subject": "العلوم", "PassingScore": 50, "IsActive": true}
        ]
    }))
}

async fn ping() -> &'static str {
    "pong"
}

async fn spawn_backend() -> (StorefrontClient, Mock) {
    let mock = Mock::default();
    let app = Router::new()
        .route("/api/Auth/login", post(login))
        .route("/api/Auth/logout", post(logout))
        .route("/api/Auth/register-customer", post(register))
        .route("/api/Books", get(books))
        .route("/api/Books/{id}", get(book).delete(delete_book))
        .route("/api/Books/{id}/stock", patch(stock))
        .route("/api/Books/upload-image", post(upload))
        .route("/api/Categories/active", get(categories))
        .route("/api/Authors", get(authors))
        .route("/api/Dashboard/stats", get(stats))
        .route("/api/BookInquiries", post(create_inquiry))
        .route("/api/BookInquiries/whatsapp-url", post(whatsapp_url))
        .route("/api/quizzes", get(quizzes))
        .route("/api/ping", get(ping))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let session = SessionStore::in_memory().await.unwrap();
    let config = ClientConfig::builder()
        .base_url(format!("http://{}/api", addr))
        .build();
    let client = StorefrontClient::with_config(session, config).unwrap();

    (client, mock)
}

#[tokio::test]
async fn test_login_stores_normalized_session() {
    let (client, _mock) = spawn_backend().await;

    let response = client.login("sara@example.com", "Secret1!").await.unwrap();
    let user = response.user.clone().unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Sara"));
    assert_eq!(user.extra["phoneNumber"], "0790000000");

    assert!(client.is_authenticated().await.unwrap());
    assert_eq!(client.current_user().await.unwrap(), Some(user));
    assert!(client.is_admin().await.unwrap());
    assert_eq!(client.session().token().await.unwrap().as_deref(), Some(TOKEN));

    let stored = client.session().user_json().await.unwrap().unwrap();
    assert_eq!(stored["firstName"], "Sara");
    assert!(stored.get("FirstName").is_none());
}

#[tokio::test]
async fn test_bad_credentials_leave_storage_empty() {
    let (client, _mock) = spawn_backend().await;

    let err = client.login("sara@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(err.is_auth_error());
    match &err {
        StorefrontError::ApiRequestFailed { message, endpoint, .. } => {
            assert_eq!(message, "Invalid credentials");
            assert_eq!(endpoint, "/Auth/login");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    assert!(!client.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_logout_clears_session_when_server_fails() {
    let (client, _mock) = spawn_backend().await;
    client.login("sara@example.com", "Secret1!").await.unwrap();

    client.logout().await.unwrap();

    assert!(!client.is_authenticated().await.unwrap());
    assert_eq!(client.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn test_bearer_token_attached_from_storage() {
    let (client, _mock) = spawn_backend().await;

    let err = client.get_dashboard_stats().await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    client.login("sara@example.com", "Secret1!").await.unwrap();
    let stats = client.get_dashboard_stats().await.unwrap();
    assert_eq!(stats.total_books, Some(120));
    assert_eq!(stats.extra["lowStockBooks"], 4);
}

#[tokio::test]
async fn test_search_omits_unset_filters() {
    let (client, mock) = spawn_backend().await;

    let query = CatalogQuery::default().search("عربي").category("all");
    let page = client.get_books(&query).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_pages(12), 3);

    let raw = mock.seen().book_queries[0].clone();
    let decoded = urlencoding::decode(&raw).unwrap();
    assert!(decoded.contains("searchTerm=عربي"), "query was {}", decoded);
    assert!(decoded.contains("page=1"));
    assert!(decoded.contains("pageSize=12"));
    assert!(!decoded.contains("categoryId"));
    assert!(!decoded.contains("authorId"));
}

#[tokio::test]
async fn test_page_past_end_is_requested() {
    let (client, mock) = spawn_backend().await;

    let mut browser = CatalogBrowser::new(client);
    browser.go_to_page(9).await.unwrap();

    assert_eq!(browser.total_pages(), 3);
    assert_eq!(browser.current_page(), 9);
    assert!(mock.seen().book_queries[0].contains("page=9"));
}

#[tokio::test]
async fn test_browser_empties_everything_on_partial_failure() {
    let (client, mock) = spawn_backend().await;

    let mut browser = CatalogBrowser::new(client);
    browser.load().await.unwrap();
    assert_eq!(browser.books().len(), 2);
    assert_eq!(browser.categories().len(), 1);
    assert_eq!(browser.authors().len(), 1);

    mock.seen().fail_authors = true;
    let err = browser.set_category("1").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));

    assert!(browser.books().is_empty());
    assert!(browser.categories().is_empty());
    assert!(browser.authors().is_empty());
    assert_eq!(browser.total_pages(), 1);
}

#[tokio::test]
async fn test_not_found_carries_server_message() {
    let (client, _mock) = spawn_backend().await;

    let err = client.get_book(404).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.user_message(), "الكتاب غير موجود");
}

#[tokio::test]
async fn test_non_json_body_is_string_value() {
    let (client, _mock) = spawn_backend().await;

    let value = client
        .api_call(reqwest::Method::GET, "/ping", None)
        .await
        .unwrap();
    assert_eq!(value, Value::String("pong".to_string()));

    client.delete_book(5).await.unwrap();
}

#[tokio::test]
async fn test_stock_update_body() {
    let (client, mock) = spawn_backend().await;

    client.update_book_stock(3, 7).await.unwrap();
    assert_eq!(mock.seen().stock_bodies[0], json!({"quantity": 7}));

    assert!(matches!(
        client.update_book_stock(3, -1).await,
        Err(StorefrontError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_image_upload_is_multipart() {
    let (client, mock) = spawn_backend().await;
    client.login("sara@example.com", "Secret1!").await.unwrap();

    let uploaded = client
        .upload_image_bytes("new.png", vec![0x89, b'P', b'N', b'G'])
        .await
        .unwrap();
    assert_eq!(uploaded.url, "/uploads/covers/new.png");

    let (content_type, auth) = mock.seen().upload_headers[0].clone();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert_eq!(auth.as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn test_upload_from_file() {
    let (client, _mock) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.jpg");
    std::fs::write(&path, b"jpeg bytes").unwrap();

    let uploaded = client.upload_image(&path).await.unwrap();
    assert_eq!(uploaded.url, "/uploads/covers/new.png");
}

#[tokio::test]
async fn test_inquiry_link_survives_recording_failure() {
    let (client, mock) = spawn_backend().await;
    let book = client.get_book(1).await.unwrap();

    let inquiry = InquiryComposer::new(client).inquire(&book, None).await.unwrap();

    assert!(inquiry.recorded.is_none());
    assert!(inquiry.message.contains("المخزون: غير متوفر"));
    assert!(inquiry.message.contains("المؤلف: Y"));
    assert!(inquiry.links.web_url.starts_with("https://wa.me/962785462983?text="));
    assert_eq!(inquiry.plan.steps.len(), 1);

    let body = mock.seen().inquiry_bodies[0].clone();
    assert_eq!(body["bookId"], 1);
    assert_eq!(body["customerName"], "زائر");
    assert_eq!(body["message"], "أريد الاستفسار عن كتاب \"X\"");
}

#[tokio::test]
async fn test_server_composed_whatsapp_url() {
    let (client, _mock) = spawn_backend().await;

    let contact = CustomerContact {
        customer_name: "Sara".to_string(),
        ..Default::default()
    };
    let link = client.get_whatsapp_url(4, &contact).await.unwrap();
    assert_eq!(link.url, "https://wa.me/962785462983?text=book-4");
}

#[tokio::test]
async fn test_quiz_filters_sent_and_wrapped_list_read() {
    let (client, mock) = spawn_backend().await;

    let filters = QuizFilters {
        subject: Some("all".to_string()),
        grade: None,
        search: Some("frac".to_string()),
    };
    let quizzes = client.get_quizzes(&filters).await.unwrap();

    assert_eq!(quizzes.len(), 2);
    assert_eq!(quizzes[0].passing_score, Some(60.0));
    assert_eq!(mock.seen().quiz_queries[0], "search=frac");
}

#[tokio::test]
async fn test_registration_validates_before_sending() {
    let (client, mock) = spawn_backend().await;

    let mut form = RegistrationForm {
        first_name: "Omar".to_string(),
        last_name: "Khalil".to_string(),
        email: "omar@example.com".to_string(),
        username: "omar_k".to_string(),
        password: "Secret1!".to_string(),
        confirm_password: "Secret2!".to_string(),
        phone_number: "0791234567".to_string(),
        date_of_birth: "1999-03-04".to_string(),
        gender: "ذكر".to_string(),
        address: String::new(),
    };

    let err = client.register_customer(&form).await.unwrap_err();
    assert!(err.validation_errors().unwrap().contains_key("confirmPassword"));
    assert!(mock.seen().register_bodies.is_empty());

    form.confirm_password = form.password.clone();
    client.register_customer(&form).await.unwrap();

    assert_eq!(mock.seen().register_bodies[0]["dateOfBirth"], "1999-03-04T00:00:00.000Z");
    assert!(client.is_authenticated().await.unwrap());
    assert!(!client.is_admin().await.unwrap());
}
