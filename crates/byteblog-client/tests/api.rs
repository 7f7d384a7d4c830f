//! Client behaviour against a local stand-in for the API.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use byteblog_client::{
    ApiClient, Claims, ClientError, FileUpload, MemoryTokenStore, SessionManager, TokenStore,
};
use byteblog_engine::{ContactMessage, DashboardStats, NewsQuery};
use jsonwebtoken::{EncodingKey, Header, encode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Name, file name, content type and size of each multipart field.
async fn multipart_fields(mut multipart: Multipart) -> Vec<(String, String, String, usize)> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let mime = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        fields.push((name, file_name, mime, bytes.len()));
    }
    fields
}

fn avatar() -> FileUpload {
    FileUpload {
        file_name: "avatar.png".to_string(),
        mime: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

fn contact_message() -> ContactMessage {
    ContactMessage {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        subject: "Hello".to_string(),
        message: "Nice blog".to_string(),
    }
}

fn issued_token() -> String {
    let now = jsonwebtoken::get_current_timestamp();
    let claims = Claims {
        sub: "12".to_string(),
        name: None,
        email: None,
        role: Some("USER".to_string()),
        exp: Some(now + 3600),
        iat: Some(now),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"api-secret")).unwrap()
}

#[tokio::test]
async fn lists_posts_from_hateoas_payload() {
    let router = Router::new().route(
        "/api/blog",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            Json(json!({
                "_embedded": { "blogPostDtoList": [
                    { "id": 1, "title": format!("page {}", params["page"]), "content": "x" },
                    { "id": 2, "title": format!("size {}", params["size"]) }
                ]},
                "page": { "size": 2, "totalElements": 12, "totalPages": 6, "number": 0 }
            }))
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let page = client.posts(0, 2).await.unwrap();

    let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["page 0", "size 2"]);
    assert_eq!(page.total_pages(), 6);
}

#[tokio::test]
async fn api_error_uses_server_message() {
    let router = Router::new().route(
        "/api/blog/{id}",
        get(|Path(id): Path<i64>| async move {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("Post {id} not found") })),
            )
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let err = client.post(99).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Post 99 not found");
}

#[tokio::test]
async fn api_error_without_json_body_uses_status() {
    let router = Router::new().route(
        "/api/portfolio/{id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let err = client.portfolio_item(1).await.unwrap_err();

    assert_eq!(err.to_string(), "Error 500: Internal Server Error");
}

#[tokio::test]
async fn forgot_password_accepts_empty_success() {
    let router = Router::new().route(
        "/api/auth/forgot-password",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["email"], "ada@example.com");
            StatusCode::NO_CONTENT
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let ack = client.forgot_password("ada@example.com").await.unwrap();

    assert!(ack.success);
    assert_eq!(ack.message, None);
}

#[tokio::test]
async fn reset_password_rejects_unexpected_status() {
    let router = Router::new().route(
        "/api/auth/reset-password",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Token expired" })),
            )
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let err = client.reset_password("t", "pw").await.unwrap_err();

    assert_eq!(err.to_string(), "Token expired");
}

#[tokio::test]
async fn degraded_endpoints_fall_back() {
    let router = Router::new()
        .route(
            "/api/comments/recent",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/api/dashboard/stats",
            get(|| async { StatusCode::NOT_FOUND }),
        );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    assert!(client.recent_comments(5).await.is_empty());
    assert_eq!(client.dashboard_stats().await, DashboardStats::default());
}

#[tokio::test]
async fn news_sends_query_and_reads_articles() {
    let router = Router::new().route(
        "/api/news/top-headlines",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            Json(json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [{
                    "title": format!("{} {} {}", params["page"], params["pageSize"], params["category"]),
                    "source": { "name": "Wire" }
                }]
            }))
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let page = client.news(&NewsQuery::default()).await.unwrap();

    assert_eq!(page.items[0].title, "1 10 technology");
    assert_eq!(page.items[0].source_name(), "Wire");
}

#[tokio::test]
async fn delete_succeeds_without_body() {
    let router = Router::new().route(
        "/api/comments/{id}",
        delete(|headers: HeaderMap| async move {
            if bearer(&headers) == "Bearer admin-token" {
                StatusCode::NO_CONTENT
            } else {
                StatusCode::UNAUTHORIZED
            }
        }),
    );
    let base = spawn(router).await;

    let anonymous = ApiClient::new(&base).unwrap();
    assert!(anonymous.delete_comment(3).await.unwrap_err().is_unauthorized());

    let admin = anonymous.with_token_store(Arc::new(MemoryTokenStore::with_token("admin-token")));
    admin.delete_comment(3).await.unwrap();
}

#[tokio::test]
async fn login_stores_token_and_authorizes_later_calls() {
    let token = issued_token();
    let issued = token.clone();
    let router = Router::new()
        .route(
            "/api/auth/login",
            post(move |Json(body): Json<Value>| {
                let issued = issued.clone();
                async move {
                    if body["password"] == "correct horse" {
                        Json(json!({ "token": issued })).into_response()
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "message": "Bad credentials" })),
                        )
                            .into_response()
                    }
                }
            }),
        )
        .route(
            "/api/users/profile",
            get(|headers: HeaderMap| async move {
                Json(json!({
                    "id": 12,
                    "name": bearer(&headers),
                    "email": "ada@example.com",
                    "profileImage": "http://localhost:8080/uploads/ada.png"
                }))
            }),
        );
    let base = spawn(router).await;

    let store = Arc::new(MemoryTokenStore::new());
    let sessions = SessionManager::new(store.clone());
    let client = ApiClient::new(&base).unwrap().with_session(&sessions);

    let err = sessions
        .login(&client, "ada@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Bad credentials");
    assert_eq!(store.load().unwrap(), None);

    let session = sessions
        .login(&client, "ada@example.com", "correct horse")
        .await
        .unwrap();
    assert_eq!(session.user.id, Some(12));
    assert_eq!(session.user.name, "User");
    assert_eq!(session.user.email, "ada@example.com");
    assert_eq!(store.load().unwrap(), Some(token.clone()));

    let user = sessions.refresh_profile(&client).await.unwrap().unwrap();
    assert_eq!(user.name, format!("Bearer {token}"));
    assert_eq!(
        user.profile_image.as_deref(),
        Some("/api/proxy/image?path=%2Fuploads%2Fada.png")
    );
    assert_eq!(sessions.current().unwrap().user, user);
}

#[tokio::test]
async fn unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}")).unwrap();
    let err = client.featured_posts(3).await.unwrap_err();

    assert!(matches!(err, ClientError::Unreachable(_)));
}

#[tokio::test]
async fn upload_sends_single_file_part() {
    let router = Router::new().route(
        "/api/uploads",
        post(|multipart: Multipart| async move {
            match multipart_fields(multipart).await.as_slice() {
                [(name, file_name, mime, size)] if name == "file" => Json(json!({
                    "id": 5,
                    "fileName": file_name,
                    "contentType": mime,
                    "size": size,
                    "url": format!("/uploads/{file_name}")
                }))
                .into_response(),
                other => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": format!("unexpected fields {other:?}") })),
                )
                    .into_response(),
            }
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let upload = client.upload_file(avatar()).await.unwrap();

    assert_eq!(upload.id, 5);
    assert_eq!(upload.file_name.as_deref(), Some("avatar.png"));
    assert_eq!(upload.content_type.as_deref(), Some("image/png"));
    assert_eq!(upload.size, Some(4));
    assert_eq!(upload.url.as_deref(), Some("/uploads/avatar.png"));
}

#[tokio::test]
async fn profile_picture_upload_is_authorized_multipart() {
    let router = Router::new().route(
        "/api/users/profile/picture",
        post(|headers: HeaderMap, multipart: Multipart| async move {
            let fields = multipart_fields(multipart).await;
            if bearer(&headers) != "Bearer user-token" {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            match fields.as_slice() {
                [(name, file_name, mime, _)] if name == "file" && mime == "image/png" => {
                    Json(json!({ "id": 12, "profileImage": format!("/uploads/{file_name}") }))
                        .into_response()
                }
                _ => StatusCode::BAD_REQUEST.into_response(),
            }
        }),
    );
    let client = ApiClient::new(&spawn(router).await)
        .unwrap()
        .with_token_store(Arc::new(MemoryTokenStore::with_token("user-token")));

    let profile = client.upload_profile_picture(avatar()).await.unwrap();

    assert_eq!(profile.id, 12);
    assert_eq!(profile.profile_image.as_deref(), Some("/uploads/avatar.png"));
}

#[tokio::test]
async fn contact_failure_without_json_uses_friendly_message() {
    let router = Router::new().route(
        "/api/contact",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "mail relay down") }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let err = client.send_contact(&contact_message()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.to_string(),
        "Failed to send message. Please try again later."
    );
}

#[tokio::test]
async fn contact_failure_with_json_uses_server_message() {
    let router = Router::new().route(
        "/api/contact",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Subject is required" })),
            )
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let err = client.send_contact(&contact_message()).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Subject is required");
}

#[tokio::test]
async fn contact_success_posts_message() {
    let router = Router::new().route(
        "/api/contact",
        post(|Json(body): Json<Value>| async move {
            let name = body["name"].as_str().unwrap_or_default().to_string();
            Json(json!({ "success": true, "message": format!("Thanks {name}") }))
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let ack = client.send_contact(&contact_message()).await.unwrap();

    assert!(ack.success);
    assert_eq!(ack.message.as_deref(), Some("Thanks Ada"));
}

#[tokio::test]
async fn highlight_endpoints_accept_any_listing_shape() {
    let router = Router::new()
        .route(
            "/api/blog/featured",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!([
                    { "id": 1, "title": format!("limit {}", params["limit"]) },
                    { "id": 2, "title": "second" }
                ]))
            }),
        )
        .route(
            "/api/portfolio/highlights",
            get(|| async {
                Json(json!({
                    "content": [{ "id": 7, "title": "Compiler", "technologies": ["Rust"] }],
                    "totalPages": 1,
                    "number": 0
                }))
            }),
        );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let featured = client.featured_posts(3).await.unwrap();
    let titles: Vec<_> = featured.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["limit 3", "second"]);

    let highlights = client.portfolio_highlights(3).await.unwrap();
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].technologies, vec!["Rust".to_string()]);
}

#[tokio::test]
async fn uploads_page_reads_hateoas_and_empty_pages() {
    let router = Router::new().route(
        "/api/uploads/pageable",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params["page"] == "0" {
                Json(json!({
                    "_embedded": { "uploadDtoList": [
                        { "id": 1, "fileName": "a.png" },
                        { "id": 2, "fileName": "b.png" }
                    ]},
                    "page": {
                        "size": params["size"].parse::<u32>().unwrap(),
                        "totalElements": 2,
                        "totalPages": 2,
                        "number": 0
                    }
                }))
            } else {
                Json(json!({
                    "page": { "size": 2, "totalElements": 2, "totalPages": 2, "number": 1 }
                }))
            }
        }),
    );
    let client = ApiClient::new(&spawn(router).await).unwrap();

    let first = client.uploads_page(0, 2).await.unwrap();
    let names: Vec<_> = first
        .items
        .iter()
        .map(|u| u.file_name.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["a.png", "b.png"]);
    assert_eq!(first.meta.size, Some(2));
    assert_eq!(first.total_pages(), 2);

    let second = client.uploads_page(1, 2).await.unwrap();
    assert!(second.is_empty());
    assert_eq!(second.meta.number, Some(1));
}
