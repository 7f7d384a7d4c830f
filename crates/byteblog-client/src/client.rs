//! REST client for the ByteAndBlog API.

use std::sync::Arc;

use byteblog_engine::{
    Ack, BlogPost, BlogPostDraft, Comment, ContactMessage, DashboardStats, ForgotPasswordRequest,
    Listing, LoginRequest, LoginResponse, NewComment, NewsArticle, NewsQuery, Page, PortfolioItem,
    PortfolioItemDraft, ProfileUpdate, RegisterRequest, ResetPasswordRequest, Upload, UserProfile,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::session::SessionManager;
use crate::store::TokenStore;

const CONTACT_FAILURE: &str = "Failed to send message. Please try again later.";

/// Statuses the password endpoints answer with on success.
const ACCEPTED: [StatusCode; 4] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NO_CONTENT,
];

/// A file to send as multipart `file` field.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// ByteAndBlog API client
///
/// Cheap to clone; clones share the connection pool and token store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Option<Arc<dyn TokenStore>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            tokens: None,
        })
    }

    /// Send the session's bearer token with every request.
    pub fn with_session(self, session: &SessionManager) -> Self {
        self.with_token_store(session.store())
    }

    pub fn with_token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Auth

    pub async fn register(&self, request: &RegisterRequest) -> Result<Ack> {
        let url = self.endpoint("/api/auth/register")?;
        self.send_json(Method::POST, url, request).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.endpoint("/api/auth/login")?;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.send(self.http.post(url).json(&request)).await?;
        Self::handle_response(response).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Ack> {
        let url = self.endpoint("/api/auth/forgot-password")?;
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        let response = self.send(self.http.post(url).json(&request)).await?;
        Self::acknowledge(response).await
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> Result<Ack> {
        let url = self.endpoint("/api/auth/reset-password")?;
        let request = ResetPasswordRequest {
            token: token.to_string(),
            password: password.to_string(),
        };
        let response = self.send(self.http.post(url).json(&request)).await?;
        Self::acknowledge(response).await
    }

    // Blog

    pub async fn posts(&self, page: u32, size: u32) -> Result<Page<BlogPost>> {
        let url = self.endpoint_with("/api/blog", &paging(page, size))?;
        self.list(url).await
    }

    pub async fn post(&self, id: i64) -> Result<BlogPost> {
        let url = self.endpoint(&format!("/api/blog/{id}"))?;
        self.get(url).await
    }

    pub async fn featured_posts(&self, limit: u32) -> Result<Vec<BlogPost>> {
        let url = self.endpoint_with("/api/blog/featured", &[("limit", limit.to_string())])?;
        Ok(self.list(url).await?.items)
    }

    pub async fn create_post(&self, draft: &BlogPostDraft) -> Result<BlogPost> {
        let url = self.endpoint("/api/blog")?;
        self.send_json(Method::POST, url, draft).await
    }

    pub async fn update_post(&self, id: i64, draft: &BlogPostDraft) -> Result<BlogPost> {
        let url = self.endpoint(&format!("/api/blog/{id}"))?;
        self.send_json(Method::PUT, url, draft).await
    }

    pub async fn delete_post(&self, id: i64) -> Result<()> {
        let url = self.endpoint(&format!("/api/blog/{id}"))?;
        self.delete(url).await
    }

    // Portfolio

    pub async fn portfolio(&self, page: u32, size: u32) -> Result<Page<PortfolioItem>> {
        let url = self.endpoint_with("/api/portfolio", &paging(page, size))?;
        self.list(url).await
    }

    pub async fn portfolio_item(&self, id: i64) -> Result<PortfolioItem> {
        let url = self.endpoint(&format!("/api/portfolio/{id}"))?;
        self.get(url).await
    }

    pub async fn portfolio_highlights(&self, limit: u32) -> Result<Vec<PortfolioItem>> {
        let url = self.endpoint_with("/api/portfolio/highlights", &[("limit", limit.to_string())])?;
        Ok(self.list(url).await?.items)
    }

    pub async fn create_portfolio_item(&self, draft: &PortfolioItemDraft) -> Result<PortfolioItem> {
        let url = self.endpoint("/api/portfolio")?;
        self.send_json(Method::POST, url, draft).await
    }

    pub async fn update_portfolio_item(
        &self,
        id: i64,
        draft: &PortfolioItemDraft,
    ) -> Result<PortfolioItem> {
        let url = self.endpoint(&format!("/api/portfolio/{id}"))?;
        self.send_json(Method::PUT, url, draft).await
    }

    pub async fn delete_portfolio_item(&self, id: i64) -> Result<()> {
        let url = self.endpoint(&format!("/api/portfolio/{id}"))?;
        self.delete(url).await
    }

    // Comments

    pub async fn comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        let url = self.endpoint_with("/api/comments", &[("postId", post_id.to_string())])?;
        Ok(self.list(url).await?.items)
    }

    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let url = self.endpoint("/api/comments")?;
        self.send_json(Method::POST, url, comment).await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<()> {
        let url = self.endpoint(&format!("/api/comments/{id}"))?;
        self.delete(url).await
    }

    /// Latest comments across all posts. Failures yield an empty list.
    pub async fn recent_comments(&self, limit: u32) -> Vec<Comment> {
        let url = self.endpoint_with("/api/comments/recent", &[("limit", limit.to_string())]);
        let result = match url {
            Ok(url) => self.list::<Comment>(url).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(page) => page.items,
            Err(e) => {
                log::warn!("Failed to fetch recent comments: {e}");
                Vec::new()
            }
        }
    }

    // News

    pub async fn news(&self, query: &NewsQuery) -> Result<Page<NewsArticle>> {
        let url = self.endpoint_with(
            "/api/news/top-headlines",
            &[
                ("page", query.page.to_string()),
                ("pageSize", query.page_size.to_string()),
                ("category", query.category.clone()),
            ],
        )?;
        self.list(url).await
    }

    // Uploads

    pub async fn upload_file(&self, file: FileUpload) -> Result<Upload> {
        let url = self.endpoint("/api/uploads")?;
        self.send_file(url, file).await
    }

    pub async fn uploads(&self) -> Result<Vec<Upload>> {
        let url = self.endpoint("/api/uploads")?;
        Ok(self.list(url).await?.items)
    }

    pub async fn uploads_page(&self, page: u32, size: u32) -> Result<Page<Upload>> {
        let url = self.endpoint_with("/api/uploads/pageable", &paging(page, size))?;
        self.list(url).await
    }

    // Dashboard

    /// Site totals. Failures yield zeroed stats.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        let result = match self.endpoint("/api/dashboard/stats") {
            Ok(url) => self.get::<DashboardStats>(url).await,
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            log::warn!("Failed to fetch dashboard stats: {e}");
            DashboardStats::default()
        })
    }

    // Contact

    pub async fn send_contact(&self, message: &ContactMessage) -> Result<Ack> {
        let url = self.endpoint("/api/contact")?;
        let response = self.send(self.http.post(url).json(message)).await?;
        let status = response.status();
        if status.is_success() {
            return Self::handle_response(response).await;
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(json) => error_message(&json).unwrap_or_else(|| status_message(status)),
            Err(_) => CONTACT_FAILURE.to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    // Profile

    pub async fn profile(&self) -> Result<UserProfile> {
        let url = self.endpoint("/api/users/profile")?;
        self.get(url).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let url = self.endpoint("/api/users/profile")?;
        self.send_json(Method::PUT, url, update).await
    }

    pub async fn upload_profile_picture(&self, file: FileUpload) -> Result<UserProfile> {
        let url = self.endpoint("/api/users/profile/picture")?;
        self.send_file(url, file).await
    }

    // Plumbing

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = format!("{base}{path}");
        Url::parse(&joined).map_err(|e| ClientError::InvalidUrl {
            url: joined,
            reason: e.to_string(),
        })
    }

    fn endpoint_with(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn bearer(&self) -> Option<String> {
        let store = self.tokens.as_ref()?;
        match store.load() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Sending request without token: {e}");
                None
            }
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        log::debug!("{} {}", request.method(), request.url());
        self.http.execute(request).await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::Unreachable(e)
            } else {
                ClientError::Http(e)
            }
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(self.request(Method::GET, url)).await?;
        Self::handle_response(response).await
    }

    async fn list<T: DeserializeOwned>(&self, url: Url) -> Result<Page<T>> {
        let listing: Listing<T> = self.get(url).await?;
        Ok(listing.into_page())
    }

    async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, url).json(body)).await?;
        Self::handle_response(response).await
    }

    async fn send_file<T: DeserializeOwned>(&self, url: Url, file: FileUpload) -> Result<T> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime)?;
        let form = Form::new().part("file", part);
        let response = self
            .send(self.request(Method::POST, url).multipart(form))
            .await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, url: Url) -> Result<()> {
        let response = self.send(self.request(Method::DELETE, url)).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// For endpoints that may answer with no JSON at all.
    async fn acknowledge(response: Response) -> Result<Ack> {
        if !ACCEPTED.contains(&response.status()) {
            return Err(Self::error_from(response).await);
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }

    async fn error_from(response: Response) -> ClientError {
        let status = response.status();
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<serde_json::Value>(&body).ok())
            .and_then(|json| error_message(&json))
            .unwrap_or_else(|| status_message(status));
        log::debug!("API error {}: {message}", status.as_u16());
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn paging(page: u32, size: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("size", size.to_string())]
}

fn error_message(json: &serde_json::Value) -> Option<String> {
    json.get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn status_message(status: StatusCode) -> String {
    format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}
