//! Image proxy for API uploads.
//!
//! Serves `GET /api/proxy/image?path=<p>`: fetches `p` from the API host with
//! the caller's bearer token and relays the bytes, or redirects to a fallback
//! image when the upstream fetch fails.

pub mod error;
pub mod image;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use byteblog_client::{PROXY_ROUTE, SessionManager, TokenStore};
use byteblog_config::Config;

pub use error::ProxyError;

/// Shared state for proxy handlers.
#[derive(Clone)]
pub struct ProxyState {
    api_url: Option<String>,
    fallback_image: String,
    http: reqwest::Client,
    tokens: Option<Arc<dyn TokenStore>>,
}

impl ProxyState {
    /// `api_url` of `None` (or blank) makes every request a configuration error.
    pub fn new(api_url: Option<String>) -> Self {
        Self {
            api_url: api_url
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            fallback_image: "/abstract-profile.png".to_string(),
            http: reqwest::Client::new(),
            tokens: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Some(config.api_url.clone())).with_fallback_image(&config.fallback_image)
    }

    pub fn with_fallback_image(mut self, fallback_image: impl Into<String>) -> Self {
        self.fallback_image = fallback_image.into();
        self
    }

    /// Forward the session's token upstream.
    pub fn with_session(self, session: &SessionManager) -> Self {
        self.with_token_store(session.store())
    }

    /// Token used upstream when the incoming request carries none.
    pub fn with_token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn fallback_image(&self) -> &str {
        &self.fallback_image
    }

    fn stored_token(&self) -> Option<String> {
        let store = self.tokens.as_ref()?;
        store.load().unwrap_or_else(|e| {
            log::warn!("Proxying without stored token: {e}");
            None
        })
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route(PROXY_ROUTE, get(image::proxy_image))
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: ProxyState) -> Result<(), ProxyError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ProxyError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    let local = listener.local_addr().map_err(ProxyError::Serve)?;
    log::info!("Image proxy listening on http://{local}{PROXY_ROUTE}");

    axum::serve(listener, router(state))
        .await
        .map_err(ProxyError::Serve)
}
