use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use http::header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::{ProxyError, ProxyState};

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";
const CACHE_FOR_AN_HOUR: &str = "public, max-age=3600";

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub path: Option<String>,
}

pub async fn proxy_image(
    State(state): State<Arc<ProxyState>>,
    Query(query): Query<ImageQuery>,
    headers: HeaderMap,
) -> Response {
    match fetch(&state, query.path.as_deref(), &headers).await {
        Ok(response) => response,
        Err(ProxyError::Upstream(reason)) => {
            log::error!("Image proxy error: {reason}");
            Redirect::temporary(state.fallback_image()).into_response()
        }
        Err(e) => {
            if matches!(e, ProxyError::NotConfigured) {
                log::error!("No API URL configured for the image proxy");
            }
            e.into_response()
        }
    }
}

async fn fetch(
    state: &ProxyState,
    path: Option<&str>,
    headers: &HeaderMap,
) -> Result<Response, ProxyError> {
    let api_url = state.api_url().ok_or(ProxyError::NotConfigured)?;
    let path = path
        .filter(|p| !p.is_empty())
        .ok_or(ProxyError::MissingPath)?;

    let url = upstream_url(api_url, path);
    log::debug!("Proxying image request to: {url}");

    let mut request = state.http.get(&url).header(ACCEPT, "image/*");
    if let Some(token) = incoming_bearer(headers)
        .map(str::to_string)
        .or_else(|| state.stored_token())
    {
        request = request.bearer_auth(token);
    }

    let upstream = request
        .send()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;

    let status = upstream.status();
    if !status.is_success() {
        return Err(ProxyError::Upstream(format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )));
    }

    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let body = upstream
        .bytes()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;

    Ok((
        status,
        [
            (CONTENT_TYPE, content_type),
            (CACHE_CONTROL, HeaderValue::from_static(CACHE_FOR_AN_HOUR)),
        ],
        body,
    )
        .into_response())
}

/// Absolute `http…` paths are used as is; anything else hangs off the API URL.
fn upstream_url(api_url: &str, path: &str) -> String {
    if path.starts_with("http") {
        return path.to_string();
    }
    let base = api_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn incoming_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}
