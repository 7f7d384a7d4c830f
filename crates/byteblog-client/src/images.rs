//! Rewriting of backend image URLs.
//!
//! Uploaded images live on the API host, which browsers may not reach
//! directly. Anything under `/uploads/` is routed through the image proxy; other
//! URLs pass through untouched.

use reqwest::Url;

/// Route served by the image proxy.
pub const PROXY_ROUTE: &str = "/api/proxy/image";

const UPLOADS_SEGMENT: &str = "/uploads/";
const PROFILE_IMAGE_ROUTE: &str = "/api/images/profile/";

/// Map a backend image URL to the URL a client should load.
///
/// Missing or unparseable URLs become `fallback`.
pub fn proxied_image_url(url: Option<&str>, fallback: &str) -> String {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return fallback.to_string();
    };

    if url.starts_with('/') {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        return match uploads_path(path) {
            Some(uploads) => proxy_url(uploads),
            None => url.to_string(),
        };
    }

    match Url::parse(url) {
        Ok(parsed) => match uploads_path(parsed.path()) {
            Some(uploads) => proxy_url(uploads),
            None => url.to_string(),
        },
        Err(e) => {
            log::warn!("Error parsing image URL {url:?}: {e}");
            fallback.to_string()
        }
    }
}

/// URL of a stored profile picture by file name.
pub fn profile_image_url(filename: Option<&str>, fallback: &str) -> String {
    match filename.map(str::trim).filter(|f| !f.is_empty()) {
        Some(name) => format!("{PROFILE_IMAGE_ROUTE}{}", urlencoding::encode(name)),
        None => fallback.to_string(),
    }
}

fn uploads_path(path: &str) -> Option<&str> {
    path.find(UPLOADS_SEGMENT).map(|start| &path[start..])
}

fn proxy_url(uploads: &str) -> String {
    format!("{PROXY_ROUTE}?path={}", urlencoding::encode(uploads))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FALLBACK: &str = "/abstract-profile.png";

    #[rstest]
    #[case::missing(None, FALLBACK)]
    #[case::empty(Some(""), FALLBACK)]
    #[case::blank(Some("   "), FALLBACK)]
    #[case::relative_asset(Some("/images/hero.png"), "/images/hero.png")]
    #[case::relative_upload(
        Some("/uploads/2024/cat.png"),
        "/api/proxy/image?path=%2Fuploads%2F2024%2Fcat.png"
    )]
    #[case::absolute_upload(
        Some("http://localhost:8080/uploads/cat.png"),
        "/api/proxy/image?path=%2Fuploads%2Fcat.png"
    )]
    #[case::nested_upload(
        Some("https://api.example.com/files/uploads/my%20cat.png?v=2"),
        "/api/proxy/image?path=%2Fuploads%2Fmy%2520cat.png"
    )]
    #[case::foreign(
        Some("https://cdn.example.com/img/banner.jpg"),
        "https://cdn.example.com/img/banner.jpg"
    )]
    #[case::garbage(Some("not a url"), FALLBACK)]
    fn rewrites(#[case] input: Option<&str>, #[case] expected: &str) {
        assert_eq!(proxied_image_url(input, FALLBACK), expected);
    }

    #[test]
    fn profile_images() {
        assert_eq!(
            profile_image_url(Some("me.png"), FALLBACK),
            "/api/images/profile/me.png"
        );
        assert_eq!(profile_image_url(None, FALLBACK), FALLBACK);
    }
}
