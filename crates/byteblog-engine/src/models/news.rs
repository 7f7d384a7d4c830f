use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSource {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub source: Option<NewsSource>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl NewsArticle {
    pub fn source_name(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("News Source")
    }
}

/// Query for the top-headlines endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub page: u32,
    pub page_size: u32,
    pub category: String,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            category: "technology".to_string(),
        }
    }
}
