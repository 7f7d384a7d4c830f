//! Normalization of list responses.
//!
//! Collection endpoints answer in one of a few shapes depending on the
//! deployment and endpoint:
//!
//! - a bare JSON array,
//! - a paginated wrapper: `{"content": [...], "totalPages": 3, ...}`,
//! - a HATEOAS wrapper: `{"_embedded": {"blogPostDtoList": [...]}, "page": {...}}`
//!   (with `_embedded` omitted entirely when the page is empty),
//! - a news wrapper: `{"articles": [...], "totalResults": 20}`.
//!
//! [`Listing`] decodes any of them; [`Listing::into_page`] is the single place
//! the shapes are reconciled into a [`Page`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pagination metadata as reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub content: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Articles<T> {
    pub articles: Vec<T>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Embedded<T> {
    #[serde(rename = "_embedded")]
    pub embedded: BTreeMap<String, Vec<T>>,
    #[serde(default)]
    pub page: Option<PageMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageOnly {
    pub page: PageMeta,
}

/// Every response shape a list endpoint may produce.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Array(Vec<T>),
    Paginated(Paginated<T>),
    Articles(Articles<T>),
    Embedded(Embedded<T>),
    PageOnly(PageOnly),
}

/// Canonical list result: items plus whatever pagination the API reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Total page count, at least one.
    pub fn total_pages(&self) -> u32 {
        self.meta.total_pages.filter(|&n| n > 0).unwrap_or(1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Listing<T> {
    pub fn into_page(self) -> Page<T> {
        match self {
            Listing::Array(items) => Page {
                items,
                meta: PageMeta::default(),
            },
            Listing::Paginated(p) => Page {
                items: p.content,
                meta: p.meta,
            },
            Listing::Articles(a) => Page {
                items: a.articles,
                meta: PageMeta {
                    total_elements: a.total_results,
                    ..PageMeta::default()
                },
            },
            Listing::Embedded(e) => Page {
                items: e.embedded.into_values().flatten().collect(),
                meta: e.page.unwrap_or_default(),
            },
            Listing::PageOnly(p) => Page {
                items: vec![],
                meta: p.page,
            },
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.into_page().items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: u32,
    }

    fn page(value: serde_json::Value) -> Page<Item> {
        serde_json::from_value::<Listing<Item>>(value)
            .unwrap()
            .into_page()
    }

    fn ids(page: &Page<Item>) -> Vec<u32> {
        page.items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn bare_array() {
        let p = page(json!([{ "id": 1 }, { "id": 2 }]));
        assert_eq!(ids(&p), vec![1, 2]);
        assert_eq!(p.total_pages(), 1);
    }

    #[test]
    fn paginated_wrapper() {
        let p = page(json!({
            "content": [{ "id": 7 }],
            "totalPages": 4,
            "totalElements": 31,
            "number": 2,
            "size": 10
        }));
        assert_eq!(ids(&p), vec![7]);
        assert_eq!(
            p.meta,
            PageMeta {
                size: Some(10),
                total_elements: Some(31),
                total_pages: Some(4),
                number: Some(2),
            }
        );
    }

    #[test]
    fn hateoas_wrapper() {
        let p = page(json!({
            "_embedded": { "blogPostDtoList": [{ "id": 3 }, { "id": 4 }] },
            "_links": { "self": { "href": "http://api/blog?page=0" } },
            "page": { "size": 2, "totalElements": 9, "totalPages": 5, "number": 0 }
        }));
        assert_eq!(ids(&p), vec![3, 4]);
        assert_eq!(p.total_pages(), 5);
    }

    #[test]
    fn hateoas_without_embedded_is_empty() {
        let p = page(json!({
            "page": { "size": 10, "totalElements": 0, "totalPages": 0, "number": 0 }
        }));
        assert!(p.is_empty());
        assert_eq!(p.total_pages(), 1);
    }

    #[test]
    fn articles_wrapper() {
        let p = page(json!({ "status": "ok", "totalResults": 2, "articles": [{ "id": 5 }] }));
        assert_eq!(ids(&p), vec![5]);
        assert_eq!(p.meta.total_elements, Some(2));
    }

    #[test]
    fn malformed_items_are_an_error() {
        let result = serde_json::from_value::<Listing<Item>>(json!({ "content": [{ "id": "x" }] }));
        assert!(result.is_err());
    }
}
