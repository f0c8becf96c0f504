//! HAL hypermedia helpers: link building from the request's base URL,
//! `_links` / `_embedded` serialization and paged collections.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::Display;
use url::Url;

use crate::domain::{Page, PageRequest};

pub const HAL_JSON: &str = "application/hal+json";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    pub href: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
}

/// Ordered relation -> link map, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<(String, Link)>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rel: &str, link: Link) -> Self {
        self.add(rel, link);
        self
    }

    pub fn add(&mut self, rel: &str, link: Link) {
        self.0.push((rel.to_string(), link));
    }

    #[cfg(test)]
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|(r, _)| r == rel).map(|(_, l)| l)
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (rel, link) in &self.0 {
            map.serialize_entry(rel, link)?;
        }
        map.end()
    }
}

/// Scheme and authority of the current request, used as the root of every
/// generated link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(origin: &str) -> Result<Self, url::ParseError> {
        Url::parse(origin).map(Self)
    }

    pub fn from_parts(parts: &Parts) -> Result<Self, url::ParseError> {
        let headers = &parts.headers;

        let scheme = first_forwarded(headers, "x-forwarded-proto")
            .or_else(|| parts.uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| "http".to_string());
        let host = first_forwarded(headers, "x-forwarded-host")
            .or_else(|| parts.uri.authority().map(|a| a.as_str().to_string()))
            .or_else(|| header_str(headers, header::HOST.as_str()).map(str::to_string))
            .unwrap_or_else(|| "localhost".to_string());

        Self::parse(&format!("{}://{}/", scheme, host))
    }

    /// Start a link rooted at the base URL.
    pub fn link_to(&self) -> LinkBuilder {
        LinkBuilder {
            url: self.0.clone(),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

// Proxies may append to these headers; the client-facing value comes first.
fn first_forwarded(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name)
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for BaseUrl
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        BaseUrl::from_parts(parts).map_err(|e| {
            tracing::warn!("Cannot derive base URL from request: {}", e);
            StatusCode::BAD_REQUEST
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    url: Url,
}

impl LinkBuilder {
    /// Append one path segment (percent-encoded as needed).
    pub fn slash(mut self, segment: impl Display) -> Self {
        let segment = segment.to_string();
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.pop_if_empty().push(&segment);
        }
        self
    }

    pub fn query<K: AsRef<str>, V: AsRef<str>>(mut self, pairs: &[(K, V)]) -> Self {
        if !pairs.is_empty() {
            let mut query = self.url.query_pairs_mut();
            for (k, v) in pairs {
                query.append_pair(k.as_ref(), v.as_ref());
            }
        }
        self
    }

    pub fn href(&self) -> String {
        self.url.to_string()
    }

    pub fn link(&self) -> Link {
        Link {
            href: self.href(),
            templated: false,
        }
    }

    /// Link whose href is this URL followed by an RFC 6570 template suffix
    /// such as `{?lastName,page,size,sort}`.
    pub fn templated(&self, template: &str) -> Link {
        Link {
            href: format!("{}{}", self.href(), template),
            templated: true,
        }
    }
}

/// `_embedded` object holding a single relation.
#[derive(Debug, Clone)]
pub struct Embedded<T> {
    rel: &'static str,
    items: Vec<T>,
}

impl<T> Embedded<T> {
    pub fn new(rel: &'static str, items: Vec<T>) -> Self {
        Self { rel, items }
    }
}

impl<T: Serialize> Serialize for Embedded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.rel, &self.items)?;
        map.end()
    }
}

/// Unpaged embedded collection, e.g. the books of one author.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CollectionResource<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> CollectionResource<T> {
    pub fn new(rel: &'static str, items: Vec<T>, self_link: Link) -> Self {
        Self {
            embedded: Embedded::new(rel, items),
            links: Links::new().with("self", self_link),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PagedResources<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub page: PageMetadata,
}

impl<T> PagedResources<T> {
    /// Wrap a page with `first`/`prev`/`self`/`next`/`last` links.
    ///
    /// `collection` is the endpoint URL without a query string; `filters`
    /// are query parameters every navigation link must repeat.
    pub fn assemble(
        page: Page<T>,
        rel: &'static str,
        collection: &LinkBuilder,
        filters: &[(&str, String)],
        request: &PageRequest,
    ) -> Self {
        let total_pages = page.total_pages();
        let has_previous = page.has_previous();
        let has_next = page.has_next();
        let metadata = PageMetadata {
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
            number: page.number,
        };

        let link_for = |number: u64| {
            let mut pairs: Vec<(&str, String)> = filters.to_vec();
            pairs.push(("page", number.to_string()));
            pairs.push(("size", page.size.to_string()));
            if let Some(sort) = &request.sort {
                pairs.push(("sort", format!("{},{}", sort.property, sort.direction.as_str())));
            }
            collection.clone().query(&pairs).link()
        };

        let mut links = Links::new();
        if has_previous {
            links.add("first", link_for(0));
            links.add("prev", link_for(page.number - 1));
        }
        links.add("self", link_for(page.number));
        if has_next {
            links.add("next", link_for(page.number.saturating_add(1)));
            links.add("last", link_for(total_pages - 1));
        }

        Self {
            embedded: Embedded::new(rel, page.items),
            links,
            page: metadata,
        }
    }

    pub fn add_link(&mut self, rel: &str, link: Link) {
        self.links.add(rel, link);
    }
}

/// HAL JSON response body.
pub struct Hal<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))],
                bytes,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize HAL body: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// 201 with an empty body and a Location header.
pub fn created(location: LinkBuilder) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location.href())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Sort};
    use axum::http::Request;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn base_url_defaults_to_localhost() {
        let base = BaseUrl::from_parts(&parts(Request::builder().uri("/authors"))).unwrap();
        assert_eq!(base.link_to().href(), "http://localhost/");
    }

    #[test]
    fn base_url_prefers_forwarded_headers() {
        let base = BaseUrl::from_parts(&parts(
            Request::builder()
                .uri("/authors")
                .header("host", "internal:8080")
                .header("x-forwarded-proto", "https, http")
                .header("x-forwarded-host", "books.example.com"),
        ))
        .unwrap();
        assert_eq!(base.link_to().href(), "https://books.example.com/");
    }

    #[test]
    fn base_url_uses_host_header() {
        let base = BaseUrl::from_parts(&parts(
            Request::builder().uri("/books").header("host", "api.test:9000"),
        ))
        .unwrap();
        assert_eq!(
            base.link_to().slash("books").slash(3).href(),
            "http://api.test:9000/books/3"
        );
    }

    #[test]
    fn slash_encodes_segments() {
        let base = BaseUrl::parse("http://localhost/").unwrap();
        assert_eq!(
            base.link_to().slash("a b").slash("c/d").href(),
            "http://localhost/a%20b/c%2Fd"
        );
    }

    #[test]
    fn templated_link_keeps_braces() {
        let base = BaseUrl::parse("http://localhost/").unwrap();
        let link = base
            .link_to()
            .slash("books")
            .slash("search")
            .slash("findByIsbn")
            .templated("{?isbn}");
        assert_eq!(link.href, "http://localhost/books/search/findByIsbn{?isbn}");
        assert!(link.templated);

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["templated"], true);
        let plain = serde_json::to_value(base.link_to().link()).unwrap();
        assert!(plain.get("templated").is_none());
    }

    #[test]
    fn links_serialize_in_insertion_order() {
        let base = BaseUrl::parse("http://localhost/").unwrap();
        let links = Links::new()
            .with("self", base.link_to().slash("authors").slash(1).link())
            .with("books", base.link_to().slash("authors").slash(1).slash("books").link());
        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(
            json,
            r#"{"self":{"href":"http://localhost/authors/1"},"books":{"href":"http://localhost/authors/1/books"}}"#
        );
    }

    #[test]
    fn middle_page_has_all_navigation_links() {
        let base = BaseUrl::parse("http://localhost/").unwrap();
        let request = PageRequest {
            page: 1,
            size: 2,
            sort: Some(Sort {
                property: "lastName".to_string(),
                direction: Direction::Desc,
            }),
        };
        let page = Page {
            items: vec!["c", "d"],
            number: 1,
            size: 2,
            total_elements: 5,
        };
        let collection = base.link_to().slash("authors");
        let paged = PagedResources::assemble(
            page,
            "authorResources",
            &collection,
            &[("lastName", "Baggins".to_string())],
            &request,
        );

        assert_eq!(paged.page.total_pages, 3);
        assert_eq!(
            paged.links.get("self").unwrap().href,
            "http://localhost/authors?lastName=Baggins&page=1&size=2&sort=lastName%2Cdesc"
        );
        assert!(paged.links.get("first").unwrap().href.contains("page=0"));
        assert!(paged.links.get("prev").unwrap().href.contains("page=0"));
        assert!(paged.links.get("next").unwrap().href.contains("page=2"));
        assert!(paged.links.get("last").unwrap().href.contains("page=2"));

        let json = serde_json::to_value(&paged).unwrap();
        assert_eq!(json["_embedded"]["authorResources"][1], "d");
        assert_eq!(json["page"]["totalElements"], 5);
    }

    #[test]
    fn page_past_the_end_links_back_only() {
        let base = BaseUrl::parse("http://localhost/").unwrap();
        let request = PageRequest {
            page: u64::MAX,
            size: 20,
            sort: None,
        };
        let page: Page<u8> = Page {
            items: vec![],
            number: u64::MAX,
            size: 20,
            total_elements: 3,
        };
        let paged =
            PagedResources::assemble(page, "authorResources", &base.link_to().slash("authors"), &[], &request);

        assert!(paged.links.get("next").is_none());
        assert!(paged.links.get("last").is_none());
        assert!(
            paged.links.get("self").unwrap().href.contains("page=18446744073709551615")
        );
        assert!(paged.links.get("first").unwrap().href.contains("page=0"));
        assert_eq!(paged.page.total_elements, 3);
    }

    #[test]
    fn single_page_has_only_self() {
        let base = BaseUrl::parse("http://localhost/").unwrap();
        let request = PageRequest {
            page: 0,
            size: 20,
            sort: None,
        };
        let page: Page<u8> = Page {
            items: vec![],
            number: 0,
            size: 20,
            total_elements: 0,
        };
        let paged =
            PagedResources::assemble(page, "bookResources", &base.link_to().slash("books"), &[], &request);

        assert!(paged.links.get("self").is_some());
        assert!(paged.links.get("first").is_none());
        assert!(paged.links.get("next").is_none());
        let json = serde_json::to_value(&paged).unwrap();
        assert_eq!(json["_embedded"]["bookResources"], serde_json::json!([]));
    }
}
