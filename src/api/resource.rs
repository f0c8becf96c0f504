//! Flat projections of the domain entities plus their links.
//!
//! Internal ids are only visible through the generated hrefs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::hal::{BaseUrl, LinkBuilder, Links};
use crate::domain::{Author, Book, DomainError, NewAuthor, NewBook, PageRequest, Sort};
use crate::infrastructure::config::PagingConfig;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResource {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl AuthorResource {
    pub fn new(author: Author, base: &BaseUrl) -> Self {
        let self_link = author_link(base, author.id);
        Self {
            first_name: author.first_name,
            last_name: author.last_name,
            links: Links::new()
                .with("self", self_link.link())
                .with("books", self_link.slash("books").link()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookResource {
    pub isbn: String,
    pub title: String,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl BookResource {
    pub fn new(book: Book, base: &BaseUrl) -> Self {
        let self_link = book_link(base, book.id);
        Self {
            isbn: book.isbn,
            title: book.title,
            links: Links::new()
                .with("self", self_link.link())
                .with("authors", self_link.slash("authors").link()),
        }
    }
}

pub fn author_link(base: &BaseUrl, id: i32) -> LinkBuilder {
    base.link_to().slash("authors").slash(id)
}

pub fn book_link(base: &BaseUrl, id: i32) -> LinkBuilder {
    base.link_to().slash("books").slash(id)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    #[schema(example = "Bilbo")]
    pub first_name: String,
    #[schema(example = "Baggins")]
    pub last_name: String,
}

impl From<AuthorRequest> for NewAuthor {
    fn from(req: AuthorRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookRequest {
    #[schema(example = "0123401234012")]
    pub isbn: String,
    #[schema(example = "The Hobbit")]
    pub title: String,
}

impl From<BookRequest> for NewBook {
    fn from(req: BookRequest) -> Self {
        Self {
            isbn: req.isbn,
            title: req.title,
        }
    }
}

/// `page`, `size` and `sort` query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page number
    pub page: Option<u64>,
    /// Page size
    pub size: Option<u64>,
    /// `property` or `property,asc|desc`
    pub sort: Option<String>,
}

impl PageParams {
    pub fn to_request(&self, paging: &PagingConfig) -> Result<PageRequest, DomainError> {
        let sort = match self.sort.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(Sort::parse(raw)?),
            _ => None,
        };
        Ok(PageRequest {
            page: self.page.unwrap_or(0),
            size: paging.resolve_size(self.size),
            sort,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    #[test]
    fn author_projection_hides_id() {
        let base = BaseUrl::parse("http://localhost/").unwrap();
        let resource = AuthorResource::new(
            Author {
                id: 7,
                first_name: "Bilbo".to_string(),
                last_name: "Baggins".to_string(),
            },
            &base,
        );
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["firstName"], "Bilbo");
        assert_eq!(json["lastName"], "Baggins");
        assert!(json.get("id").is_none());
        assert_eq!(json["_links"]["self"]["href"], "http://localhost/authors/7");
        assert_eq!(
            json["_links"]["books"]["href"],
            "http://localhost/authors/7/books"
        );
    }

    #[test]
    fn book_projection_links_to_authors() {
        let base = BaseUrl::parse("https://example.org/").unwrap();
        let resource = BookResource::new(
            Book {
                id: 3,
                isbn: "0123401234012".to_string(),
                title: "The Hobbit".to_string(),
            },
            &base,
        );
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["isbn"], "0123401234012");
        assert_eq!(json["title"], "The Hobbit");
        assert_eq!(
            json["_links"]["authors"]["href"],
            "https://example.org/books/3/authors"
        );
    }

    #[test]
    fn page_params_apply_defaults() {
        let request = PageParams::default()
            .to_request(&PagingConfig::default())
            .unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 20);
        assert!(request.sort.is_none());
    }

    #[test]
    fn page_params_parse_sort() {
        let params = PageParams {
            page: Some(2),
            size: Some(10),
            sort: Some("firstName,desc".to_string()),
        };
        let request = params.to_request(&PagingConfig::default()).unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 10);
        let sort = request.sort.unwrap();
        assert_eq!(sort.property, "firstName");
        assert_eq!(sort.direction, Direction::Desc);

        let bad = PageParams {
            sort: Some("firstName,up".to_string()),
            ..Default::default()
        };
        assert!(bad.to_request(&PagingConfig::default()).is_err());
    }
}
