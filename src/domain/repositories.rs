//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;

/// Author as seen by the rest of the application.
///
/// Books are not held here; the association lives in the join table and is
/// queried through [`AuthorRepository::find_books`].
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Book as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i32,
    pub isbn: String,
    pub title: String,
}

/// Input for creating an author
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// Input for creating a book
#[derive(Debug, Clone)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Sort order requested by the caller, by public property name
/// (`firstName`, `isbn`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    /// Parse `property` or `property,asc|desc`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.split(',').map(str::trim);
        let property = match parts.next() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => return Err(DomainError::Validation("empty sort property".to_string())),
        };
        let direction = match parts.next() {
            None => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(d) => {
                return Err(DomainError::Validation(format!(
                    "invalid sort direction '{}'",
                    d
                )));
            }
        };
        if parts.next().is_some() {
            return Err(DomainError::Validation(format!("invalid sort '{}'", raw)));
        }
        Ok(Self {
            property,
            direction,
        })
    }
}

/// A request for one slice of a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number
    pub page: u64,
    pub size: u64,
    pub sort: Option<Sort>,
}

/// One slice of a result set plus what is needed to ask for the others
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find one page of authors
    async fn find_all(&self, request: PageRequest) -> Result<Page<Author>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError>;

    /// Exact, case-sensitive match on last name
    async fn find_by_last_name(
        &self,
        last_name: &str,
        request: PageRequest,
    ) -> Result<Page<Author>, DomainError>;

    /// Create a new author
    async fn create(&self, author: NewAuthor) -> Result<Author, DomainError>;

    /// Link a book to an author. Linking an existing pair is a no-op.
    async fn add_book(&self, author_id: i32, book_id: i32) -> Result<(), DomainError>;

    /// Books linked to the author, `NotFound` if the author does not exist
    async fn find_books(&self, author_id: i32) -> Result<Vec<Book>, DomainError>;

    /// Delete an author and its links. Deleting a missing id succeeds.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find one page of books
    async fn find_all(&self, request: PageRequest) -> Result<Page<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// ISBN is unique so at most one book matches
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DomainError>;

    /// Create a new book
    async fn create(&self, book: NewBook) -> Result<Book, DomainError>;

    /// Link an author to a book. Linking an existing pair is a no-op.
    async fn add_author(&self, book_id: i32, author_id: i32) -> Result<(), DomainError>;

    /// Authors linked to the book, `NotFound` if the book does not exist
    async fn find_authors(&self, book_id: i32) -> Result<Vec<Author>, DomainError>;

    /// Delete a book and its links. Deleting a missing id succeeds.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_defaults_to_ascending() {
        let sort = Sort::parse("lastName").unwrap();
        assert_eq!(sort.property, "lastName");
        assert_eq!(sort.direction, Direction::Asc);
    }

    #[test]
    fn sort_accepts_direction_in_any_case() {
        let sort = Sort::parse("title,DESC").unwrap();
        assert_eq!(sort.property, "title");
        assert_eq!(sort.direction, Direction::Desc);
    }

    #[test]
    fn sort_rejects_unknown_direction() {
        assert!(matches!(
            Sort::parse("title,sideways"),
            Err(DomainError::Validation(_))
        ));
        assert!(Sort::parse("").is_err());
        assert!(Sort::parse("title,asc,extra").is_err());
    }

    #[test]
    fn page_navigation() {
        let page = Page {
            items: vec![1, 2],
            number: 1,
            size: 2,
            total_elements: 5,
        };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous());
        assert!(page.has_next());

        let last = Page {
            items: vec![5],
            number: 2,
            size: 2,
            total_elements: 5,
        };
        assert!(!last.has_next());

        let empty: Page<i32> = Page {
            items: vec![],
            number: 0,
            size: 20,
            total_elements: 0,
        };
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
    }

    #[test]
    fn page_navigation_at_max_page_number() {
        let page: Page<i32> = Page {
            items: vec![],
            number: u64::MAX,
            size: 20,
            total_elements: 3,
        };
        assert!(page.has_previous());
        assert!(!page.has_next());
    }
}
