//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{association, order, page_in_range};
use crate::domain::{Author, Book, BookRepository, DomainError, NewBook, Page, PageRequest, Sort};
use crate::models::author;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<BookEntity>,
        request: PageRequest,
    ) -> Result<Page<Book>, DomainError> {
        let query = match &request.sort {
            Some(sort) => query.order_by(sort_column(sort)?, order(sort.direction)),
            None => query.order_by_asc(Column::Id),
        };

        let paginator = query.paginate(&self.db, request.size);
        let total_elements = paginator.num_items().await?;
        let items = if page_in_range(&request, total_elements) {
            paginator.fetch_page(request.page).await?
        } else {
            Vec::new()
        };

        Ok(Page {
            items: items.into_iter().map(Book::from).collect(),
            number: request.page,
            size: request.size,
            total_elements,
        })
    }
}

fn sort_column(sort: &Sort) -> Result<Column, DomainError> {
    match sort.property.as_str() {
        "id" => Ok(Column::Id),
        "isbn" => Ok(Column::Isbn),
        "title" => Ok(Column::Title),
        other => Err(DomainError::Validation(format!(
            "unknown book property '{}'",
            other
        ))),
    }
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            isbn: model.isbn,
            title: model.title,
        }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, request: PageRequest) -> Result<Page<Book>, DomainError> {
        self.fetch_page(BookEntity::find(), request).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(book.map(Book::from))
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find()
            .filter(Column::Isbn.eq(isbn))
            .one(&self.db)
            .await?;
        Ok(book.map(Book::from))
    }

    async fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_book = ActiveModel {
            isbn: Set(book.isbn),
            title: Set(book.title),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_book.insert(&self.db).await?;
        tracing::debug!(book_id = result.id, "book created");

        Ok(Book::from(result))
    }

    async fn add_author(&self, book_id: i32, author_id: i32) -> Result<(), DomainError> {
        association::link(&self.db, author_id, book_id).await
    }

    async fn find_authors(&self, book_id: i32) -> Result<Vec<Author>, DomainError> {
        let book = BookEntity::find_by_id(book_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let authors = book
            .find_related(author::Entity)
            .order_by_asc(author::Column::Id)
            .all(&self.db)
            .await?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        association::delete_book(&self.db, id).await
    }
}
