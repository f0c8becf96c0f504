//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{association, order, page_in_range};
use crate::domain::{
    Author, AuthorRepository, Book, DomainError, NewAuthor, Page, PageRequest, Sort,
};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity, Model};
use crate::models::book;

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<AuthorEntity>,
        request: PageRequest,
    ) -> Result<Page<Author>, DomainError> {
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
            items: items.into_iter().map(Author::from).collect(),
            number: request.page,
            size: request.size,
            total_elements,
        })
    }
}

fn sort_column(sort: &Sort) -> Result<Column, DomainError> {
    match sort.property.as_str() {
        "id" => Ok(Column::Id),
        "firstName" => Ok(Column::FirstName),
        "lastName" => Ok(Column::LastName),
        other => Err(DomainError::Validation(format!(
            "unknown author property '{}'",
            other
        ))),
    }
}

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self, request: PageRequest) -> Result<Page<Author>, DomainError> {
        self.fetch_page(AuthorEntity::find(), request).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;
        Ok(author.map(Author::from))
    }

    async fn find_by_last_name(
        &self,
        last_name: &str,
        request: PageRequest,
    ) -> Result<Page<Author>, DomainError> {
        let query = AuthorEntity::find().filter(Column::LastName.eq(last_name));
        self.fetch_page(query, request).await
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let author = ActiveModel {
            first_name: Set(author.first_name),
            last_name: Set(author.last_name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = author.insert(&self.db).await?;
        tracing::debug!(author_id = result.id, "author created");

        Ok(Author::from(result))
    }

    async fn add_book(&self, author_id: i32, book_id: i32) -> Result<(), DomainError> {
        association::link(&self.db, author_id, book_id).await
    }

    async fn find_books(&self, author_id: i32) -> Result<Vec<Book>, DomainError> {
        let author = AuthorEntity::find_by_id(author_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let books = author
            .find_related(book::Entity)
            .order_by_asc(book::Column::Id)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        association::delete_author(&self.db, id).await
    }
}
