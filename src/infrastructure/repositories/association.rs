//! Join-table writes shared by both sides of the author/book relationship

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, TransactionTrait,
};

use crate::domain::DomainError;
use crate::models::{author, book, book_authors};

/// Insert the `(book_id, author_id)` row after checking both ends exist.
///
/// An existing row is left untouched so repeated calls succeed.
pub(crate) async fn link(
    db: &DatabaseConnection,
    author_id: i32,
    book_id: i32,
) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    if author::Entity::find_by_id(author_id).one(&txn).await?.is_none() {
        return Err(DomainError::UnresolvedReference {
            kind: "author",
            id: author_id,
        });
    }
    if book::Entity::find_by_id(book_id).one(&txn).await?.is_none() {
        return Err(DomainError::UnresolvedReference {
            kind: "book",
            id: book_id,
        });
    }

    let row = book_authors::ActiveModel {
        book_id: Set(book_id),
        author_id: Set(author_id),
    };
    let inserted = book_authors::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([book_authors::Column::BookId, book_authors::Column::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .exec(&txn)
        .await;

    match inserted {
        Ok(_) => {}
        Err(DbErr::RecordNotInserted) => {
            tracing::debug!(author_id, book_id, "association already present");
        }
        Err(e) => return Err(e.into()),
    }

    txn.commit().await?;
    Ok(())
}

/// Remove every join row for an author, then the author itself.
pub(crate) async fn delete_author(db: &DatabaseConnection, author_id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;
    book_authors::Entity::delete_many()
        .filter(book_authors::Column::AuthorId.eq(author_id))
        .exec(&txn)
        .await?;
    author::Entity::delete_by_id(author_id).exec(&txn).await?;
    txn.commit().await?;
    Ok(())
}

/// Remove every join row for a book, then the book itself.
pub(crate) async fn delete_book(db: &DatabaseConnection, book_id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;
    book_authors::Entity::delete_many()
        .filter(book_authors::Column::BookId.eq(book_id))
        .exec(&txn)
        .await?;
    book::Entity::delete_by_id(book_id).exec(&txn).await?;
    txn.commit().await?;
    Ok(())
}
