use crate::models::{author, book, book_authors};
use sea_orm::*;

pub const DEMO_ISBN: &str = "0123401234012";

/// Insert one author/book pair and link them.
///
/// Does nothing when the demo ISBN is already stored. Returns whether rows
/// were written.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<bool, DbErr> {
    if book::Entity::find()
        .filter(book::Column::Isbn.eq(DEMO_ISBN))
        .one(db)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now().to_rfc3339();

    let bilbo = author::ActiveModel {
        first_name: Set("Bilbo".to_owned()),
        last_name: Set("Baggins".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let hobbit = book::ActiveModel {
        isbn: Set(DEMO_ISBN.to_owned()),
        title: Set("The Hobbit".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    book_authors::Entity::insert(book_authors::ActiveModel {
        book_id: Set(hobbit.id),
        author_id: Set(bilbo.id),
    })
    .exec(&txn)
    .await?;

    txn.commit().await?;
    Ok(true)
}
