pub mod author;
pub mod books;
pub mod error;
pub mod hal;
pub mod health;
pub mod resource;
pub mod root;

use axum::{
    routing::{get, put},
    Router,
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::index))
        // Health check
        .route("/health", get(health::health_check))
        // Authors
        .route(
            "/authors",
            get(author::list_authors).post(author::create_author),
        )
        .route(
            "/authors/search/findByLastName",
            get(author::find_by_last_name),
        )
        .route(
            "/authors/:id",
            get(author::get_author).delete(author::delete_author),
        )
        .route("/authors/:id/books", get(author::list_author_books))
        .route("/authors/:id/books/:book_id", put(author::add_author_book))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/search/findByIsbn", get(books::find_by_isbn))
        .route(
            "/books/:id",
            get(books::get_book).delete(books::delete_book),
        )
        .route("/books/:id/authors", get(books::list_book_authors))
        .route("/books/:id/authors/:author_id", put(books::add_book_author))
        .with_state(state)
}
