use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::hal::{created, BaseUrl, CollectionResource, Hal, PagedResources};
use super::resource::{book_link, AuthorResource, BookRequest, BookResource, PageParams};
use crate::domain::DomainError;
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IsbnQuery {
    pub isbn: Option<String>,
}

#[utoipa::path(
    get,
    path = "/books",
    params(PageParams),
    responses(
        (status = 200, description = "Page of books (HAL)"),
        (status = 400, description = "Invalid sort")
    ),
    tag = "books"
)]
pub async fn list_books(
    State(state): State<AppState>,
    base: BaseUrl,
    Query(params): Query<PageParams>,
) -> Result<Hal<PagedResources<BookResource>>, DomainError> {
    let request = params.to_request(&state.paging)?;
    let page = state.book_repo.find_all(request.clone()).await?;

    let mut paged = PagedResources::assemble(
        page.map(|b| BookResource::new(b, &base)),
        "bookResources",
        &base.link_to().slash("books"),
        &[],
        &request,
    );
    paged.add_link(
        "search",
        base.link_to()
            .slash("books")
            .slash("search")
            .slash("findByIsbn")
            .templated("{?isbn}"),
    );

    Ok(Hal(paged))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book (HAL)"),
        (status = 404, description = "Book not found")
    ),
    tag = "books"
)]
pub async fn get_book(
    State(state): State<AppState>,
    base: BaseUrl,
    Path(id): Path<i32>,
) -> Result<Hal<BookResource>, DomainError> {
    let book = state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    Ok(Hal(BookResource::new(book, &base)))
}

#[utoipa::path(
    get,
    path = "/books/search/findByIsbn",
    params(IsbnQuery),
    responses(
        (status = 200, description = "The book with this ISBN (HAL)"),
        (status = 404, description = "No book has this ISBN")
    ),
    tag = "books"
)]
pub async fn find_by_isbn(
    State(state): State<AppState>,
    base: BaseUrl,
    Query(query): Query<IsbnQuery>,
) -> Result<Hal<BookResource>, DomainError> {
    let isbn = query.isbn.ok_or(DomainError::NotFound)?;
    let book = state
        .book_repo
        .find_by_isbn(&isbn)
        .await?
        .ok_or(DomainError::NotFound)?;

    Ok(Hal(BookResource::new(book, &base)))
}

#[utoipa::path(
    post,
    path = "/books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book created; Location points at it"),
        (status = 409, description = "ISBN already used"),
        (status = 422, description = "Missing or malformed field")
    ),
    tag = "books"
)]
pub async fn create_book(
    State(state): State<AppState>,
    base: BaseUrl,
    Json(payload): Json<BookRequest>,
) -> Result<Response, DomainError> {
    let book = state.book_repo.create(payload.into()).await?;
    tracing::info!(book_id = book.id, "Book created");

    Ok(created(book_link(&base, book.id)))
}

#[utoipa::path(
    put,
    path = "/books/{id}/authors/{author_id}",
    params(
        ("id" = i32, Path, description = "Book id"),
        ("author_id" = i32, Path, description = "Author id")
    ),
    responses(
        (status = 201, description = "Author linked; Location points at the book's authors"),
        (status = 400, description = "Book or author does not exist")
    ),
    tag = "books"
)]
pub async fn add_book_author(
    State(state): State<AppState>,
    base: BaseUrl,
    Path((book_id, author_id)): Path<(i32, i32)>,
) -> Result<Response, DomainError> {
    state.book_repo.add_author(book_id, author_id).await?;
    tracing::info!(book_id, author_id, "Author linked to book");

    Ok(created(book_link(&base, book_id).slash("authors")))
}

#[utoipa::path(
    get,
    path = "/books/{id}/authors",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Authors of the book (HAL)"),
        (status = 404, description = "Book not found")
    ),
    tag = "books"
)]
pub async fn list_book_authors(
    State(state): State<AppState>,
    base: BaseUrl,
    Path(id): Path<i32>,
) -> Result<Hal<CollectionResource<AuthorResource>>, DomainError> {
    let authors = state.book_repo.find_authors(id).await?;
    let items = authors
        .into_iter()
        .map(|a| AuthorResource::new(a, &base))
        .collect();

    Ok(Hal(CollectionResource::new(
        "authors",
        items,
        book_link(&base, id).slash("authors").link(),
    )))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses((status = 204, description = "Book removed, or never existed")),
    tag = "books"
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    state.book_repo.delete(id).await?;
    tracing::info!(book_id = id, "Book deleted");

    Ok(StatusCode::NO_CONTENT)
}
