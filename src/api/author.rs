use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::hal::{created, BaseUrl, CollectionResource, Hal, Link, PagedResources};
use super::resource::{author_link, AuthorRequest, AuthorResource, BookResource, PageParams};
use crate::domain::{DomainError, Page};
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LastNameQuery {
    /// Exact, case-sensitive last name
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

fn search_link(base: &BaseUrl) -> Link {
    base.link_to()
        .slash("authors")
        .slash("search")
        .slash("findByLastName")
        .templated("{?lastName,page,size,sort}")
}

#[utoipa::path(
    get,
    path = "/authors",
    params(PageParams),
    responses(
        (status = 200, description = "Page of authors (HAL)"),
        (status = 400, description = "Invalid sort")
    ),
    tag = "authors"
)]
pub async fn list_authors(
    State(state): State<AppState>,
    base: BaseUrl,
    Query(params): Query<PageParams>,
) -> Result<Hal<PagedResources<AuthorResource>>, DomainError> {
    let request = params.to_request(&state.paging)?;
    let page = state.author_repo.find_all(request.clone()).await?;

    let mut paged = PagedResources::assemble(
        page.map(|a| AuthorResource::new(a, &base)),
        "authorResources",
        &base.link_to().slash("authors"),
        &[],
        &request,
    );
    paged.add_link("search", search_link(&base));

    Ok(Hal(paged))
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author (HAL)"),
        (status = 404, description = "Author not found")
    ),
    tag = "authors"
)]
pub async fn get_author(
    State(state): State<AppState>,
    base: BaseUrl,
    Path(id): Path<i32>,
) -> Result<Hal<AuthorResource>, DomainError> {
    let author = state
        .author_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;

    Ok(Hal(AuthorResource::new(author, &base)))
}

#[utoipa::path(
    get,
    path = "/authors/search/findByLastName",
    params(LastNameQuery, PageParams),
    responses(
        (status = 200, description = "Page of matching authors, possibly empty (HAL)"),
        (status = 400, description = "Invalid sort")
    ),
    tag = "authors"
)]
pub async fn find_by_last_name(
    State(state): State<AppState>,
    base: BaseUrl,
    Query(search): Query<LastNameQuery>,
    Query(params): Query<PageParams>,
) -> Result<Hal<PagedResources<AuthorResource>>, DomainError> {
    let request = params.to_request(&state.paging)?;

    let (page, filters) = match search.last_name {
        Some(last_name) => {
            let page = state
                .author_repo
                .find_by_last_name(&last_name, request.clone())
                .await?;
            (page, vec![("lastName", last_name)])
        }
        // Nothing can match a missing name
        None => (
            Page {
                items: Vec::new(),
                number: request.page,
                size: request.size,
                total_elements: 0,
            },
            Vec::new(),
        ),
    };

    let collection = base
        .link_to()
        .slash("authors")
        .slash("search")
        .slash("findByLastName");

    Ok(Hal(PagedResources::assemble(
        page.map(|a| AuthorResource::new(a, &base)),
        "authorResources",
        &collection,
        &filters,
        &request,
    )))
}

#[utoipa::path(
    post,
    path = "/authors",
    request_body = AuthorRequest,
    responses(
        (status = 201, description = "Author created; Location points at it"),
        (status = 422, description = "Missing or malformed field")
    ),
    tag = "authors"
)]
pub async fn create_author(
    State(state): State<AppState>,
    base: BaseUrl,
    Json(payload): Json<AuthorRequest>,
) -> Result<Response, DomainError> {
    let author = state.author_repo.create(payload.into()).await?;
    tracing::info!(author_id = author.id, "Author created");

    Ok(created(author_link(&base, author.id)))
}

#[utoipa::path(
    put,
    path = "/authors/{id}/books/{book_id}",
    params(
        ("id" = i32, Path, description = "Author id"),
        ("book_id" = i32, Path, description = "Book id")
    ),
    responses(
        (status = 201, description = "Book linked; Location points at the author's books"),
        (status = 400, description = "Author or book does not exist")
    ),
    tag = "authors"
)]
pub async fn add_author_book(
    State(state): State<AppState>,
    base: BaseUrl,
    Path((author_id, book_id)): Path<(i32, i32)>,
) -> Result<Response, DomainError> {
    state.author_repo.add_book(author_id, book_id).await?;
    tracing::info!(author_id, book_id, "Book linked to author");

    Ok(created(author_link(&base, author_id).slash("books")))
}

#[utoipa::path(
    get,
    path = "/authors/{id}/books",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Books of the author (HAL)"),
        (status = 404, description = "Author not found")
    ),
    tag = "authors"
)]
pub async fn list_author_books(
    State(state): State<AppState>,
    base: BaseUrl,
    Path(id): Path<i32>,
) -> Result<Hal<CollectionResource<BookResource>>, DomainError> {
    let books = state.author_repo.find_books(id).await?;
    let items = books
        .into_iter()
        .map(|b| BookResource::new(b, &base))
        .collect();

    Ok(Hal(CollectionResource::new(
        "books",
        items,
        author_link(&base, id).slash("books").link(),
    )))
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses((status = 204, description = "Author removed, or never existed")),
    tag = "authors"
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    state.author_repo.delete(id).await?;
    tracing::info!(author_id = id, "Author deleted");

    Ok(StatusCode::NO_CONTENT)
}
