use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::root::index,
        api::health::health_check,
        api::author::list_authors,
        api::author::get_author,
        api::author::find_by_last_name,
        api::author::create_author,
        api::author::add_author_book,
        api::author::list_author_books,
        api::author::delete_author,
        api::books::list_books,
        api::books::get_book,
        api::books::find_by_isbn,
        api::books::create_book,
        api::books::add_book_author,
        api::books::list_book_authors,
        api::books::delete_book,
    ),
    components(
        schemas(
            api::resource::AuthorRequest,
            api::resource::BookRequest,
        )
    ),
    tags(
        (name = "libris", description = "Service entry points"),
        (name = "authors", description = "Authors and the books they wrote"),
        (name = "books", description = "Books and their authors")
    )
)]
pub struct ApiDoc;
