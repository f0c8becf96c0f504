use serde::Serialize;

use super::hal::{BaseUrl, Hal, Links};

#[derive(Serialize)]
pub struct RootResource {
    #[serde(rename = "_links")]
    pub links: Links,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Entry points of the API (HAL)")),
    tag = "libris"
)]
pub async fn index(base: BaseUrl) -> Hal<RootResource> {
    let links = Links::new()
        .with(
            "authors",
            base.link_to().slash("authors").templated("{?page,size,sort}"),
        )
        .with(
            "books",
            base.link_to().slash("books").templated("{?page,size,sort}"),
        );

    Hal(RootResource { links })
}
