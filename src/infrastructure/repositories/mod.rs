//! Repository implementations using SeaORM

mod association;
pub mod author_repository;
pub mod book_repository;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_repository::SeaOrmBookRepository;

use crate::domain::{Direction, PageRequest};

fn order(direction: Direction) -> sea_orm::Order {
    match direction {
        Direction::Asc => sea_orm::Order::Asc,
        Direction::Desc => sea_orm::Order::Desc,
    }
}

/// Whether the requested page starts inside a result of `total` rows.
///
/// The paginator computes `page * size` unchecked, so pages whose offset
/// overflows or lies past the end are answered without querying rows.
fn page_in_range(request: &PageRequest, total: u64) -> bool {
    request
        .page
        .checked_mul(request.size)
        .is_some_and(|offset| offset < total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u64, size: u64) -> PageRequest {
        PageRequest {
            page,
            size,
            sort: None,
        }
    }

    #[test]
    fn page_in_range_checks_offset() {
        assert!(page_in_range(&request(0, 20), 1));
        assert!(page_in_range(&request(1, 2), 3));
        assert!(!page_in_range(&request(0, 20), 0));
        assert!(!page_in_range(&request(2, 2), 3));
        assert!(!page_in_range(&request(u64::MAX, 20), 3));
        assert!(!page_in_range(&request(1_000_000_000_000_000_000, 20), 3));
    }
}
