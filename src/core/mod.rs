pub mod error;
pub mod limit;
pub mod match_result;
pub mod order;
pub mod order_book;
pub mod snapshot;
