pub mod core;
pub mod exchange;
pub mod facade;

pub use crate::core::error::OrderBookError;
pub use crate::core::match_result::Match;
pub use crate::core::order::{Order, OrderRef, Side};
pub use crate::core::order_book::OrderBook;
pub use crate::core::snapshot::{LevelView, OrderBookSnapshot, OrderView};
pub use crate::exchange::{Exchange, ExchangeError};
pub use crate::facade::{CancelOrderRequest, OrderType, PlaceOrderRequest, Settle};
