use thiserror::Error;

/// Failure modes of `OrderBook` operations.
///
/// `InsufficientLiquidity` is deliberately absent: a market order that only partially fills is a
/// normal result, reported through the returned match list, never an `Err`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// Cancel (or any other id-keyed lookup) for an order that isn't currently resting.
    #[error("order {0} not found")]
    OrderNotFound(u64),

    /// `size <= 0`, or a limit order request missing a price, or a non-positive price.
    #[error("invalid order: {0}")]
    InvalidOrder(&'static str),
}
