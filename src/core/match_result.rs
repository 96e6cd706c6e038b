use crate::core::order::OrderRef;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A quantity traded between one bid and one ask at one price.
///
/// `price` always equals the resting order's `Limit` price, never the incoming order's: price
/// discovery already happened when that `Limit` was selected for matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub bid: OrderRef,
    pub ask: OrderRef,
    pub size_filled: Decimal,
    pub price: Decimal,
}
