use crate::core::limit::Limit;
use crate::core::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single resting order as it appears in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: u64,
    pub user_id: u64,
    pub size: Decimal,
    pub side: Side,
    pub timestamp: u64,
}

/// One price level as it appears in a snapshot: its price and its resting orders in FIFO order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelView {
    pub price: Decimal,
    pub orders: Vec<OrderView>,
}

impl From<&Limit> for LevelView {
    fn from(limit: &Limit) -> Self {
        LevelView {
            price: limit.price,
            orders: limit
                .orders
                .iter()
                .map(|o| OrderView {
                    id: o.id,
                    user_id: o.user_id,
                    size: o.size,
                    side: o.side,
                    timestamp: o.timestamp,
                })
                .collect(),
        }
    }
}

/// A read-only, consistent view of an `OrderBook` at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub total_bid_volume: Decimal,
    pub total_ask_volume: Decimal,
    /// Bid levels in priority order: best (highest) price first.
    pub bids: Vec<LevelView>,
    /// Ask levels in priority order: best (lowest) price first.
    pub asks: Vec<LevelView>,
}
