use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the book an order rests on (or, for a market order, which side it consumes from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// The opposite side — the one a market order of this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

/// A single resting or incoming order.
///
/// `id` and `timestamp` are assigned by the `OrderBook` on acceptance, never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub user_id: u64,
    pub side: Side,
    pub size: Decimal,
    pub timestamp: u64,
    /// Price of the containing `Limit` while resting. `None` for a market order, and for an
    /// order that has been filled or cancelled. Stands in for a back-pointer to the `Limit`,
    /// which Rust's ownership model rules out as a raw pointer; the price is the `Limit`'s own
    /// map key, so it's stable for the whole time the order rests.
    pub limit_price: Option<Decimal>,
}

impl Order {
    pub fn new(id: u64, user_id: u64, side: Side, size: Decimal, timestamp: u64) -> Self {
        Order {
            id,
            user_id,
            side,
            size,
            timestamp,
            limit_price: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.size.is_zero()
    }

    pub fn as_ref(&self) -> OrderRef {
        OrderRef {
            id: self.id,
            user_id: self.user_id,
        }
    }
}

/// Enough identity for a settlement collaborator to route value after a match, without handing
/// out a whole `Order` (and its mutable size) to something outside the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: u64,
    pub user_id: u64,
}
