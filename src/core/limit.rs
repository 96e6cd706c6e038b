use crate::core::match_result::Match;
use crate::core::order::{Order, Side};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use tracing::trace;

/// A single price level: a FIFO queue of orders that all rest at `price`.
///
/// An empty `Limit` is never kept around — the `OrderBook` removes it from the side's map the
/// instant `orders` becomes empty.
#[derive(Debug, Clone)]
pub struct Limit {
    pub price: Decimal,
    pub orders: VecDeque<Order>,
    total_volume: Decimal,
}

impl Limit {
    /// Creates a new, empty `Limit` at the given price.
    ///
    /// # Arguments
    /// * `price` - the exact price this level rests at.
    ///
    /// # Returns
    /// * A `Limit` with no orders and zero total volume.
    pub fn new(price: Decimal) -> Self {
        Limit {
            price,
            orders: VecDeque::new(),
            total_volume: Decimal::ZERO,
        }
    }

    /// Returns the cached sum of `size` over every order currently resting at this level.
    ///
    /// # Returns
    /// * The level's total volume as a `Decimal`.
    pub fn total_volume(&self) -> Decimal {
        self.total_volume
    }

    /// Reports whether this level currently holds any orders.
    ///
    /// # Returns
    /// * `true` if no order is resting here.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Appends `order` to the tail of the queue and stamps its back-reference.
    ///
    /// # Arguments
    /// * `order` - the order to rest at this level; must have `size > 0` and must not already be
    ///   resting anywhere.
    ///
    /// # Behavior
    /// * Sets `order.limit_price` to this level's price and adds its size to `total_volume`.
    pub fn add_order(&mut self, mut order: Order) {
        order.limit_price = Some(self.price);
        self.total_volume += order.size;
        trace!(order_id = order.id, price = %self.price, size = %order.size, "order resting");
        self.orders.push_back(order);
    }

    /// Removes the order with the given id from this level, wherever it sits in the queue.
    ///
    /// # Arguments
    /// * `id` - the id of the order to remove.
    ///
    /// # Returns
    /// * `Some(order)` with its back-reference cleared if it was resting here, `None` otherwise.
    ///
    /// # Behavior
    /// * A linear scan over the queue — a level's depth is expected to be small relative to the
    ///   whole book, so this stays cheap in practice. Returning `None` for a missing id is a normal
    ///   outcome, not an error: the `OrderBook`'s global index is the source of truth for existence.
    pub fn remove_order(&mut self, id: u64) -> Option<Order> {
        let index = self.orders.iter().position(|o| o.id == id)?;
        let mut order = self.orders.remove(index)?;
        self.total_volume -= order.size;
        order.limit_price = None;
        Some(order)
    }

    /// Matches `incoming` against this level's resting orders in FIFO order, producing a `Match`
    /// per resting order consumed, until `incoming` is fully filled or the level runs dry.
    ///
    /// # Arguments
    /// * `incoming` - the marketable order being matched against this level; its `size` is
    ///   decremented in place as it is filled.
    ///
    /// # Returns
    /// * A `FillOutcome` holding the matches produced and the ids of any resting orders fully
    ///   consumed and popped during the call.
    ///
    /// # Behavior
    /// * Fully-filled resting orders are popped from the front as soon as they reach zero size,
    ///   which is always safe: an order can only reach zero while it is at the front (orders behind
    ///   it haven't been touched yet), so popping never disturbs queue order. A resting order only
    ///   partially consumed stays in the queue and is not reported as removed.
    pub fn fill(&mut self, incoming: &mut Order) -> FillOutcome {
        let mut matches = Vec::new();
        let mut removed_order_ids = Vec::new();

        while !incoming.is_filled() {
            let Some(resting) = self.orders.front_mut() else {
                break;
            };

            let traded = resting.size.min(incoming.size);
            resting.size -= traded;
            incoming.size -= traded;
            self.total_volume -= traded;

            let (bid, ask) = match incoming.side {
                Side::Bid => (incoming.as_ref(), resting.as_ref()),
                Side::Ask => (resting.as_ref(), incoming.as_ref()),
            };
            matches.push(Match {
                bid,
                ask,
                size_filled: traded,
                price: self.price,
            });

            if resting.is_filled() {
                let filled = self.orders.pop_front().expect("front just matched");
                trace!(order_id = filled.id, price = %self.price, "resting order filled");
                removed_order_ids.push(filled.id);
            }
        }

        FillOutcome {
            matches,
            removed_order_ids,
        }
    }
}

/// The result of matching an incoming order against one `Limit`.
#[derive(Debug, Default)]
pub struct FillOutcome {
    pub matches: Vec<Match>,
    /// Ids of resting orders fully consumed and popped from the level during this call.
    pub removed_order_ids: Vec<u64>,
}

#[cfg(test)]
#[path = "tests/limit_tests.rs"]
mod tests;
