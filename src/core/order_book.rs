use crate::core::error::OrderBookError;
use crate::core::limit::Limit;
use crate::core::match_result::Match;
use crate::core::order::{Order, Side};
use crate::core::snapshot::{LevelView, OrderBookSnapshot};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Where a resting order lives: enough to jump straight to its `Limit` without scanning both
/// sides. Stands in for the back-pointer a garbage-collected language would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OrderLocation {
    side: Side,
    price: Decimal,
}

/// The matching engine for a single market.
///
/// `OrderBook` is deliberately not `Sync`-friendly on its own: it is a single-threaded,
/// non-suspending state machine that expects a caller (e.g. `Exchange`) to serialize access to
/// it.
#[derive(Debug, Default)]
pub struct OrderBook {
    pub(crate) asks: BTreeMap<Decimal, Limit>,
    pub(crate) bids: BTreeMap<Decimal, Limit>,
    orders: HashMap<u64, OrderLocation>,
    next_id: u64,
    next_timestamp: u64,
}

impl OrderBook {
    /// Creates a new, empty order book with no resting bids or asks.
    ///
    /// # Returns
    /// * An `OrderBook` with both sides empty and its id/timestamp counters at zero.
    pub fn new() -> OrderBook {
        OrderBook {
            asks: BTreeMap::new(),
            bids: BTreeMap::new(),
            orders: HashMap::new(),
            next_id: 0,
            next_timestamp: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn next_timestamp(&mut self) -> u64 {
        self.next_timestamp += 1;
        self.next_timestamp
    }

    fn side_map_mut(&mut self, side: Side) -> &mut BTreeMap<Decimal, Limit> {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Sums `total_volume` over every resting bid level.
    ///
    /// # Returns
    /// * The total resting bid volume as a `Decimal`.
    pub fn total_bid_volume(&self) -> Decimal {
        self.bids.values().map(Limit::total_volume).sum()
    }

    /// Sums `total_volume` over every resting ask level.
    ///
    /// # Returns
    /// * The total resting ask volume as a `Decimal`.
    pub fn total_ask_volume(&self) -> Decimal {
        self.asks.values().map(Limit::total_volume).sum()
    }

    /// Best (highest) bid price currently resting, if any.
    ///
    /// # Returns
    /// * `Some(price)` of the highest resting bid, `None` if the bid side is empty.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    /// Best (lowest) ask price currently resting, if any.
    ///
    /// # Returns
    /// * `Some(price)` of the lowest resting ask, `None` if the ask side is empty.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// Rests a new limit order on the book. Never matches, even if marketable: placing crosses
    /// nothing, and a separate market order is the only path that consumes resting liquidity.
    ///
    /// # Arguments
    /// * `user_id` - opaque submitter identifier, passed through uninterpreted.
    /// * `side` - which side of the book to rest on.
    /// * `price` - the exact price to rest at; must be positive.
    /// * `size` - the order's quantity; must be positive.
    ///
    /// # Returns
    /// * `Ok(id)` with the engine-assigned order id on success.
    ///
    /// # Errors
    /// * `InvalidOrder` if `size` or `price` is not positive.
    pub fn place_limit_order(
        &mut self,
        user_id: u64,
        side: Side,
        price: Decimal,
        size: Decimal,
    ) -> Result<u64, OrderBookError> {
        if size <= Decimal::ZERO {
            return Err(OrderBookError::InvalidOrder("size must be positive"));
        }
        if price <= Decimal::ZERO {
            return Err(OrderBookError::InvalidOrder("price must be positive"));
        }

        let id = self.next_id();
        let timestamp = self.next_timestamp();
        let order = Order::new(id, user_id, side, size, timestamp);

        debug!(order_id = id, side = side_label(side), %price, %size, "resting limit order");
        self.side_map_mut(side)
            .entry(price)
            .or_insert_with(|| Limit::new(price))
            .add_order(order);
        self.orders.insert(id, OrderLocation { side, price });

        Ok(id)
    }

    /// Matches an incoming order against the opposite side until it is filled or that side runs
    /// dry. The residual (if any) is discarded — immediate-or-cancel semantics; insufficient
    /// liquidity is a normal partial fill, never an error.
    ///
    /// # Arguments
    /// * `user_id` - opaque submitter identifier, passed through uninterpreted.
    /// * `side` - which side the incoming order is on; it matches against the opposite side.
    /// * `size` - the order's quantity; must be positive.
    ///
    /// # Returns
    /// * `Ok(matches)` with one `Match` per resting order consumed, in the order they were filled.
    ///   An empty vector means no liquidity was available.
    ///
    /// # Errors
    /// * `InvalidOrder` if `size` is not positive.
    ///
    /// # Behavior
    /// * Walks the opposite side in priority order — ascending price for asks, descending price
    ///   for bids — filling each level in turn until the incoming order is filled or the side is
    ///   exhausted. Levels emptied during the walk are removed from the book, and fully-consumed
    ///   resting orders are dropped from the global index.
    pub fn place_market_order(
        &mut self,
        user_id: u64,
        side: Side,
        size: Decimal,
    ) -> Result<Vec<Match>, OrderBookError> {
        if size <= Decimal::ZERO {
            return Err(OrderBookError::InvalidOrder("size must be positive"));
        }

        let id = self.next_id();
        let timestamp = self.next_timestamp();
        let mut incoming = Order::new(id, user_id, side, size, timestamp);

        let mut matches = Vec::new();
        let mut removed_order_ids = Vec::new();
        let opposite = self.side_map_mut(side.opposite());
        let mut drained_prices = Vec::new();

        // Bids consume asks ascending (cheapest first); asks consume bids descending (richest
        // first). `BTreeMap` is naturally ascending, so the bid side walks `.rev()`.
        match side {
            Side::Bid => {
                for (&price, limit) in opposite.iter_mut() {
                    let outcome = limit.fill(&mut incoming);
                    matches.extend(outcome.matches);
                    removed_order_ids.extend(outcome.removed_order_ids);
                    if limit.is_empty() {
                        drained_prices.push(price);
                    }
                    if incoming.is_filled() {
                        break;
                    }
                }
            }
            Side::Ask => {
                for (&price, limit) in opposite.iter_mut().rev() {
                    let outcome = limit.fill(&mut incoming);
                    matches.extend(outcome.matches);
                    removed_order_ids.extend(outcome.removed_order_ids);
                    if limit.is_empty() {
                        drained_prices.push(price);
                    }
                    if incoming.is_filled() {
                        break;
                    }
                }
            }
        }

        for price in drained_prices {
            opposite.remove(&price);
        }

        // Only orders fully consumed leave the book; a partially-filled survivor stays indexed.
        for filled_id in removed_order_ids {
            self.orders.remove(&filled_id);
        }

        if !incoming.is_filled() {
            warn!(
                order_id = id,
                remaining = %incoming.size,
                "market order partially filled, residual discarded"
            );
        }

        Ok(matches)
    }

    /// Removes a resting order from the book.
    ///
    /// # Arguments
    /// * `id` - the id of the order to cancel.
    ///
    /// # Returns
    /// * `Ok(())` if the order was resting and has been removed.
    ///
    /// # Errors
    /// * `OrderNotFound` if `id` is not currently resting — a no-op-safe, idempotent outcome that
    ///   never panics, so retrying a cancel is always safe.
    pub fn cancel_order(&mut self, id: u64) -> Result<(), OrderBookError> {
        let location = self
            .orders
            .remove(&id)
            .ok_or(OrderBookError::OrderNotFound(id))?;

        let side_map = self.side_map_mut(location.side);
        let limit = side_map
            .get_mut(&location.price)
            .expect("order index pointed at a live price level");
        limit.remove_order(id);
        if limit.is_empty() {
            side_map.remove(&location.price);
        }

        debug!(order_id = id, "order cancelled");
        Ok(())
    }

    /// Takes a consistent, owned view of the book at this instant. Never mutates.
    ///
    /// # Returns
    /// * An `OrderBookSnapshot` with both sides' levels in priority order, each level's orders in
    ///   FIFO order, and the cached total bid/ask volumes.
    pub fn snapshot(&self) -> OrderBookSnapshot {
        OrderBookSnapshot {
            total_bid_volume: self.total_bid_volume(),
            total_ask_volume: self.total_ask_volume(),
            bids: self.bids.values().rev().map(LevelView::from).collect(),
            asks: self.asks.values().map(LevelView::from).collect(),
        }
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Bid => "bid",
        Side::Ask => "ask",
    }
}

#[cfg(test)]
#[path = "tests/order_book_tests.rs"]
mod tests;
