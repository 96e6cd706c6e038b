//! A symbol-keyed registry of order books, one `Mutex` per market.
//!
//! Each market's book is guarded by its own `Mutex`, so a multithreaded facade can serialize calls
//! into a single market without blocking unrelated ones.

use crate::core::error::OrderBookError;
use crate::core::match_result::Match;
use crate::core::order_book::OrderBook;
use crate::core::snapshot::OrderBookSnapshot;
use crate::facade::{CancelOrderRequest, OrderType, PlaceOrderRequest};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

pub type Symbol = String;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("market {0} not found")]
    MarketUnknown(Symbol),
    #[error(transparent)]
    OrderBook(#[from] OrderBookError),
}

/// The result of a successful place: the id a limit order was assigned, or the matches a market
/// order produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    Resting(u64),
    Matched(Vec<Match>),
}

/// A registry of independent `OrderBook`s, one per market symbol.
///
/// Each symbol's book is wrapped in its own `Mutex`; a caller operating on "ETH" never blocks a
/// caller operating on "BTC". This is a single-writer-per-market wrapper, not a general
/// concurrent order book.
#[derive(Debug, Default)]
pub struct Exchange {
    books: HashMap<Symbol, Mutex<OrderBook>>,
}

impl Exchange {
    /// Creates a new, empty registry with no markets.
    pub fn new() -> Self {
        Exchange {
            books: HashMap::new(),
        }
    }

    /// Registers a new, empty market. Re-registering an existing symbol replaces its book.
    pub fn add_market(&mut self, symbol: impl Into<Symbol>) {
        let symbol = symbol.into();
        debug!(%symbol, "market registered");
        self.books.insert(symbol, Mutex::new(OrderBook::new()));
    }

    fn book(&self, symbol: &str) -> Result<&Mutex<OrderBook>, ExchangeError> {
        self.books
            .get(symbol)
            .ok_or_else(|| ExchangeError::MarketUnknown(symbol.to_string()))
    }

    pub fn place_order(
        &self,
        symbol: &str,
        request: PlaceOrderRequest,
    ) -> Result<PlaceOutcome, ExchangeError> {
        let book = self.book(symbol)?;
        let mut book = book.lock().expect("order book mutex poisoned");

        match request.order_type {
            OrderType::Limit => {
                let price = request
                    .price
                    .ok_or(OrderBookError::InvalidOrder("limit order requires a price"))?;
                let id =
                    book.place_limit_order(request.user_id, request.side, price, request.size)?;
                Ok(PlaceOutcome::Resting(id))
            }
            OrderType::Market => {
                if request.price.is_some() {
                    return Err(OrderBookError::InvalidOrder(
                        "market order must not carry a price",
                    )
                    .into());
                }
                let matches =
                    book.place_market_order(request.user_id, request.side, request.size)?;
                Ok(PlaceOutcome::Matched(matches))
            }
        }
    }

    pub fn cancel_order(
        &self,
        symbol: &str,
        request: CancelOrderRequest,
    ) -> Result<(), ExchangeError> {
        let book = self.book(symbol)?;
        let mut book = book.lock().expect("order book mutex poisoned");
        book.cancel_order(request.order_id)?;
        Ok(())
    }

    pub fn snapshot(&self, symbol: &str) -> Result<OrderBookSnapshot, ExchangeError> {
        let book = self.book(symbol)?;
        let book = book.lock().expect("order book mutex poisoned");
        Ok(book.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::Side;
    use rust_decimal_macros::dec;

    #[test]
    fn unregistered_symbol_is_market_unknown() {
        let exchange = Exchange::new();
        assert_eq!(
            exchange.snapshot("ETH"),
            Err(ExchangeError::MarketUnknown("ETH".to_string()))
        );
    }

    #[test]
    fn markets_are_isolated() {
        let mut exchange = Exchange::new();
        exchange.add_market("ETH");
        exchange.add_market("BTC");

        exchange
            .place_order(
                "ETH",
                PlaceOrderRequest {
                    user_id: 1,
                    side: Side::Bid,
                    order_type: OrderType::Limit,
                    size: dec!(5),
                    price: Some(dec!(100)),
                },
            )
            .unwrap();

        let eth_snapshot = exchange.snapshot("ETH").unwrap();
        let btc_snapshot = exchange.snapshot("BTC").unwrap();

        assert_eq!(eth_snapshot.total_bid_volume, dec!(5));
        assert_eq!(btc_snapshot.total_bid_volume, dec!(0));
    }

    #[test]
    fn limit_order_without_price_is_invalid() {
        let mut exchange = Exchange::new();
        exchange.add_market("ETH");

        let result = exchange.place_order(
            "ETH",
            PlaceOrderRequest {
                user_id: 1,
                side: Side::Bid,
                order_type: OrderType::Limit,
                size: dec!(5),
                price: None,
            },
        );

        assert_eq!(
            result,
            Err(ExchangeError::OrderBook(OrderBookError::InvalidOrder(
                "limit order requires a price"
            )))
        );
    }

    #[test]
    fn market_order_with_a_price_is_invalid() {
        let mut exchange = Exchange::new();
        exchange.add_market("ETH");

        let result = exchange.place_order(
            "ETH",
            PlaceOrderRequest {
                user_id: 1,
                side: Side::Bid,
                order_type: OrderType::Market,
                size: dec!(5),
                price: Some(dec!(100)),
            },
        );

        assert_eq!(
            result,
            Err(ExchangeError::OrderBook(OrderBookError::InvalidOrder(
                "market order must not carry a price"
            )))
        );
    }
}
