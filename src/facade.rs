//! Request/response value types for an in-process caller talking to an `Exchange`.
//!
//! This module defines shapes only — no router, no listener. Wiring an HTTP (or any other wire)
//! transport on top of these types is left to whatever binary or service embeds this crate.

use crate::core::match_result::Match;
use crate::core::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
}

/// A request to place an order on one market.
///
/// `price` is required iff `order_type == OrderType::Limit`; a limit request with `price: None`
/// (or a market request with `price: Some(_)`) is rejected by `Exchange::place_order` before it
/// ever reaches the book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub user_id: u64,
    pub side: Side,
    pub order_type: OrderType,
    pub size: Decimal,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    pub order_id: u64,
}

/// A settlement collaborator invoked after a successful match list.
///
/// The engine does not wait for, or roll back on, a failed `settle` call — the match itself is
/// authoritative and settlement is at-least-once best-effort downstream.
pub trait Settle {
    fn settle(&self, matches: &[Match]);
}
