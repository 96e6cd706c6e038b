use super::*;
use rust_decimal_macros::dec;

#[test]
fn new_order_book_is_empty() {
    let ob = OrderBook::new();
    assert_eq!(ob.bids.len(), 0);
    assert_eq!(ob.asks.len(), 0);
}

#[test]
fn place_two_asks_at_different_prices() {
    let mut ob = OrderBook::new();
    ob.place_limit_order(1, Side::Ask, dec!(10000), dec!(10))
        .unwrap();
    ob.place_limit_order(1, Side::Ask, dec!(9000), dec!(5))
        .unwrap();

    assert_eq!(ob.asks.len(), 2);
    assert_eq!(ob.orders.len(), 2);
    assert_eq!(ob.best_ask(), Some(dec!(9000)));
}

#[test]
fn place_limit_order_rejects_non_positive_size_or_price() {
    let mut ob = OrderBook::new();
    assert_eq!(
        ob.place_limit_order(1, Side::Bid, dec!(10), dec!(0)),
        Err(OrderBookError::InvalidOrder("size must be positive"))
    );
    assert_eq!(
        ob.place_limit_order(1, Side::Bid, dec!(0), dec!(10)),
        Err(OrderBookError::InvalidOrder("price must be positive"))
    );
}

#[test]
fn simple_market_fill() {
    let mut ob = OrderBook::new();
    ob.place_limit_order(1, Side::Ask, dec!(10000), dec!(20))
        .unwrap();

    let matches = ob.place_market_order(2, Side::Bid, dec!(10)).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].size_filled, dec!(10));
    assert_eq!(matches[0].price, dec!(10000));
    assert_eq!(ob.total_ask_volume(), dec!(10));
}

#[test]
fn multi_level_market_fill_respects_time_priority_within_a_level() {
    let mut ob = OrderBook::new();
    ob.place_limit_order(1, Side::Bid, dec!(5000), dec!(10))
        .unwrap(); // order A
    ob.place_limit_order(2, Side::Bid, dec!(5000), dec!(1))
        .unwrap(); // order B, same price, later
    ob.place_limit_order(3, Side::Bid, dec!(9000), dec!(8))
        .unwrap();
    ob.place_limit_order(4, Side::Bid, dec!(10000), dec!(5))
        .unwrap();

    assert_eq!(ob.total_bid_volume(), dec!(24));

    let matches = ob.place_market_order(5, Side::Ask, dec!(20)).unwrap();

    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].price, dec!(10000));
    assert_eq!(matches[0].size_filled, dec!(5));
    assert_eq!(matches[1].price, dec!(9000));
    assert_eq!(matches[1].size_filled, dec!(8));
    assert_eq!(matches[2].price, dec!(5000));
    assert_eq!(matches[2].size_filled, dec!(7));

    assert_eq!(ob.total_bid_volume(), dec!(4));
    assert_eq!(ob.bids.len(), 1);
}

#[test]
fn cancel_resting_order() {
    let mut ob = OrderBook::new();
    let id = ob
        .place_limit_order(1, Side::Bid, dec!(10000), dec!(5))
        .unwrap();
    assert_eq!(ob.total_bid_volume(), dec!(5));

    ob.cancel_order(id).unwrap();
    assert_eq!(ob.total_bid_volume(), dec!(0));
    assert_eq!(ob.bids.len(), 0);

    assert_eq!(ob.cancel_order(id), Err(OrderBookError::OrderNotFound(id)));
}

#[test]
fn cancel_is_idempotent_on_state() {
    let mut ob = OrderBook::new();
    let id = ob
        .place_limit_order(1, Side::Bid, dec!(10000), dec!(5))
        .unwrap();
    ob.cancel_order(id).unwrap();
    let after_first = ob.snapshot();

    assert_eq!(ob.cancel_order(id), Err(OrderBookError::OrderNotFound(id)));
    assert_eq!(ob.snapshot(), after_first);
}

#[test]
fn partial_fill_leaves_residual_discarded() {
    let mut ob = OrderBook::new();
    ob.place_limit_order(1, Side::Ask, dec!(100), dec!(3))
        .unwrap();

    let matches = ob.place_market_order(2, Side::Bid, dec!(10)).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].size_filled, dec!(3));
    assert_eq!(ob.asks.len(), 0);
    assert_eq!(ob.total_ask_volume(), dec!(0));
}

#[test]
fn empty_level_is_never_observable_in_snapshot() {
    let mut ob = OrderBook::new();
    ob.place_limit_order(1, Side::Ask, dec!(100), dec!(5))
        .unwrap();
    ob.place_market_order(2, Side::Bid, dec!(5)).unwrap();

    let snap = ob.snapshot();
    assert!(snap.asks.iter().all(|level| !level.orders.is_empty()));
    assert!(snap.asks.is_empty());
}

#[test]
fn ids_and_timestamps_are_monotonic() {
    let mut ob = OrderBook::new();
    let a = ob
        .place_limit_order(1, Side::Bid, dec!(10), dec!(1))
        .unwrap();
    let b = ob
        .place_limit_order(1, Side::Bid, dec!(10), dec!(1))
        .unwrap();
    assert!(a < b);
}

#[test]
fn snapshot_orders_levels_by_priority() {
    let mut ob = OrderBook::new();
    ob.place_limit_order(1, Side::Bid, dec!(10), dec!(1))
        .unwrap();
    ob.place_limit_order(1, Side::Bid, dec!(20), dec!(1))
        .unwrap();
    ob.place_limit_order(1, Side::Ask, dec!(30), dec!(1))
        .unwrap();
    ob.place_limit_order(1, Side::Ask, dec!(25), dec!(1))
        .unwrap();

    let snap = ob.snapshot();
    assert_eq!(snap.bids[0].price, dec!(20));
    assert_eq!(snap.bids[1].price, dec!(10));
    assert_eq!(snap.asks[0].price, dec!(25));
    assert_eq!(snap.asks[1].price, dec!(30));
}
