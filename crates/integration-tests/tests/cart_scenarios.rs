//! Cart behaviour exercised through the public API only.

use scan2order_core::{
    Cart, Checkout, LineUpdate, MenuItem, MenuItemId, Money, OrderContext, TenantId,
};

fn pho() -> MenuItem {
    MenuItem::new(MenuItemId::new(1), "Phở bò", Money::from_major(50_000))
}

fn coffee() -> MenuItem {
    MenuItem::new(MenuItemId::new(2), "Cà phê sữa", Money::from_major(30_000))
}

// =============================================================================
// Merge Rules
// =============================================================================

#[test]
fn test_repeated_adds_merge_into_one_line() {
    let mut cart = Cart::new();
    let quantities = [1_u32, 4, 2, 7];
    for quantity in quantities {
        cart.add(&pho(), quantity, " extra herbs");
    }

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity(), quantities.iter().sum::<u32>());
}

#[test]
fn test_one_line_per_distinct_note() {
    let mut cart = Cart::new();
    for note in ["", "no onions", "extra spicy", "no onions ", ""] {
        cart.add(&pho(), 1, note);
    }

    assert_eq!(cart.len(), 3);
    assert_eq!(cart.item_count(), 5);
}

#[test]
fn test_walkthrough_scenario() {
    let mut cart = Cart::new();

    let plain = cart.add(&pho(), 1, "").unwrap();
    cart.add(&pho(), 2, "");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(plain).unwrap().quantity(), 3);

    let no_onions = cart.add(&pho(), 1, "no onions").unwrap();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.lines()[0].note(), "");
    assert_eq!(cart.lines()[1].note(), "no onions");

    assert_eq!(cart.update_quantity(plain, -3), LineUpdate::Removed);
    assert_eq!(cart.len(), 1);
    let remaining = &cart.lines()[0];
    assert_eq!(remaining.line_id(), no_onions);
    assert_eq!(remaining.quantity(), 1);
    assert_eq!(remaining.note(), "no onions");
}

// =============================================================================
// Quantity Invariant
// =============================================================================

#[test]
fn test_no_line_at_rest_has_non_positive_quantity() {
    let mut cart = Cart::new();
    let a = cart.add(&pho(), 2, "").unwrap();
    let b = cart.add(&coffee(), 1, "").unwrap();
    let c = cart.add(&coffee(), 3, "ít đá").unwrap();

    cart.update_quantity(a, -2);
    cart.set_quantity(b, -1);
    cart.commit_quantity_input(c, "0");

    assert!(cart.is_empty());
    assert!(cart.lines().iter().all(|line| line.quantity() > 0));
}

#[test]
fn test_set_quantity_zero_and_negative_remove() {
    for value in [0, -1] {
        let mut cart = Cart::new();
        let line = cart.add(&pho(), 2, "").unwrap();
        assert_eq!(cart.set_quantity(line, value), LineUpdate::Removed);
        assert!(cart.line(line).is_none());
    }
}

// =============================================================================
// Totals and Payload
// =============================================================================

#[test]
fn test_total_example() {
    let mut cart = Cart::new();
    cart.add(&pho(), 2, "");
    cart.add(&coffee(), 1, "");

    assert_eq!(cart.total(), Money::from_major(130_000));
}

#[test]
fn test_clear_then_total_and_payload_are_empty() {
    let mut cart = Cart::new();
    cart.add(&pho(), 2, "");
    cart.add(&coffee(), 1, "");
    cart.clear();

    assert_eq!(cart.total(), Money::ZERO);
    let payload = cart.to_order_payload(&OrderContext::new(TenantId::new(4), "Bàn 5"));
    assert!(payload.items.is_empty());
}

#[test]
fn test_checkout_cycle() {
    let mut cart = Cart::new();
    cart.add(&pho(), 1, "");
    let mut checkout = Checkout::new(cart);
    let context = OrderContext::new(TenantId::new(4), "Bàn 5");

    checkout.begin(&context).unwrap();
    checkout.fail().unwrap();
    assert_eq!(checkout.cart().len(), 1);

    checkout.cart_mut().unwrap().add(&coffee(), 1, "");
    let payload = checkout.begin(&context).unwrap();
    assert_eq!(payload.items.len(), 2);

    checkout.succeed().unwrap();
    assert!(checkout.into_cart().is_empty());
}

#[test]
fn test_persisted_cart_survives_session_boundary() {
    let mut cart = Cart::new();
    let line = cart.add(&pho(), 2, "no onions").unwrap();
    cart.add(&coffee(), 1, "");

    let restored = Cart::from_json(&cart.to_json().unwrap()).unwrap();
    assert_eq!(restored.total(), cart.total());
    assert_eq!(restored.line(line).unwrap().note(), "no onions");
}
