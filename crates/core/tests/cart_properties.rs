//! Property tests for the cart reducer.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use proptest::prelude::*;
use tienda_core::{CartState, LineItemInput, Price, ProductId};

#[derive(Debug, Clone)]
enum Op {
    Add(u32),
    Remove(u32),
    RemoveAll(u32),
}

fn input(id: u32) -> LineItemInput {
    LineItemInput {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        // Deterministic per id so repeat adds carry the same price.
        price: Price::from_cents(i64::from(id) * 137 + 1),
        image: format!("{id}.png"),
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1u32..8).prop_map(Op::Add),
        2 => (1u32..10).prop_map(Op::Remove),
        1 => (1u32..10).prop_map(Op::RemoveAll),
    ]
}

fn apply(cart: &mut CartState, op: &Op) {
    match *op {
        Op::Add(id) => {
            cart.add(input(id));
        }
        Op::Remove(id) => {
            cart.remove(ProductId::new(id));
        }
        Op::RemoveAll(id) => {
            cart.remove_all_units(ProductId::new(id));
        }
    }
}

fn quantities(cart: &CartState) -> Vec<(u32, u32)> {
    cart.items()
        .iter()
        .map(|item| (item.id.as_u32(), item.quantity))
        .collect()
}

proptest! {
    #[test]
    fn remove_of_absent_id_never_changes_cart(
        ops in prop::collection::vec(op_strategy(), 0..40),
        absent in 100u32..200,
    ) {
        let mut cart = CartState::new();
        for op in &ops {
            apply(&mut cart, op);
        }
        let before = cart.clone();
        cart.remove(ProductId::new(absent));
        prop_assert_eq!(cart, before);
    }

    #[test]
    fn n_adds_give_one_line_with_quantity_n(n in 1u32..50) {
        let mut cart = CartState::new();
        cart.add(input(1));
        for _ in 1..n {
            let mut later = input(1);
            later.title = "renamed".to_string();
            later.price = Price::from_cents(1);
            cart.add(later);
        }
        prop_assert_eq!(cart.len(), 1);
        prop_assert_eq!(cart.items()[0].quantity, n);
        prop_assert_eq!(&cart.items()[0].title, "Product 1");
        prop_assert_eq!(cart.items()[0].price, input(1).price);
    }

    #[test]
    fn add_then_remove_on_empty_cart_is_identity(id in 1u32..1000) {
        let mut cart = CartState::new();
        cart.add(input(id));
        cart.remove(ProductId::new(id));
        prop_assert!(cart.is_empty());
    }

    #[test]
    fn remove_all_units_deletes_any_quantity(k in 2u32..30) {
        let mut cart = CartState::new();
        for _ in 0..k {
            cart.add(input(4));
        }
        cart.remove_all_units(ProductId::new(4));
        prop_assert!(cart.get(ProductId::new(4)).is_none());
    }

    #[test]
    fn aggregates_match_a_from_scratch_model(
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let mut cart = CartState::new();
        // Reference model: ordered (id, quantity) pairs.
        let mut model: Vec<(u32, u32)> = Vec::new();

        for op in &ops {
            apply(&mut cart, op);
            match *op {
                Op::Add(id) => match model.iter_mut().find(|(m, _)| *m == id) {
                    Some((_, qty)) => *qty += 1,
                    None => model.push((id, 1)),
                },
                Op::Remove(id) => {
                    if let Some(pos) = model.iter().position(|(m, _)| *m == id) {
                        if model[pos].1 > 1 {
                            model[pos].1 -= 1;
                        } else {
                            model.remove(pos);
                        }
                    }
                }
                Op::RemoveAll(id) => model.retain(|(m, _)| *m != id),
            }

            prop_assert_eq!(quantities(&cart), model.clone());
            prop_assert!(cart.items().iter().all(|item| item.quantity >= 1));

            let expected_count: u32 = model.iter().map(|(_, qty)| qty).sum();
            let expected_total: Price = model
                .iter()
                .map(|(id, qty)| input(*id).price.times(*qty))
                .sum();
            prop_assert_eq!(cart.item_count(), expected_count);
            prop_assert_eq!(cart.total(), expected_total);
            prop_assert_eq!(cart.totals().total, expected_total);
        }
    }

    #[test]
    fn persistence_round_trip_preserves_state(
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut cart = CartState::new();
        for op in &ops {
            apply(&mut cart, op);
        }
        let json = serde_json::to_string(&cart).unwrap();
        let restored: CartState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, cart);
    }
}
