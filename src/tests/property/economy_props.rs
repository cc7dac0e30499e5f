//! Property-based tests for the Economic Calculator
//!
//! Tests invariants:
//! - Favorability agrees with each figure's sign convention
//! - Craft cost is the sum of quantity times ingredient value
//! - Stash delta is rounded to two decimals

use proptest::prelude::*;

use crate::core::economy::{
    assess_trade, breakdown_value, craft_cost, stash_delta, Favorability,
};
use crate::core::models::{BreakdownKind, Item, QuantityMap, COINS_ID};
use crate::core::store::RecordSet;
use crate::core::value::ValueResolver;
use crate::tests::common::trade;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// A pool of ingredient items `ing_0..ing_n` with random values and stacks.
fn arb_ingredients() -> impl Strategy<Value = Vec<(f64, Option<u32>)>> {
    prop::collection::vec((0.0f64..5000.0, prop::option::of(0u32..100)), 1..6)
}

fn arb_recipe(pool: usize) -> impl Strategy<Value = QuantityMap> {
    prop::collection::vec((0..pool, 1u32..50), 1..5)
        .prop_map(|pairs| pairs.into_iter().map(|(i, q)| (format!("ing_{i}"), q)).collect())
}

fn records_with(ingredients: &[(f64, Option<u32>)]) -> RecordSet {
    let mut records = RecordSet::default();
    for (i, (value, stack)) in ingredients.iter().enumerate() {
        let mut item = Item::new(format!("ing_{i}"), "Ingredient", *value);
        item.stack_size = *stack;
        records.insert_item(item);
    }
    records
}

fn arb_case() -> impl Strategy<Value = (Vec<(f64, Option<u32>)>, QuantityMap, f64, Option<u32>)> {
    arb_ingredients().prop_flat_map(|ingredients| {
        let pool = ingredients.len();
        (
            Just(ingredients),
            arb_recipe(pool),
            0.0f64..20_000.0,
            prop::option::of(0u32..100),
        )
    })
}

fn sign_matches(value: f64, favorability: Favorability, higher_is_better: bool) -> bool {
    let expected = if higher_is_better {
        Favorability::higher_is_better(value)
    } else {
        Favorability::lower_is_better(value)
    };
    expected == favorability
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: craft profit is favorable exactly when positive
    #[test]
    fn prop_craft_profit_sign((ingredients, recipe, value, _) in arb_case()) {
        let records = records_with(&ingredients);
        let resolver = ValueResolver::new(&records);
        let mut item = Item::new("result", "Result", value);
        item.recipe = Some(recipe.clone());

        let craft = craft_cost(&item, &resolver).unwrap();
        let expected_cost: i64 = recipe
            .iter()
            .map(|(id, q)| i64::from(*q) * resolver.resolve_value(id))
            .sum();

        prop_assert_eq!(craft.cost, expected_cost);
        prop_assert_eq!(craft.profit.value, value.trunc() as i64 - expected_cost);
        prop_assert!(sign_matches(craft.profit.value as f64, craft.profit.favorability, true));
    }

    /// Property: stash delta is favorable exactly when negative, and rounded
    #[test]
    fn prop_stash_delta_sign((ingredients, recipe, value, stack) in arb_case()) {
        let records = records_with(&ingredients);
        let resolver = ValueResolver::new(&records);
        let mut item = Item::new("result", "Result", value);
        item.stack_size = stack;
        item.recipe = Some(recipe);

        let delta = stash_delta(&item, &resolver).unwrap();
        prop_assert!(sign_matches(delta.value, delta.favorability, false));
        prop_assert!(((delta.value * 100.0).round() - delta.value * 100.0).abs() < 1e-6);
    }

    /// Property: breakdown differential is favorable exactly when positive
    #[test]
    fn prop_breakdown_sign((ingredients, yields, value, _) in arb_case()) {
        let records = records_with(&ingredients);
        let resolver = ValueResolver::new(&records);
        let mut item = Item::new("scrap", "Scrap", value);
        item.salvages_into = Some(yields);

        let salvage = breakdown_value(&item, BreakdownKind::Salvage, &resolver).unwrap();
        prop_assert_eq!(salvage.differential.value, salvage.yield_value - value.trunc() as i64);
        prop_assert!(sign_matches(
            salvage.differential.value as f64,
            salvage.differential.favorability,
            true
        ));
    }

    /// Property: a coins trade is unfavorable exactly when it costs more than the item
    #[test]
    fn prop_trade_sign(price in 0u32..100_000, value in 0.0f64..100_000.0) {
        let records = RecordSet::default();
        let resolver = ValueResolver::new(&records);
        let item = Item::new("kit", "Kit", value);
        let offer = trade("Apollo", "kit", COINS_ID, price);

        let assessed = assess_trade(&offer, &item, &resolver, &[]);
        prop_assert_eq!(assessed.total_cost, i64::from(price));
        prop_assert!(sign_matches(
            assessed.differential.value as f64,
            assessed.differential.favorability,
            false
        ));
    }
}
