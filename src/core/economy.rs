//! Economic Calculator
//!
//! Derived values for a single item: stash-space delta of crafting, craft
//! cost and profit, recycle/salvage differentials and trade price
//! differentials. Every differential is returned as an [`Assessment`] that
//! carries both the raw number and whether it benefits the player, so
//! presentation code never re-derives sign conventions.
//!
//! Sign conventions:
//! - stash delta: negative is favorable (crafting frees slots)
//! - craft profit: positive is favorable
//! - recycle/salvage differential: positive is favorable
//! - trade differential: positive is unfavorable (the trader overcharges)

use serde::Serialize;

use super::models::{BreakdownKind, Item, QuantityMap, Trade, TradePrice};
use super::value::{round2, ValueResolver};

// ============================================================================
// Assessment
// ============================================================================

/// Whether a derived figure benefits the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Favorability {
    Favorable,
    Unfavorable,
    /// Exactly zero.
    Neutral,
}

impl Favorability {
    /// Classification where a larger number is better for the player.
    pub fn higher_is_better(value: f64) -> Self {
        if value > 0.0 {
            Self::Favorable
        } else if value < 0.0 {
            Self::Unfavorable
        } else {
            Self::Neutral
        }
    }

    /// Classification where a smaller number is better for the player.
    pub fn lower_is_better(value: f64) -> Self {
        Self::higher_is_better(-value)
    }

    pub fn is_favorable(&self) -> bool {
        matches!(self, Self::Favorable)
    }
}

/// A signed figure paired with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment<T> {
    pub value: T,
    pub favorability: Favorability,
}

impl Assessment<i64> {
    pub fn gain(value: i64) -> Self {
        Self {
            value,
            favorability: Favorability::higher_is_better(value as f64),
        }
    }

    pub fn expense(value: i64) -> Self {
        Self {
            value,
            favorability: Favorability::lower_is_better(value as f64),
        }
    }
}

impl Assessment<f64> {
    /// Stash-slot delta, rounded to two decimals; fewer slots is better.
    pub fn slots(value: f64) -> Self {
        let value = round2(value);
        Self {
            value,
            favorability: Favorability::lower_is_better(value),
        }
    }
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CraftAssessment {
    /// Summed value of all ingredients.
    pub cost: i64,
    /// Item value minus ingredient cost.
    pub profit: Assessment<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakdownAssessment {
    pub kind: BreakdownKind,
    /// Summed value of everything the item breaks down into.
    pub yield_value: i64,
    /// Yield value minus item value.
    pub differential: Assessment<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeAssessment<'a> {
    pub trade: &'a Trade,
    pub price: TradePrice,
    /// Price expressed in value units.
    pub total_cost: i64,
    /// Price minus item value.
    pub differential: Assessment<i64>,
    /// Coins per cred implied by a coins-priced trade of the same item.
    /// Only present for creds-priced trades.
    pub exchange_rate: Option<f64>,
}

/// Every derived figure for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEconomics<'a> {
    pub stash_delta: Option<Assessment<f64>>,
    pub craft: Option<CraftAssessment>,
    pub recycle: Option<BreakdownAssessment>,
    pub salvage: Option<BreakdownAssessment>,
    pub trades: Vec<TradeAssessment<'a>>,
}

impl<'a> ItemEconomics<'a> {
    /// Evaluate an item against the resolver's record set.
    pub fn evaluate(item: &Item, resolver: &ValueResolver<'a>) -> Self {
        let trades = &resolver.records().trades;
        Self {
            stash_delta: stash_delta(item, resolver),
            craft: craft_cost(item, resolver),
            recycle: breakdown_value(item, BreakdownKind::Recycle, resolver),
            salvage: breakdown_value(item, BreakdownKind::Salvage, resolver),
            trades: trades
                .iter()
                .filter(|t| t.item_id == item.id)
                .map(|t| assess_trade(t, item, resolver, trades))
                .collect(),
        }
    }

    pub fn breakdown(&self, kind: BreakdownKind) -> Option<&BreakdownAssessment> {
        match kind {
            BreakdownKind::Recycle => self.recycle.as_ref(),
            BreakdownKind::Salvage => self.salvage.as_ref(),
        }
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Item value as whole currency units (truncated).
pub fn item_value(item: &Item) -> i64 {
    item.value.trunc() as i64
}

/// Total value of `quantity × value` over a quantity map. Saturates instead of
/// overflowing on extreme data.
fn total_value(quantities: &QuantityMap, resolver: &ValueResolver<'_>) -> i64 {
    quantities.iter().fold(0i64, |total, (id, qty)| {
        total.saturating_add(i64::from(*qty).saturating_mul(resolver.resolve_value(id)))
    })
}

/// Stash slots freed (negative) or consumed (positive) by crafting one batch.
/// `None` when the item has no recipe.
pub fn stash_delta(item: &Item, resolver: &ValueResolver<'_>) -> Option<Assessment<f64>> {
    let recipe = item.recipe()?;

    let crafted = f64::from(item.effective_craft_quantity()) / f64::from(item.effective_stack_size());
    let ingredients: f64 = recipe
        .iter()
        .map(|(id, qty)| resolver.resolve_slot_usage(id, *qty))
        .sum();

    Some(Assessment::slots(crafted - ingredients))
}

/// Ingredient cost and profit of crafting. `None` when the item has no recipe.
pub fn craft_cost(item: &Item, resolver: &ValueResolver<'_>) -> Option<CraftAssessment> {
    let recipe = item.recipe()?;

    let cost = total_value(recipe, resolver);

    Some(CraftAssessment {
        cost,
        profit: Assessment::gain(item_value(item).saturating_sub(cost)),
    })
}

/// Value of what the item recycles or salvages into, compared to the item.
pub fn breakdown_value(
    item: &Item,
    kind: BreakdownKind,
    resolver: &ValueResolver<'_>,
) -> Option<BreakdownAssessment> {
    let results = item.breakdown(kind)?;

    let yield_value = total_value(results, resolver);

    Some(BreakdownAssessment {
        kind,
        yield_value,
        differential: Assessment::gain(yield_value.saturating_sub(item_value(item))),
    })
}

/// Compare a trade's price with the value of the item it sells.
///
/// `market` is searched for a coins-priced trade of the same item to derive
/// the implied exchange rate of creds-priced trades.
pub fn assess_trade<'a>(
    trade: &'a Trade,
    item: &Item,
    resolver: &ValueResolver<'_>,
    market: &[Trade],
) -> TradeAssessment<'a> {
    let price = trade.price();
    let total_cost =
        i64::from(trade.cost.quantity).saturating_mul(resolver.resolve_value(&trade.cost.item_id));

    let exchange_rate = match price {
        TradePrice::Creds(creds) => implied_exchange_rate(&trade.item_id, creds, market),
        _ => None,
    };

    TradeAssessment {
        trade,
        price,
        total_cost,
        differential: Assessment::expense(total_cost.saturating_sub(item_value(item))),
        exchange_rate,
    }
}

/// Coins per cred, from the first coins-priced trade of the same item.
pub fn implied_exchange_rate(item_id: &str, creds_price: u32, market: &[Trade]) -> Option<f64> {
    if creds_price == 0 {
        return None;
    }
    market
        .iter()
        .filter(|t| t.item_id == item_id)
        .find_map(|t| match t.price() {
            TradePrice::Coins(coins) => Some(round2(f64::from(coins) / f64::from(creds_price))),
            _ => None,
        })
}
