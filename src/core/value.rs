//! Value Resolver
//!
//! Single source of truth for the fallback policy applied whenever an item id
//! is turned into a value, a display name or a stash-slot count. None of
//! these lookups fail: unknown ids resolve to neutral defaults.

use super::models::{is_currency, Item, DEFAULT_LANGUAGE};
use super::store::RecordSet;

/// Resolves item ids against a loaded [`RecordSet`].
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver<'a> {
    records: &'a RecordSet,
    language: &'a str,
}

impl<'a> ValueResolver<'a> {
    pub fn new(records: &'a RecordSet) -> Self {
        Self::with_language(records, DEFAULT_LANGUAGE)
    }

    pub fn with_language(records: &'a RecordSet, language: &'a str) -> Self {
        Self { records, language }
    }

    pub fn records(&self) -> &'a RecordSet {
        self.records
    }

    pub fn language(&self) -> &'a str {
        self.language
    }

    pub fn item(&self, id: &str) -> Option<&'a Item> {
        self.records.item(id)
    }

    /// Currency pseudo-items are worth 1, known items their truncated value,
    /// anything else 0.
    pub fn resolve_value(&self, id: &str) -> i64 {
        if is_currency(id) {
            return 1;
        }
        self.item(id).map(|item| item.value.trunc() as i64).unwrap_or(0)
    }

    /// Localized display name, or the humanized id for unknown items.
    pub fn resolve_name(&self, id: &str) -> String {
        match self.item(id) {
            Some(item) if !item.name.is_empty() => item.display_name(self.language).to_string(),
            _ => humanize_id(id),
        }
    }

    /// Stash slots occupied by `quantity` units of the item.
    pub fn resolve_slot_usage(&self, id: &str, quantity: u32) -> f64 {
        let stack_size = self.item(id).map(Item::effective_stack_size).unwrap_or(1);
        f64::from(quantity) / f64::from(stack_size)
    }
}

/// `"arc_alloy"` becomes `"Arc Alloy"`.
pub fn humanize_id(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
