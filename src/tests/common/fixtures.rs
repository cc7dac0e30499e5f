//! Test Fixtures
//!
//! Provides shared record sets and on-disk data roots.

use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;

use crate::core::models::{Item, ItemQuantity, Trade, COINS_ID, CREDS_ID};
use crate::core::store::{
    RecordSet, BOTS_FILE, EVENTS_FILE, ITEMS_DIR, PROJECTS_FILE, QUESTS_DIR, SKILLS_FILE,
    TRADES_FILE,
};

// =============================================================================
// In-memory Records
// =============================================================================

/// Build an item with a recipe.
pub fn crafted_item(id: &str, name: &str, value: f64, recipe: &[(&str, u32)]) -> Item {
    let mut item = Item::new(id, name, value);
    item.recipe = Some(recipe.iter().map(|(id, qty)| (id.to_string(), *qty)).collect());
    item
}

pub fn trade(trader: &str, item_id: &str, cost_id: &str, quantity: u32) -> Trade {
    Trade {
        trader: trader.to_string(),
        item_id: item_id.to_string(),
        cost: ItemQuantity::new(cost_id, quantity),
        daily_limit: None,
    }
}

/// A small market: two ingredients, one craftable and three trades.
pub fn sample_records() -> RecordSet {
    let mut records = RecordSet::default();

    let mut fabric = Item::new("fabric", "Fabric", 10.0);
    fabric.stack_size = Some(50);
    records.insert_item(fabric);

    let mut parts = Item::new("mechanical_parts", "Mechanical Parts", 60.0);
    parts.stack_size = Some(20);
    records.insert_item(parts);

    let mut bandage = crafted_item("bandage", "Bandage", 250.0, &[("fabric", 5)]);
    bandage.stack_size = Some(5);
    bandage.recycles_into = Some([("fabric".to_string(), 2)].into_iter().collect());
    records.insert_item(bandage);

    records.trades = vec![
        trade("Lance", "bandage", COINS_ID, 300),
        trade("Lance", "bandage", CREDS_ID, 20),
        trade("Tian Wen", "mechanical_parts", "fabric", 4),
    ];

    records
}

// =============================================================================
// On-disk Data Roots
// =============================================================================

/// Writes a data root into a temporary directory.
pub struct DataRootBuilder {
    dir: TempDir,
}

impl DataRootBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `content` verbatim to a path relative to the data root.
    pub fn raw(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        self
    }

    fn json(self, relative: &str, value: &Value) -> Self {
        let content = serde_json::to_string_pretty(value).expect("Fixture is serializable");
        self.raw(relative, &content)
    }

    pub fn item(self, value: Value) -> Self {
        let id = value["id"].as_str().unwrap_or("unnamed").to_string();
        self.json(&format!("{ITEMS_DIR}/{id}.json"), &value)
    }

    pub fn quest(self, file: &str, value: Value) -> Self {
        self.json(&format!("{QUESTS_DIR}/{file}.json"), &value)
    }

    pub fn bots(self, value: Value) -> Self {
        self.json(BOTS_FILE, &value)
    }

    pub fn projects(self, value: Value) -> Self {
        self.json(PROJECTS_FILE, &value)
    }

    pub fn skills(self, value: Value) -> Self {
        self.json(SKILLS_FILE, &value)
    }

    pub fn trades(self, value: Value) -> Self {
        self.json(TRADES_FILE, &value)
    }

    pub fn events(self, value: Value) -> Self {
        self.json(EVENTS_FILE, &value)
    }

    pub fn build(self) -> TempDir {
        self.dir
    }
}

/// A data root covering every collection, with one malformed item file.
pub fn sample_data_root() -> TempDir {
    DataRootBuilder::new()
        .item(json!({
            "id": "fabric",
            "name": {"en": "Fabric", "de": "Stoff"},
            "value": 10,
            "stackSize": 50
        }))
        .item(json!({
            "id": "bandage",
            "name": "Bandage",
            "type": "Quick Use",
            "rarity": "Common",
            "value": 250,
            "stackSize": 5,
            "recipe": {"fabric": 5},
            "recyclesInto": {"fabric": 2}
        }))
        .raw("items/broken.json", "{ \"id\": \"broken\", ")
        .quest("first_steps", json!({
            "id": "first_steps",
            "name": "First Steps",
            "trader": "Shani",
            "rewardItemIds": [{"itemId": "bandage", "quantity": 3}]
        }))
        .bots(json!([{"id": "wasp", "name": "Wasp", "threat": "Low", "drops": ["fabric"]}]))
        .projects(json!([{
            "id": "caravan",
            "name": "Caravan",
            "phases": [{"phase": 1, "requirementItemIds": [{"itemId": "fabric", "quantity": 40}]}]
        }]))
        .skills(json!([{"id": "band", "name": "Band Aid", "category": "Survival"}]))
        .trades(json!([
            {"trader": "Lance", "itemId": "bandage", "cost": {"itemId": "coins", "quantity": 300}}
        ]))
        .events(json!({
            "schedule": {"dam": {"major": {"0": "storm"}}},
            "eventTypes": {"storm": {"displayName": "Electromagnetic Storm"}}
        }))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::load_with_report;

    #[test]
    fn test_sample_data_root_loads() {
        let root = sample_data_root();
        let (records, report) = load_with_report(root.path()).unwrap();

        assert_eq!(records.items.len(), 2);
        assert_eq!(records.quests.len(), 1);
        assert_eq!(records.bots.len(), 1);
        assert_eq!(records.projects.len(), 1);
        assert_eq!(records.skills.len(), 1);
        assert_eq!(records.trades.len(), 1);
        assert_eq!(records.events.schedule.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("broken.json"));
    }

    #[test]
    fn test_sample_records_are_consistent() {
        let records = sample_records();
        for trade in &records.trades {
            assert!(records.item(&trade.item_id).is_some());
        }
    }
}
