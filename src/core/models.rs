//! Reference Data Models
//!
//! Typed structures for every entity kind shipped in the data directory.
//! JSON keys are camelCase; unknown keys are ignored so newer data files
//! keep loading with an older binary.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Identifier of the primary currency pseudo-item.
pub const COINS_ID: &str = "coins";

/// Identifier of the secondary currency pseudo-item.
pub const CREDS_ID: &str = "creds";

/// Language used when the configured one has no translation.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Returns true for the two currency pseudo-items.
pub fn is_currency(id: &str) -> bool {
    id == COINS_ID || id == CREDS_ID
}

/// Ordered mapping of item id to quantity (recipes, breakdowns).
pub type QuantityMap = IndexMap<String, u32>;

// ============================================================================
// Localized Text
// ============================================================================

/// Text that is either a plain string or a set of translations keyed by
/// language code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Translations(IndexMap<String, String>),
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_string())
    }
}

impl LocalizedText {
    /// Resolve the text for `language`, falling back to English and then to
    /// whichever translation comes first.
    pub fn get(&self, language: &str) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Translations(map) => map
                .get(language)
                .or_else(|| map.get(DEFAULT_LANGUAGE))
                .or_else(|| map.values().next())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.is_empty(),
            Self::Translations(map) => map.values().all(String::is_empty),
        }
    }
}

// ============================================================================
// Enumerations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    #[serde(other)]
    Unknown,
}

/// Threat level of an ARC, ordered by severity. `Unknown` sorts lowest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatLevel {
    Low,
    Moderate,
    High,
    Critical,
    Extreme,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ThreatLevel {
    fn severity(self) -> u8 {
        match self {
            ThreatLevel::Unknown => 0,
            ThreatLevel::Low => 1,
            ThreatLevel::Moderate => 2,
            ThreatLevel::High => 3,
            ThreatLevel::Critical => 4,
            ThreatLevel::Extreme => 5,
        }
    }
}

impl Ord for ThreatLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl PartialOrd for ThreatLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Conditioning,
    Mobility,
    Survival,
    #[default]
    #[serde(other)]
    Unknown,
}

/// The two independent event tracks each map runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Major,
    Minor,
}

impl EventCategory {
    pub const ALL: [EventCategory; 2] = [EventCategory::Major, EventCategory::Minor];
}

// ============================================================================
// Items
// ============================================================================

/// An item id paired with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuantity {
    pub item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ItemQuantity {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

fn default_quantity() -> u32 {
    1
}

/// Value attached to an item effect ("+20", 5, "15s").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for EffectValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => write!(f, "{t}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub name: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<EffectValue>,
}

/// Which breakdown map of an item to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownKind {
    Recycle,
    Salvage,
}

impl BreakdownKind {
    pub const ALL: [BreakdownKind; 2] = [BreakdownKind::Recycle, BreakdownKind::Salvage];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Recycle => "Recycles into",
            Self::Salvage => "Salvages into",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_size: Option<u32>,
    #[serde(default, alias = "weight")]
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<QuantityMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recycles_into: Option<QuantityMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salvages_into: Option<QuantityMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<ItemEffect>,
}

impl Item {
    /// Minimal item used by fixtures and by callers building records by hand.
    pub fn new(id: impl Into<String>, name: &str, value: f64) -> Self {
        Self {
            id: id.into(),
            name: LocalizedText::from(name),
            description: LocalizedText::default(),
            item_type: String::new(),
            rarity: None,
            value,
            stack_size: None,
            weight_kg: 0.0,
            recipe: None,
            craft_quantity: None,
            recycles_into: None,
            salvages_into: None,
            effects: Vec::new(),
        }
    }

    pub fn display_name(&self, language: &str) -> &str {
        self.name.get(language)
    }

    /// Stack size used for slot arithmetic; absent or zero counts as 1.
    pub fn effective_stack_size(&self) -> u32 {
        match self.stack_size {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }

    /// Units produced by one craft; absent or zero counts as 1.
    pub fn effective_craft_quantity(&self) -> u32 {
        match self.craft_quantity {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }

    /// The recipe, if present and non-empty.
    pub fn recipe(&self) -> Option<&QuantityMap> {
        self.recipe.as_ref().filter(|r| !r.is_empty())
    }

    /// The requested breakdown map, if present and non-empty.
    pub fn breakdown(&self, kind: BreakdownKind) -> Option<&QuantityMap> {
        let map = match kind {
            BreakdownKind::Recycle => self.recycles_into.as_ref(),
            BreakdownKind::Salvage => self.salvages_into.as_ref(),
        };
        map.filter(|m| !m.is_empty())
    }
}

// ============================================================================
// Trades
// ============================================================================

/// Price of a trade, classified by what the player pays with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradePrice {
    Coins(u32),
    Creds(u32),
    Barter { item_id: String, quantity: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub trader: String,
    pub item_id: String,
    pub cost: ItemQuantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<u32>,
}

impl Trade {
    pub fn price(&self) -> TradePrice {
        match self.cost.item_id.as_str() {
            COINS_ID => TradePrice::Coins(self.cost.quantity),
            CREDS_ID => TradePrice::Creds(self.cost.quantity),
            other => TradePrice::Barter {
                item_id: other.to_string(),
                quantity: self.cost.quantity,
            },
        }
    }
}

// ============================================================================
// ARCs, Quests, Hideout, Projects, Skills
// ============================================================================

/// A hostile machine ("ARC").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    #[serde(default)]
    pub id: String,
    pub name: LocalizedText,
    #[serde(rename = "type", default)]
    pub bot_type: String,
    #[serde(default)]
    pub threat: ThreatLevel,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub weakness: LocalizedText,
    #[serde(default)]
    pub drops: Vec<String>,
    #[serde(default)]
    pub maps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    #[serde(default)]
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub trader: String,
    #[serde(default)]
    pub objectives: Vec<LocalizedText>,
    #[serde(default)]
    pub reward_item_ids: Vec<ItemQuantity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideoutLevel {
    pub level: u32,
    #[serde(default)]
    pub requirement_item_ids: Vec<ItemQuantity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideoutModule {
    #[serde(default)]
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub max_level: u32,
    #[serde(default)]
    pub levels: Vec<HideoutLevel>,
}

/// A category-based requirement ("any Topside Material worth 2000").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequirement {
    pub category: String,
    pub value_required: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPhase {
    pub phase: u32,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub requirement_item_ids: Vec<ItemQuantity>,
    #[serde(default)]
    pub requirement_categories: Vec<CategoryRequirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub phases: Vec<ProjectPhase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub category: SkillCategory,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub max_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impacted_skill: Option<String>,
}

// ============================================================================
// Event Schedule
// ============================================================================

/// Hour of day (0-23, UTC) to event-type key. Empty strings and nulls mean
/// nothing is scheduled.
pub type HourlyTable = BTreeMap<u8, Option<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSchedule {
    #[serde(default)]
    pub major: HourlyTable,
    #[serde(default)]
    pub minor: HourlyTable,
}

impl MapSchedule {
    pub fn table(&self, category: EventCategory) -> &HourlyTable {
        match category {
            EventCategory::Major => &self.major,
            EventCategory::Minor => &self.minor,
        }
    }

    /// Event-type key scheduled at `hour` on the given track.
    pub fn event_at(&self, category: EventCategory, hour: u8) -> Option<&str> {
        self.table(category)
            .get(&hour)
            .and_then(|slot| slot.as_deref())
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub display_name: String,
    #[serde(default)]
    pub disabled: bool,
}

/// The 24-hour rotation of map events plus the event-type dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSchedule {
    #[serde(default)]
    pub schedule: IndexMap<String, MapSchedule>,
    #[serde(default)]
    pub event_types: IndexMap<String, EventType>,
}
