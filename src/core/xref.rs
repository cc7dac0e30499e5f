//! Item cross references
//!
//! Everything in the record set that mentions a given item: recipes that
//! consume it, items that break down into it, trades, ARC drops, quest
//! rewards and hideout/project requirements. All lists keep record-store
//! order.

use super::models::{BreakdownKind, Bot, HideoutModule, Item, Project, Quest, Trade};
use super::store::RecordSet;

/// Another item that references this one with a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLink<'a> {
    pub item: &'a Item,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestReward<'a> {
    pub quest: &'a Quest,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HideoutRequirement<'a> {
    pub module: &'a HideoutModule,
    pub level: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRequirement<'a> {
    pub project: &'a Project,
    pub phase: u32,
    pub quantity: u32,
}

/// All references to one item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemReferences<'a> {
    /// Items whose recipe consumes this item.
    pub used_in: Vec<ItemLink<'a>>,
    /// Items that recycle into this item.
    pub recycled_from: Vec<ItemLink<'a>>,
    /// Items that salvage into this item.
    pub salvaged_from: Vec<ItemLink<'a>>,
    /// Trades selling this item.
    pub sold_by: Vec<&'a Trade>,
    /// Trades that take this item as payment.
    pub bartered_for: Vec<&'a Trade>,
    pub dropped_by: Vec<&'a Bot>,
    pub quest_rewards: Vec<QuestReward<'a>>,
    pub hideout: Vec<HideoutRequirement<'a>>,
    pub projects: Vec<ProjectRequirement<'a>>,
}

impl<'a> ItemReferences<'a> {
    pub fn collect(item_id: &str, records: &'a RecordSet) -> Self {
        let mut refs = Self::default();

        for item in records.items.values() {
            if let Some(qty) = item.recipe().and_then(|r| r.get(item_id)) {
                refs.used_in.push(ItemLink { item, quantity: *qty });
            }
            for kind in BreakdownKind::ALL {
                if let Some(qty) = item.breakdown(kind).and_then(|m| m.get(item_id)) {
                    let link = ItemLink { item, quantity: *qty };
                    match kind {
                        BreakdownKind::Recycle => refs.recycled_from.push(link),
                        BreakdownKind::Salvage => refs.salvaged_from.push(link),
                    }
                }
            }
        }

        for trade in &records.trades {
            if trade.item_id == item_id {
                refs.sold_by.push(trade);
            }
            if trade.cost.item_id == item_id {
                refs.bartered_for.push(trade);
            }
        }

        refs.dropped_by = records
            .bots
            .iter()
            .filter(|bot| bot.drops.iter().any(|d| d == item_id))
            .collect();

        for quest in &records.quests {
            for reward in quest.reward_item_ids.iter().filter(|r| r.item_id == item_id) {
                refs.quest_rewards.push(QuestReward {
                    quest,
                    quantity: reward.quantity,
                });
            }
        }

        for module in &records.hideout {
            for level in &module.levels {
                for req in level.requirement_item_ids.iter().filter(|r| r.item_id == item_id) {
                    refs.hideout.push(HideoutRequirement {
                        module,
                        level: level.level,
                        quantity: req.quantity,
                    });
                }
            }
        }

        for project in &records.projects {
            for phase in &project.phases {
                for req in phase.requirement_item_ids.iter().filter(|r| r.item_id == item_id) {
                    refs.projects.push(ProjectRequirement {
                        project,
                        phase: phase.phase,
                        quantity: req.quantity,
                    });
                }
            }
        }

        refs
    }

    pub fn is_empty(&self) -> bool {
        self.used_in.is_empty()
            && self.recycled_from.is_empty()
            && self.salvaged_from.is_empty()
            && self.sold_by.is_empty()
            && self.bartered_for.is_empty()
            && self.dropped_by.is_empty()
            && self.quest_rewards.is_empty()
            && self.hideout.is_empty()
            && self.projects.is_empty()
    }
}
