//! Text Cards
//!
//! Renders search hits, record cards, the event rotation and update notices
//! as terminal text. Everything here is presentation only: figures come
//! precomputed from `core` and only their [`Favorability`] picks the color.

use console::{style, Color, StyledObject};

use crate::core::economy::{Assessment, Favorability, ItemEconomics, TradeAssessment};
use crate::core::events::OccurrenceGroup;
use crate::core::models::{
    BreakdownKind, Bot, HideoutModule, Item, LocalizedText, Project, Quest, Skill, TradePrice,
};
use crate::core::search::{EntityRef, SearchHit};
use crate::core::update::UpdateNotice;
use crate::core::value::ValueResolver;
use crate::core::xref::ItemReferences;

// ============================================================================
// Palette
// ============================================================================

/// Colors used for every card.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    pub title: Color,
    pub favorable: Color,
    pub unfavorable: Color,
    pub label: Color,
    pub muted: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            title: Color::Cyan,
            favorable: Color::Green,
            unfavorable: Color::Red,
            label: Color::Yellow,
            muted: Color::Color256(243),
        }
    }
}

impl ColorPalette {
    fn favorability<D>(&self, value: D, favorability: Favorability) -> StyledObject<D> {
        match favorability {
            Favorability::Favorable => style(value).fg(self.favorable),
            Favorability::Unfavorable => style(value).fg(self.unfavorable),
            Favorability::Neutral => style(value).fg(self.muted),
        }
    }
}

// ============================================================================
// Printer
// ============================================================================

/// Renders cards against one record set.
pub struct CardPrinter<'a> {
    resolver: ValueResolver<'a>,
    palette: ColorPalette,
}

impl<'a> CardPrinter<'a> {
    pub fn new(resolver: ValueResolver<'a>) -> Self {
        Self {
            resolver,
            palette: ColorPalette::default(),
        }
    }

    fn text<'t>(&self, text: &'t LocalizedText) -> &'t str {
        text.get(self.resolver.language())
    }

    fn heading(&self, title: &str, tag: &str) -> String {
        format!(
            "{} {}",
            style(title).fg(self.palette.title).bold(),
            style(format!("[{tag}]")).fg(self.palette.muted)
        )
    }

    fn section(&self, label: &str) -> String {
        format!("{}", style(label).fg(self.palette.label).bold())
    }

    fn signed(&self, assessment: &Assessment<i64>) -> String {
        let text = format!("{:+}", assessment.value);
        self.palette.favorability(text, assessment.favorability).to_string()
    }

    fn quantity_line(&self, id: &str, quantity: u32) -> String {
        format!("  {quantity}x {}", self.resolver.resolve_name(id))
    }

    /// Numbered list shown when a query has several hits.
    pub fn hit_list(&self, hits: &[SearchHit<'_>]) -> String {
        let width = hits.len().to_string().len();
        let mut lines = vec![format!("{} results:", hits.len())];
        lines.extend(hits.iter().enumerate().map(|(i, hit)| {
            format!(
                "{:>width$}. {} {}",
                i + 1,
                hit.name,
                style(format!("({})", hit.kind)).fg(self.palette.muted)
            )
        }));
        lines.join("\n")
    }

    /// Full card for one hit.
    pub fn hit(&self, hit: &SearchHit<'_>) -> String {
        match hit.data {
            EntityRef::Item(item) => self.item(item),
            EntityRef::Quest(quest) => self.quest(quest),
            EntityRef::Hideout(module) => self.hideout(module),
            EntityRef::Arc(bot) => self.bot(bot),
            EntityRef::Project(project) => self.project(project),
            EntityRef::Skill(skill) => self.skill(skill),
        }
    }

    pub fn item(&self, item: &Item) -> String {
        let economics = ItemEconomics::evaluate(item, &self.resolver);
        let refs = ItemReferences::collect(&item.id, self.resolver.records());

        let mut lines = vec![self.heading(item.display_name(self.resolver.language()), "Item")];

        let mut facts = Vec::new();
        if let Some(rarity) = item.rarity {
            facts.push(format!("{rarity:?}"));
        }
        if !item.item_type.is_empty() {
            facts.push(item.item_type.clone());
        }
        facts.push(format!("value {}", item.value.trunc() as i64));
        facts.push(format!("stack {}", item.effective_stack_size()));
        if item.weight_kg > 0.0 {
            facts.push(format!("{} kg", item.weight_kg));
        }
        lines.push(facts.join(" | "));

        let description = self.text(&item.description);
        if !description.is_empty() {
            lines.push(description.to_string());
        }

        if !item.effects.is_empty() {
            lines.push(self.section("Effects"));
            for effect in &item.effects {
                match &effect.value {
                    Some(value) => lines.push(format!("  {}: {value}", self.text(&effect.name))),
                    None => lines.push(format!("  {}", self.text(&effect.name))),
                }
            }
        }

        if let (Some(recipe), Some(craft)) = (item.recipe(), economics.craft) {
            let batch = item.effective_craft_quantity();
            let header = if batch > 1 {
                format!("Recipe (makes {batch})")
            } else {
                "Recipe".to_string()
            };
            lines.push(self.section(&header));
            lines.extend(recipe.iter().map(|(id, qty)| self.quantity_line(id, *qty)));
            lines.push(format!("  cost {}, profit {}", craft.cost, self.signed(&craft.profit)));
            if let Some(delta) = economics.stash_delta {
                let text = format!("{:+.2} slots", delta.value);
                lines.push(format!(
                    "  stash {}",
                    self.palette.favorability(text, delta.favorability)
                ));
            }
        }

        for kind in BreakdownKind::ALL {
            let (Some(results), Some(assessment)) = (item.breakdown(kind), economics.breakdown(kind))
            else {
                continue;
            };
            lines.push(self.section(kind.label()));
            lines.extend(results.iter().map(|(id, qty)| self.quantity_line(id, *qty)));
            lines.push(format!(
                "  worth {}, {} vs item",
                assessment.yield_value,
                self.signed(&assessment.differential)
            ));
        }

        if !economics.trades.is_empty() {
            lines.push(self.section("Sold by"));
            lines.extend(economics.trades.iter().map(|t| self.trade_line(t)));
        }

        lines.extend(self.references(&refs));
        lines.join("\n")
    }

    fn trade_line(&self, assessed: &TradeAssessment<'_>) -> String {
        let trade = assessed.trade;
        let price = match &assessed.price {
            TradePrice::Coins(coins) => format!("{coins} coins"),
            TradePrice::Creds(creds) => format!("{creds} creds"),
            TradePrice::Barter { item_id, quantity } => {
                format!("{quantity}x {}", self.resolver.resolve_name(item_id))
            }
        };

        let mut line = format!("  {}: {price}", trade.trader);
        if let Some(rate) = assessed.exchange_rate {
            line.push_str(&format!(" (~{rate} coins/cred)"));
        }
        line.push_str(&format!(" {}", self.signed(&assessed.differential)));
        if let Some(limit) = trade.daily_limit {
            line.push_str(&format!(
                " {}",
                style(format!("limit {limit}/day")).fg(self.palette.muted)
            ));
        }
        line
    }

    fn references(&self, refs: &ItemReferences<'_>) -> Vec<String> {
        let mut lines = Vec::new();
        let lang = self.resolver.language();

        let mut block = |label: &str, entries: Vec<String>| {
            if !entries.is_empty() {
                lines.push(self.section(label));
                lines.extend(entries.into_iter().map(|e| format!("  {e}")));
            }
        };

        block(
            "Used in",
            refs.used_in
                .iter()
                .map(|l| format!("{} ({}x)", l.item.display_name(lang), l.quantity))
                .collect(),
        );
        block(
            "Recycled from",
            refs.recycled_from
                .iter()
                .map(|l| format!("{} ({}x)", l.item.display_name(lang), l.quantity))
                .collect(),
        );
        block(
            "Salvaged from",
            refs.salvaged_from
                .iter()
                .map(|l| format!("{} ({}x)", l.item.display_name(lang), l.quantity))
                .collect(),
        );
        block(
            "Accepted as payment",
            refs.bartered_for
                .iter()
                .map(|t| {
                    format!(
                        "{}: {}x for {}",
                        t.trader,
                        t.cost.quantity,
                        self.resolver.resolve_name(&t.item_id)
                    )
                })
                .collect(),
        );
        block(
            "Dropped by",
            refs.dropped_by.iter().map(|b| b.name.get(lang).to_string()).collect(),
        );
        block(
            "Quest reward",
            refs.quest_rewards
                .iter()
                .map(|r| format!("{} ({}x)", r.quest.name.get(lang), r.quantity))
                .collect(),
        );
        block(
            "Hideout",
            refs.hideout
                .iter()
                .map(|h| format!("{} L{} ({}x)", h.module.name.get(lang), h.level, h.quantity))
                .collect(),
        );
        block(
            "Projects",
            refs.projects
                .iter()
                .map(|p| {
                    format!("{} phase {} ({}x)", p.project.name.get(lang), p.phase, p.quantity)
                })
                .collect(),
        );

        lines
    }

    pub fn quest(&self, quest: &Quest) -> String {
        let mut lines = vec![self.heading(self.text(&quest.name), "Quest")];
        if !quest.trader.is_empty() {
            lines.push(format!("Given by {}", quest.trader));
        }
        if !quest.objectives.is_empty() {
            lines.push(self.section("Objectives"));
            lines.extend(quest.objectives.iter().map(|o| format!("  - {}", self.text(o))));
        }
        if !quest.reward_item_ids.is_empty() {
            lines.push(self.section("Rewards"));
            lines.extend(
                quest
                    .reward_item_ids
                    .iter()
                    .map(|r| self.quantity_line(&r.item_id, r.quantity)),
            );
        }
        lines.join("\n")
    }

    pub fn hideout(&self, module: &HideoutModule) -> String {
        let mut lines = vec![self.heading(self.text(&module.name), "Hideout")];
        lines.push(format!("Max level {}", module.max_level));
        for level in &module.levels {
            lines.push(self.section(&format!("Level {}", level.level)));
            if level.requirement_item_ids.is_empty() {
                lines.push(format!("  {}", style("no items required").fg(self.palette.muted)));
            }
            lines.extend(
                level
                    .requirement_item_ids
                    .iter()
                    .map(|r| self.quantity_line(&r.item_id, r.quantity)),
            );
        }
        lines.join("\n")
    }

    pub fn bot(&self, bot: &Bot) -> String {
        let mut lines = vec![self.heading(self.text(&bot.name), "ARC")];
        let mut facts = vec![format!("threat {:?}", bot.threat)];
        if !bot.bot_type.is_empty() {
            facts.insert(0, bot.bot_type.clone());
        }
        lines.push(facts.join(" | "));

        let description = self.text(&bot.description);
        if !description.is_empty() {
            lines.push(description.to_string());
        }
        let weakness = self.text(&bot.weakness);
        if !weakness.is_empty() {
            lines.push(format!("{} {weakness}", self.section("Weakness:")));
        }
        if !bot.drops.is_empty() {
            lines.push(self.section("Drops"));
            lines.extend(bot.drops.iter().map(|id| format!("  {}", self.resolver.resolve_name(id))));
        }
        if !bot.maps.is_empty() {
            lines.push(format!("{} {}", self.section("Maps:"), bot.maps.join(", ")));
        }
        lines.join("\n")
    }

    pub fn project(&self, project: &Project) -> String {
        let mut lines = vec![self.heading(self.text(&project.name), "Project")];
        let description = self.text(&project.description);
        if !description.is_empty() {
            lines.push(description.to_string());
        }
        for phase in &project.phases {
            let name = self.text(&phase.name);
            let header = if name.is_empty() {
                format!("Phase {}", phase.phase)
            } else {
                format!("Phase {}: {name}", phase.phase)
            };
            lines.push(self.section(&header));
            lines.extend(
                phase
                    .requirement_item_ids
                    .iter()
                    .map(|r| self.quantity_line(&r.item_id, r.quantity)),
            );
            lines.extend(
                phase
                    .requirement_categories
                    .iter()
                    .map(|c| format!("  {} worth {}", c.category, c.value_required)),
            );
        }
        lines.join("\n")
    }

    pub fn skill(&self, skill: &Skill) -> String {
        let mut lines = vec![self.heading(self.text(&skill.name), "Skill")];
        lines.push(format!("{:?} | max {} points", skill.category, skill.max_points));
        let description = self.text(&skill.description);
        if !description.is_empty() {
            lines.push(description.to_string());
        }
        if let Some(impacted) = &skill.impacted_skill {
            lines.push(format!("Affects {impacted}"));
        }
        lines.join("\n")
    }

    /// Event rotation grouped by start time.
    pub fn events(&self, groups: &[OccurrenceGroup]) -> String {
        if groups.is_empty() {
            return "No scheduled events in the next 24 hours.".to_string();
        }

        let mut lines = Vec::new();
        for group in groups {
            let when = if group.hours_from_now == 0 {
                "Now".to_string()
            } else {
                format!(
                    "In {}h ({} UTC)",
                    group.hours_from_now,
                    group.starts_at.format("%H:%M")
                )
            };
            lines.push(self.section(&when));
            lines.extend(group.events.iter().map(|event| {
                format!(
                    "  {} {} {}",
                    event.event_name,
                    style(format!("[{:?}]", event.category)).fg(self.palette.muted),
                    style(&event.map_key).fg(self.palette.muted)
                )
            }));
        }
        lines.join("\n")
    }
}

/// One-line notice printed after the result when a newer release exists.
pub fn update_notice(notice: &UpdateNotice) -> String {
    let mut line = format!(
        "A new version is available: {} (current {})",
        style(&notice.latest).bold(),
        notice.current
    );
    if !notice.url.is_empty() {
        line.push_str(&format!(" {}", notice.url));
    }
    line
}
