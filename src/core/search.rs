//! Search Engine
//!
//! Case-insensitive substring search over the display names of every
//! searchable entity kind. Items additionally match when the query equals
//! their id exactly. Results from all kinds are merged and sorted by display
//! name; equal names keep discovery order.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::models::{Bot, HideoutModule, Item, Project, Quest, Skill, DEFAULT_LANGUAGE};
use super::store::RecordSet;

// ============================================================================
// Query
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Blank input; callers show usage instead of searching.
    #[error("Search query is empty")]
    Empty,
}

/// A validated, non-blank search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    folded: String,
}

impl SearchQuery {
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self {
            text: text.to_string(),
            folded: text.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn matches_name(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.folded)
    }
}

impl FromStr for SearchQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Kind tag attached to every search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Item,
    Quest,
    Hideout,
    #[serde(rename = "ARC")]
    Arc,
    Project,
    Skill,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Quest => "Quest",
            Self::Hideout => "Hideout",
            Self::Arc => "ARC",
            Self::Project => "Project",
            Self::Skill => "Skill",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrowed view of the matched record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    Item(&'a Item),
    Quest(&'a Quest),
    Hideout(&'a HideoutModule),
    Arc(&'a Bot),
    Project(&'a Project),
    Skill(&'a Skill),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Item(_) => EntityKind::Item,
            Self::Quest(_) => EntityKind::Quest,
            Self::Hideout(_) => EntityKind::Hideout,
            Self::Arc(_) => EntityKind::Arc,
            Self::Project(_) => EntityKind::Project,
            Self::Skill(_) => EntityKind::Skill,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub kind: EntityKind,
    pub name: String,
    pub data: EntityRef<'a>,
}

impl<'a> SearchHit<'a> {
    fn new(name: &str, data: EntityRef<'a>) -> Self {
        Self {
            kind: data.kind(),
            name: name.to_string(),
            data,
        }
    }
}

// ============================================================================
// Search
// ============================================================================

/// Search using English display names.
pub fn search<'a>(query: &SearchQuery, records: &'a RecordSet) -> Vec<SearchHit<'a>> {
    search_in(query, records, DEFAULT_LANGUAGE)
}

/// Search using display names in `language`.
pub fn search_in<'a>(
    query: &SearchQuery,
    records: &'a RecordSet,
    language: &str,
) -> Vec<SearchHit<'a>> {
    let mut hits = Vec::new();

    for item in records.items.values() {
        let name = item.display_name(language);
        if query.matches_name(name) || item.id == query.as_str() {
            hits.push(SearchHit::new(name, EntityRef::Item(item)));
        }
    }

    hits.extend(
        records
            .quests
            .iter()
            .map(|q| (q.name.get(language), EntityRef::Quest(q)))
            .chain(records.hideout.iter().map(|h| (h.name.get(language), EntityRef::Hideout(h))))
            .chain(records.bots.iter().map(|b| (b.name.get(language), EntityRef::Arc(b))))
            .chain(records.projects.iter().map(|p| (p.name.get(language), EntityRef::Project(p))))
            .chain(records.skills.iter().map(|s| (s.name.get(language), EntityRef::Skill(s))))
            .filter(|(name, _)| query.matches_name(name))
            .map(|(name, data)| SearchHit::new(name, data)),
    );

    // Vec::sort_by_cached_key is stable, so ties keep discovery order.
    hits.sort_by_cached_key(|hit| hit.name.to_lowercase());
    hits
}

/// Pick a hit by its 1-based position in the result list.
pub fn select<'h, 'a>(hits: &'h [SearchHit<'a>], index: usize) -> Option<&'h SearchHit<'a>> {
    index.checked_sub(1).and_then(|i| hits.get(i))
}
