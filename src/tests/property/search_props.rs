//! Property-based tests for the Search Engine
//!
//! Tests invariants:
//! - Every hit contains the query, case-insensitively (or is an exact item id)
//! - Results are ordered by lowercased display name
//! - Same query returns same order
//! - Selection is 1-based and bounded

use proptest::prelude::*;
use serde_json::json;

use crate::core::models::{Item, Skill};
use crate::core::search::{search, select, EntityKind, EntityRef, SearchQuery};
use crate::core::store::RecordSet;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,8}( [A-Za-z]{1,8}){0,2}"
}

fn arb_records() -> impl Strategy<Value = RecordSet> {
    (
        prop::collection::vec(arb_name(), 0..20),
        prop::collection::vec(arb_name(), 0..10),
    )
        .prop_map(|(item_names, skill_names)| {
            let mut records = RecordSet::default();
            for (i, name) in item_names.iter().enumerate() {
                records.insert_item(Item::new(format!("item_{i}"), name, 1.0));
            }
            for name in skill_names {
                let skill: Skill = serde_json::from_value(json!({"name": name}))
                    .expect("skill fixture deserializes");
                records.skills.push(skill);
            }
            records
        })
}

fn arb_query() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,3}"
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: every hit matches the query
    #[test]
    fn prop_hits_contain_query(records in arb_records(), query in arb_query()) {
        let parsed = SearchQuery::parse(&query).unwrap();
        let folded = query.to_lowercase();

        for hit in search(&parsed, &records) {
            let id_match = matches!(hit.data, EntityRef::Item(i) if i.id == query);
            prop_assert!(
                hit.name.to_lowercase().contains(&folded) || id_match,
                "hit {:?} does not match {:?}",
                hit.name,
                query
            );
        }
    }

    /// Property: nothing that matches is left out
    #[test]
    fn prop_no_match_is_missed(records in arb_records(), query in arb_query()) {
        let parsed = SearchQuery::parse(&query).unwrap();
        let folded = query.to_lowercase();
        let expected = records
            .items
            .values()
            .filter(|i| i.display_name("en").to_lowercase().contains(&folded))
            .count()
            + records
                .skills
                .iter()
                .filter(|s| s.name.get("en").to_lowercase().contains(&folded))
                .count();

        prop_assert_eq!(search(&parsed, &records).len(), expected);
    }

    /// Property: results are sorted by lowercased name
    #[test]
    fn prop_results_sorted(records in arb_records(), query in arb_query()) {
        let parsed = SearchQuery::parse(&query).unwrap();
        let hits = search(&parsed, &records);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].name.to_lowercase() <= pair[1].name.to_lowercase());
        }
    }

    /// Property: equal names keep items ahead of skills (discovery order)
    #[test]
    fn prop_ties_are_stable(name in arb_name()) {
        let mut records = RecordSet::default();
        records.insert_item(Item::new("x", &name, 1.0));
        let skill: Skill = serde_json::from_value(json!({"name": name.to_uppercase()})).unwrap();
        records.skills.push(skill);

        let parsed = SearchQuery::parse(&name).unwrap();
        let kinds: Vec<_> = search(&parsed, &records).iter().map(|h| h.kind).collect();
        prop_assert_eq!(kinds, vec![EntityKind::Item, EntityKind::Skill]);
    }

    /// Property: same query returns same order
    #[test]
    fn prop_search_deterministic(records in arb_records(), query in arb_query()) {
        let parsed = SearchQuery::parse(&query).unwrap();
        let first: Vec<_> = search(&parsed, &records).into_iter().map(|h| h.name).collect();
        let second: Vec<_> = search(&parsed, &records).into_iter().map(|h| h.name).collect();
        prop_assert_eq!(first, second);
    }

    /// Property: selection index k returns the k-th hit
    #[test]
    fn prop_select_one_based(records in arb_records(), query in arb_query(), index in 0usize..40) {
        let parsed = SearchQuery::parse(&query).unwrap();
        let hits = search(&parsed, &records);
        let picked = select(&hits, index);

        if index == 0 || index > hits.len() {
            prop_assert!(picked.is_none());
        } else {
            prop_assert_eq!(picked, Some(&hits[index - 1]));
        }
    }

    /// Property: whitespace-only input never becomes a query
    #[test]
    fn prop_blank_rejected(blank in "[ \t\n]{0,10}") {
        prop_assert!(SearchQuery::parse(&blank).is_err());
    }
}
