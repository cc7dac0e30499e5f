//! Property-based tests for the Event Scheduler
//!
//! Tests invariants:
//! - Each event name appears at most once across all groups
//! - Offsets stay inside the rotation and groups are strictly ascending
//! - Every reported slot really is scheduled at that hour

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};
use indexmap::IndexMap;
use proptest::prelude::*;

use crate::core::events::next_occurrences;
use crate::core::models::{EventType, MapSchedule};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

const EVENT_KEYS: [&str; 5] = ["storm", "night_raid", "harvester", "husk_graveyard", "lush"];

fn arb_table() -> impl Strategy<Value = BTreeMap<u8, Option<String>>> {
    prop::collection::btree_map(
        0u8..24,
        prop::option::weighted(0.8, prop::sample::select(EVENT_KEYS.to_vec()).prop_map(String::from)),
        0..8,
    )
}

fn arb_maps() -> impl Strategy<Value = IndexMap<String, MapSchedule>> {
    prop::collection::vec((arb_table(), arb_table()), 0..4).prop_map(|tables| {
        tables
            .into_iter()
            .enumerate()
            .map(|(i, (major, minor))| (format!("map_{i}"), MapSchedule { major, minor }))
            .collect()
    })
}

fn arb_event_types() -> impl Strategy<Value = IndexMap<String, EventType>> {
    prop::collection::vec(any::<bool>(), EVENT_KEYS.len()).prop_map(|disabled| {
        EVENT_KEYS
            .iter()
            .zip(disabled)
            .map(|(key, disabled)| {
                (
                    key.to_string(),
                    EventType {
                        display_name: key.to_uppercase(),
                        disabled,
                    },
                )
            })
            .collect()
    })
}

fn arb_now() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..(365 * 24 * 3600)).prop_map(|secs| {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + TimeDelta::seconds(secs)
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: each event name is reported at most once
    #[test]
    fn prop_event_names_unique(maps in arb_maps(), types in arb_event_types(), now in arb_now()) {
        let groups = next_occurrences(&maps, &types, now);
        let mut seen = HashSet::new();
        for event in groups.iter().flat_map(|g| &g.events) {
            prop_assert!(seen.insert(event.event_name.clone()), "duplicate {}", event.event_name);
        }
    }

    /// Property: offsets are within 0..24 and ascend strictly
    #[test]
    fn prop_groups_ascend(maps in arb_maps(), types in arb_event_types(), now in arb_now()) {
        let groups = next_occurrences(&maps, &types, now);
        for group in &groups {
            prop_assert!(group.hours_from_now < 24);
            prop_assert!(!group.events.is_empty());
        }
        for pair in groups.windows(2) {
            prop_assert!(pair[0].hours_from_now < pair[1].hours_from_now);
        }
    }

    /// Property: every occurrence is scheduled at the reported hour and enabled
    #[test]
    fn prop_occurrences_are_real(maps in arb_maps(), types in arb_event_types(), now in arb_now()) {
        for event in next_occurrences(&maps, &types, now).iter().flat_map(|g| &g.events) {
            let hour = ((now.hour() + event.hours_from_now) % 24) as u8;
            let map = &maps[event.map_key.as_str()];
            prop_assert_eq!(map.event_at(event.category, hour), Some(event.event_key.as_str()));
            prop_assert!(!types[event.event_key.as_str()].disabled);
            prop_assert_eq!(event.starts_at.minute(), 0);
        }
    }
}
