//! Event Scheduler
//!
//! Finds, for every enabled event type, the soonest hour it runs on any map
//! within the 24-hour rotation. Each event name is reported once, at its
//! earliest offset; ties across maps go to the map listed first.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, DurationRound, TimeDelta, Timelike, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use super::models::{EventCategory, EventSchedule, EventType, MapSchedule};
use super::value::humanize_id;

const HOURS_PER_DAY: u32 = 24;

/// The first upcoming (or running) slot of one event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOccurrence {
    pub event_name: String,
    pub event_key: String,
    pub map_key: String,
    pub category: EventCategory,
    /// 0 means the event is running now.
    pub hours_from_now: u32,
    pub starts_at: DateTime<Utc>,
}

impl EventOccurrence {
    pub fn is_active(&self) -> bool {
        self.hours_from_now == 0
    }
}

/// Occurrences sharing the same start hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceGroup {
    pub hours_from_now: u32,
    pub starts_at: DateTime<Utc>,
    pub events: Vec<EventOccurrence>,
}

/// Convenience wrapper over [`next_occurrences`] for a loaded schedule.
pub fn upcoming_events(schedule: &EventSchedule, now: DateTime<Utc>) -> Vec<OccurrenceGroup> {
    next_occurrences(&schedule.schedule, &schedule.event_types, now)
}

/// Earliest occurrence of each enabled event, grouped by hours from now.
///
/// Groups are ascending by offset. Within a group major events precede minor
/// ones, then names sort alphabetically. Slots referencing a key missing from
/// `event_types` are shown under the humanized key.
pub fn next_occurrences(
    maps: &IndexMap<String, MapSchedule>,
    event_types: &IndexMap<String, EventType>,
    now: DateTime<Utc>,
) -> Vec<OccurrenceGroup> {
    let base = now.duration_trunc(TimeDelta::hours(1)).unwrap_or(now);
    let base_hour = base.hour();

    let mut seen: HashSet<String> = HashSet::new();
    let mut groups: BTreeMap<u32, Vec<EventOccurrence>> = BTreeMap::new();

    for offset in 0..HOURS_PER_DAY {
        let hour = ((base_hour + offset) % HOURS_PER_DAY) as u8;
        let starts_at = base + TimeDelta::hours(i64::from(offset));

        for (map_key, map) in maps {
            for category in EventCategory::ALL {
                let Some(event_key) = map.event_at(category, hour) else {
                    continue;
                };

                let event_name = match event_types.get(event_key) {
                    Some(event_type) if event_type.disabled => continue,
                    Some(event_type) => event_type.display_name.clone(),
                    None => humanize_id(event_key),
                };

                if !seen.insert(event_name.clone()) {
                    continue;
                }

                groups.entry(offset).or_default().push(EventOccurrence {
                    event_name,
                    event_key: event_key.to_string(),
                    map_key: map_key.clone(),
                    category,
                    hours_from_now: offset,
                    starts_at,
                });
            }
        }
    }

    groups
        .into_iter()
        .map(|(offset, mut events)| {
            events.sort_by(|a, b| {
                a.category
                    .cmp(&b.category)
                    .then_with(|| a.event_name.to_lowercase().cmp(&b.event_name.to_lowercase()))
            });
            OccurrenceGroup {
                hours_from_now: offset,
                starts_at: base + TimeDelta::hours(i64::from(offset)),
                events,
            }
        })
        .collect()
}
