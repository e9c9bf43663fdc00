//! Calendar view queries: expanding stored series into dated instances
//! and text search over events.

use chrono::{NaiveDate, NaiveTime};
use dasi_core::recur::DateRange;
use serde::Serialize;
use uuid::Uuid;

use crate::event::{Event, EventCategory};

use super::{EventStore, listing_order};

/// One dated instance of an event, as the month and week views render
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance {
    /// Owning event.
    pub event_id: Uuid,
    /// Concrete occurrence date, not the series anchor.
    pub date: NaiveDate,
    pub title: String,
    #[serde(with = "crate::event::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::event::hhmm")]
    pub end_time: NaiveTime,
    pub category: EventCategory,
    /// True when the owning event repeats; the views use this to show
    /// the repeat marker.
    pub recurring: bool,
}

impl EventStore {
    /// ## Summary
    ///
    /// Expands every stored series into its dated instances inside the
    /// half-open `range`, ascending by date, start time, then title.
    ///
    /// A detached occurrence shows up once: excluded from its original
    /// series and present as a standalone instance without the repeat
    /// marker. A window far from a series' anchor renders like any
    /// other; expansion seeks to the window rather than walking
    /// occurrence by occurrence from the anchor.
    #[must_use]
    pub fn instances_in(&self, range: &DateRange) -> Vec<EventInstance> {
        let mut instances: Vec<EventInstance> = self
            .records
            .values()
            .flat_map(|record| {
                let event = &record.event;
                let recurring = event.is_recurring();
                record
                    .recurrence_set()
                    .expand(Some(range))
                    .into_iter()
                    .map(move |date| EventInstance {
                        event_id: event.id,
                        date,
                        title: event.title.clone(),
                        start_time: event.start_time,
                        end_time: event.end_time,
                        category: event.category,
                        recurring,
                    })
            })
            .collect();
        instances.sort_by(|a, b| {
            (a.date, a.start_time, &a.title).cmp(&(b.date, b.start_time, &b.title))
        });
        tracing::trace!(
            start = %range.start,
            end = %range.end,
            count = instances.len(),
            "Expanded calendar instances"
        );
        instances
    }

    /// ## Summary
    ///
    /// Case-insensitive substring search over title, description, and
    /// location. A blank query matches every event.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Event> {
        let needle = query.trim().to_lowercase();
        let mut hits: Vec<&Event> = self
            .records
            .values()
            .map(|record| &record.event)
            .filter(|event| {
                needle.is_empty()
                    || event.title.to_lowercase().contains(&needle)
                    || event.description.to_lowercase().contains(&needle)
                    || event.location.to_lowercase().contains(&needle)
            })
            .collect();
        hits.sort_by(|a, b| listing_order(a, b));
        hits
    }
}
