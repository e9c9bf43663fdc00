//! In-memory event store: whole-series CRUD plus the single-occurrence
//! operations recurring events need.

mod notify;
mod view;

pub use notify::Notification;
pub use view::EventInstance;

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use dasi_core::recur::{RecurrenceRule, RecurrenceSet};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::event::{Event, EventDraft};

/// One stored series: the event record plus the dates carved out of it.
///
/// Exclusions never travel with the wire-shaped `Event`; they are
/// series bookkeeping that accumulates as occurrences get detached or
/// deleted individually.
#[derive(Debug, Clone)]
struct SeriesRecord {
    event: Event,
    exdates: BTreeSet<NaiveDate>,
}

impl SeriesRecord {
    fn new(event: Event) -> Self {
        Self {
            event,
            exdates: BTreeSet::new(),
        }
    }

    /// Engine view of this series.
    fn recurrence_set(&self) -> RecurrenceSet {
        RecurrenceSet::new(self.event.date, self.event.repeat)
            .with_exdates(self.exdates.iter().copied())
    }
}

/// ## Summary
/// In-memory event store.
///
/// Series are stored whole: one record per event, recurring or not.
/// Editing or deleting "all occurrences" goes through [`Self::update`]
/// and [`Self::delete`]; editing or deleting a single occurrence goes
/// through [`Self::detach_occurrence`] and [`Self::remove_occurrence`],
/// which carve that date out of the series instead of rewriting it.
#[derive(Debug, Default)]
pub struct EventStore {
    records: HashMap<Uuid, SeriesRecord>,
}

impl EventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events (series count, not occurrence count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// ## Summary
    ///
    /// Validates `draft` and stores it as a new event.
    ///
    /// ## Errors
    ///
    /// Propagates draft validation failures.
    ///
    /// ## Side Effects
    ///
    /// Inserts the event and logs its assigned id.
    pub fn create(&mut self, draft: EventDraft) -> StoreResult<Event> {
        let event = draft.build()?;
        tracing::debug!(id = %event.id, title = %event.title, "Created event");
        self.records.insert(event.id, SeriesRecord::new(event.clone()));
        Ok(event)
    }

    /// Looks up an event by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Event> {
        self.records.get(&id).map(|record| &record.event)
    }

    /// All events in listing order: date, then start time, then title.
    #[must_use]
    pub fn events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.records.values().map(|record| &record.event).collect();
        events.sort_by(|a, b| listing_order(a, b));
        events
    }

    /// ## Summary
    ///
    /// Replaces an event wholesale, keeping its id.
    ///
    /// A replaced series is a new series: its exclusion set is reset,
    /// so occurrences previously detached or deleted reappear if the
    /// new rule generates them.
    ///
    /// ## Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id and propagates
    /// draft validation failures.
    pub fn update(&mut self, id: Uuid, draft: EventDraft) -> StoreResult<Event> {
        if !self.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        let event = draft.build_with_id(id)?;
        tracing::debug!(%id, title = %event.title, "Replaced event");
        self.records.insert(id, SeriesRecord::new(event.clone()));
        Ok(event)
    }

    /// ## Summary
    ///
    /// Deletes an event, and with it every occurrence of a recurring
    /// series.
    ///
    /// ## Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id.
    pub fn delete(&mut self, id: Uuid) -> StoreResult<Event> {
        let record = self.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        tracing::debug!(%id, "Deleted event");
        Ok(record.event)
    }

    /// ## Summary
    ///
    /// The engine view of a stored series: its anchored rule plus every
    /// exclusion accumulated so far.
    #[must_use]
    pub fn recurrence_set(&self, id: Uuid) -> Option<RecurrenceSet> {
        self.records.get(&id).map(SeriesRecord::recurrence_set)
    }

    /// ## Summary
    ///
    /// Detaches one occurrence of a recurring series into a standalone
    /// event (반복 일정 단일 수정).
    ///
    /// The occurrence date is excluded from the series, and `draft`
    /// becomes a brand-new event whose repeat is forced to `none`.
    /// A detached instance never keeps the series cadence, which is
    /// also why its repeat marker disappears in the views.
    ///
    /// ## Errors
    ///
    /// - `StoreError::NotFound` for an unknown id
    /// - `StoreError::NotRecurring` when the event does not repeat
    /// - `StoreError::NoSuchOccurrence` when `date` is not a live
    ///   occurrence of the series
    /// - draft validation failures
    ///
    /// ## Side Effects
    ///
    /// Grows the series' exclusion set and inserts the new event.
    pub fn detach_occurrence(
        &mut self,
        id: Uuid,
        date: NaiveDate,
        draft: EventDraft,
    ) -> StoreResult<Event> {
        let draft = EventDraft {
            repeat: RecurrenceRule::none(),
            ..draft
        };
        // Validate before touching the series so a bad draft leaves it
        // intact.
        let event = draft.build()?;
        self.claim_occurrence(id, date)?;
        tracing::debug!(
            series = %id,
            occurrence = %date,
            detached = %event.id,
            "Detached occurrence into standalone event"
        );
        self.records.insert(event.id, SeriesRecord::new(event.clone()));
        Ok(event)
    }

    /// ## Summary
    ///
    /// Removes one occurrence of a recurring series, leaving the rest
    /// of the series alone (반복 일정 단일 삭제).
    ///
    /// ## Errors
    ///
    /// Same lookup and occurrence conditions as
    /// [`Self::detach_occurrence`].
    pub fn remove_occurrence(&mut self, id: Uuid, date: NaiveDate) -> StoreResult<()> {
        self.claim_occurrence(id, date)?;
        tracing::debug!(series = %id, occurrence = %date, "Removed single occurrence");
        Ok(())
    }

    /// Verifies that `date` is a live occurrence of a recurring series
    /// and adds it to the exclusion set.
    fn claim_occurrence(&mut self, id: Uuid, date: NaiveDate) -> StoreResult<()> {
        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if !record.event.is_recurring() {
            return Err(StoreError::NotRecurring(id));
        }
        if !record.recurrence_set().occurs_on(date) {
            return Err(StoreError::NoSuchOccurrence { id, date });
        }
        record.exdates.insert(date);
        Ok(())
    }

    /// ## Summary
    ///
    /// Events on the same date as `draft` whose times intersect it.
    ///
    /// Overlap is advisory. The editor warns before saving, but the
    /// store never rejects overlapping events. Pass the event's own id
    /// as `exclude` when checking an update.
    #[must_use]
    pub fn find_overlapping(&self, draft: &EventDraft, exclude: Option<Uuid>) -> Vec<&Event> {
        let mut hits: Vec<&Event> = self
            .records
            .values()
            .map(|record| &record.event)
            .filter(|event| {
                exclude.is_none_or(|skip| skip != event.id)
                    && event.date == draft.date
                    && event.start_time < draft.end_time
                    && draft.start_time < event.end_time
            })
            .collect();
        hits.sort_by(|a, b| listing_order(a, b));
        hits
    }
}

/// Stable listing order: date, then start time, then title.
fn listing_order(a: &Event, b: &Event) -> Ordering {
    (a.date, a.start_time, &a.title).cmp(&(b.date, b.start_time, &b.title))
}
