//! Notification window queries.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use super::EventStore;

/// An upcoming-occurrence notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Owning event.
    pub event_id: Uuid,
    /// Occurrence date the notification refers to.
    pub date: NaiveDate,
    /// Display text, e.g. `10분 후 팀 회의 일정이 시작됩니다`.
    pub message: String,
}

impl EventStore {
    /// ## Summary
    ///
    /// Occurrences whose notification window contains `now`, excluding
    /// `(event id, date)` pairs the caller has already notified.
    ///
    /// An occurrence notifies while `0 < start - now <=
    /// notification_time` minutes, compared at second precision so a
    /// start only seconds away still notifies. Notification windows
    /// reach at most one day ahead, so only today's and tomorrow's
    /// occurrences are inspected.
    #[must_use]
    pub fn upcoming_notifications(
        &self,
        now: NaiveDateTime,
        already_notified: &BTreeSet<(Uuid, NaiveDate)>,
    ) -> Vec<Notification> {
        let today = now.date();
        let mut windows = vec![today];
        if let Some(tomorrow) = today.checked_add_days(Days::new(1)) {
            windows.push(tomorrow);
        }

        let mut due: Vec<(NaiveDateTime, Notification)> = Vec::new();
        for record in self.records.values() {
            let event = &record.event;
            let set = record.recurrence_set();
            for &date in &windows {
                if !set.occurs_on(date) {
                    continue;
                }
                if already_notified.contains(&(event.id, date)) {
                    continue;
                }
                let start = date.and_time(event.start_time);
                let lead_seconds = start.signed_duration_since(now).num_seconds();
                if lead_seconds <= 0 || lead_seconds > i64::from(event.notification_time) * 60 {
                    continue;
                }
                let minutes = event.notification_time;
                let title = &event.title;
                due.push((
                    start,
                    Notification {
                        event_id: event.id,
                        date,
                        message: format!("{minutes}분 후 {title} 일정이 시작됩니다"),
                    },
                ));
            }
        }
        due.sort_by(|a, b| (a.0, &a.1.message).cmp(&(b.0, &b.1.message)));
        tracing::trace!(count = due.len(), "Collected due notifications");
        due.into_iter().map(|(_, notification)| notification).collect()
    }
}
