//! Event records and their validating drafts.

use chrono::{NaiveDate, NaiveTime};
use dasi_core::recur::{RecurrenceEnd, RecurrenceRule};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

use super::category::EventCategory;

/// Times go over the wire as `HH:MM`, matching the form's time inputs.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    // serde `with` passes fields by reference.
    #[expect(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A stored calendar event.
///
/// For recurring events this is the whole series: `date` is the anchor
/// (first occurrence) and `repeat` the cadence. Records are replaced
/// wholesale on edit; per-occurrence state lives in the store, not
/// here, so the wire shape stays what the client already speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// 제목
    pub title: String,
    /// Anchor date; the first occurrence for recurring events.
    pub date: NaiveDate,
    /// 시작 시간
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// 종료 시간
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// 설명
    pub description: String,
    /// 위치
    pub location: String,
    /// 카테고리
    pub category: EventCategory,
    /// Repeat cadence; `none` for one-off events.
    pub repeat: RecurrenceRule,
    /// Minutes before the start time at which to notify.
    pub notification_time: u32,
}

impl Event {
    /// Returns true when the event repeats.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.repeat.is_recurring()
    }
}

/// Insertion/update shape of an event: everything but the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub description: String,
    pub location: String,
    pub category: EventCategory,
    pub repeat: RecurrenceRule,
    /// Defaults to the form's preselected 10 minutes when omitted.
    #[serde(default = "default_notification_time")]
    pub notification_time: u32,
}

fn default_notification_time() -> u32 {
    10
}

impl EventDraft {
    /// ## Summary
    ///
    /// Validates the draft and materializes it as a new event with a
    /// fresh id.
    ///
    /// ## Errors
    ///
    /// Returns `StoreError::ValidationError` when the title is blank,
    /// the start time is not before the end time, or the repeat end
    /// date lies before the event date.
    pub fn build(self) -> StoreResult<Event> {
        self.build_with_id(Uuid::new_v4())
    }

    pub(crate) fn build_with_id(self, id: Uuid) -> StoreResult<Event> {
        self.validate()?;
        Ok(Event {
            id,
            title: self.title,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description,
            location: self.location,
            category: self.category,
            repeat: self.repeat,
            notification_time: self.notification_time,
        })
    }

    fn validate(&self) -> StoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(StoreError::ValidationError("title is required".into()));
        }
        if self.start_time >= self.end_time {
            return Err(StoreError::ValidationError(
                "start time must be before end time".into(),
            ));
        }
        if let RecurrenceEnd::Until(until) = self.repeat.end
            && until < self.date
        {
            return Err(StoreError::ValidationError(
                "repeat end date must not be before the event date".into(),
            ));
        }
        Ok(())
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            description: event.description.clone(),
            location: event.location.clone(),
            category: event.category,
            repeat: event.repeat,
            notification_time: event.notification_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    fn meeting_draft() -> EventDraft {
        EventDraft {
            title: "새 회의".into(),
            date: ymd(2024, 10, 15),
            start_time: hm(14, 0),
            end_time: hm(15, 0),
            description: "프로젝트 진행 상황 논의".into(),
            location: "회의실 A".into(),
            category: EventCategory::Work,
            repeat: RecurrenceRule::none(),
            notification_time: 10,
        }
    }

    #[test]
    fn build_assigns_a_fresh_id() {
        let first = meeting_draft().build().expect("valid draft");
        let second = meeting_draft().build().expect("valid draft");
        assert_ne!(first.id, second.id);
        assert_eq!(first.title, "새 회의");
    }

    #[test]
    fn blank_title_is_rejected() {
        let draft = EventDraft {
            title: "   ".into(),
            ..meeting_draft()
        };
        assert!(draft.build().is_err());
    }

    #[test]
    fn start_must_precede_end() {
        let draft = EventDraft {
            start_time: hm(15, 0),
            end_time: hm(14, 0),
            ..meeting_draft()
        };
        assert!(draft.build().is_err());

        let zero_length = EventDraft {
            start_time: hm(14, 0),
            end_time: hm(14, 0),
            ..meeting_draft()
        };
        assert!(zero_length.build().is_err());
    }

    #[test]
    fn repeat_end_before_event_date_is_rejected() {
        let draft = EventDraft {
            repeat: RecurrenceRule::weekly().with_until(ymd(2024, 10, 1)),
            ..meeting_draft()
        };
        assert!(draft.build().is_err());
    }

    #[test]
    fn repeat_end_on_event_date_is_allowed() {
        let draft = EventDraft {
            repeat: RecurrenceRule::weekly().with_until(ymd(2024, 10, 15)),
            ..meeting_draft()
        };
        assert!(draft.build().is_ok());
    }

    #[test]
    fn draft_deserializes_the_form_payload() {
        let draft: EventDraft = serde_json::from_value(serde_json::json!({
            "title": "새 회의",
            "date": "2024-10-15",
            "startTime": "14:00",
            "endTime": "15:00",
            "description": "프로젝트 진행 상황 논의",
            "location": "회의실 A",
            "category": "업무",
            "repeat": { "type": "weekly", "interval": 3, "endDate": "2024-12-01" },
        }))
        .expect("valid payload");
        assert_eq!(draft.start_time, hm(14, 0));
        assert_eq!(draft.category, EventCategory::Work);
        // notificationTime was omitted; the form default applies.
        assert_eq!(draft.notification_time, 10);
        assert_eq!(
            draft.repeat,
            RecurrenceRule::weekly()
                .with_interval(NonZeroU32::new(3).expect("nonzero"))
                .with_until(ymd(2024, 12, 1))
        );
    }

    #[test]
    fn event_serializes_times_as_hh_mm() {
        let event = meeting_draft().build().expect("valid draft");
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(json["startTime"], "14:00");
        assert_eq!(json["endTime"], "15:00");
        assert_eq!(json["category"], "업무");
        assert_eq!(json["repeat"], serde_json::json!({ "type": "none", "interval": 1 }));
    }

    #[test]
    fn event_round_trips_through_the_wire_shape() {
        let event = meeting_draft().build().expect("valid draft");
        let json = serde_json::to_string(&event).expect("serializes");
        let back: Event = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, event);
    }
}
