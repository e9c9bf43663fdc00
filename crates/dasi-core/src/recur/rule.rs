//! Recurrence rule value type and its validating constructors.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

use super::kind::RepeatKind;

/// Termination of a recurrence rule.
///
/// End-by-date and end-after-count are mutually exclusive, so they are
/// one enum rather than two optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurrenceEnd {
    /// The series never ends on its own.
    #[default]
    Never,
    /// Last possible occurrence date (inclusive).
    Until(NaiveDate),
    /// Total number of occurrences, the anchor date being the first.
    Count(NonZeroU32),
}

/// A repeat cadence: kind, interval, and termination.
///
/// `interval >= 1` is carried by the type; a rule can never represent
/// "every 0 days". Rules are plain values. Anchoring one to a start
/// date happens in [`super::RecurrenceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleWire", into = "RuleWire")]
pub struct RecurrenceRule {
    /// Cadence kind.
    pub kind: RepeatKind,
    /// How many units make up one step (every N days/weeks/months/years).
    pub interval: NonZeroU32,
    /// When the series stops.
    pub end: RecurrenceEnd,
}

impl RecurrenceRule {
    /// Creates a non-repeating rule.
    #[must_use]
    pub fn none() -> Self {
        Self {
            kind: RepeatKind::None,
            interval: NonZeroU32::MIN,
            end: RecurrenceEnd::Never,
        }
    }

    /// Creates a daily rule with interval 1 and no end.
    #[must_use]
    pub fn daily() -> Self {
        Self {
            kind: RepeatKind::Daily,
            ..Self::none()
        }
    }

    /// Creates a weekly rule with interval 1 and no end.
    #[must_use]
    pub fn weekly() -> Self {
        Self {
            kind: RepeatKind::Weekly,
            ..Self::none()
        }
    }

    /// Creates a monthly rule with interval 1 and no end.
    #[must_use]
    pub fn monthly() -> Self {
        Self {
            kind: RepeatKind::Monthly,
            ..Self::none()
        }
    }

    /// Creates a yearly rule with interval 1 and no end.
    #[must_use]
    pub fn yearly() -> Self {
        Self {
            kind: RepeatKind::Yearly,
            ..Self::none()
        }
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: NonZeroU32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets an end date, replacing any previous termination.
    #[must_use]
    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.end = RecurrenceEnd::Until(until);
        self
    }

    /// Sets an occurrence count, replacing any previous termination.
    #[must_use]
    pub fn with_count(mut self, count: NonZeroU32) -> Self {
        self.end = RecurrenceEnd::Count(count);
        self
    }

    /// Returns true for every kind except `none`.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.kind.is_recurring()
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::none()
    }
}

/// Wire shape of a rule: the `repeat` object of an event payload.
///
/// `endDate` and `count` are both plain optionals here; converting into
/// [`RecurrenceRule`] enforces their mutual exclusion. The app stores
/// `{"type": "none", "interval": 0}` for one-off events, so a zero
/// interval is tolerated exactly when the kind is `none`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleWire {
    #[serde(rename = "type")]
    kind: RepeatKind,
    interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
}

impl From<RecurrenceRule> for RuleWire {
    fn from(rule: RecurrenceRule) -> Self {
        let (end_date, count) = match rule.end {
            RecurrenceEnd::Never => (None, None),
            RecurrenceEnd::Until(until) => (Some(until), None),
            RecurrenceEnd::Count(count) => (None, Some(count.get())),
        };
        Self {
            kind: rule.kind,
            interval: rule.interval.get(),
            end_date,
            count,
        }
    }
}

impl TryFrom<RuleWire> for RecurrenceRule {
    type Error = CoreError;

    fn try_from(wire: RuleWire) -> Result<Self, Self::Error> {
        let count = match wire.count {
            None => None,
            Some(count) => Some(NonZeroU32::new(count).ok_or_else(|| {
                CoreError::InvalidInput("repeat count must be at least 1".into())
            })?),
        };
        RuleDraft {
            enabled: wire.kind.is_recurring(),
            kind: wire.kind,
            interval: wire.interval,
            until: wire.end_date,
            count,
        }
        .build()
    }
}

/// Editor state for the repeat section of the event form, prior to
/// validation.
///
/// `enabled` mirrors the 반복 일정 checkbox: while it is off the other
/// repeat fields stay in the form but are ignored, and building always
/// yields the non-repeating rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDraft {
    /// Whether the repeat checkbox is checked.
    pub enabled: bool,
    /// Selected 반복 유형.
    pub kind: RepeatKind,
    /// Entered 반복 간격; unvalidated, so zero is representable.
    pub interval: u32,
    /// Entered 반복 종료일.
    pub until: Option<NaiveDate>,
    /// Entered occurrence count.
    pub count: Option<NonZeroU32>,
}

impl RuleDraft {
    /// Creates a draft with the repeat checkbox unchecked.
    #[must_use]
    pub fn not_repeating() -> Self {
        Self {
            enabled: false,
            kind: RepeatKind::None,
            interval: 1,
            until: None,
            count: None,
        }
    }

    /// Creates a draft with the checkbox checked and a cadence selected.
    #[must_use]
    pub fn repeating(kind: RepeatKind, interval: u32) -> Self {
        Self {
            enabled: true,
            kind,
            interval,
            until: None,
            count: None,
        }
    }

    /// Sets the end date.
    #[must_use]
    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    /// Sets the occurrence count.
    #[must_use]
    pub fn with_count(mut self, count: NonZeroU32) -> Self {
        self.count = Some(count);
        self
    }

    /// ## Summary
    ///
    /// Validates the draft into a [`RecurrenceRule`].
    ///
    /// A disabled draft builds the non-repeating rule no matter what the
    /// other fields say, matching how the form keeps stale values around
    /// while their inputs are disabled.
    ///
    /// ## Errors
    ///
    /// Returns `CoreError::ValidationError` when repeat is enabled with
    /// kind `none`, when the interval is zero, or when both an end date
    /// and a count are set.
    pub fn build(self) -> CoreResult<RecurrenceRule> {
        if !self.enabled {
            return Ok(RecurrenceRule::none());
        }
        if self.kind == RepeatKind::None {
            return Err(CoreError::ValidationError(
                "repeat is enabled but no repeat type is selected".into(),
            ));
        }
        let interval = NonZeroU32::new(self.interval).ok_or_else(|| {
            CoreError::ValidationError("repeat interval must be at least 1".into())
        })?;
        let end = match (self.until, self.count) {
            (Some(_), Some(_)) => {
                return Err(CoreError::ValidationError(
                    "repeat end date and count are mutually exclusive".into(),
                ));
            }
            (Some(until), None) => RecurrenceEnd::Until(until),
            (None, Some(count)) => RecurrenceEnd::Count(count),
            (None, None) => RecurrenceEnd::Never,
        };
        Ok(RecurrenceRule {
            kind: self.kind,
            interval,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).expect("nonzero")
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn builders_set_cadence() {
        let rule = RecurrenceRule::weekly()
            .with_interval(nz(3))
            .with_until(ymd(2024, 12, 1));
        assert_eq!(rule.kind, RepeatKind::Weekly);
        assert_eq!(rule.interval.get(), 3);
        assert_eq!(rule.end, RecurrenceEnd::Until(ymd(2024, 12, 1)));
    }

    #[test]
    fn with_count_replaces_until() {
        let rule = RecurrenceRule::daily()
            .with_until(ymd(2025, 4, 1))
            .with_count(nz(3));
        assert_eq!(rule.end, RecurrenceEnd::Count(nz(3)));
    }

    #[test]
    fn draft_disabled_builds_none() {
        let draft = RuleDraft {
            interval: 0,
            until: Some(ymd(2024, 12, 1)),
            ..RuleDraft::not_repeating()
        };
        let rule = draft.build().expect("disabled draft always builds");
        assert_eq!(rule, RecurrenceRule::none());
    }

    #[test]
    fn draft_enabled_without_kind_is_rejected() {
        let draft = RuleDraft::repeating(RepeatKind::None, 1);
        assert!(draft.build().is_err());
    }

    #[test]
    fn draft_zero_interval_is_rejected() {
        let draft = RuleDraft::repeating(RepeatKind::Daily, 0);
        assert!(draft.build().is_err());
    }

    #[test]
    fn draft_until_and_count_are_exclusive() {
        let draft = RuleDraft::repeating(RepeatKind::Weekly, 1)
            .with_until(ymd(2025, 4, 1))
            .with_count(nz(3));
        assert!(draft.build().is_err());
    }

    #[test]
    fn wire_deserializes_weekly_with_end_date() {
        let rule: RecurrenceRule = serde_json::from_value(serde_json::json!({
            "type": "weekly",
            "interval": 3,
            "endDate": "2024-12-01",
        }))
        .expect("valid wire rule");
        assert_eq!(
            rule,
            RecurrenceRule::weekly()
                .with_interval(nz(3))
                .with_until(ymd(2024, 12, 1))
        );
    }

    #[test]
    fn wire_tolerates_zero_interval_for_none() {
        // Stored one-off events carry {"type": "none", "interval": 0}.
        let rule: RecurrenceRule = serde_json::from_value(serde_json::json!({
            "type": "none",
            "interval": 0,
        }))
        .expect("legacy none rule");
        assert_eq!(rule, RecurrenceRule::none());
    }

    #[test]
    fn wire_rejects_zero_interval_for_recurring() {
        let result: Result<RecurrenceRule, _> = serde_json::from_value(serde_json::json!({
            "type": "daily",
            "interval": 0,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn wire_rejects_end_date_with_count() {
        let result: Result<RecurrenceRule, _> = serde_json::from_value(serde_json::json!({
            "type": "monthly",
            "interval": 1,
            "endDate": "2025-04-01",
            "count": 3,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn wire_serializes_without_absent_fields() {
        let json =
            serde_json::to_value(RecurrenceRule::daily().with_interval(nz(2))).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({ "type": "daily", "interval": 2 })
        );
    }

    #[test]
    fn wire_serializes_count() {
        let json = serde_json::to_value(RecurrenceRule::monthly().with_count(nz(3)))
            .expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({ "type": "monthly", "interval": 1, "count": 3 })
        );
    }
}
