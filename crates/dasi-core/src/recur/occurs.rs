//! Occurrence arithmetic: deciding whether a rule fires on a date.

use chrono::{Datelike, Days, NaiveDate};

use super::kind::RepeatKind;
use super::rule::{RecurrenceEnd, RecurrenceRule};

impl RecurrenceRule {
    /// Tests whether `candidate` is an occurrence of this rule anchored
    /// at `anchor`.
    ///
    /// The anchor is always the first occurrence. Dates before the
    /// anchor never match; dates past an end date never match, whatever
    /// the cadence arithmetic says. A count bound admits the first N
    /// occurrences only, and months or years that lack the anchor day
    /// (a 31st in a 30-day month, Feb 29 outside leap years) are
    /// skipped without consuming any of that count.
    #[must_use]
    pub fn occurs_on(&self, anchor: NaiveDate, candidate: NaiveDate) -> bool {
        if candidate < anchor {
            return false;
        }
        if let RecurrenceEnd::Until(until) = self.end
            && candidate > until
        {
            return false;
        }
        let Some(ordinal) = self.occurrence_index(anchor, candidate) else {
            return false;
        };
        match self.end {
            RecurrenceEnd::Count(count) => ordinal < u64::from(count.get()),
            RecurrenceEnd::Never | RecurrenceEnd::Until(_) => true,
        }
    }

    /// Zero-based ordinal of `candidate` within the unbounded cadence,
    /// or `None` when the date is off-cadence. Termination is not
    /// applied here.
    fn occurrence_index(&self, anchor: NaiveDate, candidate: NaiveDate) -> Option<u64> {
        let interval = u64::from(self.interval.get());
        match self.kind {
            RepeatKind::None => (candidate == anchor).then_some(0),
            RepeatKind::Daily => {
                let days = u64::try_from(candidate.signed_duration_since(anchor).num_days()).ok()?;
                (days % interval == 0).then(|| days / interval)
            }
            RepeatKind::Weekly => {
                let days = u64::try_from(candidate.signed_duration_since(anchor).num_days()).ok()?;
                let step = interval * 7;
                (days % step == 0).then(|| days / step)
            }
            RepeatKind::Monthly => {
                if candidate.day() != anchor.day() {
                    return None;
                }
                let months = u64::try_from(months_between(anchor, candidate)).ok()?;
                if months % interval != 0 {
                    return None;
                }
                Some(occurrences_before(
                    self.kind,
                    anchor,
                    self.interval.get(),
                    months / interval,
                ))
            }
            RepeatKind::Yearly => {
                if candidate.month() != anchor.month() || candidate.day() != anchor.day() {
                    return None;
                }
                let years =
                    u64::try_from(i64::from(candidate.year()) - i64::from(anchor.year())).ok()?;
                if years % interval != 0 {
                    return None;
                }
                Some(occurrences_before(
                    self.kind,
                    anchor,
                    self.interval.get(),
                    years / interval,
                ))
            }
        }
    }
}

/// Whole months from `from` to `to`, ignoring the day component.
pub(super) fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (i64::from(to.year()) - i64::from(from.year())) * 12 + i64::from(to.month0())
        - i64::from(from.month0())
}

/// Number of periods in `0..period` that produce a real date, which is
/// the zero-based ordinal of the occurrence at `period` once skipped
/// months and years are discounted.
fn occurrences_before(kind: RepeatKind, anchor: NaiveDate, interval: u32, period: u64) -> u64 {
    (0..period)
        .map(|k| u64::from(period_date(kind, anchor, interval, k).is_some()))
        .sum()
}

/// Calendar date of cadence period `period` for a rule anchored at
/// `anchor`, with period 0 being the anchor itself.
///
/// Monthly and yearly cadences return `None` for periods whose month or
/// year lacks the anchor day; the occurrence is skipped, never rolled
/// over to a neighboring day. Any kind returns `None` once the date
/// leaves the supported calendar range.
pub(super) fn period_date(
    kind: RepeatKind,
    anchor: NaiveDate,
    interval: u32,
    period: u64,
) -> Option<NaiveDate> {
    match kind {
        RepeatKind::None => (period == 0).then_some(anchor),
        RepeatKind::Daily => {
            let days = period.checked_mul(u64::from(interval))?;
            anchor.checked_add_days(Days::new(days))
        }
        RepeatKind::Weekly => {
            let days = period.checked_mul(u64::from(interval))?.checked_mul(7)?;
            anchor.checked_add_days(Days::new(days))
        }
        RepeatKind::Monthly => {
            let months = i64::try_from(period.checked_mul(u64::from(interval))?).ok()?;
            let total = i64::from(anchor.year()) * 12 + i64::from(anchor.month0()) + months;
            let year = i32::try_from(total.div_euclid(12)).ok()?;
            let month0 = u32::try_from(total.rem_euclid(12)).ok()?;
            NaiveDate::from_ymd_opt(year, month0 + 1, anchor.day())
        }
        RepeatKind::Yearly => {
            let years = i64::try_from(period.checked_mul(u64::from(interval))?).ok()?;
            let year = i32::try_from(i64::from(anchor.year()).checked_add(years)?).ok()?;
            NaiveDate::from_ymd_opt(year, anchor.month(), anchor.day())
        }
    }
}
