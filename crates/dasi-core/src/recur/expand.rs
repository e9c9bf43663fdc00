//! Expansion of anchored rules into concrete occurrence dates.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, Months, NaiveDate};

use super::kind::RepeatKind;
use super::occurs::{months_between, period_date};
use super::rule::{RecurrenceEnd, RecurrenceRule};

/// Maximum number of occurrences a single expansion yields by default.
///
/// This keeps rules with no end date and no count from expanding
/// forever; generation truncates at the cap instead of failing.
pub const DEFAULT_MAX_INSTANCES: usize = 1000;

/// Consecutive invalid periods tolerated before a cadence is treated as
/// exhausted. A live monthly or yearly cadence reaches its next real
/// date within a handful of periods, the worst being a leap-day rule
/// crossing a skipped century leap year; anything far beyond that means
/// the calendar range is over.
const MAX_PERIOD_MISSES: u32 = 64;

/// Half-open calendar date interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First date inside the range.
    pub start: NaiveDate,
    /// First date past the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` (inclusive) to `end` (exclusive).
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The month view window containing `date`: the first of its month
    /// through the first of the next month.
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start.checked_add_months(Months::new(1)).unwrap_or(start);
        Self { start, end }
    }

    /// The week view window containing `date`: Sunday through the
    /// following Sunday.
    #[must_use]
    pub fn week_of(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_sunday());
        let start = date.checked_sub_days(Days::new(back)).unwrap_or(date);
        let end = start.checked_add_days(Days::new(7)).unwrap_or(start);
        Self { start, end }
    }

    /// Tests whether `date` falls inside the range.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// ## Summary
/// A complete recurrence set: a rule anchored at its first occurrence,
/// minus excluded dates.
///
/// Exclusions are series bookkeeping owned by the caller, one entry
/// per occurrence that was detached into a standalone event or deleted
/// on its own. The set itself stays a plain value.
#[derive(Debug, Clone)]
pub struct RecurrenceSet {
    /// First occurrence and reference point of the cadence.
    pub anchor: NaiveDate,
    /// The repeat cadence.
    pub rule: RecurrenceRule,
    /// Occurrence dates removed from the series.
    pub exdates: BTreeSet<NaiveDate>,
    /// Maximum number of instances to generate.
    pub max_instances: usize,
}

impl RecurrenceSet {
    /// Creates a recurrence set with no exclusions.
    #[must_use]
    pub fn new(anchor: NaiveDate, rule: RecurrenceRule) -> Self {
        Self {
            anchor,
            rule,
            exdates: BTreeSet::new(),
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }

    /// Excludes a single occurrence date.
    #[must_use]
    pub fn with_exdate(mut self, exdate: NaiveDate) -> Self {
        self.exdates.insert(exdate);
        self
    }

    /// Excludes every date yielded by `exdates`.
    #[must_use]
    pub fn with_exdates<I>(mut self, exdates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.exdates.extend(exdates);
        self
    }

    /// Sets the maximum number of instances.
    #[must_use]
    pub fn with_max_instances(mut self, max: usize) -> Self {
        self.max_instances = max;
        self
    }

    /// Tests whether the series still has an occurrence on `candidate`,
    /// i.e. the rule fires there and the date was not excluded.
    #[must_use]
    pub fn occurs_on(&self, candidate: NaiveDate) -> bool {
        !self.exdates.contains(&candidate) && self.rule.occurs_on(self.anchor, candidate)
    }

    /// ## Summary
    /// Expands the series into ascending occurrence dates.
    ///
    /// With a range, only dates inside the half-open `[start, end)`
    /// window are returned, and cadences without a count bound seek
    /// straight to the window instead of walking from the anchor, so
    /// views far in the future stay populated. Count-bounded series
    /// always generate from the anchor to keep their ordinals.
    /// Truncates at `max_instances`.
    #[must_use]
    pub fn expand(&self, range: Option<&DateRange>) -> Vec<NaiveDate> {
        match range {
            Some(range) => self
                .iter_from(range.start)
                .take_while(|date| *date < range.end)
                .filter(|date| *date >= range.start)
                .collect(),
            None => self.iter().collect(),
        }
    }

    /// Lazy iterator over the series' live occurrences, ascending, at
    /// most `max_instances` of them.
    #[must_use]
    pub fn iter(&self) -> Occurrences<'_> {
        Occurrences {
            set: self,
            period: 0,
            occurred: 0,
            emitted: 0,
            misses: 0,
        }
    }

    /// Iterator skipped ahead so that dates before `start` are not
    /// generated. Count-bounded series always walk from the anchor:
    /// their ordinals are anchored there, and jumping ahead would
    /// miscount them.
    fn iter_from(&self, start: NaiveDate) -> Occurrences<'_> {
        let mut occurrences = self.iter();
        if !matches!(self.rule.end, RecurrenceEnd::Count(_)) {
            occurrences.period = self.seek_period(start);
        }
        occurrences
    }

    /// Cadence period from which an ascending walk reaches every
    /// occurrence on or after `start`: at most one period early, never
    /// past the first candidate.
    fn seek_period(&self, start: NaiveDate) -> u64 {
        if start <= self.anchor {
            return 0;
        }
        let interval = u64::from(self.rule.interval.get());
        match self.rule.kind {
            RepeatKind::None => 0,
            RepeatKind::Daily => {
                let days = u64::try_from(start.signed_duration_since(self.anchor).num_days())
                    .unwrap_or(0);
                days / interval
            }
            RepeatKind::Weekly => {
                let days = u64::try_from(start.signed_duration_since(self.anchor).num_days())
                    .unwrap_or(0);
                days / (interval * 7)
            }
            RepeatKind::Monthly => {
                let months = u64::try_from(months_between(self.anchor, start)).unwrap_or(0);
                months / interval
            }
            RepeatKind::Yearly => {
                let years = u64::try_from(i64::from(start.year()) - i64::from(self.anchor.year()))
                    .unwrap_or(0);
                years / interval
            }
        }
    }
}

impl<'a> IntoIterator for &'a RecurrenceSet {
    type Item = NaiveDate;
    type IntoIter = Occurrences<'a>;

    fn into_iter(self) -> Occurrences<'a> {
        self.iter()
    }
}

/// Iterator over the live occurrence dates of a [`RecurrenceSet`].
#[derive(Debug)]
pub struct Occurrences<'a> {
    set: &'a RecurrenceSet,
    /// Next cadence period to inspect.
    period: u64,
    /// Rule occurrences generated so far, exclusions included; this is
    /// what a count bound consumes.
    occurred: u64,
    /// Dates actually yielded; this is what `max_instances` bounds.
    emitted: usize,
    /// Consecutive periods without a valid date.
    misses: u32,
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.emitted >= self.set.max_instances {
            return None;
        }
        let rule = self.set.rule;
        loop {
            if let RecurrenceEnd::Count(count) = rule.end
                && self.occurred >= u64::from(count.get())
            {
                return None;
            }
            let Some(date) =
                period_date(rule.kind, self.set.anchor, rule.interval.get(), self.period)
            else {
                // Monthly and yearly cadences skip periods lacking the
                // anchor day; any other miss means the cadence is done.
                if !matches!(rule.kind, RepeatKind::Monthly | RepeatKind::Yearly) {
                    return None;
                }
                self.misses += 1;
                if self.misses > MAX_PERIOD_MISSES {
                    return None;
                }
                self.period += 1;
                continue;
            };
            self.misses = 0;
            if let RecurrenceEnd::Until(until) = rule.end
                && date > until
            {
                return None;
            }
            self.period += 1;
            self.occurred += 1;
            if self.set.exdates.contains(&date) {
                continue;
            }
            self.emitted += 1;
            return Some(date);
        }
    }
}
