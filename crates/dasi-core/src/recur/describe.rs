//! Human-readable rule summaries.
//!
//! The event list renders a rule as a fixed-format Korean line, e.g.
//! `반복: 3주마다 (종료: 2024-12-01)`. The cadence the summary claims
//! and the cadence `occurs_on` computes read the same fields, so the
//! two cannot drift apart.

use super::rule::{RecurrenceEnd, RecurrenceRule};

impl RecurrenceRule {
    /// Renders the summary line for this rule, or `None` for a
    /// non-repeating rule (one-off events show no repeat line at all).
    ///
    /// The base form is `반복: {interval}{unit}마다` with unit 일, 주,
    /// 월, or 년. An end date appends ` (종료: YYYY-MM-DD)`; a count
    /// appends ` ({count}회)`.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        let unit = self.kind.unit_label()?;
        let mut summary = format!("반복: {}{unit}마다", self.interval);
        match self.end {
            RecurrenceEnd::Never => {}
            RecurrenceEnd::Until(until) => {
                summary.push_str(&format!(" (종료: {until})"));
            }
            RecurrenceEnd::Count(count) => {
                summary.push_str(&format!(" ({count}회)"));
            }
        }
        Some(summary)
    }
}
