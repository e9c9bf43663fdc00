//! Recurrence rules, the occurrence predicate, and series expansion.
//!
//! A [`RecurrenceRule`] is a plain cadence value (kind, interval,
//! termination). Anchoring one at its first occurrence produces a
//! [`RecurrenceSet`], which answers membership queries and expands into
//! concrete dates while honoring per-date exclusions.

mod describe;
mod expand;
mod kind;
mod occurs;
mod rule;

pub use expand::{DEFAULT_MAX_INSTANCES, DateRange, Occurrences, RecurrenceSet};
pub use kind::RepeatKind;
pub use rule::{RecurrenceEnd, RecurrenceRule, RuleDraft};
