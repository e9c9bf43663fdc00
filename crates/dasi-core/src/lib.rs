//! Pure recurrence domain of the dasi calendar.
//!
//! Everything here is value types and date arithmetic: no storage, no
//! clock, no I/O. The event layer in `dasi-store` builds on these
//! primitives.

pub mod error;
pub mod recur;
