//! Event records and the in-memory series store of the dasi calendar.
//!
//! The store keeps whole series (one record per event) and layers the
//! single-occurrence operations (detach, remove) on top of the
//! recurrence engine's exclusion sets. View queries expand series into
//! dated instances; nothing here touches the network or a clock.

pub mod error;
pub mod event;
pub mod store;
